//! Subtitle parsers for various formats.
//!
//! Each parser is a pure function that takes content and returns `SubtitleData`.

mod ass;
mod json;
mod microdvd;
mod mpl2;
mod srt;
mod tmp;
mod vtt;

pub use ass::parse_ass;
pub use json::parse_json;
pub use microdvd::parse_microdvd;
pub use mpl2::parse_mpl2;
pub use srt::parse_srt;
pub use tmp::parse_tmp;
pub use vtt::{parse_vtt, HEADER_TEXT_KEY, TIMESTAMP_MAP_KEY};

use crate::subtitles::error::{SubtitleError, SubtitleResult};
use crate::subtitles::time::TIMESTAMP;
use crate::subtitles::types::{LoadOptions, SubtitleData, SubtitleFormat};

/// Parse subtitle content.
///
/// Uses `options.format` when set, otherwise detects the format from the
/// content. A leading byte order mark is ignored.
pub fn parse_content(content: &str, options: &LoadOptions) -> SubtitleResult<SubtitleData> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let format = match options.format {
        Some(format) => format,
        None => detect_format(content).ok_or(SubtitleError::UndetectedFormat)?,
    };
    tracing::debug!("[Parser] Reading content as {}", format);

    let data = match format {
        SubtitleFormat::Ass | SubtitleFormat::Ssa => parse_ass(content)?,
        SubtitleFormat::Srt => parse_srt(content, options),
        SubtitleFormat::WebVtt => parse_vtt(content, options),
        SubtitleFormat::MicroDvd => parse_microdvd(content, options)?,
        SubtitleFormat::Tmp => parse_tmp(content),
        SubtitleFormat::Mpl2 => parse_mpl2(content),
        SubtitleFormat::Json => parse_json(content)?,
    };

    Ok(data)
}

/// Detect subtitle format from content.
///
/// Checks JSON, SubStation, WebVTT, SubRip, MicroDVD, MPL2 and TMP in that
/// order and returns the first match.
pub fn detect_format(content: &str) -> Option<SubtitleFormat> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let trimmed = content.trim_start();

    if trimmed.starts_with("{\"") {
        return Some(SubtitleFormat::Json);
    }

    let content_lower = content.to_lowercase();
    if content_lower.contains("[script info]")
        || content_lower.contains("[v4+ styles]")
        || content_lower.contains("[v4 styles]")
        || content_lower.contains("[events]")
    {
        let is_ssa = content_lower.contains("[v4 styles]")
            || content_lower.lines().any(|line| {
                line.trim()
                    .strip_prefix("scripttype:")
                    .is_some_and(|value| value.trim() == "v4.00")
            });
        return Some(if is_ssa {
            SubtitleFormat::Ssa
        } else {
            SubtitleFormat::Ass
        });
    }

    if trimmed.starts_with("WEBVTT") {
        return Some(SubtitleFormat::WebVtt);
    }

    if content.contains("-->")
        && content
            .lines()
            .any(|line| TIMESTAMP.find_iter(line).count() == 2)
    {
        return Some(SubtitleFormat::Srt);
    }

    if content.lines().any(|line| microdvd::MICRODVD_LINE.is_match(line)) {
        return Some(SubtitleFormat::MicroDvd);
    }

    if mpl2::MPL2_LINE.is_match(content) {
        return Some(SubtitleFormat::Mpl2);
    }

    if content.lines().any(|line| tmp::TMP_LINE.is_match(line)) {
        return Some(SubtitleFormat::Tmp);
    }

    None
}
