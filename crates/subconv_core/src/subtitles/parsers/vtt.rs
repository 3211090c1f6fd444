//! WebVTT subtitle parser.
//!
//! ```text
//! WEBVTT Optional header text
//! X-TIMESTAMP-MAP=MPEGTS:900000,LOCAL:00:00:00.000
//!
//! NOTE comments, STYLE and REGION blocks are skipped
//!
//! intro
//! 00:01.000 --> 00:04.000 align:start position:10%
//! Hello, <i>world</i>!
//! ```
//!
//! Cue identifiers and cue settings are not kept.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::srt::html_to_substation;
use crate::subtitles::types::{LoadOptions, SubtitleData, SubtitleEvent, SubtitleFormat};

/// `[HH:]MM:SS.mmm`
static VTT_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:(\d+):)?(\d{2}):(\d{2})\.(\d{3})").expect("invalid vtt timestamp regex")
});

/// Metadata key for the text after `WEBVTT` on the first line.
pub const HEADER_TEXT_KEY: &str = "VTTHeaderText";
/// Metadata key for the HLS `X-TIMESTAMP-MAP` header.
pub const TIMESTAMP_MAP_KEY: &str = "VTTXTimestampMap";

const SKIPPED_BLOCKS: [&str; 3] = ["NOTE", "STYLE", "REGION"];

/// Parse WebVTT content into SubtitleData.
pub fn parse_vtt(content: &str, options: &LoadOptions) -> SubtitleData {
    let mut data = SubtitleData::with_format(SubtitleFormat::WebVtt);
    let normalized = content.replace("\r\n", "\n");

    for (index, block) in normalized.split("\n\n").enumerate() {
        let lines: Vec<&str> = block.lines().filter(|l| !l.trim().is_empty()).collect();
        let Some(first) = lines.first() else {
            continue;
        };

        if index == 0 && first.trim_start().starts_with("WEBVTT") {
            parse_header(&lines, &mut data);
            continue;
        }
        if SKIPPED_BLOCKS.iter().any(|kind| first.starts_with(kind)) {
            continue;
        }

        // Optional identifier before the timing line
        let Some(timing_idx) = lines.iter().take(2).position(|l| l.contains("-->")) else {
            tracing::debug!("[WebVTT] Skipping block without timing: {:?}", first);
            continue;
        };
        let Some((start_ms, end_ms)) = parse_timing_line(lines[timing_idx]) else {
            continue;
        };

        let text = lines[timing_idx + 1..].join("\n");
        data.events.push(SubtitleEvent::new(
            start_ms,
            end_ms,
            html_to_substation(text.trim(), options),
        ));
    }

    tracing::debug!("[WebVTT] Parsed {} events", data.events.len());

    data
}

fn parse_header(lines: &[&str], data: &mut SubtitleData) {
    let header_text = lines[0].trim_start().trim_start_matches("WEBVTT").trim();
    if !header_text.is_empty() {
        data.metadata.set_custom(HEADER_TEXT_KEY, header_text);
    }
    for line in &lines[1..] {
        if let Some(map) = line.trim().strip_prefix("X-TIMESTAMP-MAP=") {
            data.metadata.set_custom(TIMESTAMP_MAP_KEY, map.trim());
        }
    }
}

/// Parse `start --> end [settings]`.
fn parse_timing_line(line: &str) -> Option<(i64, i64)> {
    let (start, end) = line.split_once("-->")?;
    let start = vtt_timestamp_to_ms(&VTT_TIMESTAMP.captures(start)?)?;
    let end = vtt_timestamp_to_ms(&VTT_TIMESTAMP.captures(end)?)?;
    Some((start, end))
}

fn vtt_timestamp_to_ms(caps: &Captures<'_>) -> Option<i64> {
    let h: i64 = match caps.get(1) {
        Some(h) => h.as_str().parse().ok()?,
        None => 0,
    };
    let m: i64 = caps[2].parse().ok()?;
    let s: i64 = caps[3].parse().ok()?;
    let ms: i64 = caps[4].parse().ok()?;
    Some(h * 3_600_000 + m * 60_000 + s * 1000 + ms)
}
