//! SRT subtitle parser.
//!
//! Parses SubRip (.srt) subtitle files.
//!
//! # Format Overview
//!
//! SRT files consist of sequential entries:
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:04,000
//! Hello, world!
//!
//! 2
//! 00:00:05,000 --> 00:00:08,000
//! This is a test.
//! ```
//!
//! Each entry has:
//! - Index number (ignored during parsing, regenerated on write)
//! - Timing line: `HH:MM:SS,mmm --> HH:MM:SS,mmm`
//! - One or more lines of text
//! - Blank line separator
//!
//! Parsing is driven by timing lines rather than blank lines, so entries
//! with missing indices or extra blank lines inside the text still load.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::subtitles::time::{timestamp_to_ms, TIMESTAMP};
use crate::subtitles::types::{LoadOptions, SubtitleData, SubtitleEvent, SubtitleFormat};

/// Known HTML-style formatting tags, with an optional WebVTT class suffix.
static FORMATTING_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)< *(/)? *([ibus])(?:\.[^>\s]*)? *>").expect("invalid formatting tag regex")
});

/// Any other HTML-style tag (`<font color="red">`, `</xyz>`).
static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"< */? *[a-zA-Z][^>]*>").expect("invalid html tag regex"));

/// Index of the following entry, left at the end of the collected text.
static TRAILING_INDEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n+ *\d+ *$").expect("invalid trailing index regex"));

static INDEX_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s*$").expect("invalid index line regex"));

/// Parse SRT content into SubtitleData.
///
/// A line containing two timestamps starts an entry; every line up to the
/// next timing line belongs to it.
pub fn parse_srt(content: &str, options: &LoadOptions) -> SubtitleData {
    let mut data = SubtitleData::with_format(SubtitleFormat::Srt);
    let mut cues: Vec<(i64, i64, Vec<&str>)> = Vec::new();

    for line in content.lines() {
        match parse_timing_line(line) {
            Some((start, end)) => cues.push((start, end, Vec::new())),
            None => {
                if let Some((_, _, lines)) = cues.last_mut() {
                    lines.push(line);
                }
            }
        }
    }

    for (start_ms, end_ms, lines) in cues {
        let text = prepare_text(&lines, options);
        data.events.push(SubtitleEvent::new(start_ms, end_ms, text));
    }

    tracing::debug!("[SRT] Parsed {} events", data.events.len());

    data
}

/// Parse a timing line: exactly two timestamps, any separator.
fn parse_timing_line(line: &str) -> Option<(i64, i64)> {
    let stamps: Vec<i64> = TIMESTAMP
        .captures_iter(line)
        .filter_map(|caps| timestamp_to_ms(&caps))
        .collect();

    match stamps.as_slice() {
        [start, end] => Some((*start, *end)),
        _ => None,
    }
}

/// Build event text from the lines following a timing line.
fn prepare_text(lines: &[&str], options: &LoadOptions) -> String {
    // Empty entry directly followed by the next index
    if let [blank @ .., last] = lines {
        if !blank.is_empty()
            && blank.iter().all(|l| l.trim().is_empty())
            && INDEX_LINE.is_match(last)
        {
            return String::new();
        }
    }

    let joined = lines.join("\n");
    let text = TRAILING_INDEX.replace(joined.trim(), "");
    html_to_substation(&text, options)
}

/// Convert HTML-style markup to SubStation override tags.
///
/// `<i>`, `<b>`, `<u>`, `<s>` and their closing forms become `{\i1}`/`{\i0}`
/// and so on; other tags are removed. Newlines become `\N`.
pub(crate) fn html_to_substation(text: &str, options: &LoadOptions) -> String {
    let mut text = text.to_string();

    if !options.keep_html_tags {
        text = FORMATTING_TAG
            .replace_all(&text, |caps: &regex::Captures<'_>| {
                let value = if caps.get(1).is_some() { 0 } else { 1 };
                format!("{{\\{}{}}}", caps[2].to_lowercase(), value)
            })
            .into_owned();

        if !options.keep_unknown_html_tags {
            text = HTML_TAG.replace_all(&text, "").into_owned();
        }
    }

    text.replace('\n', "\\N")
}
