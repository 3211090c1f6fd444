//! SRT subtitle writer.
//!
//! Writes SubtitleData to SRT format.
//!
//! # Styling
//!
//! Override tags are resolved with the tag parser and rendered as `<i>`,
//! `<b>`, `<u>` and `<s>` HTML-style tags. Comments and vector drawings have
//! no SRT counterpart and are skipped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::subtitles::error::{SubtitleError, SubtitleResult};
use crate::subtitles::tags::parse_tags;
use crate::subtitles::time::ms_to_times;
use crate::subtitles::types::{SubtitleData, SubtitleEvent, WriteOptions};

static REPEATED_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n+").expect("invalid newline regex"));

/// Write SubtitleData to SRT format string.
///
/// Fails with [`SubtitleError::TimeOverflow`] for times of 100 hours or more.
pub fn write_srt(data: &SubtitleData, options: &WriteOptions) -> SubtitleResult<String> {
    let mut output = String::new();

    for (i, event) in visible_events(data).enumerate() {
        let start = format_srt_time(event.start_ms)?;
        let end = format_srt_time(event.end_ms)?;
        let text = render_text(data, event, options);

        output.push_str(&format!("{}\n{} --> {}\n{}\n\n", i + 1, start, end, text));
    }

    Ok(output)
}

/// Events that can be represented in a text-only format.
pub(crate) fn visible_events(data: &SubtitleData) -> impl Iterator<Item = &SubtitleEvent> {
    data.events.iter().filter(|event| {
        if event.is_comment {
            return false;
        }
        if event.is_drawing() {
            tracing::warn!(
                "[Writer] Skipping drawing event at {}ms: no text representation",
                event.start_ms
            );
            return false;
        }
        true
    })
}

/// Render event text with HTML-style formatting.
///
/// With `keep_ssa_tags` the text is copied with only line breaks and hard
/// spaces resolved.
pub(crate) fn render_text(data: &SubtitleData, event: &SubtitleEvent, options: &WriteOptions) -> String {
    let text = event
        .text
        .replace("\\h", " ")
        .replace("\\n", "\n")
        .replace("\\N", "\n");

    let body = if options.keep_ssa_tags {
        text
    } else {
        let style = data.style_for(event);
        let mut body = String::new();
        for fragment in parse_tags(&text, &style, data) {
            if fragment.text.is_empty() || fragment.state.drawing {
                continue;
            }
            let mut rendered = fragment.text.to_string();
            if options.apply_styles {
                let style = &fragment.state.style;
                for (enabled, tag) in [
                    (style.italic, "i"),
                    (style.bold, "b"),
                    (style.underline, "u"),
                    (style.strikeout, "s"),
                ] {
                    if enabled {
                        rendered = format!("<{tag}>{rendered}</{tag}>");
                    }
                }
            }
            body.push_str(&rendered);
        }
        body
    };

    REPEATED_NEWLINES
        .replace_all(body.trim(), "\n")
        .into_owned()
}

/// Format milliseconds as SRT timestamp (HH:MM:SS,mmm).
///
/// Negative times are written as zero.
pub fn format_srt_time(ms: i64) -> SubtitleResult<String> {
    if ms < 0 {
        tracing::warn!("[SRT] Negative time {}ms clamped to 0", ms);
    }
    let t = ms_to_times(ms.max(0));
    if t.h >= 100 {
        return Err(SubtitleError::TimeOverflow { ms, format: "SRT" });
    }
    Ok(format!("{:02}:{:02}:{:02},{:03}", t.h, t.m, t.s, t.ms))
}
