//! TMP player subtitle parser.
//!
//! Lines look like `HH:MM:SS:text`. Only start times are stored, so end
//! times are estimated from the line length and clipped to the next start.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::subtitles::time::times_to_ms;
use crate::subtitles::types::{SubtitleData, SubtitleEvent, SubtitleFormat};

/// A TMP subtitle line.
pub(crate) static TMP_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2}):(\d{2}):(.+)").expect("invalid tmp line regex")
});

static UNDERLINE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"< *u *>").expect("invalid underline tag regex"));
static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"< */? *[a-zA-Z][^>]*>").expect("invalid html tag regex"));

/// Minimum display time of an estimated subtitle.
const BASE_DURATION_MS: i64 = 500;
/// Reading time per character of the source line (about 15 characters/s).
const MS_PER_CHAR: i64 = 67;

/// Parse TMP content into SubtitleData.
pub fn parse_tmp(content: &str) -> SubtitleData {
    let mut data = SubtitleData::with_format(SubtitleFormat::Tmp);

    for raw in content.split_inclusive('\n') {
        let line = raw.trim_end_matches(|c: char| c == '\r' || c == '\n');
        let Some(caps) = TMP_LINE.captures(line) else {
            continue;
        };

        let field = |i: usize| caps[i].parse::<f64>().unwrap_or(0.0);
        let start_ms = times_to_ms(field(1), field(2), field(3), 0.0);

        // The estimate counts the line terminator like any other character
        let length = line.chars().count() + usize::from(raw.ends_with('\n'));
        let end_ms = start_ms + BASE_DURATION_MS + length as i64 * MS_PER_CHAR;

        data.events
            .push(SubtitleEvent::new(start_ms, end_ms, prepare_text(&caps[4])));
    }

    // Estimated ends must not overlap the next subtitle
    for i in 1..data.events.len() {
        let next_start = data.events[i].start_ms;
        let previous = &mut data.events[i - 1];
        previous.end_ms = previous.end_ms.min(next_start);
    }

    tracing::debug!("[TMP] Parsed {} events", data.events.len());

    data
}

fn prepare_text(text: &str) -> String {
    let text = text.replace('|', "\\N");
    let text = UNDERLINE_TAG.replace_all(&text, "{\\u1}");
    HTML_TAG.replace_all(&text, "").into_owned()
}
