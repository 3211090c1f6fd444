//! MPL2 subtitle parser.
//!
//! Lines look like `[start][end]text` with times in deciseconds. `|`
//! separates lines and a leading `/` marks a line as italic.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::subtitles::types::{SubtitleData, SubtitleEvent, SubtitleFormat};

/// An MPL2 subtitle line.
pub(crate) static MPL2_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\[(-?\d+)\]\[(-?\d+)\](.*)").expect("invalid mpl2 line regex")
});

/// Parse MPL2 content into SubtitleData.
pub fn parse_mpl2(content: &str) -> SubtitleData {
    let mut data = SubtitleData::with_format(SubtitleFormat::Mpl2);

    for caps in MPL2_LINE.captures_iter(content) {
        let (Ok(start), Ok(end)) = (caps[1].parse::<i64>(), caps[2].parse::<i64>()) else {
            continue;
        };
        data.events.push(SubtitleEvent::new(
            start * 100,
            end * 100,
            prepare_text(caps[3].trim_end_matches('\r')),
        ));
    }

    tracing::debug!("[MPL2] Parsed {} events", data.events.len());

    data
}

fn prepare_text(text: &str) -> String {
    text.split('|')
        .map(|line| {
            let line = line.trim();
            match line.strip_prefix('/') {
                Some(italic) => format!("{{\\i1}}{}{{\\i0}}", italic.trim()),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\\N")
}
