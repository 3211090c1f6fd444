//! MPL2 subtitle writer.

use super::srt::visible_events;
use crate::subtitles::types::SubtitleData;
use crate::timestamps::round_half_up_div;

/// Write SubtitleData to MPL2 format string.
///
/// Times are rounded to the nearest decisecond.
pub fn write_mpl2(data: &SubtitleData) -> String {
    let mut output = String::new();

    for event in visible_events(data) {
        let text = event.plaintext().lines().collect::<Vec<_>>().join("|");
        output.push_str(&format!(
            "[{}][{}] {}\n",
            to_deciseconds(event.start_ms),
            to_deciseconds(event.end_ms),
            text.trim_end()
        ));
    }

    output
}

fn to_deciseconds(ms: i64) -> i128 {
    round_half_up_div(i128::from(ms), 100)
}
