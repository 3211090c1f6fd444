//! TMP player subtitle writer.
//!
//! Only start times are written, at whole-second precision.

use super::srt::visible_events;
use crate::subtitles::time::ms_to_times;
use crate::subtitles::types::SubtitleData;

/// Latest start time a TMP line can hold (99:59:59).
const MAX_TMP_MS: i64 = ((99 * 60 + 59) * 60 + 59) * 1000;

/// Write SubtitleData to TMP format string.
pub fn write_tmp(data: &SubtitleData) -> String {
    let mut output = String::new();

    for event in visible_events(data) {
        let start = if event.start_ms < 0 {
            tracing::warn!("[TMP] Negative time {}ms clamped to 0", event.start_ms);
            0
        } else if event.start_ms > MAX_TMP_MS {
            tracing::warn!("[TMP] Time {}ms clamped to 99:59:59", event.start_ms);
            MAX_TMP_MS
        } else {
            event.start_ms
        };

        let t = ms_to_times(start);
        let text = event.plaintext().lines().collect::<Vec<_>>().join("|");
        output.push_str(&format!("{:02}:{:02}:{:02}:{}\n", t.h, t.m, t.s, text));
    }

    output
}
