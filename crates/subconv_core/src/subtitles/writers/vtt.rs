//! WebVTT subtitle writer.
//!
//! Text is rendered like SRT. Cues are written in start-time order.

use super::srt::{render_text, visible_events};
use crate::subtitles::parsers::{HEADER_TEXT_KEY, TIMESTAMP_MAP_KEY};
use crate::subtitles::time::ms_to_times;
use crate::subtitles::types::{SubtitleData, WriteOptions};

/// Write SubtitleData to WebVTT format string.
pub fn write_vtt(data: &SubtitleData, options: &WriteOptions) -> String {
    let mut output = String::from("WEBVTT");
    if let Some(header) = data.metadata.get_custom(HEADER_TEXT_KEY) {
        output.push(' ');
        output.push_str(header);
    }
    output.push('\n');
    if let Some(map) = data.metadata.get_custom(TIMESTAMP_MAP_KEY) {
        output.push_str(&format!("X-TIMESTAMP-MAP={map}\n"));
    }
    output.push('\n');

    let mut events: Vec<_> = visible_events(data).collect();
    events.sort_by_key(|event| event.start_ms);

    for (i, event) in events.into_iter().enumerate() {
        if options.vtt_cue_identifiers {
            output.push_str(&format!("{}\n", i + 1));
        }
        output.push_str(&format!(
            "{} --> {}\n{}\n\n",
            format_vtt_time(event.start_ms),
            format_vtt_time(event.end_ms),
            render_text(data, event, options)
        ));
    }

    output
}

/// Format milliseconds as a WebVTT timestamp (`HH:MM:SS.mmm`).
///
/// Negative times are written as zero.
pub fn format_vtt_time(ms: i64) -> String {
    if ms < 0 {
        tracing::warn!("[WebVTT] Negative time {}ms clamped to 0", ms);
    }
    let t = ms_to_times(ms.max(0));
    format!("{:02}:{:02}:{:02}.{:03}", t.h, t.m, t.s, t.ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subtitles::types::SubtitleEvent;

    #[test]
    fn test_format_vtt_time() {
        assert_eq!(format_vtt_time(0), "00:00:00.000");
        assert_eq!(format_vtt_time(3_723_004), "01:02:03.004");
        assert_eq!(format_vtt_time(360_000_000), "100:00:00.000");
    }

    #[test]
    fn test_write_vtt() {
        let mut data = SubtitleData::new();
        data.metadata.set_custom(HEADER_TEXT_KEY, "Header");
        data.events.push(SubtitleEvent::new(5000, 6000, "second"));
        data.events
            .push(SubtitleEvent::new(1000, 2000, r"{\i1}first{\i0}\Nline"));

        let output = write_vtt(&data, &WriteOptions::default());
        assert_eq!(
            output,
            "WEBVTT Header\n\n00:00:01.000 --> 00:00:02.000\n<i>first</i>\nline\n\n00:00:05.000 --> 00:00:06.000\nsecond\n\n"
        );
    }

    #[test]
    fn test_cue_identifiers() {
        let mut data = SubtitleData::new();
        data.metadata.set_custom(TIMESTAMP_MAP_KEY, "MPEGTS:0,LOCAL:00:00:00.000");
        data.events.push(SubtitleEvent::new(0, 1000, "a"));
        data.events.push(SubtitleEvent::new(1000, 2000, "b"));

        let options = WriteOptions {
            vtt_cue_identifiers: true,
            ..Default::default()
        };
        let output = write_vtt(&data, &options);
        assert!(output.starts_with("WEBVTT\nX-TIMESTAMP-MAP=MPEGTS:0,LOCAL:00:00:00.000\n\n1\n00:00:00.000"));
        assert!(output.contains("\n\n2\n00:00:01.000 --> 00:00:02.000\nb\n\n"));
    }
}
