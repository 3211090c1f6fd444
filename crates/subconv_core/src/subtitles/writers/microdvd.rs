//! MicroDVD subtitle writer.
//!
//! The only styling MicroDVD output carries is a whole-line italic marker
//! (`{Y:i}`).

use super::srt::visible_events;
use crate::subtitles::error::{SubtitleError, SubtitleResult};
use crate::subtitles::tags::parse_tags;
use crate::subtitles::types::{SubtitleData, SubtitleEvent, WriteOptions};
use crate::timestamps::{FrameTimeline, TimeAnchor, TimelineResult};

/// Write SubtitleData to MicroDVD format string.
///
/// The frame source is, in order: `options.timeline`, `options.fps`, or the
/// frame rate stored in `data`. Without any of them,
/// [`SubtitleError::UnknownFps`] is returned.
pub fn write_microdvd(data: &SubtitleData, options: &WriteOptions) -> SubtitleResult<String> {
    let fps = options.fps.or(data.fps);
    let timeline = match (&options.timeline, fps) {
        (Some(timeline), _) => timeline.clone(),
        (None, Some(fps)) => FrameTimeline::from_constant_fps(fps)?,
        (None, None) => return Err(SubtitleError::UnknownFps),
    };

    let mut output = String::new();
    if options.microdvd_fps_declaration {
        match fps {
            Some(fps) => output.push_str(&format!("{{0}}{{0}}{fps}\n")),
            None => tracing::debug!("[MicroDVD] No constant frame rate to declare"),
        }
    }

    for event in visible_events(data) {
        let mut text = event.plaintext().lines().collect::<Vec<_>>().join("|");
        if options.apply_styles && is_entirely_italic(data, event) {
            text.insert_str(0, "{Y:i}");
        }

        let start = to_frame(&timeline, event.start_ms, TimeAnchor::Start)?;
        let end = to_frame(&timeline, event.end_ms, TimeAnchor::End)?;

        output.push_str(&format!("{{{start}}}{{{end}}}{text}\n"));
    }

    Ok(output)
}

/// Convert a time to a frame number, clamping to frame 0.
fn to_frame(timeline: &FrameTimeline, ms: i64, anchor: TimeAnchor) -> TimelineResult<i64> {
    let frame = if ms < timeline.first_ms() {
        -1
    } else {
        timeline.ms_to_frame(ms, anchor)?
    };

    if frame < 0 {
        tracing::warn!("[MicroDVD] Time {}ms is before frame 0, clamped", ms);
        return Ok(0);
    }
    Ok(frame)
}

/// Whether every visible fragment of the event is italic.
fn is_entirely_italic(data: &SubtitleData, event: &SubtitleEvent) -> bool {
    let style = data.style_for(event);
    parse_tags(&event.text, &style, data).iter().all(|fragment| {
        let visible = fragment
            .text
            .replace("\\h", " ")
            .replace("\\n", "\n")
            .replace("\\N", "\n");
        fragment.state.style.italic || visible.trim().is_empty()
    })
}
