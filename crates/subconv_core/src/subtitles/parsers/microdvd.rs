//! MicroDVD subtitle parser.
//!
//! Lines look like `{start_frame}{end_frame}text`. Times are frame numbers,
//! so a frame rate (or a full timeline) is required. Files commonly declare
//! it in a first line such as `{1}{1}23.976`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::subtitles::error::{ParseError, SubtitleError, SubtitleResult};
use crate::subtitles::types::{LoadOptions, SubtitleData, SubtitleEvent, SubtitleFormat};
use crate::timestamps::{FrameTimeline, TimeAnchor};

/// A MicroDVD subtitle line.
pub(crate) static MICRODVD_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ *\{ *(\d+) *\} *\{ *(\d+) *\}(.+)").expect("invalid microdvd line regex")
});

static STYLE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[Yy]:[^}]+\}").expect("invalid microdvd style regex"));
static FONT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[Ff]:([^}]+)\}").expect("invalid microdvd font regex"));
static SIZE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[Ss]:([^}]+)\}").expect("invalid microdvd size regex"));
static POSITION_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{P:(\d+),(\d+)\}").expect("invalid microdvd position regex"));

/// Parse MicroDVD content into SubtitleData.
///
/// The frame source is, in order: `options.timeline`, `options.fps`, or a
/// frame rate declared as the text of the first subtitle line (which is then
/// dropped). Without any of them, [`SubtitleError::UnknownFps`] is returned.
pub fn parse_microdvd(content: &str, options: &LoadOptions) -> SubtitleResult<SubtitleData> {
    let mut data = SubtitleData::with_format(SubtitleFormat::MicroDvd);

    let mut timeline = match (&options.timeline, options.fps) {
        (Some(timeline), fps) => {
            data.fps = fps;
            Some(timeline.clone())
        }
        (None, Some(fps)) => {
            data.fps = Some(fps);
            Some(FrameTimeline::from_constant_fps(fps)?)
        }
        (None, None) => None,
    };

    for (line_num, line) in content.lines().enumerate() {
        let Some(caps) = MICRODVD_LINE.captures(line) else {
            continue;
        };
        let (Ok(start_frame), Ok(end_frame)) = (caps[1].parse::<i64>(), caps[2].parse::<i64>())
        else {
            return Err(ParseError::invalid_time(line_num + 1, line).into());
        };
        let text = &caps[3];

        // Customarily the first line carries the frame rate
        if timeline.is_none() {
            let fps: f64 = text.trim().parse().map_err(|_| SubtitleError::UnknownFps)?;
            tracing::debug!("[MicroDVD] Frame rate declared in file: {}", fps);
            timeline = Some(FrameTimeline::from_constant_fps(fps)?);
            data.fps = Some(fps);
            continue;
        }
        let Some(timeline) = timeline.as_ref() else {
            continue;
        };

        let start_ms = timeline.frame_to_ms(start_frame, TimeAnchor::Start)?;
        let end_ms = timeline.frame_to_ms(end_frame, TimeAnchor::End)?;
        data.events
            .push(SubtitleEvent::new(start_ms, end_ms, prepare_text(text)));
    }

    tracing::debug!("[MicroDVD] Parsed {} events", data.events.len());

    Ok(data)
}

/// Convert MicroDVD markup to SubStation override tags.
///
/// Tags without a SubStation counterpart (colors, charset) are kept as-is.
fn prepare_text(text: &str) -> String {
    let text = text.replace('|', "\\N");

    let text = STYLE_TAG.replace_all(&text, |caps: &Captures<'_>| {
        let tag = caps[0].to_string();
        let overrides: String = ['b', 'i', 'u']
            .iter()
            .filter(|c| tag.contains(**c))
            .map(|c| format!("\\{}1", c))
            .collect();
        format!("{{{}}}", overrides)
    });
    let text = FONT_TAG.replace_all(&text, "{\\fn$1}");
    let text = SIZE_TAG.replace_all(&text, "{\\fs$1}");
    let text = POSITION_TAG.replace_all(&text, "{\\pos($1,$2)}");

    text.trim().to_string()
}
