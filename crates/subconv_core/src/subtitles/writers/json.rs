//! JSON subtitle writer.

use serde::Serialize;

use crate::subtitles::error::SubtitleResult;
use crate::subtitles::types::{
    OpaqueAttachment, SubtitleData, SubtitleEvent, SubtitleMetadata, SubtitleStyle,
};

#[derive(Serialize)]
struct JsonDocumentRef<'a> {
    info: &'a SubtitleMetadata,
    styles: &'a [SubtitleStyle],
    events: &'a [SubtitleEvent],
    #[serde(skip_serializing_if = "Option::is_none")]
    fps: Option<f64>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    fonts: &'a [OpaqueAttachment],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    graphics: &'a [OpaqueAttachment],
}

/// Write SubtitleData as pretty-printed JSON.
pub fn write_json(data: &SubtitleData) -> SubtitleResult<String> {
    let document = JsonDocumentRef {
        info: &data.metadata,
        styles: &data.styles,
        events: &data.events,
        fps: data.fps,
        fonts: &data.fonts_opaque,
        graphics: &data.graphics_opaque,
    };
    let mut output = serde_json::to_string_pretty(&document)?;
    output.push('\n');
    Ok(output)
}
