//! JSON subtitle reader.
//!
//! The JSON format is the internal model serialized with serde:
//! `{"info": {...}, "styles": [...], "events": [...], "fps": 23.976}`, plus
//! optional `fonts` and `graphics` lists of undecoded SubStation attachments.

use serde::Deserialize;

use crate::subtitles::error::SubtitleResult;
use crate::subtitles::types::{
    OpaqueAttachment, SubtitleData, SubtitleEvent, SubtitleFormat, SubtitleMetadata,
    SubtitleStyle,
};

#[derive(Debug, Deserialize)]
struct JsonDocument {
    #[serde(default)]
    info: SubtitleMetadata,
    #[serde(default)]
    styles: Vec<SubtitleStyle>,
    #[serde(default)]
    events: Vec<SubtitleEvent>,
    #[serde(default)]
    fps: Option<f64>,
    #[serde(default)]
    fonts: Vec<OpaqueAttachment>,
    #[serde(default)]
    graphics: Vec<OpaqueAttachment>,
}

/// Parse JSON content into SubtitleData.
pub fn parse_json(content: &str) -> SubtitleResult<SubtitleData> {
    let document: JsonDocument = serde_json::from_str(content)?;

    let mut data = SubtitleData::with_format(SubtitleFormat::Json);
    data.metadata = document.info;
    if !document.styles.is_empty() {
        data.styles = document.styles;
    }
    data.events = document.events;
    data.fps = document.fps;
    data.fonts_opaque = document.fonts;
    data.graphics_opaque = document.graphics;

    tracing::debug!(
        "[JSON] Parsed {} styles, {} events",
        data.styles.len(),
        data.events.len()
    );

    Ok(data)
}
