//! Subtitle processing module.
//!
//! Provides parsing, writing, and retiming for subtitle files.
//!
//! # Components
//!
//! - **types**: Core data structures (SubtitleData, Event, Style)
//! - **tags**: SubStation override tag parser
//! - **time**: Millisecond/clock conversions shared by the formats
//! - **parsers**: Format-specific parsers and content detection
//! - **writers**: Format-specific writers
//!
//! # Usage
//!
//! ```ignore
//! use subconv_core::subtitles::{LoadOptions, SubtitleData, WriteOptions};
//!
//! // Parse a subtitle file (format detected from content)
//! let mut data = SubtitleData::load("subtitles.srt", &LoadOptions::default())?;
//!
//! // Shift everything half a second later
//! data.shift(500);
//!
//! // Write output (format taken from the extension)
//! data.save("output.ass", &WriteOptions::default())?;
//! ```

mod error;
pub mod parsers;
pub mod tags;
pub mod time;
mod types;
pub mod writers;

use std::fs;
use std::path::Path;

// Re-export core types
pub use types::{
    Alignment, AssColor, LoadOptions, OpaqueAttachment, RoundingMode, SubtitleData, SubtitleEvent,
    SubtitleFormat, SubtitleMetadata, SubtitleStyle, WriteOptions, DEFAULT_STYLE_NAME,
};

// Re-export errors
pub use error::{ParseError, SubtitleError, SubtitleResult};

// Re-export the tag parser
pub use tags::{parse_tags, strip_overrides, StyleLookup, StyleOverrideState, TextFragment};

pub use parsers::{detect_format, parse_content};
pub use writers::write_content;

impl SubtitleData {
    /// Load a subtitle file from disk.
    ///
    /// The format is `options.format`, or detected from the content, or as a
    /// last resort taken from the file extension.
    ///
    /// # Returns
    /// * `Ok(SubtitleData)` - Parsed subtitle data with source_path set.
    /// * `Err(SubtitleError)` - If reading or parsing fails.
    pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> SubtitleResult<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|e| SubtitleError::read(path, e))?;

        let mut options = options.clone();
        if options.format.is_none() && detect_format(&content).is_none() {
            options.format = SubtitleFormat::from_extension(path);
        }

        let mut data = Self::from_string(&content, &options)?;
        data.source_path = Some(path.to_path_buf());

        tracing::info!(
            "Loaded {} ({}, {} events)",
            path.display(),
            data.format,
            data.events.len()
        );

        Ok(data)
    }

    /// Parse subtitle content held in memory.
    pub fn from_string(content: &str, options: &LoadOptions) -> SubtitleResult<Self> {
        parse_content(content, options)
    }

    /// Write subtitle data to a file.
    ///
    /// The format is `options.format`, or taken from the file extension, or
    /// the format the data was read from.
    pub fn save(&self, path: impl AsRef<Path>, options: &WriteOptions) -> SubtitleResult<()> {
        let path = path.as_ref();

        let format = options
            .format
            .or_else(|| SubtitleFormat::from_extension(path))
            .unwrap_or(self.format);

        let content = self.to_string(format, options)?;
        fs::write(path, content).map_err(|e| SubtitleError::write(path, e))?;

        tracing::info!("Saved {} ({})", path.display(), format);

        Ok(())
    }

    /// Serialize to a string in the given format.
    pub fn to_string(&self, format: SubtitleFormat, options: &WriteOptions) -> SubtitleResult<String> {
        write_content(self, format, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_and_write_ass() {
        let content = r#"[Script Info]
Title: Night Ferry
ScriptType: v4.00+

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Trebuchet MS,22,&H00FFFFFF,&H000000FF,&H00101010,&H00000000,0,0,0,0,100,100,0,0,1,2,1,2,15,15,15,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:03.20,0:00:06.00,Default,,0,0,0,,Last boat leaves at midnight.
"#;

        let mut temp_file = NamedTempFile::with_suffix(".ass").unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let data = SubtitleData::load(temp_file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(data.events.len(), 1);
        assert_eq!(data.events[0].start_ms, 3200);
        assert_eq!(data.source_path.as_deref(), Some(temp_file.path()));

        let output_file = NamedTempFile::with_suffix(".ass").unwrap();
        data.save(output_file.path(), &WriteOptions::default())
            .unwrap();

        let reparsed = SubtitleData::load(output_file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(reparsed.events, data.events);
        assert_eq!(reparsed.metadata.title.as_deref(), Some("Night Ferry"));
    }

    #[test]
    fn test_convert_srt_to_ass_by_extension() {
        let content = "1\n00:00:01,000 --> 00:00:04,000\n<i>Hello</i>, world!\n";

        let mut temp_file = NamedTempFile::with_suffix(".srt").unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let data = SubtitleData::load(temp_file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(data.format, SubtitleFormat::Srt);

        let output_file = NamedTempFile::with_suffix(".ass").unwrap();
        data.save(output_file.path(), &WriteOptions::default())
            .unwrap();

        let reparsed = SubtitleData::load(output_file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(reparsed.format, SubtitleFormat::Ass);
        assert_eq!(reparsed.events[0].text, r"{\i1}Hello{\i0}, world!");
    }

    #[test]
    fn test_missing_file() {
        let result = SubtitleData::load("/nonexistent/file.srt", &LoadOptions::default());
        assert!(matches!(result, Err(SubtitleError::ReadError { .. })));
    }

    #[test]
    fn test_from_string_and_to_string() {
        let data = SubtitleData::from_string("[10][20] Hi\n", &LoadOptions::default()).unwrap();
        assert_eq!(data.format, SubtitleFormat::Mpl2);
        let srt = data
            .to_string(SubtitleFormat::Srt, &WriteOptions::default())
            .unwrap();
        assert_eq!(srt, "1\n00:00:01,000 --> 00:00:02,000\nHi\n\n");
    }
}
