//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::subtitles::{LoadOptions, RoundingMode, WriteOptions};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Defaults applied when reading subtitles.
    #[serde(default)]
    pub input: InputSettings,

    /// Defaults applied when writing subtitles.
    #[serde(default)]
    pub output: OutputSettings,
}

impl Settings {
    /// Reader options built from the `[input]` section.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            fps: self.input.fps,
            keep_html_tags: self.input.keep_html_tags,
            ..Default::default()
        }
    }

    /// Writer options built from the `[output]` section.
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            rounding: self.output.ass_rounding,
            apply_styles: self.output.apply_styles,
            microdvd_fps_declaration: self.output.microdvd_fps_declaration,
            vtt_cue_identifiers: self.output.vtt_cue_identifiers,
            ..Default::default()
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
}

/// Reader defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSettings {
    /// Frame rate for frame-based formats without a declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,

    /// Keep HTML-style tags of SRT/VTT input as-is.
    #[serde(default)]
    pub keep_html_tags: bool,
}

/// Writer defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Rounding of centisecond timestamps (floor, round, ceil).
    #[serde(default)]
    pub ass_rounding: RoundingMode,

    /// Write a `{0}{0}<fps>` line at the top of MicroDVD output.
    #[serde(default = "default_true")]
    pub microdvd_fps_declaration: bool,

    /// Render bold/italic/underline/strikeout into text formats.
    #[serde(default = "default_true")]
    pub apply_styles: bool,

    /// Number WebVTT cues.
    #[serde(default)]
    pub vtt_cue_identifiers: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            ass_rounding: RoundingMode::default(),
            microdvd_fps_declaration: true,
            apply_styles: true,
            vtt_cue_identifiers: false,
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Logging,
    Input,
    Output,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 3] = [Self::Logging, Self::Input, Self::Output];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Logging => "logging",
            ConfigSection::Input => "input",
            ConfigSection::Output => "output",
        }
    }
}
