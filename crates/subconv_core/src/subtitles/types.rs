//! The in-memory subtitle document and the types hanging off it.
//!
//! All timing values are stored as integer milliseconds. Rounding to
//! centiseconds (ASS), deciseconds (MPL2) or frames (MicroDVD) happens only at
//! write time.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{SubtitleError, SubtitleResult};
use super::tags::{parse_tags, strip_overrides, StyleLookup};
use crate::timestamps::{is_valid_fps, FrameTimeline, TimeAnchor, TimelineError};

/// Every text format subconv reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubtitleFormat {
    /// Advanced SubStation Alpha (.ass)
    #[default]
    Ass,
    /// SubStation Alpha v4 (.ssa)
    Ssa,
    Srt,
    WebVtt,
    /// MicroDVD, frame based (.sub)
    MicroDvd,
    /// TMP player (.txt)
    Tmp,
    /// MPL2, decisecond based
    Mpl2,
    /// Serialized internal model (.json)
    Json,
}

impl SubtitleFormat {
    /// All formats, in content-detection order.
    pub const ALL: [SubtitleFormat; 8] = [
        Self::Json,
        Self::Ass,
        Self::Ssa,
        Self::WebVtt,
        Self::Srt,
        Self::MicroDvd,
        Self::Mpl2,
        Self::Tmp,
    ];

    /// Map a path's extension (case-insensitive) to a format.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "ass" => Some(Self::Ass),
            "ssa" => Some(Self::Ssa),
            "srt" => Some(Self::Srt),
            "vtt" => Some(Self::WebVtt),
            "sub" => Some(Self::MicroDvd),
            "txt" => Some(Self::Tmp),
            "mpl" => Some(Self::Mpl2),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Look up a format by its short identifier (`"srt"`, `"microdvd"`, ...).
    pub fn from_identifier(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "ass" => Some(Self::Ass),
            "ssa" => Some(Self::Ssa),
            "srt" | "subrip" => Some(Self::Srt),
            "vtt" | "webvtt" => Some(Self::WebVtt),
            "microdvd" | "sub" => Some(Self::MicroDvd),
            "tmp" => Some(Self::Tmp),
            "mpl2" => Some(Self::Mpl2),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Extension written for this format, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Ass => "ass",
            Self::Ssa => "ssa",
            Self::Srt => "srt",
            Self::WebVtt => "vtt",
            Self::MicroDvd => "sub",
            Self::Tmp => "txt",
            Self::Mpl2 => "mpl",
            Self::Json => "json",
        }
    }

    /// Short identifier accepted by [`SubtitleFormat::from_identifier`].
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Ass => "ass",
            Self::Ssa => "ssa",
            Self::Srt => "srt",
            Self::WebVtt => "vtt",
            Self::MicroDvd => "microdvd",
            Self::Tmp => "tmp",
            Self::Mpl2 => "mpl2",
            Self::Json => "json",
        }
    }

    /// Whether times in this format are frame numbers.
    pub fn is_frame_based(&self) -> bool {
        matches!(self, Self::MicroDvd)
    }
}

impl std::fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

impl std::str::FromStr for SubtitleFormat {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_identifier(s).ok_or_else(|| SubtitleError::UnknownFormat(s.to_string()))
    }
}

/// A subtitle document.
///
/// Events keep SubStation markup whatever file they came from; readers
/// translate into it and writers translate out of it.
#[derive(Debug, Clone, Default)]
pub struct SubtitleData {
    /// Subtitle events, in file order.
    pub events: Vec<SubtitleEvent>,
    /// Styles, in file order. Formats without styles get a single `Default`.
    pub styles: Vec<SubtitleStyle>,
    pub metadata: SubtitleMetadata,
    /// Format the data was read from.
    pub format: SubtitleFormat,
    /// Frame rate used or declared by a frame-based source.
    pub fps: Option<f64>,
    /// Where the document was loaded from, if anywhere.
    pub source_path: Option<PathBuf>,
    /// `[Fonts]` entries, passed through to SubStation output undecoded.
    pub fonts_opaque: Vec<OpaqueAttachment>,
    /// `[Graphics]` entries, passed through to SubStation output undecoded.
    pub graphics_opaque: Vec<OpaqueAttachment>,
}

impl SubtitleData {
    /// Create empty subtitle data with the default style.
    pub fn new() -> Self {
        Self {
            styles: vec![SubtitleStyle::default()],
            ..Default::default()
        }
    }

    /// Empty document remembering the format it will be written as.
    pub fn with_format(format: SubtitleFormat) -> Self {
        Self {
            format,
            ..Self::new()
        }
    }

    pub fn dialogue_count(&self) -> usize {
        self.events.iter().filter(|e| !e.is_comment).count()
    }

    /// Latest end time over all events, or 0 when empty.
    pub fn duration_ms(&self) -> i64 {
        self.events.iter().map(|e| e.end_ms).max().unwrap_or(0)
    }

    /// Look up a style by exact name.
    pub fn get_style(&self, name: &str) -> Option<&SubtitleStyle> {
        self.styles.iter().find(|s| s.name == name)
    }

    pub fn get_style_mut(&mut self, name: &str) -> Option<&mut SubtitleStyle> {
        self.styles.iter_mut().find(|s| s.name == name)
    }

    /// Style used to render an event, falling back to the default style.
    pub fn style_for(&self, event: &SubtitleEvent) -> SubtitleStyle {
        self.get_style(&event.style).cloned().unwrap_or_default()
    }

    /// Insert a style, replacing one with the same name.
    pub fn set_style(&mut self, style: SubtitleStyle) {
        if let Some(existing) = self.get_style_mut(&style.name) {
            *existing = style;
        } else {
            self.styles.push(style);
        }
    }

    /// Move every event by `offset_ms`.
    ///
    /// Times may become negative; writers clamp them to zero.
    pub fn shift(&mut self, offset_ms: i64) {
        for event in &mut self.events {
            event.shift(offset_ms);
        }
    }

    /// Shift all events by a number of frames of `timeline`.
    ///
    /// The offset is the distance between frame 0 and frame `|frames|`, so a
    /// negative count moves events earlier by the same amount.
    pub fn shift_frames(&mut self, frames: i64, timeline: &FrameTimeline) -> SubtitleResult<()> {
        let origin = timeline.frame_to_ms(0, TimeAnchor::Exact)?;
        let target = timeline.frame_to_ms(frames.abs(), TimeAnchor::Exact)?;
        let delta = if frames < 0 {
            origin - target
        } else {
            target - origin
        };
        self.shift(delta);
        Ok(())
    }

    /// Rescale all times from one frame rate to another.
    ///
    /// Fixes files that were converted from a frame-based format with the
    /// wrong frame rate.
    pub fn transform_framerate(&mut self, in_fps: f64, out_fps: f64) -> SubtitleResult<()> {
        for fps in [in_fps, out_fps] {
            if !is_valid_fps(fps) {
                return Err(TimelineError::InvalidFrameRate(fps).into());
            }
        }

        let ratio = in_fps / out_fps;
        for event in &mut self.events {
            event.start_ms = (event.start_ms as f64 * ratio).round() as i64;
            event.end_ms = (event.end_ms as f64 * ratio).round() as i64;
        }
        Ok(())
    }

    /// Rename a style, updating every event that references it.
    pub fn rename_style(&mut self, old_name: &str, new_name: &str) -> SubtitleResult<()> {
        if new_name.is_empty() || new_name.contains(&[',', '\n', '\r'][..]) {
            return Err(SubtitleError::InvalidStyleName(new_name.to_string()));
        }
        if self.get_style(old_name).is_none() {
            return Err(SubtitleError::StyleNotFound(old_name.to_string()));
        }
        if old_name != new_name && self.get_style(new_name).is_some() {
            return Err(SubtitleError::StyleExists(new_name.to_string()));
        }

        if let Some(style) = self.get_style_mut(old_name) {
            style.name = new_name.to_string();
        }
        for event in self.events.iter_mut().filter(|e| e.style == old_name) {
            event.style = new_name.to_string();
        }
        Ok(())
    }

    /// Copy styles from another file.
    ///
    /// Styles with a name already present are replaced only when `overwrite`
    /// is set.
    pub fn import_styles(&mut self, other: &SubtitleData, overwrite: bool) {
        for style in &other.styles {
            match self.get_style_mut(&style.name) {
                Some(existing) if overwrite => *existing = style.clone(),
                Some(_) => {}
                None => self.styles.push(style.clone()),
            }
        }
    }

    /// Sort events by start time, then end time (stable).
    pub fn sort_by_time(&mut self) {
        self.events
            .sort_by(|a, b| (a.start_ms, a.end_ms).cmp(&(b.start_ms, b.end_ms)));
    }
}

/// One `Dialogue` or `Comment` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleEvent {
    /// Start time in milliseconds.
    pub start_ms: i64,
    /// End time in milliseconds.
    pub end_ms: i64,
    /// Text content with SubStation override tags.
    pub text: String,
    /// Style name.
    pub style: String,
    /// Layer number (ASS only).
    pub layer: i32,
    /// Marked flag (SSA only).
    pub marked: bool,
    /// Comments are kept in the document but never shown.
    pub is_comment: bool,
    /// Actor/speaker name.
    pub actor: Option<String>,
    /// Margin left override.
    pub margin_l: Option<i32>,
    /// Margin right override.
    pub margin_r: Option<i32>,
    /// Margin vertical override.
    pub margin_v: Option<i32>,
    /// Effect field.
    pub effect: Option<String>,
}

impl Default for SubtitleEvent {
    fn default() -> Self {
        Self {
            start_ms: 0,
            end_ms: 10_000,
            text: String::new(),
            style: DEFAULT_STYLE_NAME.to_string(),
            layer: 0,
            marked: false,
            is_comment: false,
            actor: None,
            margin_l: None,
            margin_r: None,
            margin_v: None,
            effect: None,
        }
    }
}

impl SubtitleEvent {
    /// Dialogue in the default style.
    pub fn new(start_ms: i64, end_ms: i64, text: impl Into<String>) -> Self {
        Self {
            start_ms,
            end_ms,
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Move both ends by `offset_ms`.
    pub fn shift(&mut self, offset_ms: i64) {
        self.start_ms += offset_ms;
        self.end_ms += offset_ms;
    }

    /// Text with override blocks removed and SubStation escapes resolved.
    ///
    /// `\h` becomes a space, `\N` and `\n` become newlines.
    pub fn plaintext(&self) -> String {
        strip_overrides(&self.text)
            .replace("\\h", " ")
            .replace("\\n", "\n")
            .replace("\\N", "\n")
    }

    /// Whether any visible part of the text is a vector drawing (`\p1`).
    pub fn is_drawing(&self) -> bool {
        let no_styles: &[SubtitleStyle] = &[];
        parse_tags(&self.text, &SubtitleStyle::default(), no_styles)
            .iter()
            .any(|f| f.state.drawing && !f.text.trim().is_empty())
    }
}

/// Name of the style used when an event references nothing else.
pub const DEFAULT_STYLE_NAME: &str = "Default";

/// SubStation style definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleStyle {
    /// Unique within a document; events refer to it.
    pub name: String,
    pub fontname: String,
    pub fontsize: f64,
    /// Primary fill color.
    pub primary_color: AssColor,
    /// Secondary (karaoke) color.
    pub secondary_color: AssColor,
    /// Outline color (SSA TertiaryColour).
    pub outline_color: AssColor,
    /// Back/shadow color.
    pub back_color: AssColor,
    pub bold: bool,
    pub italic: bool,
    /// ASS only.
    pub underline: bool,
    /// ASS only.
    pub strikeout: bool,
    pub scale_x: f64,
    pub scale_y: f64,
    pub spacing: f64,
    /// Z rotation in degrees.
    pub angle: f64,
    /// 1 draws outline and shadow, 3 an opaque box.
    pub border_style: i32,
    pub outline: f64,
    pub shadow: f64,
    /// Alignment (numpad layout).
    pub alignment: Alignment,
    pub margin_l: i32,
    pub margin_r: i32,
    pub margin_v: i32,
    /// SSA only, unused by renderers.
    pub alpha_level: i32,
    /// Windows charset number.
    pub encoding: i32,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            name: DEFAULT_STYLE_NAME.to_string(),
            fontname: "Arial".to_string(),
            fontsize: 20.0,
            primary_color: AssColor::from_rgb(255, 255, 255),
            secondary_color: AssColor::from_rgb(255, 0, 0),
            outline_color: AssColor::BLACK,
            back_color: AssColor::BLACK,
            bold: false,
            italic: false,
            underline: false,
            strikeout: false,
            scale_x: 100.0,
            scale_y: 100.0,
            spacing: 0.0,
            angle: 0.0,
            border_style: 1,
            outline: 2.0,
            shadow: 2.0,
            alignment: Alignment::BottomCenter,
            margin_l: 10,
            margin_r: 10,
            margin_v: 10,
            alpha_level: 0,
            encoding: 1,
        }
    }
}

impl SubtitleStyle {
    /// Default look under a new name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Copy with a different bold flag.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Copy with a different italic flag.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Copy with a different underline flag.
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    /// Copy with a different strikeout flag.
    pub fn with_strikeout(mut self, strikeout: bool) -> Self {
        self.strikeout = strikeout;
        self
    }
}

/// Text alignment in numpad layout (ASS semantics).
///
/// SSA v4 uses a different numbering: 1-3 bottom, 9-11 middle, 5-7 top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Alignment {
    BottomLeft = 1,
    #[default]
    BottomCenter = 2,
    BottomRight = 3,
    MiddleLeft = 4,
    MiddleCenter = 5,
    MiddleRight = 6,
    TopLeft = 7,
    TopCenter = 8,
    TopRight = 9,
}

impl Alignment {
    /// From an ASS numpad value (1-9).
    pub fn from_ass(value: i32) -> Option<Self> {
        Some(match value {
            1 => Self::BottomLeft,
            2 => Self::BottomCenter,
            3 => Self::BottomRight,
            4 => Self::MiddleLeft,
            5 => Self::MiddleCenter,
            6 => Self::MiddleRight,
            7 => Self::TopLeft,
            8 => Self::TopCenter,
            9 => Self::TopRight,
            _ => return None,
        })
    }

    /// From a legacy SSA value.
    pub fn from_ssa(value: i32) -> Option<Self> {
        Some(match value {
            1 => Self::BottomLeft,
            2 => Self::BottomCenter,
            3 => Self::BottomRight,
            5 => Self::TopLeft,
            6 => Self::TopCenter,
            7 => Self::TopRight,
            9 => Self::MiddleLeft,
            10 => Self::MiddleCenter,
            11 => Self::MiddleRight,
            _ => return None,
        })
    }

    /// ASS numpad value.
    pub fn to_ass(self) -> i32 {
        self as i32
    }

    /// Legacy SSA value.
    pub fn to_ssa(self) -> i32 {
        match self {
            Self::BottomLeft => 1,
            Self::BottomCenter => 2,
            Self::BottomRight => 3,
            Self::TopLeft => 5,
            Self::TopCenter => 6,
            Self::TopRight => 7,
            Self::MiddleLeft => 9,
            Self::MiddleCenter => 10,
            Self::MiddleRight => 11,
        }
    }
}

impl TryFrom<i32> for Alignment {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_ass(value).ok_or_else(|| format!("invalid alignment {}", value))
    }
}

impl From<Alignment> for i32 {
    fn from(value: Alignment) -> Self {
        value.to_ass()
    }
}

/// SubStation color.
///
/// ASS uses &HAABBGGRR format (alpha, blue, green, red), SSA uses the same
/// value written as a decimal integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0 is opaque and 255 fully transparent.
    pub a: u8,
}

impl Default for AssColor {
    fn default() -> Self {
        Self::from_rgb(255, 255, 255) // White, opaque
    }
}

impl AssColor {
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque color.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0 }
    }

    /// Color with explicit transparency.
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    fn from_abgr(value: u32) -> Self {
        let [r, g, b, a] = value.to_le_bytes();
        Self { r, g, b, a }
    }

    /// Parse from a SubStation color string.
    ///
    /// Accepts `&HAABBGGRR`, `&HBBGGRR` (optionally with a trailing `&`) and
    /// SSA decimal values.
    pub fn from_ass_string(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix("&H").or_else(|| s.strip_prefix("&h")) {
            let hex = hex.trim_end_matches('&');
            let value = u32::from_str_radix(hex, 16).ok()?;
            return Some(Self::from_abgr(value));
        }

        // Decimal values may be written as signed 32-bit integers.
        let value: i64 = s.parse().ok()?;
        Some(Self::from_abgr(value as u32))
    }

    /// `&HAABBGGRR` form used in ASS styles.
    pub fn to_ass_string(&self) -> String {
        format!(
            "&H{:02X}{:02X}{:02X}{:02X}",
            self.a, self.b, self.g, self.r
        )
    }

    /// Convert to SSA decimal color (alpha is not representable).
    pub fn to_ssa_string(&self) -> String {
        let value = ((self.b as u32) << 16) | ((self.g as u32) << 8) | self.r as u32;
        value.to_string()
    }
}

/// A file embedded in a SubStation script, kept as its uuencoded lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpaqueAttachment {
    /// File name from the `fontname:` or `filename:` line.
    pub name: String,
    pub lines: Vec<String>,
}

impl OpaqueAttachment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }
}

/// Document-level metadata (`[Script Info]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleMetadata {
    pub title: Option<String>,
    /// `Original Script` credit.
    pub original_script: Option<String>,
    /// `Original Translation` credit.
    pub translation: Option<String>,
    /// `Original Timing` credit.
    pub timing: Option<String>,
    pub play_res_x: Option<i32>,
    pub play_res_y: Option<i32>,
    /// `v4.00` marks SSA, `v4.00+` ASS.
    pub script_type: Option<String>,
    pub wrap_style: Option<i32>,
    /// Whether borders scale with the script resolution.
    pub scaled_border_and_shadow: Option<bool>,
    /// Color matrix hint such as `TV.709`.
    pub ycbcr_matrix: Option<String>,
    /// Additional fields, in file order.
    pub custom: Vec<(String, String)>,
}

impl SubtitleMetadata {
    /// Look up a custom field.
    pub fn get_custom(&self, key: &str) -> Option<&str> {
        self.custom
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace a custom field.
    pub fn set_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.custom.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.custom.push((key, value)),
        }
    }
}

/// How milliseconds become the centiseconds of an ASS timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Truncate.
    Floor,
    /// Nearest centisecond, halves up.
    #[default]
    Round,
    /// Next centisecond unless exact.
    Ceil,
}

impl RoundingMode {
    /// Round a millisecond value to whole centiseconds (ASS precision).
    ///
    /// Returns milliseconds (a multiple of 10).
    pub fn apply_ass(&self, ms: i64) -> i64 {
        let cs = match self {
            Self::Floor => ms.div_euclid(10),
            Self::Round => (ms + 5).div_euclid(10),
            Self::Ceil => (ms + 9).div_euclid(10),
        };
        cs * 10
    }
}

/// Options for reading subtitle content.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Force a format instead of detecting it from content.
    pub format: Option<SubtitleFormat>,
    /// Frame rate for frame-based formats; overrides a declaration in the file.
    pub fps: Option<f64>,
    /// Timeline for frame-based formats; takes precedence over `fps`.
    pub timeline: Option<FrameTimeline>,
    /// Keep HTML-style tags of SRT/VTT as-is instead of converting them.
    pub keep_html_tags: bool,
    /// Convert known HTML-style tags but keep unknown ones.
    pub keep_unknown_html_tags: bool,
}

impl LoadOptions {
    /// Options forcing a specific format.
    pub fn with_format(format: SubtitleFormat) -> Self {
        Self {
            format: Some(format),
            ..Default::default()
        }
    }

    /// Options with a frame rate for frame-based formats.
    pub fn with_fps(fps: f64) -> Self {
        Self {
            fps: Some(fps),
            ..Default::default()
        }
    }
}

/// Knobs for the writers. Each format ignores the ones it has no use for.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Output format; when unset, taken from the output path or the data.
    pub format: Option<SubtitleFormat>,
    /// Rounding mode for centisecond timestamps.
    pub rounding: RoundingMode,
    /// Frame rate for frame-based formats; falls back to the data's own.
    pub fps: Option<f64>,
    /// Timeline for frame-based formats; takes precedence over `fps`.
    pub timeline: Option<FrameTimeline>,
    /// Render bold/italic/underline/strikeout into the target format.
    pub apply_styles: bool,
    /// SRT/VTT: copy SubStation override tags through instead of rendering.
    pub keep_ssa_tags: bool,
    /// MicroDVD: emit a leading `{0}{0}<fps>` line.
    pub microdvd_fps_declaration: bool,
    /// WebVTT: number cues.
    pub vtt_cue_identifiers: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            format: None,
            rounding: RoundingMode::Round,
            fps: None,
            timeline: None,
            apply_styles: true,
            keep_ssa_tags: false,
            microdvd_fps_declaration: true,
            vtt_cue_identifiers: false,
        }
    }
}

impl WriteOptions {
    /// Options with a frame rate for frame-based formats.
    pub fn with_fps(fps: f64) -> Self {
        Self {
            fps: Some(fps),
            ..Default::default()
        }
    }
}

impl StyleLookup for SubtitleData {
    fn lookup_style(&self, name: &str) -> Option<&SubtitleStyle> {
        self.get_style(name)
    }
}
