//! ASS/SSA subtitle parser.
//!
//! Parses Advanced SubStation Alpha (.ass) and SubStation Alpha (.ssa) files.
//!
//! # Format Overview
//!
//! SubStation files have three main sections:
//! - `[Script Info]`: Metadata (title, resolution, etc.)
//! - `[V4+ Styles]` (ASS) or `[V4 Styles]` (SSA): Style definitions
//! - `[Events]`: Dialogue and comment lines
//!
//! All timing is in the format `H:MM:SS.cc` (centiseconds). Embedded files
//! in `[Fonts]` and `[Graphics]` are kept undecoded so they can be written
//! back; other sections (editor state) are skipped.

use std::str::FromStr;

use crate::subtitles::error::ParseError;
use crate::subtitles::time::{timestamp_to_ms, TIMESTAMP};
use crate::subtitles::types::{
    Alignment, AssColor, OpaqueAttachment, SubtitleData, SubtitleEvent, SubtitleFormat,
    SubtitleMetadata, SubtitleStyle,
};

/// Parse ASS/SSA content into SubtitleData.
///
/// The dialect is taken from the style section name (`[V4 Styles]` is SSA)
/// or a `ScriptType: v4.00` line; it decides how style alignment is read.
///
/// # Returns
/// * `Ok(SubtitleData)` - Parsed subtitle data.
/// * `Err(ParseError)` - On a malformed style, event or timestamp.
pub fn parse_ass(content: &str) -> Result<SubtitleData, ParseError> {
    let mut data = SubtitleData::with_format(SubtitleFormat::Ass);
    let mut styles = Vec::new();
    let mut current_section = String::new();
    let mut style_format: Vec<String> = Vec::new();
    let mut event_format: Vec<String> = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1; // 1-indexed for error messages
        let line = line.trim_start_matches('\u{feff}').trim();

        if line.is_empty() {
            continue;
        }

        let attachment_key = match current_section.as_str() {
            "fonts" => Some("fontname:"),
            "graphics" => Some("filename:"),
            _ => None,
        };

        // Section header. Inside attachments, uuencoded lines can also be
        // bracketed, but they never contain lowercase letters.
        if line.starts_with('[')
            && line.ends_with(']')
            && (attachment_key.is_none() || line.bytes().any(|b| b.is_ascii_lowercase()))
        {
            current_section = line[1..line.len() - 1].to_lowercase();
            if current_section == "v4 styles" {
                data.format = SubtitleFormat::Ssa;
            }
            continue;
        }

        if let Some(key) = attachment_key {
            let attachments = if current_section == "fonts" {
                &mut data.fonts_opaque
            } else {
                &mut data.graphics_opaque
            };
            push_attachment_line(attachments, line, key, line_num);
            continue;
        }

        // Comments (lines starting with ; or !)
        if line.starts_with(';') || line.starts_with("!:") {
            continue;
        }

        match current_section.as_str() {
            "script info" => {
                parse_script_info_line(line, &mut data.metadata);
                if is_ssa_script_type(&data.metadata) {
                    data.format = SubtitleFormat::Ssa;
                }
            }
            "v4+ styles" | "v4 styles" => {
                if let Some(rest) = line.strip_prefix("Format:") {
                    style_format = parse_format_line(rest);
                } else if let Some(rest) = line.strip_prefix("Style:") {
                    let format = if style_format.is_empty() {
                        default_style_format(data.format)
                    } else {
                        style_format.clone()
                    };
                    styles.push(parse_style_line(rest, &format, data.format, line_num)?);
                }
            }
            "events" => {
                if let Some(rest) = line.strip_prefix("Format:") {
                    event_format = parse_format_line(rest);
                } else if let Some((kind, rest)) = line.split_once(':') {
                    let is_comment = match kind {
                        "Dialogue" => false,
                        "Comment" => true,
                        // Picture, Sound, Movie and Command events are not supported
                        _ => continue,
                    };
                    let format = if event_format.is_empty() {
                        default_event_format(data.format)
                    } else {
                        event_format.clone()
                    };
                    data.events
                        .push(parse_event_line(rest, &format, is_comment, line_num)?);
                }
            }
            _ => {}
        }
    }

    if !styles.is_empty() {
        data.styles = styles;
    }

    tracing::debug!(
        "[SubStation] Parsed {} styles, {} events ({})",
        data.styles.len(),
        data.events.len(),
        data.format
    );

    Ok(data)
}

/// Add one line of a `[Fonts]` or `[Graphics]` section.
fn push_attachment_line(
    attachments: &mut Vec<OpaqueAttachment>,
    line: &str,
    name_key: &str,
    line_num: usize,
) {
    if let Some(name) = line.strip_prefix(name_key) {
        attachments.push(OpaqueAttachment::new(name.trim()));
    } else if let Some(current) = attachments.last_mut() {
        current.lines.push(line.to_string());
    } else {
        tracing::debug!("[SubStation] Line {} precedes any attachment name, skipped", line_num);
    }
}

fn is_ssa_script_type(metadata: &SubtitleMetadata) -> bool {
    metadata
        .script_type
        .as_deref()
        .is_some_and(|t| t.eq_ignore_ascii_case("v4.00"))
}

/// Parse the field list after `Format:` into lowercase names.
fn parse_format_line(rest: &str) -> Vec<String> {
    rest.split(',').map(|s| s.trim().to_lowercase()).collect()
}

/// Parse a Script Info line.
fn parse_script_info_line(line: &str, metadata: &mut SubtitleMetadata) {
    let Some((key, value)) = line.split_once(':') else {
        return;
    };

    let key = key.trim();
    let value = value.trim();

    match key.to_lowercase().as_str() {
        "title" => metadata.title = Some(value.to_string()),
        "original script" => metadata.original_script = Some(value.to_string()),
        "original translation" => metadata.translation = Some(value.to_string()),
        "original timing" => metadata.timing = Some(value.to_string()),
        "playresx" => metadata.play_res_x = value.parse().ok(),
        "playresy" => metadata.play_res_y = value.parse().ok(),
        "scripttype" => metadata.script_type = Some(value.to_string()),
        "wrapstyle" => metadata.wrap_style = value.parse().ok(),
        "scaledborderandshadow" => {
            metadata.scaled_border_and_shadow = Some(value.eq_ignore_ascii_case("yes") || value == "1")
        }
        "ycbcr matrix" => metadata.ycbcr_matrix = Some(value.to_string()),
        _ => metadata.set_custom(key, value),
    }
}

fn parse_bool(value: &str) -> bool {
    value.parse::<i32>().map(|v| v != 0).unwrap_or(false)
}

/// Comma-separated values of one line, addressed by their `Format:` name.
struct FieldRow<'a> {
    names: &'a [String],
    values: Vec<&'a str>,
}

impl<'a> FieldRow<'a> {
    /// The untrimmed value of a field, if the format names it.
    fn raw(&self, name: &str) -> Option<&'a str> {
        let index = self.names.iter().position(|n| n == name)?;
        self.values.get(index).copied()
    }

    fn get(&self, name: &str) -> Option<&'a str> {
        self.raw(name).map(str::trim)
    }

    fn parse_or<T: FromStr>(&self, name: &str, fallback: T) -> T {
        self.get(name)
            .and_then(|value| value.parse().ok())
            .unwrap_or(fallback)
    }

    fn flag_or(&self, name: &str, fallback: bool) -> bool {
        self.get(name).map(parse_bool).unwrap_or(fallback)
    }

    fn color_or(&self, names: &[&str], fallback: AssColor) -> AssColor {
        names
            .iter()
            .find_map(|name| self.get(name))
            .and_then(AssColor::from_ass_string)
            .unwrap_or(fallback)
    }

    fn text(&self, names: &[&str]) -> Option<String> {
        names
            .iter()
            .find_map(|name| self.get(name))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}

/// Parse the fields of a Style: line.
fn parse_style_line(
    rest: &str,
    format: &[String],
    dialect: SubtitleFormat,
    line_num: usize,
) -> Result<SubtitleStyle, ParseError> {
    let values: Vec<&str> = rest.trim().split(',').collect();
    if values.len() < format.len() {
        return Err(ParseError::invalid_style(
            line_num,
            format!("{} of {} fields present", values.len(), format.len()),
        ));
    }

    let row = FieldRow {
        names: format,
        values,
    };
    let base = SubtitleStyle::default();

    let raw_alignment: i32 = row.parse_or("alignment", 2);
    let alignment = match dialect {
        SubtitleFormat::Ssa => Alignment::from_ssa(raw_alignment),
        _ => Alignment::from_ass(raw_alignment),
    };

    Ok(SubtitleStyle {
        name: row.text(&["name"]).unwrap_or(base.name),
        fontname: row.text(&["fontname"]).unwrap_or(base.fontname),
        fontsize: row.parse_or("fontsize", base.fontsize),
        primary_color: row.color_or(&["primarycolour"], base.primary_color),
        secondary_color: row.color_or(&["secondarycolour"], base.secondary_color),
        outline_color: row.color_or(&["outlinecolour", "tertiarycolour"], base.outline_color),
        back_color: row.color_or(&["backcolour"], base.back_color),
        bold: row.flag_or("bold", base.bold),
        italic: row.flag_or("italic", base.italic),
        underline: row.flag_or("underline", base.underline),
        strikeout: row.flag_or("strikeout", base.strikeout),
        scale_x: row.parse_or("scalex", base.scale_x),
        scale_y: row.parse_or("scaley", base.scale_y),
        spacing: row.parse_or("spacing", base.spacing),
        angle: row.parse_or("angle", base.angle),
        border_style: row.parse_or("borderstyle", base.border_style),
        outline: row.parse_or("outline", base.outline),
        shadow: row.parse_or("shadow", base.shadow),
        alignment: alignment.unwrap_or(base.alignment),
        margin_l: row.parse_or("marginl", base.margin_l),
        margin_r: row.parse_or("marginr", base.margin_r),
        margin_v: row.parse_or("marginv", base.margin_v),
        alpha_level: row.parse_or("alphalevel", base.alpha_level),
        encoding: row.parse_or("encoding", base.encoding),
    })
}

/// Parse the fields of a Dialogue: or Comment: line.
fn parse_event_line(
    rest: &str,
    format: &[String],
    is_comment: bool,
    line_num: usize,
) -> Result<SubtitleEvent, ParseError> {
    // Text may contain commas, so everything from its column on is one value
    let text_index = format
        .iter()
        .position(|f| f == "text")
        .unwrap_or(format.len().saturating_sub(1));

    let values: Vec<&str> = rest.trim_start().splitn(text_index + 1, ',').collect();
    if values.len() < text_index {
        return Err(ParseError::invalid_event(
            line_num,
            format!("{} of {} leading fields present", values.len(), text_index),
        ));
    }

    let row = FieldRow {
        names: format,
        values,
    };
    let base = SubtitleEvent::default();
    let time = |name: &str, fallback: i64| match row.get(name) {
        Some(value) => parse_ass_time(value, line_num),
        None => Ok(fallback),
    };

    Ok(SubtitleEvent {
        start_ms: time("start", base.start_ms)?,
        end_ms: time("end", base.end_ms)?,
        // Leading spaces are part of the text
        text: row.raw("text").unwrap_or_default().to_string(),
        style: row
            .get("style")
            .map(|v| v.trim_start_matches('*').to_string())
            .unwrap_or(base.style),
        layer: row.parse_or("layer", base.layer),
        marked: row.get("marked").is_some_and(|v| v.ends_with('1')),
        is_comment,
        actor: row.text(&["name", "actor"]),
        // Zero defers to the style margin
        margin_l: parse_margin(row.get("marginl")),
        margin_r: parse_margin(row.get("marginr")),
        margin_v: parse_margin(row.get("marginv")),
        effect: row.text(&["effect"]),
    })
}

fn parse_margin(value: Option<&str>) -> Option<i32> {
    value?.parse().ok().filter(|margin| *margin != 0)
}

/// Parse a SubStation timestamp (`H:MM:SS.cc`) to milliseconds.
fn parse_ass_time(value: &str, line_num: usize) -> Result<i64, ParseError> {
    TIMESTAMP
        .captures(value)
        .and_then(|caps| timestamp_to_ms(&caps))
        .ok_or_else(|| ParseError::invalid_time(line_num, value))
}

/// Default style fields when the file has no `Format:` line.
fn default_style_format(dialect: SubtitleFormat) -> Vec<String> {
    let fields: &[&str] = match dialect {
        SubtitleFormat::Ssa => &[
            "name",
            "fontname",
            "fontsize",
            "primarycolour",
            "secondarycolour",
            "tertiarycolour",
            "backcolour",
            "bold",
            "italic",
            "borderstyle",
            "outline",
            "shadow",
            "alignment",
            "marginl",
            "marginr",
            "marginv",
            "alphalevel",
            "encoding",
        ],
        _ => &[
            "name",
            "fontname",
            "fontsize",
            "primarycolour",
            "secondarycolour",
            "outlinecolour",
            "backcolour",
            "bold",
            "italic",
            "underline",
            "strikeout",
            "scalex",
            "scaley",
            "spacing",
            "angle",
            "borderstyle",
            "outline",
            "shadow",
            "alignment",
            "marginl",
            "marginr",
            "marginv",
            "encoding",
        ],
    };
    fields.iter().map(|s| s.to_string()).collect()
}

/// Default event fields when the file has no `Format:` line.
fn default_event_format(dialect: SubtitleFormat) -> Vec<String> {
    let first = match dialect {
        SubtitleFormat::Ssa => "marked",
        _ => "layer",
    };
    [
        first, "start", "end", "style", "name", "marginl", "marginr", "marginv", "effect", "text",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPISODE: &str = r#"[Script Info]
; written by hand
Title: Harbour Lights
ScriptType: v4.00+
PlayResX: 640
PlayResY: 360
WrapStyle: 2
Timer: 100.0000

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Main,Georgia,24,&H00F0F0F0,&H000000FF,&H00202020,&H80000000,0,0,0,0,100,100,0,0,1,1.5,0,2,20,20,18,1
Style: Caption,Tahoma,18,&H0000FFFF,&H000000FF,&H00000000,&H00000000,-1,-1,0,0,90,100,1,0,1,1,0,7,12,12,12,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:02.50,0:00:05.10,Main,Ines,0,0,0,,The tide turns at nine, not ten.
Dialogue: 2,0:01:00.00,0:01:03.25,*Caption,,0,30,0,Banner;8,  NORTH PIER
Comment: 0,0:01:10.00,0:01:12.00,Main,,0,0,0,,timing check

[Fonts]
fontname: harbour.ttf
"#;

    #[test]
    fn test_parse_episode() {
        let data = parse_ass(EPISODE).unwrap();
        assert_eq!(data.format, SubtitleFormat::Ass);

        assert_eq!(data.metadata.title.as_deref(), Some("Harbour Lights"));
        assert_eq!(data.metadata.play_res_x, Some(640));
        assert_eq!(data.metadata.play_res_y, Some(360));
        assert_eq!(data.metadata.wrap_style, Some(2));
        assert_eq!(data.metadata.get_custom("Timer"), Some("100.0000"));
        assert_eq!(data.metadata.get_custom("fontname"), None);
        assert_eq!(data.fonts_opaque, vec![OpaqueAttachment::new("harbour.ttf")]);

        let main = &data.styles[0];
        assert_eq!(data.styles.len(), 2);
        assert_eq!(main.name, "Main");
        assert_eq!(main.fontname, "Georgia");
        assert_eq!(main.outline, 1.5);
        assert_eq!(main.margin_v, 18);
        let caption = &data.styles[1];
        assert!(caption.bold && caption.italic);
        assert_eq!(caption.scale_x, 90.0);
        assert_eq!(caption.alignment, Alignment::TopLeft);

        assert_eq!(data.events.len(), 3);
        let first = &data.events[0];
        assert_eq!((first.start_ms, first.end_ms), (2500, 5100));
        assert_eq!(first.actor.as_deref(), Some("Ines"));
        assert_eq!(first.text, "The tide turns at nine, not ten.");

        let banner = &data.events[1];
        assert_eq!(banner.layer, 2);
        assert_eq!(banner.style, "Caption");
        assert_eq!(banner.actor, None);
        assert_eq!(banner.margin_l, None);
        assert_eq!(banner.margin_r, Some(30));
        assert_eq!(banner.effect.as_deref(), Some("Banner;8"));
        assert_eq!(banner.text, "  NORTH PIER");

        assert!(data.events[2].is_comment);
        assert_eq!(data.dialogue_count(), 2);
    }

    #[test]
    fn test_attachment_lines_kept_verbatim() {
        let content = r#"[Script Info]
Title: Ferry

[Fonts]
fontname: ferry_0.ttf
;A!:)M
[X@B]
fontname: ferry_1.ttf
!:=5

[Graphics]
filename: map.png
0P"

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,Boarding
"#;
        let data = parse_ass(content).unwrap();

        assert_eq!(data.fonts_opaque.len(), 2);
        assert_eq!(data.fonts_opaque[0].name, "ferry_0.ttf");
        assert_eq!(data.fonts_opaque[0].lines, [";A!:)M", "[X@B]"]);
        assert_eq!(data.fonts_opaque[1].lines, ["!:=5"]);
        assert_eq!(data.graphics_opaque.len(), 1);
        assert_eq!(data.graphics_opaque[0].name, "map.png");
        assert_eq!(data.graphics_opaque[0].lines, ["0P\""]);
        assert_eq!(data.events.len(), 1);
        assert_eq!(data.metadata.title.as_deref(), Some("Ferry"));
    }

    #[test]
    fn test_parse_ssa_dialect() {
        let content = r#"[Script Info]
ScriptType: v4.00

[V4 Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, TertiaryColour, BackColour, Bold, Italic, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, AlphaLevel, Encoding
Style: Default,Arial,20,16777215,65535,65535,-2147483640,-1,0,1,3,0,6,30,30,30,0,0

[Events]
Format: Marked, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: Marked=1,0:00:00.00,0:01:00.00,Default,,0000,0000,0000,,Test
"#;
        let data = parse_ass(content).unwrap();
        assert_eq!(data.format, SubtitleFormat::Ssa);
        assert!(data.styles[0].bold);
        assert_eq!(data.styles[0].alignment, Alignment::TopCenter);
        assert_eq!(data.styles[0].primary_color, AssColor::from_rgb(255, 255, 255));
        assert_eq!(data.styles[0].outline_color, AssColor::from_rgb(255, 255, 0));
        assert!(data.events[0].marked);
        assert_eq!(data.events[0].end_ms, 60_000);
    }

    #[test]
    fn test_missing_styles_keep_default() {
        let content = "[Events]\nDialogue: 0,0:00:00.00,0:00:01.00,Default,,0,0,0,,Hi\n";
        let data = parse_ass(content).unwrap();
        assert_eq!(data.styles.len(), 1);
        assert_eq!(data.styles[0].name, "Default");
        assert_eq!(data.events[0].text, "Hi");
    }

    #[test]
    fn test_invalid_time() {
        let content = "[Events]\nDialogue: 0,bogus,0:00:01.00,Default,,0,0,0,,Hi\n";
        assert!(matches!(
            parse_ass(content),
            Err(ParseError::InvalidTime { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_format_line() {
        let format = parse_format_line(" Name, Fontname, Fontsize, PrimaryColour");
        assert_eq!(format, vec!["name", "fontname", "fontsize", "primarycolour"]);
    }
}
