//! ASS/SSA subtitle writer.
//!
//! # Timing Precision
//!
//! SubStation uses centisecond timing (`H:MM:SS.cc`). Millisecond times are
//! rounded according to the configured RoundingMode at write time.

use crate::subtitles::types::{
    OpaqueAttachment, RoundingMode, SubtitleData, SubtitleEvent, SubtitleFormat,
    SubtitleMetadata, SubtitleStyle, WriteOptions,
};

const ASS_STYLE_FORMAT: &str = "Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";
const SSA_STYLE_FORMAT: &str = "Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, TertiaryColour, BackColour, Bold, Italic, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, AlphaLevel, Encoding";
const ASS_EVENT_FORMAT: &str =
    "Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";
const SSA_EVENT_FORMAT: &str =
    "Marked, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

/// Write SubtitleData as Advanced SubStation Alpha.
pub fn write_ass(data: &SubtitleData, options: &WriteOptions) -> String {
    write_substation(data, SubtitleFormat::Ass, options)
}

/// Write SubtitleData as SubStation Alpha v4.
pub fn write_ssa(data: &SubtitleData, options: &WriteOptions) -> String {
    write_substation(data, SubtitleFormat::Ssa, options)
}

fn write_substation(data: &SubtitleData, dialect: SubtitleFormat, options: &WriteOptions) -> String {
    let is_ssa = dialect == SubtitleFormat::Ssa;
    let mut output = String::new();

    output.push_str("[Script Info]\n");
    output.push_str("; Script generated by subconv\n");
    write_script_info(&mut output, &data.metadata, is_ssa);

    let (style_header, style_format, event_format) = if is_ssa {
        ("[V4 Styles]", SSA_STYLE_FORMAT, SSA_EVENT_FORMAT)
    } else {
        ("[V4+ Styles]", ASS_STYLE_FORMAT, ASS_EVENT_FORMAT)
    };

    output.push_str(&format!("\n{style_header}\nFormat: {style_format}\n"));
    for style in &data.styles {
        output.push_str(&format!("Style: {}\n", format_style(style, is_ssa)));
    }

    write_attachments(&mut output, "[Fonts]", "fontname", &data.fonts_opaque);
    write_attachments(&mut output, "[Graphics]", "filename", &data.graphics_opaque);

    output.push_str(&format!("\n[Events]\nFormat: {event_format}\n"));
    for event in &data.events {
        output.push_str(&format_event(event, is_ssa, options.rounding));
        output.push('\n');
    }

    output
}

/// Write a `[Fonts]` or `[Graphics]` section; nothing when there are no entries.
fn write_attachments(output: &mut String, header: &str, key: &str, entries: &[OpaqueAttachment]) {
    if entries.is_empty() {
        return;
    }
    output.push_str(&format!("\n{header}\n"));
    for entry in entries {
        output.push_str(&format!("{key}: {}\n", entry.name));
        for line in &entry.lines {
            output.push_str(line);
            output.push('\n');
        }
    }
}

fn write_script_info(output: &mut String, metadata: &SubtitleMetadata, is_ssa: bool) {
    let mut field = |key: &str, value: &dyn std::fmt::Display| {
        output.push_str(&format!("{key}: {value}\n"));
    };

    field("ScriptType", &if is_ssa { "v4.00" } else { "v4.00+" });
    if let Some(title) = &metadata.title {
        field("Title", title);
    }
    if let Some(value) = &metadata.original_script {
        field("Original Script", value);
    }
    if let Some(value) = &metadata.translation {
        field("Original Translation", value);
    }
    if let Some(value) = &metadata.timing {
        field("Original Timing", value);
    }
    if let Some(value) = metadata.play_res_x {
        field("PlayResX", &value);
    }
    if let Some(value) = metadata.play_res_y {
        field("PlayResY", &value);
    }
    if let Some(value) = metadata.wrap_style {
        field("WrapStyle", &value);
    }
    if let Some(value) = metadata.scaled_border_and_shadow {
        field("ScaledBorderAndShadow", &if value { "yes" } else { "no" });
    }
    if let Some(value) = &metadata.ycbcr_matrix {
        field("YCbCr Matrix", value);
    }
    for (key, value) in &metadata.custom {
        field(key.as_str(), value);
    }
}

fn format_bool(value: bool) -> &'static str {
    if value {
        "-1"
    } else {
        "0"
    }
}

fn format_style(style: &SubtitleStyle, is_ssa: bool) -> String {
    if is_ssa {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            style.name,
            style.fontname,
            style.fontsize,
            style.primary_color.to_ssa_string(),
            style.secondary_color.to_ssa_string(),
            style.outline_color.to_ssa_string(),
            style.back_color.to_ssa_string(),
            format_bool(style.bold),
            format_bool(style.italic),
            style.border_style,
            style.outline,
            style.shadow,
            style.alignment.to_ssa(),
            style.margin_l,
            style.margin_r,
            style.margin_v,
            style.alpha_level,
            style.encoding,
        )
    } else {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            style.name,
            style.fontname,
            style.fontsize,
            style.primary_color.to_ass_string(),
            style.secondary_color.to_ass_string(),
            style.outline_color.to_ass_string(),
            style.back_color.to_ass_string(),
            format_bool(style.bold),
            format_bool(style.italic),
            format_bool(style.underline),
            format_bool(style.strikeout),
            style.scale_x,
            style.scale_y,
            style.spacing,
            style.angle,
            style.border_style,
            style.outline,
            style.shadow,
            style.alignment.to_ass(),
            style.margin_l,
            style.margin_r,
            style.margin_v,
            style.encoding,
        )
    }
}

fn format_event(event: &SubtitleEvent, is_ssa: bool, rounding: RoundingMode) -> String {
    let kind = if event.is_comment { "Comment" } else { "Dialogue" };
    let first = if is_ssa {
        format!("Marked={}", u8::from(event.marked))
    } else {
        event.layer.to_string()
    };

    format!(
        "{}: {},{},{},{},{},{},{},{},{},{}",
        kind,
        first,
        format_ass_time(event.start_ms, rounding),
        format_ass_time(event.end_ms, rounding),
        event.style,
        event.actor.as_deref().unwrap_or(""),
        event.margin_l.unwrap_or(0),
        event.margin_r.unwrap_or(0),
        event.margin_v.unwrap_or(0),
        event.effect.as_deref().unwrap_or(""),
        event.text.replace('\n', "\\N"),
    )
}

/// Format milliseconds as a SubStation timestamp (`H:MM:SS.cc`).
///
/// Negative times are written as zero.
pub fn format_ass_time(ms: i64, rounding: RoundingMode) -> String {
    if ms < 0 {
        tracing::warn!("[SubStation] Negative time {}ms clamped to 0", ms);
    }
    let cs = rounding.apply_ass(ms.max(0)) / 10;

    let centis = cs % 100;
    let total_secs = cs / 100;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;

    format!("{}:{:02}:{:02}.{:02}", hours, mins, secs, centis)
}
