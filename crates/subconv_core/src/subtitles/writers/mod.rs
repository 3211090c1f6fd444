//! Subtitle writers for various formats.
//!
//! Each writer is a pure function that takes SubtitleData and returns a formatted string.

mod ass;
mod json;
mod microdvd;
mod mpl2;
mod srt;
mod tmp;
mod vtt;

pub use ass::{format_ass_time, write_ass, write_ssa};
pub use json::write_json;
pub use microdvd::write_microdvd;
pub use mpl2::write_mpl2;
pub use srt::{format_srt_time, write_srt};
pub use tmp::write_tmp;
pub use vtt::{format_vtt_time, write_vtt};

use crate::subtitles::error::SubtitleResult;
use crate::subtitles::types::{SubtitleData, SubtitleFormat, WriteOptions};

/// Write subtitle data to string in the specified format.
pub fn write_content(
    data: &SubtitleData,
    format: SubtitleFormat,
    options: &WriteOptions,
) -> SubtitleResult<String> {
    tracing::debug!(
        "[Writer] Writing {} events as {}",
        data.events.len(),
        format
    );

    Ok(match format {
        SubtitleFormat::Ass => write_ass(data, options),
        SubtitleFormat::Ssa => write_ssa(data, options),
        SubtitleFormat::Srt => write_srt(data, options)?,
        SubtitleFormat::WebVtt => write_vtt(data, options),
        SubtitleFormat::MicroDvd => write_microdvd(data, options)?,
        SubtitleFormat::Tmp => write_tmp(data),
        SubtitleFormat::Mpl2 => write_mpl2(data),
        SubtitleFormat::Json => write_json(data)?,
    })
}
