//! Timeline extraction from a video file using ffprobe.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use serde_json::Value;

use super::error::{TimelineError, TimelineResult};
use super::timeline::{round_half_up_div, FrameTimeline};

impl FrameTimeline {
    /// Build a timeline from the packet timestamps of a video stream.
    ///
    /// Runs `ffprobe` on `path` and reads the presentation time of every packet
    /// of stream `stream_index`. The stream must be a video stream.
    pub fn from_media_probe(
        path: impl AsRef<Path>,
        stream_index: usize,
        normalize: bool,
    ) -> TimelineResult<Self> {
        let path = path.as_ref();
        tracing::debug!(
            "[Timeline] Probing stream {} of {}",
            stream_index,
            path.display()
        );

        let output = Command::new("ffprobe")
            .args(["-v", "error", "-select_streams"])
            .arg(stream_index.to_string())
            .args([
                "-show_entries",
                "packet=pts_time:stream=codec_type",
                "-print_format",
                "json",
            ])
            .arg(path)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    TimelineError::MediaProbeUnavailable
                }
                _ => TimelineError::probe(path, format!("failed to run ffprobe: {}", e)),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TimelineError::probe(
                path,
                format!(
                    "ffprobe exited with code {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            ));
        }

        let json: Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| TimelineError::probe(path, format!("invalid ffprobe output: {}", e)))?;

        let timestamps = parse_probe_json(&json, path, stream_index)?;
        tracing::debug!("[Timeline] ffprobe reported {} packets", timestamps.len());
        FrameTimeline::from_explicit_timestamps(timestamps, normalize)
    }
}

/// Extract sorted packet timestamps (ms) from ffprobe JSON output.
pub(crate) fn parse_probe_json(
    json: &Value,
    path: &Path,
    stream_index: usize,
) -> TimelineResult<Vec<i64>> {
    if json.as_object().map_or(true, |o| o.is_empty()) {
        return Err(TimelineError::probe(
            path,
            "not a media file or the file does not exist",
        ));
    }

    let codec_type = json
        .get("streams")
        .and_then(|s| s.as_array())
        .and_then(|s| s.first())
        .map(|s| s.get("codec_type").and_then(|c| c.as_str()).unwrap_or("unknown"))
        .ok_or_else(|| TimelineError::probe(path, format!("no stream with index {}", stream_index)))?;

    if codec_type != "video" {
        return Err(TimelineError::probe(
            path,
            format!("stream {} is a {} stream, not video", stream_index, codec_type),
        ));
    }

    let mut timestamps = Vec::new();
    if let Some(packets) = json.get("packets").and_then(|p| p.as_array()) {
        for packet in packets {
            let Some(pts) = packet.get("pts_time").and_then(|p| p.as_str()) else {
                continue;
            };
            if pts == "N/A" {
                continue;
            }
            let ms = seconds_str_to_ms(pts)
                .ok_or_else(|| TimelineError::probe(path, format!("invalid pts_time '{}'", pts)))?;
            timestamps.push(ms);
        }
    }

    timestamps.sort_unstable();
    Ok(timestamps)
}

/// Convert a decimal seconds string such as `"1.001000"` to milliseconds,
/// rounding half-up without going through floating point.
fn seconds_str_to_ms(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole: i128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = String::from(&frac[..frac.len().min(9)]);
    while nanos.len() < 9 {
        nanos.push('0');
    }
    let nanos: i128 = nanos.parse().ok()?;

    let mut total = whole * 1_000_000_000 + nanos;
    if negative {
        total = -total;
    }
    Some(round_half_up_div(total, 1_000_000) as i64)
}
