//! Time conversion helpers shared by the format readers and writers.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::error::{SubtitleError, SubtitleResult};
use crate::timestamps::{FrameTimeline, TimeAnchor};

/// Matches both SubStation and SubRip timestamps (`0:00:01.50`, `00:00:01,500`).
pub static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2}):(\d{1,2}):(\d{1,2})[.,](\d{1,3})").expect("invalid timestamp regex")
});

/// Matches `H:MM:SS` / `HH:MM:SS` timestamps without fractions.
pub static TIMESTAMP_SHORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}):(\d{2}):(\d{2})").expect("invalid short timestamp regex"));

/// Normalized `(hours, minutes, seconds, milliseconds)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Times {
    pub h: i64,
    pub m: i64,
    pub s: i64,
    pub ms: i64,
}

/// Convert hours, minutes, seconds and milliseconds to whole milliseconds.
///
/// Arguments need not be normalized (`s = 120.0` is fine) and may be negative.
pub fn times_to_ms(h: f64, m: f64, s: f64, ms: f64) -> i64 {
    (ms + s * 1000.0 + m * 60_000.0 + h * 3_600_000.0).round() as i64
}

/// Split non-negative milliseconds into normalized [`Times`].
pub fn ms_to_times(ms: i64) -> Times {
    let h = ms.div_euclid(3_600_000);
    let rest = ms.rem_euclid(3_600_000);
    Times {
        h,
        m: rest / 60_000,
        s: rest % 60_000 / 1000,
        ms: rest % 1000,
    }
}

/// Pretty-print milliseconds as `[-]H:MM:SS[.mmm]`.
pub fn ms_to_str(ms: i64, fractions: bool) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let t = ms_to_times(ms.abs());
    if fractions {
        format!("{}{}:{:02}:{:02}.{:03}", sign, t.h, t.m, t.s, t.ms)
    } else {
        format!("{}{}:{:02}:{:02}", sign, t.h, t.m, t.s)
    }
}

/// Components for [`make_time`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSpec<'a> {
    pub h: f64,
    pub m: f64,
    pub s: f64,
    pub ms: f64,
    /// Frame count, converted with `timeline` instead of the other fields.
    pub frames: Option<i64>,
    pub timeline: Option<&'a FrameTimeline>,
}

/// Build a millisecond value from clock components or from a frame count.
///
/// When `frames` and `timeline` are both set the result is the distance from
/// frame 0 to frame `|frames|` (negated for negative counts). Setting only one
/// of them is an error.
pub fn make_time(spec: TimeSpec<'_>) -> SubtitleResult<i64> {
    match (spec.frames, spec.timeline) {
        (None, None) => Ok(times_to_ms(spec.h, spec.m, spec.s, spec.ms)),
        (Some(frames), Some(timeline)) => {
            let origin = timeline.frame_to_ms(0, TimeAnchor::Exact)?;
            let target = timeline.frame_to_ms(frames.abs(), TimeAnchor::Exact)?;
            Ok(if frames < 0 {
                origin - target
            } else {
                target - origin
            })
        }
        _ => Err(SubtitleError::InvalidArgument(
            "both frames and a timeline must be specified".to_string(),
        )),
    }
}

/// Convert a [`TIMESTAMP`] or [`TIMESTAMP_SHORT`] match to milliseconds.
///
/// The fraction is scaled by its digit count (`.5` is 500ms, `.50` too).
pub fn timestamp_to_ms(caps: &Captures<'_>) -> Option<i64> {
    let field = |i: usize| -> Option<i64> { caps.get(i)?.as_str().parse().ok() };
    let h = field(1)?;
    let m = field(2)?;
    let s = field(3)?;
    let ms = match caps.get(4) {
        Some(frac) => {
            let digits = frac.as_str();
            let value: i64 = digits.parse().ok()?;
            value * 10_i64.pow(3u32.saturating_sub(digits.len() as u32))
        }
        None => 0,
    };
    Some(ms + s * 1000 + m * 60_000 + h * 3_600_000)
}
