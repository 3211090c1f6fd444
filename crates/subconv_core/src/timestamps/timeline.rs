//! Frame/time conversion over a fixed timing model.
//!
//! A [`FrameTimeline`] maps frame indices to millisecond presentation times and
//! back. It is built either from an explicit per-frame timestamp table
//! (variable frame rate) or from a constant frame rate. Outside the known
//! table, times are extrapolated linearly with the rational rate
//! `numerator / denominator` frames per millisecond.
//!
//! # Anchors
//!
//! A frame is an interval, not an instant. [`TimeAnchor`] selects which instant
//! a conversion refers to:
//!
//! - **Start**: first millisecond at which a subtitle starting there is shown
//!   on this frame.
//! - **Exact**: the frame's presentation timestamp.
//! - **End**: last millisecond at which a subtitle ending there still covers
//!   this frame.
//!
//! Extrapolated values are rounded half-up.

use serde::{Deserialize, Serialize};

use super::error::{TimelineError, TimelineResult};
use super::fps::{is_valid_fps, reduce};

/// Which moment within a frame's display interval a conversion refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeAnchor {
    /// The instant the frame starts being shown.
    Start,
    /// The frame's nominal presentation time.
    #[default]
    Exact,
    /// The instant just before the next frame replaces it.
    End,
}

/// Immutable mapping between frame indices and millisecond timestamps.
///
/// Read-only after construction, so one instance can be shared freely across
/// threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTimeline {
    /// Known presentation timestamps, one per frame (a single `0` placeholder
    /// for constant-rate timelines).
    timestamps: Vec<i64>,
    /// Frames per `denominator` milliseconds.
    numerator: i64,
    /// Milliseconds per `numerator` frames.
    denominator: i64,
}

impl FrameTimeline {
    /// Build a timeline from an explicit per-frame timestamp list.
    ///
    /// The list must have at least two entries, be non-decreasing and not be
    /// constant. With `normalize`, every entry is shifted so the first one is 0.
    ///
    /// Past the end of the table, frames are spaced `last / (count - 1)` ms
    /// apart, so the last timestamp must be positive.
    pub fn from_explicit_timestamps(timestamps: Vec<i64>, normalize: bool) -> TimelineResult<Self> {
        validate(&timestamps)?;

        let timestamps = if normalize && timestamps[0] != 0 {
            let first = timestamps[0];
            timestamps.into_iter().map(|t| t - first).collect()
        } else {
            timestamps
        };

        let count = timestamps.len() as i64;
        let last = timestamps[timestamps.len() - 1];
        if last <= 0 {
            return Err(TimelineError::InvalidTimeline(
                "the last timestamp must be after 0".to_string(),
            ));
        }

        tracing::debug!("[Timeline] {} explicit timestamps up to {}ms", count, last);

        Ok(Self {
            timestamps,
            numerator: count - 1,
            denominator: last,
        })
    }

    /// Build a constant frame rate timeline.
    ///
    /// `fps` must satisfy `0 < fps <= 1000`. The value is stored as a rational
    /// with a resolution of 1e-12 fps, so `23.976` means exactly 23.976 and
    /// not 24000/1001 (use [`FrameTimeline::from_fps_ratio`] for that). Rates
    /// too small for that resolution are rejected.
    pub fn from_constant_fps(fps: f64) -> TimelineResult<Self> {
        if !is_valid_fps(fps) {
            return Err(TimelineError::InvalidFrameRate(fps));
        }

        // fps <= 1000, so the scaled value stays below 2^50
        let scaled = (fps * FPS_SCALE as f64).round() as u64;
        let (num, den) = reduce(scaled, FPS_SCALE * 1000);
        if num == 0 {
            return Err(TimelineError::InvalidFrameRate(fps));
        }
        Ok(Self::constant(num as i64, den as i64))
    }

    /// Build a constant frame rate timeline from an exact rational rate.
    ///
    /// `24000, 1001` is NTSC film (23.976...).
    pub fn from_fps_ratio(fps_num: u32, fps_den: u32) -> TimelineResult<Self> {
        if fps_den == 0 {
            return Err(TimelineError::InvalidFrameRate(f64::INFINITY));
        }
        let fps = fps_num as f64 / fps_den as f64;
        if !is_valid_fps(fps) {
            return Err(TimelineError::InvalidFrameRate(fps));
        }

        let (num, den) = reduce(fps_num as u64, fps_den as u64 * 1000);
        Ok(Self::constant(num as i64, den as i64))
    }

    fn constant(numerator: i64, denominator: i64) -> Self {
        Self {
            timestamps: vec![0],
            numerator,
            denominator,
        }
    }

    /// Known timestamps. Constant-rate timelines hold a single `0`.
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Number of frames with a known timestamp.
    pub fn frame_count(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether this timeline was built from a frame rate rather than a table.
    pub fn is_constant_rate(&self) -> bool {
        self.timestamps.len() == 1
    }

    /// Extrapolation rate as `(frames, milliseconds)`.
    pub fn rate(&self) -> (i64, i64) {
        (self.numerator, self.denominator)
    }

    /// Average frame rate in frames per second.
    pub fn fps(&self) -> f64 {
        self.numerator as f64 * 1000.0 / self.denominator as f64
    }

    /// First known timestamp.
    pub fn first_ms(&self) -> i64 {
        self.timestamps[0]
    }

    /// Last known timestamp.
    pub fn last_ms(&self) -> i64 {
        self.timestamps[self.timestamps.len() - 1]
    }

    fn last_index(&self) -> i64 {
        self.timestamps.len() as i64 - 1
    }

    /// Convert a frame index to milliseconds.
    ///
    /// Fails with `OutOfRange` for negative frames and for frames whose time
    /// does not fit in an `i64`. Frames past the known table are extrapolated.
    pub fn frame_to_ms(&self, frame: i64, anchor: TimeAnchor) -> TimelineResult<i64> {
        if frame < 0 {
            return Err(out_of_range(frame, "frame must not be negative"));
        }

        let ms = match anchor {
            TimeAnchor::Exact => self.exact_ms(frame)?,
            TimeAnchor::Start if frame == 0 => self.first_ms(),
            TimeAnchor::Start => {
                let prev = after(self.exact_ms(frame - 1)?)?;
                let curr = self.exact_ms(frame)?;
                prev + (curr - prev).div_euclid(2)
            }
            TimeAnchor::End => {
                let next_frame = frame
                    .checked_add(1)
                    .ok_or_else(|| out_of_range(frame, "frame is too large"))?;
                let curr = after(self.exact_ms(frame)?)?;
                let next = self.exact_ms(next_frame)?;
                curr + (next - curr).div_euclid(2)
            }
        };
        Ok(ms)
    }

    /// Convert milliseconds to a frame index.
    ///
    /// Fails with `OutOfRange` for times before the first timestamp. With the
    /// `End` anchor, the first timestamp maps to `-1` (nothing has ended yet).
    pub fn ms_to_frame(&self, ms: i64, anchor: TimeAnchor) -> TimelineResult<i64> {
        let first = self.first_ms();
        if ms < first {
            return Err(out_of_range(ms, "time is before the first timestamp"));
        }

        let frame = match anchor {
            TimeAnchor::Exact => self.exact_frame(ms)?,
            TimeAnchor::Start if ms == first => 0,
            TimeAnchor::Start => after(self.exact_frame(ms - 1)?)?,
            TimeAnchor::End if ms == first => -1,
            TimeAnchor::End => self.exact_frame(ms - 1)?,
        };
        Ok(frame)
    }

    /// Presentation time of a non-negative frame.
    fn exact_ms(&self, frame: i64) -> TimelineResult<i64> {
        let last_index = self.last_index();
        if frame <= last_index {
            return Ok(self.timestamps[frame as usize]);
        }

        let frames_past_end = (frame - last_index) as i128;
        let offset = round_half_up_div(
            frames_past_end * self.denominator as i128,
            self.numerator as i128,
        );
        i64::try_from(self.last_ms() as i128 + offset)
            .map_err(|_| out_of_range(frame, "frame time does not fit in 64 bits"))
    }

    /// Last frame whose presentation time is not after `ms` (`ms >= first`).
    fn exact_frame(&self, ms: i64) -> TimelineResult<i64> {
        if ms <= self.last_ms() {
            let idx = self.timestamps.partition_point(|&t| t <= ms);
            return Ok(idx as i64 - 1);
        }

        // Largest f with round(f * den / num) <= m, i.e. f < (m + 0.5) * num / den.
        let m = ms as i128 - self.last_ms() as i128;
        let upper_num = (2 * m + 1) * self.numerator as i128;
        let upper_den = 2 * self.denominator as i128;
        let mut frames_past_end = upper_num.div_euclid(upper_den);
        if upper_num.rem_euclid(upper_den) == 0 {
            frames_past_end -= 1;
        }
        i64::try_from(self.last_index() as i128 + frames_past_end)
            .map_err(|_| out_of_range(ms, "frame index does not fit in 64 bits"))
    }
}

/// Denominator scale for float frame rates: 1e-12 fps resolution.
const FPS_SCALE: u64 = 1_000_000_000_000;

fn out_of_range(value: i64, message: &'static str) -> TimelineError {
    TimelineError::OutOfRange { value, message }
}

/// `value + 1`, or `OutOfRange` at `i64::MAX`.
fn after(value: i64) -> TimelineResult<i64> {
    value
        .checked_add(1)
        .ok_or_else(|| out_of_range(value, "value is too large"))
}

/// `round(a / b)` with ties rounded up, for `b > 0`.
pub(crate) fn round_half_up_div(a: i128, b: i128) -> i128 {
    let rounds_up = 2 * a.rem_euclid(b) >= b;
    a.div_euclid(b) + i128::from(rounds_up)
}

fn validate(timestamps: &[i64]) -> TimelineResult<()> {
    if timestamps.len() < 2 {
        return Err(TimelineError::InvalidTimeline(
            "there must be at least 2 timestamps".to_string(),
        ));
    }
    if timestamps.windows(2).any(|w| w[0] > w[1]) {
        return Err(TimelineError::InvalidTimeline(
            "timestamps must be in non-decreasing order".to_string(),
        ));
    }
    if timestamps.iter().all(|&t| t == timestamps[0]) {
        return Err(TimelineError::InvalidTimeline(
            "timestamps must not be all identical".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vfr() -> FrameTimeline {
        FrameTimeline::from_explicit_timestamps(vec![0, 1000, 1500, 2000, 2001, 2002, 2003], true)
            .unwrap()
    }

    #[test]
    fn test_explicit_validation() {
        assert!(matches!(
            FrameTimeline::from_explicit_timestamps(vec![5], true),
            Err(TimelineError::InvalidTimeline(_))
        ));
        assert!(matches!(
            FrameTimeline::from_explicit_timestamps(vec![5, 3], true),
            Err(TimelineError::InvalidTimeline(_))
        ));
        assert!(matches!(
            FrameTimeline::from_explicit_timestamps(vec![5, 5], true),
            Err(TimelineError::InvalidTimeline(_))
        ));
        assert!(FrameTimeline::from_explicit_timestamps(vec![5, 5, 6], true).is_ok());
    }

    #[test]
    fn test_normalize() {
        let tl = FrameTimeline::from_explicit_timestamps(vec![100, 140, 180], true).unwrap();
        assert_eq!(tl.timestamps(), &[0, 40, 80]);
        assert_eq!(tl.rate(), (2, 80));

        let tl = FrameTimeline::from_explicit_timestamps(vec![100, 140, 180], false).unwrap();
        assert_eq!(tl.timestamps(), &[100, 140, 180]);
        assert_eq!(tl.first_ms(), 100);
    }

    #[test]
    fn test_unnormalized_extrapolation_uses_last_timestamp() {
        let tl = FrameTimeline::from_explicit_timestamps(vec![100, 140, 180], false).unwrap();
        assert_eq!(tl.rate(), (2, 180));
        // 180 + round(1 * 180 / 2)
        assert_eq!(tl.frame_to_ms(3, TimeAnchor::Exact).unwrap(), 270);
        assert_eq!(tl.ms_to_frame(270, TimeAnchor::Exact).unwrap(), 3);
        assert_eq!(tl.ms_to_frame(269, TimeAnchor::Exact).unwrap(), 2);

        assert!(matches!(
            FrameTimeline::from_explicit_timestamps(vec![-80, -40, 0], false),
            Err(TimelineError::InvalidTimeline(_))
        ));
        assert!(FrameTimeline::from_explicit_timestamps(vec![-80, -40, 0], true).is_ok());
    }

    #[test]
    fn test_constant_fps_validation() {
        assert!(matches!(
            FrameTimeline::from_constant_fps(0.0),
            Err(TimelineError::InvalidFrameRate(_))
        ));
        assert!(matches!(
            FrameTimeline::from_constant_fps(1001.0),
            Err(TimelineError::InvalidFrameRate(_))
        ));
        assert!(FrameTimeline::from_constant_fps(1000.0).is_ok());
        assert!(FrameTimeline::from_fps_ratio(24000, 0).is_err());
    }

    #[test]
    fn test_constant_fps_exact() {
        let tl = FrameTimeline::from_constant_fps(25.0).unwrap();
        assert!(tl.is_constant_rate());
        assert_eq!(tl.frame_to_ms(0, TimeAnchor::Exact).unwrap(), 0);
        assert_eq!(tl.frame_to_ms(1, TimeAnchor::Exact).unwrap(), 40);
        assert_eq!(tl.frame_to_ms(250, TimeAnchor::Exact).unwrap(), 10_000);
        assert_eq!(tl.ms_to_frame(39, TimeAnchor::Exact).unwrap(), 0);
        assert_eq!(tl.ms_to_frame(40, TimeAnchor::Exact).unwrap(), 1);
        assert_eq!(tl.ms_to_frame(79, TimeAnchor::Exact).unwrap(), 1);
    }

    #[test]
    fn test_ntsc_ratio() {
        let tl = FrameTimeline::from_fps_ratio(24000, 1001).unwrap();
        // 1001 / 24 = 41.708333...
        assert_eq!(tl.frame_to_ms(1, TimeAnchor::Exact).unwrap(), 42);
        assert_eq!(tl.frame_to_ms(24, TimeAnchor::Exact).unwrap(), 1001);
        assert_eq!(tl.ms_to_frame(1001, TimeAnchor::Exact).unwrap(), 24);
        assert!((tl.fps() - 23.976).abs() < 0.001);
    }

    #[test]
    fn test_vfr_exact() {
        let tl = vfr();
        assert_eq!(tl.frame_to_ms(3, TimeAnchor::Exact).unwrap(), 2000);
        assert_eq!(tl.ms_to_frame(2000, TimeAnchor::Exact).unwrap(), 3);
        assert_eq!(tl.ms_to_frame(1999, TimeAnchor::Exact).unwrap(), 2);
        assert_eq!(tl.ms_to_frame(2003, TimeAnchor::Exact).unwrap(), 6);
        assert_eq!(tl.ms_to_frame(2004, TimeAnchor::Exact).unwrap(), 6);
    }

    #[test]
    fn test_vfr_extrapolation() {
        let tl = vfr();
        // 2003ms over 6 frames: 333.83ms per frame past the end.
        assert_eq!(tl.frame_to_ms(7, TimeAnchor::Exact).unwrap(), 2003 + 334);
        assert_eq!(tl.frame_to_ms(8, TimeAnchor::Exact).unwrap(), 2003 + 668);
        assert_eq!(tl.ms_to_frame(2003 + 334, TimeAnchor::Exact).unwrap(), 7);
        assert_eq!(tl.ms_to_frame(2003 + 333, TimeAnchor::Exact).unwrap(), 6);
    }

    #[test]
    fn test_out_of_range() {
        let tl = vfr();
        assert!(matches!(
            tl.frame_to_ms(-1, TimeAnchor::Exact),
            Err(TimelineError::OutOfRange { value: -1, .. })
        ));
        assert!(matches!(
            tl.ms_to_frame(-1, TimeAnchor::Start),
            Err(TimelineError::OutOfRange { .. })
        ));

        let shifted = FrameTimeline::from_explicit_timestamps(vec![100, 140, 180], false).unwrap();
        assert!(shifted.ms_to_frame(99, TimeAnchor::Exact).is_err());
        assert_eq!(shifted.ms_to_frame(100, TimeAnchor::Exact).unwrap(), 0);
    }

    #[test]
    fn test_start_end_anchors() {
        let tl = vfr();
        assert_eq!(tl.frame_to_ms(0, TimeAnchor::Start).unwrap(), 0);
        // between 0 (+1) and 1000
        assert_eq!(tl.frame_to_ms(1, TimeAnchor::Start).unwrap(), 500);
        assert_eq!(tl.frame_to_ms(0, TimeAnchor::End).unwrap(), 500);
        assert_eq!(tl.frame_to_ms(1, TimeAnchor::End).unwrap(), 1250);
        assert_eq!(tl.frame_to_ms(3, TimeAnchor::End).unwrap(), 2001);
    }

    #[test]
    fn test_ms_to_frame_anchors() {
        let tl = FrameTimeline::from_constant_fps(1000.0).unwrap();
        assert_eq!(tl.ms_to_frame(0, TimeAnchor::Start).unwrap(), 0);
        assert_eq!(tl.ms_to_frame(0, TimeAnchor::End).unwrap(), -1);
        assert_eq!(tl.ms_to_frame(10, TimeAnchor::Start).unwrap(), 10);
        assert_eq!(tl.ms_to_frame(11, TimeAnchor::End).unwrap(), 10);
        assert_eq!(tl.frame_to_ms(10, TimeAnchor::Start).unwrap(), 10);
        assert_eq!(tl.frame_to_ms(20, TimeAnchor::End).unwrap(), 21);
    }

    #[test]
    fn test_end_meets_next_start() {
        for tl in [vfr(), FrameTimeline::from_constant_fps(23.976).unwrap()] {
            for frame in 0..200 {
                let end = tl.frame_to_ms(frame, TimeAnchor::End).unwrap();
                let next_start = tl.frame_to_ms(frame + 1, TimeAnchor::Start).unwrap();
                assert!(end <= next_start, "frame {}: {} > {}", frame, end, next_start);
                assert!(end + 1 >= next_start, "frame {}: gap after {}", frame, end);
            }
        }
    }

    #[test]
    fn test_roundtrip_constant_fps() {
        for fps in [23.976, 24.0, 25.0, 29.97, 59.94, 1000.0] {
            let tl = FrameTimeline::from_constant_fps(fps).unwrap();
            for frame in 0..2000 {
                let ms = tl.frame_to_ms(frame, TimeAnchor::Exact).unwrap();
                assert_eq!(
                    tl.ms_to_frame(ms, TimeAnchor::Exact).unwrap(),
                    frame,
                    "fps {} frame {}",
                    fps,
                    frame
                );
            }
        }
    }

    #[test]
    fn test_tiny_frame_rates() {
        let tl = FrameTimeline::from_constant_fps(1e-7).unwrap();
        assert_eq!(tl.frame_to_ms(1, TimeAnchor::Exact).unwrap(), 10_000_000_000);
        assert_eq!(tl.ms_to_frame(10_000_000_000, TimeAnchor::Exact).unwrap(), 1);

        assert!(matches!(
            FrameTimeline::from_constant_fps(1e-13),
            Err(TimelineError::InvalidFrameRate(_))
        ));
    }

    #[test]
    fn test_huge_values_are_out_of_range() {
        let tl = FrameTimeline::from_constant_fps(25.0).unwrap();
        assert!(matches!(
            tl.frame_to_ms(i64::MAX, TimeAnchor::End),
            Err(TimelineError::OutOfRange { .. })
        ));
        assert!(matches!(
            tl.frame_to_ms(i64::MAX, TimeAnchor::Exact),
            Err(TimelineError::OutOfRange { .. })
        ));

        let slow = FrameTimeline::from_constant_fps(1.0).unwrap();
        assert!(matches!(
            slow.frame_to_ms(i64::MAX / 100, TimeAnchor::Exact),
            Err(TimelineError::OutOfRange { .. })
        ));
        assert_eq!(
            slow.ms_to_frame(i64::MAX, TimeAnchor::Exact).unwrap(),
            i64::MAX / 1000
        );

        let dense = FrameTimeline::from_explicit_timestamps(vec![0, 0, 0, 0, 1], true).unwrap();
        assert!(matches!(
            dense.ms_to_frame(i64::MAX, TimeAnchor::Exact),
            Err(TimelineError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_round_half_up_div() {
        assert_eq!(round_half_up_div(5, 2), 3);
        assert_eq!(round_half_up_div(4, 3), 1);
        assert_eq!(round_half_up_div(-5, 2), -2);
        let big = i64::MAX as i128;
        assert_eq!(round_half_up_div(big * big, big), big);
    }

    #[test]
    fn timeline_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FrameTimeline>();
    }
}
