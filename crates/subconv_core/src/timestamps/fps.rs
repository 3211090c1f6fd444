//! Frame rate helpers.
//!
//! Frame rates are carried as exact rationals wherever possible so that long
//! runs of frames do not accumulate floating-point drift.

/// Highest frame rate a timeline accepts (one frame per millisecond).
pub const MAX_FPS: f64 = 1000.0;

/// Convert FPS to fraction for NTSC rates.
///
/// NTSC standards use fractional rates (N×1000/1001) to avoid color/audio drift.
///
/// # Returns
/// (numerator, denominator) tuple
pub fn fps_to_fraction(fps: f64) -> (u64, u64) {
    if (fps - 23.976).abs() < 0.001 {
        (24000, 1001)
    } else if (fps - 29.97).abs() < 0.001 {
        (30000, 1001)
    } else if (fps - 59.94).abs() < 0.001 {
        (60000, 1001)
    } else if fps.fract() == 0.0 {
        (fps as u64, 1)
    } else {
        let (num, den) = reduce((fps * 1_000_000.0).round() as u64, 1_000_000);
        (num, den)
    }
}

/// Parse a frame rate written as `"24000/1001"`, `"25"` or `"23.976"`.
///
/// Returns the rate as a reduced `(numerator, denominator)` pair in frames
/// per second, ready for [`FrameTimeline::from_fps_ratio`]. Decimal input
/// goes through [`fps_to_fraction`], so `23.976` becomes `24000/1001`.
/// Zero, negative and unparsable rates give `None`.
///
/// [`FrameTimeline::from_fps_ratio`]: super::FrameTimeline::from_fps_ratio
pub fn parse_fps_fraction(s: &str) -> Option<(u32, u32)> {
    let (num, den) = match s.split_once('/') {
        Some((num, den)) => (num.trim().parse().ok()?, den.trim().parse().ok()?),
        None => {
            let fps: f64 = s.trim().parse().ok()?;
            if !fps.is_finite() || fps <= 0.0 {
                return None;
            }
            fps_to_fraction(fps)
        }
    };
    if num == 0 || den == 0 {
        return None;
    }

    let (num, den) = reduce(num, den);
    Some((u32::try_from(num).ok()?, u32::try_from(den).ok()?))
}

/// Check that a frame rate is usable by a timeline.
pub fn is_valid_fps(fps: f64) -> bool {
    fps.is_finite() && fps > 0.0 && fps <= MAX_FPS
}

/// Greatest common divisor.
pub(crate) fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Reduce a fraction to lowest terms.
pub(crate) fn reduce(num: u64, den: u64) -> (u64, u64) {
    let g = gcd(num, den).max(1);
    (num / g, den / g)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_to_fraction() {
        assert_eq!(fps_to_fraction(23.976), (24000, 1001));
        assert_eq!(fps_to_fraction(29.97), (30000, 1001));
        assert_eq!(fps_to_fraction(25.0), (25, 1));
        assert_eq!(fps_to_fraction(12.5), (25, 2));
    }

    #[test]
    fn test_parse_fps_fraction() {
        assert_eq!(parse_fps_fraction("24000/1001"), Some((24000, 1001)));
        assert_eq!(parse_fps_fraction(" 50/2 "), Some((25, 1)));
        assert_eq!(parse_fps_fraction("25"), Some((25, 1)));
        assert_eq!(parse_fps_fraction("29.97"), Some((30000, 1001)));
        assert_eq!(parse_fps_fraction("12.5"), Some((25, 2)));
        assert!(parse_fps_fraction("25/0").is_none());
        assert!(parse_fps_fraction("0").is_none());
        assert!(parse_fps_fraction("-25").is_none());
        assert!(parse_fps_fraction("invalid").is_none());
        assert!(parse_fps_fraction("1e30").is_none());
    }

    #[test]
    fn test_is_valid_fps() {
        assert!(is_valid_fps(23.976));
        assert!(is_valid_fps(1000.0));
        assert!(!is_valid_fps(0.0));
        assert!(!is_valid_fps(-25.0));
        assert!(!is_valid_fps(1000.5));
        assert!(!is_valid_fps(f64::NAN));
    }

    #[test]
    fn test_reduce() {
        assert_eq!(reduce(25_000_000, 1_000_000_000), (1, 40));
        assert_eq!(gcd(0, 7), 7);
    }
}
