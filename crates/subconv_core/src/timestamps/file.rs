//! Timestamp file (format v2) loading.
//!
//! A v2 file is a header line followed by one integer millisecond timestamp
//! per frame:
//!
//! ```text
//! # timestamp format v2
//! 0
//! 42
//! 83
//! ```
//!
//! The older `timecode` spelling of the header is accepted as well.

use std::fs;
use std::path::Path;

use super::error::{TimelineError, TimelineResult};
use super::timeline::FrameTimeline;

const HEADER_PREFIX: &str = "# timestamp format";
const UNSUPPORTED_VERSIONS: [&str; 3] = ["v1", "v3", "v4"];

impl FrameTimeline {
    /// Load a timeline from a v2 timestamp file.
    pub fn from_timestamp_file(path: impl AsRef<Path>, normalize: bool) -> TimelineResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TimelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("[Timeline] Reading timestamp file {}", path.display());
        parse_timestamp_file(&content, path, normalize)
    }

    /// Parse v2 timestamp file content that is already in memory.
    pub fn from_timestamp_str(content: &str, normalize: bool) -> TimelineResult<Self> {
        parse_timestamp_file(content, Path::new("<memory>"), normalize)
    }
}

fn parse_timestamp_file(content: &str, path: &Path, normalize: bool) -> TimelineResult<FrameTimeline> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines();

    let header = lines
        .next()
        .unwrap_or_default()
        .trim()
        .replace("timecode", "timestamp");

    if let Some(version) = header.strip_prefix(HEADER_PREFIX).map(str::trim) {
        if UNSUPPORTED_VERSIONS.contains(&version) {
            return Err(TimelineError::UnsupportedTimelineFormat {
                path: path.to_path_buf(),
                version: format!("timestamp format {}", version),
            });
        }
    }
    if header != format!("{} v2", HEADER_PREFIX) {
        return Err(TimelineError::malformed(
            path,
            1,
            "expected '# timestamp format v2' header",
        ));
    }

    let mut timestamps = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let value: i64 = line.parse().map_err(|_| {
            TimelineError::malformed(path, idx + 2, format!("'{}' is not an integer timestamp", line))
        })?;
        timestamps.push(value);
    }

    FrameTimeline::from_explicit_timestamps(timestamps, normalize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamps::TimeAnchor;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_v2() {
        let tl = FrameTimeline::from_timestamp_str(
            "# timestamp format v2\n0\n1000\n1500\n2000\n2001\n2002\n2003\n",
            true,
        )
        .unwrap();
        assert_eq!(tl.frame_count(), 7);
        assert_eq!(tl.ms_to_frame(2004, TimeAnchor::Exact).unwrap(), 6);
    }

    #[test]
    fn test_legacy_header_comments_and_bom() {
        let tl = FrameTimeline::from_timestamp_str(
            "\u{feff}# timecode format v2\r\n# comment\r\n\r\n10\r\n50\r\n90\r\n",
            true,
        )
        .unwrap();
        assert_eq!(tl.timestamps(), &[0, 40, 80]);
    }

    #[test]
    fn test_no_normalize() {
        let tl = FrameTimeline::from_timestamp_str("# timestamp format v2\n10\n50\n90\n", false).unwrap();
        assert_eq!(tl.first_ms(), 10);
    }

    #[test]
    fn test_unsupported_versions() {
        for version in ["v1", "v3", "v4"] {
            let content = format!("# timestamp format {}\n0\n40\n", version);
            assert!(matches!(
                FrameTimeline::from_timestamp_str(&content, true),
                Err(TimelineError::UnsupportedTimelineFormat { .. })
            ));
        }
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            FrameTimeline::from_timestamp_str("garbage\n0\n40\n", true),
            Err(TimelineError::MalformedTimelineFile { line: 1, .. })
        ));
        assert!(matches!(
            FrameTimeline::from_timestamp_str("", true),
            Err(TimelineError::MalformedTimelineFile { line: 1, .. })
        ));
        assert!(matches!(
            FrameTimeline::from_timestamp_str("# timestamp format v2\n0\n4x0\n", true),
            Err(TimelineError::MalformedTimelineFile { line: 3, .. })
        ));
    }

    #[test]
    fn test_too_few_timestamps() {
        assert!(matches!(
            FrameTimeline::from_timestamp_str("# timestamp format v2\n0\n", true),
            Err(TimelineError::InvalidTimeline(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# timestamp format v2").unwrap();
        for ts in [0, 42, 83, 125] {
            writeln!(file, "{}", ts).unwrap();
        }
        let tl = FrameTimeline::from_timestamp_file(file.path(), true).unwrap();
        assert_eq!(tl.frame_count(), 4);
        assert_eq!(tl.frame_to_ms(2, TimeAnchor::Exact).unwrap(), 83);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            FrameTimeline::from_timestamp_file("/nonexistent/timestamps.txt", true),
            Err(TimelineError::Read { .. })
        ));
    }
}
