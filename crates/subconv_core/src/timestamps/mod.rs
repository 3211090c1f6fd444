//! Frame/time conversion.
//!
//! # Components
//!
//! - **timeline**: `FrameTimeline` and the START/EXACT/END conversion rules
//! - **fps**: frame rate helpers (fractions, validation)
//! - **file**: timestamp file (v2) loading
//! - **probe**: per-packet timestamps from a video via ffprobe
//!
//! # Usage
//!
//! ```ignore
//! use subconv_core::timestamps::{FrameTimeline, TimeAnchor};
//!
//! let timeline = FrameTimeline::from_constant_fps(25.0)?;
//! assert_eq!(timeline.frame_to_ms(1, TimeAnchor::Exact)?, 40);
//!
//! let vfr = FrameTimeline::from_timestamp_file("timestamps.txt", true)?;
//! let frame = vfr.ms_to_frame(12_345, TimeAnchor::Start)?;
//! ```

mod error;
mod file;
pub mod fps;
mod probe;
mod timeline;

pub use error::{TimelineError, TimelineResult};
pub use fps::{fps_to_fraction, is_valid_fps, parse_fps_fraction};
pub use timeline::{FrameTimeline, TimeAnchor};

pub(crate) use timeline::round_half_up_div;
