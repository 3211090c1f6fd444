//! Configuration management for subconv.
//!
//! This module provides:
//! - TOML-based configuration with `[logging]`, `[input]` and `[output]` sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//!
//! # Example
//!
//! ```no_run
//! use subconv_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new("subconv.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Default fps: {:?}", config.settings().input.fps);
//!
//! config.settings_mut().output.vtt_cue_identifiers = true;
//! config.update_section(ConfigSection::Output).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{ConfigSection, InputSettings, LoggingSettings, OutputSettings, Settings};
