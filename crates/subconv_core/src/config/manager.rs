//! Reading and writing the subconv settings file.
//!
//! Writes go to a sibling `.toml.tmp` file that is renamed over the real
//! one. [`ConfigManager::update_section`] edits a single table through
//! toml_edit so hand-written comments elsewhere survive. Tables subconv does
//! not know about are dropped the next time the whole file is saved.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml_edit::{DocumentMut, Item};

use super::settings::{ConfigSection, Settings};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("settings file I/O: {0}")]
    ReadError(#[from] io::Error),

    #[error("invalid settings: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("cannot encode settings: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("settings file is not valid TOML: {0}")]
    EditParseError(#[from] toml_edit::TomlError),

    #[error("no settings file at {}", .0.display())]
    NotFound(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages the subconv settings file.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Point at a settings file without touching the disk. Settings start
    /// at their defaults until [`load`](Self::load) or
    /// [`load_or_create`](Self::load_or_create) runs.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// In-memory edits; nothing reaches disk before `save` or `update_section`.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Read an existing settings file. A missing file is an error.
    pub fn load(&mut self) -> ConfigResult<()> {
        let content = self
            .read_on_disk()?
            .ok_or_else(|| ConfigError::NotFound(self.config_path.clone()))?;
        self.settings = toml::from_str(&content)?;
        tracing::debug!("[Config] Loaded {}", self.config_path.display());
        Ok(())
    }

    /// Read the settings file, writing defaults when there is none.
    ///
    /// A file with unknown tables or missing keys is rewritten in full.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        let Some(content) = self.read_on_disk()? else {
            tracing::info!(
                "[Config] Writing defaults to {}",
                self.config_path.display()
            );
            self.settings = Settings::default();
            return self.save();
        };

        let (settings, stale) = parse_and_clean(&content)?;
        self.settings = settings;
        if stale {
            tracing::debug!("[Config] Rewriting {}", self.config_path.display());
            self.save()?;
        }
        Ok(())
    }

    /// Replace the whole file with the current settings.
    pub fn save(&self) -> ConfigResult<()> {
        let content = self.generate_config_with_comments()?;
        Ok(self.atomic_write(&content)?)
    }

    /// Rewrite one table of the file from the current settings.
    ///
    /// The file is re-read first, so other tables and their comments stay
    /// exactly as they are on disk.
    pub fn update_section(&mut self, section: ConfigSection) -> ConfigResult<()> {
        let mut doc: DocumentMut = match self.read_on_disk()? {
            Some(content) if !content.trim().is_empty() => content.parse()?,
            _ => DocumentMut::new(),
        };

        let section_doc: DocumentMut = self.section_toml(section)?.parse()?;
        doc[section.table_name()] = Item::Table(section_doc.as_table().clone());

        Ok(self.atomic_write(&doc.to_string())?)
    }

    fn read_on_disk(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.config_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Serialize one section without its table header.
    fn section_toml(&self, section: ConfigSection) -> ConfigResult<String> {
        let content = match section {
            ConfigSection::Logging => toml::to_string_pretty(&self.settings.logging)?,
            ConfigSection::Input => toml::to_string_pretty(&self.settings.input)?,
            ConfigSection::Output => toml::to_string_pretty(&self.settings.output)?,
        };
        Ok(content)
    }

    /// Full file text with a comment line above each table.
    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let mut output = String::from(
            "# subconv configuration\n# Regenerated by subconv; edits to a single table are kept on section updates.\n",
        );

        for section in ConfigSection::ALL {
            let comment = match section {
                ConfigSection::Logging => "# Log level (trace, debug, info, warn, error); RUST_LOG wins",
                ConfigSection::Input => "# Defaults for reading subtitle files",
                ConfigSection::Output => "# Defaults for writing subtitle files",
            };
            let body = self.section_toml(section)?;
            output.push_str(&format!("\n{comment}\n[{}]\n", section.table_name()));
            output.push_str(body.trim_end());
            output.push('\n');
        }

        Ok(output)
    }

    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Sibling file so the rename never crosses filesystems
        let staging = self.config_path.with_extension("toml.tmp");
        let mut file = fs::File::create(&staging)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&staging, &self.config_path)
    }
}

/// Parse config content and report whether it needs rewriting.
fn parse_and_clean(content: &str) -> ConfigResult<(Settings, bool)> {
    let doc: DocumentMut = content.parse()?;
    let settings: Settings = toml::from_str(content)?;

    let has_unknown = doc.iter().any(|(key, _)| {
        !ConfigSection::ALL
            .iter()
            .any(|section| section.table_name() == key)
    });

    // Every key the defaults would write must already be on disk
    let expected = toml::Value::try_from(&settings)?;
    let missing_keys = expected
        .as_table()
        .into_iter()
        .flatten()
        .any(|(name, section)| {
            let on_disk = doc.get(name).and_then(Item::as_table_like);
            section
                .as_table()
                .into_iter()
                .flatten()
                .any(|(key, _)| on_disk.map_or(true, |table| !table.contains_key(key)))
        });

    Ok((settings, has_unknown || missing_keys))
}
