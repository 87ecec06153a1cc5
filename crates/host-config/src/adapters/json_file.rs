//! JSON file configuration layer

use crate::domain::errors::ConfigError;
use crate::domain::tree::ConfigSection;
use crate::ports::outbound::ConfigurationSource;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const UTF8_BOM: char = '\u{feff}';

/// A JSON document on disk. Optional unless marked otherwise.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    name: String,
    path: PathBuf,
    rank: u32,
    optional: bool,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>, rank: u32) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            path,
            rank,
            optional: true,
        }
    }

    /// Treat absence as an error.
    pub fn required(mut self) -> Self {
        self.optional = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, contents: &str) -> Result<ConfigSection, ConfigError> {
        let contents = contents.strip_prefix(UTF8_BOM).unwrap_or(contents);
        let value: serde_json::Value =
            serde_json::from_str(contents).map_err(|e| ConfigError::parse(&self.name, &e))?;
        ConfigSection::from_json(&self.name, value)
    }
}

impl ConfigurationSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn rank(&self) -> u32 {
        self.rank
    }

    fn is_optional(&self) -> bool {
        self.optional
    }

    fn load(&self) -> Result<Option<ConfigSection>, ConfigError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(source = %self.name, path = %self.path.display(), "Configuration file not found");
                if self.optional {
                    return Ok(None);
                }
                return Err(ConfigError::SourceMissing {
                    source_name: self.name.clone(),
                });
            }
            Err(e) => {
                return Err(ConfigError::Io {
                    source_name: self.name.clone(),
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        self.parse(&contents).map(Some)
    }
}
