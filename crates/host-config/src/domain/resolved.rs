//! The resolved configuration
//!
//! Produced once per startup by merging every configuration layer. Read-only
//! afterward and safe to share between threads.

use super::errors::ConfigError;
use super::key_path::KeyPath;
use super::tree::{ConfigNode, ConfigSection, ConfigValue};
use serde::de::DeserializeOwned;
use std::fmt;

/// Whether a layer contributed to the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    Loaded,
    /// Optional source that was absent
    Skipped,
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded => write!(f, "loaded"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// Provenance record for one configuration layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub name: String,
    pub rank: u32,
    pub status: SourceStatus,
}

/// Merged configuration: a mapping from key paths to values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedConfiguration {
    root: ConfigSection,
    sources: Vec<SourceReport>,
}

impl ResolvedConfiguration {
    pub fn new(root: ConfigSection, sources: Vec<SourceReport>) -> Self {
        Self { root, sources }
    }

    /// Node (value or section) at `path`.
    pub fn get(&self, path: &str) -> Option<&ConfigNode> {
        self.root.node(&KeyPath::parse(path))
    }

    /// Scalar at `path`. Nulls and nodes with only children read as absent.
    pub fn get_value(&self, path: &str) -> Option<&ConfigValue> {
        self.get(path)
            .and_then(ConfigNode::as_value)
            .filter(|v| !v.is_null())
    }

    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get_value(path).map(ConfigValue::as_text)
    }

    /// Boolean at `path`; accepts JSON booleans and `true`/`false` strings.
    pub fn get_bool(&self, path: &str) -> Result<Option<bool>, ConfigError> {
        let Some(value) = self.get_value(path) else {
            return Ok(None);
        };
        match value {
            ConfigValue::Bool(b) => Ok(Some(*b)),
            ConfigValue::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(Some(true)),
            ConfigValue::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(Some(false)),
            other => Err(invalid(path, "boolean", other)),
        }
    }

    pub fn get_i64(&self, path: &str) -> Result<Option<i64>, ConfigError> {
        self.get_parsed(path, "integer", |n| n.as_i64())
    }

    pub fn get_u64(&self, path: &str) -> Result<Option<u64>, ConfigError> {
        self.get_parsed(path, "unsigned integer", |n| n.as_u64())
    }

    pub fn get_f64(&self, path: &str) -> Result<Option<f64>, ConfigError> {
        self.get_parsed(path, "number", |n| n.as_f64())
    }

    fn get_parsed<T: std::str::FromStr>(
        &self,
        path: &str,
        expected: &'static str,
        from_number: impl Fn(&serde_json::Number) -> Option<T>,
    ) -> Result<Option<T>, ConfigError> {
        let Some(value) = self.get_value(path) else {
            return Ok(None);
        };
        let parsed = match value {
            ConfigValue::Number(n) => from_number(n),
            ConfigValue::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        parsed
            .map(Some)
            .ok_or_else(|| invalid(path, expected, value))
    }

    /// Scalars of an array-shaped section, in index order. Non-index keys
    /// and nested sections are ignored.
    pub fn get_strings(&self, path: &str) -> Vec<String> {
        let Some(section) = self.section(path) else {
            return Vec::new();
        };
        let mut items: Vec<(usize, String)> = section
            .iter()
            .filter_map(|(key, node)| {
                let index = key.parse::<usize>().ok()?;
                let value = node.as_value().filter(|v| !v.is_null())?;
                Some((index, value.as_text()))
            })
            .collect();
        items.sort_by_key(|(index, _)| *index);
        items.into_iter().map(|(_, value)| value).collect()
    }

    /// String at `path`, failing when absent or blank.
    pub fn require_string(&self, path: &str) -> Result<String, ConfigError> {
        match self.get_string(path) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::MissingRequiredValue {
                path: path.to_string(),
            }),
        }
    }

    /// Section at `path`. The empty path addresses the root.
    pub fn section(&self, path: &str) -> Option<&ConfigSection> {
        let key = KeyPath::parse(path);
        if key.is_root() {
            return Some(&self.root);
        }
        self.root.node(&key).and_then(ConfigNode::as_section)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Deserialize the section at `path` into `T`.
    ///
    /// Field names must match the spelling of the first layer that defined
    /// them; typed getters are case-insensitive, serde is not.
    pub fn bind<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConfigError> {
        let value = match self.get(path) {
            Some(node) => node.to_json(),
            None if KeyPath::parse(path).is_root() => self.root.to_json(),
            None => {
                return Err(ConfigError::MissingRequiredValue {
                    path: path.to_string(),
                })
            }
        };
        serde_json::from_value(value).map_err(|e| ConfigError::Bind {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Layers considered, lowest precedence first.
    pub fn sources(&self) -> &[SourceReport] {
        &self.sources
    }

    pub fn root(&self) -> &ConfigSection {
        &self.root
    }

    /// Stable text rendering. Equal inputs always give identical output.
    pub fn to_canonical_json(&self) -> String {
        self.root.to_canonical_json().to_string()
    }
}

/// Components constructible from a resolved configuration.
pub trait FromConfiguration: Sized {
    fn from_configuration(configuration: &ResolvedConfiguration) -> Result<Self, ConfigError>;
}

fn invalid(path: &str, expected: &'static str, value: &ConfigValue) -> ConfigError {
    ConfigError::InvalidValue {
        path: path.to_string(),
        expected,
        value: value.as_text(),
    }
}
