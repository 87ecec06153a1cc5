//! Sectioned key paths
//!
//! Configuration keys are addressed as `Section:Sub:Key`. Environment
//! variables cannot portably contain `:`, so `__` is accepted as an
//! alternative separator when mapping variable names.

use std::fmt;

/// Separator used in rendered key paths.
pub const KEY_DELIMITER: &str = ":";

/// Separator accepted in environment variable names.
pub const ENV_KEY_DELIMITER: &str = "__";

/// A parsed configuration key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// The empty path, addressing the configuration root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a `:`-separated path. Empty segments are dropped.
    pub fn parse(path: &str) -> Self {
        Self::from_segments(path.split(KEY_DELIMITER))
    }

    /// Map an environment variable name (`Db__Timeout`, `Db:Timeout`) to a path.
    pub fn from_env_name(name: &str) -> Self {
        Self::parse(&name.replace(ENV_KEY_DELIMITER, KEY_DELIMITER))
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path extended by one child segment.
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(KEY_DELIMITER))
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

/// Normalized lookup form of a single key segment.
pub(crate) fn normalize(segment: &str) -> String {
    segment.to_ascii_lowercase()
}
