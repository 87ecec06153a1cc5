//! Configuration tree and deep merge
//!
//! A layer is a tree of keyed nodes. Layers are merged path by path: a later
//! scalar replaces only the scalar at its own path and later children merge
//! into the existing ones, so no key the later layer leaves out is lost.

use super::errors::ConfigError;
use super::key_path::{normalize, KeyPath};
use serde_json::{Map, Number, Value};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

/// A scalar configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl ConfigValue {
    /// String form used by typed accessors and diagnostics.
    pub fn as_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// A node of the configuration tree.
///
/// A node may carry a scalar and children at the same time: `Db` can hold a
/// value while `Db:Timeout` holds another. Each path is overridden on its own.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigNode {
    value: Option<ConfigValue>,
    children: ConfigSection,
}

impl ConfigNode {
    /// Scalar at this exact path, including an explicit null.
    pub fn as_value(&self) -> Option<&ConfigValue> {
        self.value.as_ref()
    }

    /// Children of this node. `None` only for a plain scalar leaf.
    pub fn as_section(&self) -> Option<&ConfigSection> {
        match (&self.value, self.children.is_empty()) {
            (Some(_), true) => None,
            _ => Some(&self.children),
        }
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::scalar(ConfigValue::Null),
            Value::Bool(b) => Self::scalar(ConfigValue::Bool(b)),
            Value::Number(n) => Self::scalar(ConfigValue::Number(n)),
            Value::String(s) => Self::scalar(ConfigValue::String(s)),
            Value::Array(items) => {
                let mut children = ConfigSection::new();
                for (index, item) in items.into_iter().enumerate() {
                    children.merge_child(&index.to_string(), Self::from_json(item));
                }
                Self::section(children)
            }
            Value::Object(map) => Self::section(ConfigSection::from_map(map)),
        }
    }

    fn scalar(value: ConfigValue) -> Self {
        Self {
            value: Some(value),
            children: ConfigSection::new(),
        }
    }

    fn section(children: ConfigSection) -> Self {
        Self {
            value: None,
            children,
        }
    }

    /// A later value overrides only this path; later children merge below it.
    fn merge(&mut self, later: ConfigNode) {
        if let Some(value) = later.value {
            self.value = Some(value);
        }
        self.children.merge(later.children);
    }

    /// Render as JSON. A node with both a scalar and children renders its
    /// children; the scalar stays readable through the typed getters.
    pub fn to_json(&self) -> Value {
        self.render(false)
    }

    fn render(&self, canonical: bool) -> Value {
        match &self.value {
            Some(value) if self.children.is_empty() => value.to_json(),
            Some(value) if canonical => {
                let mut map = self.children.render_map(canonical);
                map.insert(String::new(), value.to_json());
                Value::Object(map)
            }
            _ => self.children.render(canonical),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    /// Key as spelled by the first layer that introduced it
    key: String,
    node: ConfigNode,
}

/// A section: keys matched ASCII case-insensitively, iterated in a stable order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigSection {
    entries: BTreeMap<String, Slot>,
}

impl ConfigSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layer from a JSON document. The root must be an object.
    pub fn from_json(source_name: &str, value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(ConfigError::Parse {
                source_name: source_name.to_string(),
                line: 1,
                column: 1,
                message: format!("root must be a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    /// Object keys may be flat paths (`"Db:Timeout"`); they land in the same
    /// nested slot as `{"Db": {"Timeout": ..}}`. Empty keys are ignored.
    fn from_map(map: Map<String, Value>) -> Self {
        let mut section = Self::new();
        for (key, value) in map {
            section.merge_at(KeyPath::parse(&key).segments(), ConfigNode::from_json(value));
        }
        section
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Direct child by key (case-insensitive).
    pub fn child(&self, key: &str) -> Option<&ConfigNode> {
        self.entries.get(&normalize(key)).map(|e| &e.node)
    }

    /// Node at a path below this section.
    pub fn node(&self, path: &KeyPath) -> Option<&ConfigNode> {
        let (first, rest) = path.segments().split_first()?;
        let mut current = self.child(first)?;
        for segment in rest {
            current = current.children.child(segment)?;
        }
        Some(current)
    }

    /// Keys as first spelled, in stable order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigNode)> {
        self.entries.values().map(|e| (e.key.as_str(), &e.node))
    }

    /// Set a scalar at `path`, creating intermediate nodes. Values and
    /// children already on the path are kept.
    pub fn set(&mut self, path: &KeyPath, value: ConfigValue) {
        self.merge_at(path.segments(), ConfigNode::scalar(value));
    }

    /// Deep-merge a later (higher precedence) layer into this one.
    pub fn merge(&mut self, later: ConfigSection) {
        for (normalized, incoming) in later.entries {
            match self.entries.entry(normalized) {
                Entry::Occupied(mut slot) => slot.get_mut().node.merge(incoming.node),
                Entry::Vacant(slot) => {
                    slot.insert(incoming);
                }
            }
        }
    }

    fn merge_at(&mut self, segments: &[String], node: ConfigNode) {
        let Some((last, parents)) = segments.split_last() else {
            return;
        };
        let mut current = self;
        for segment in parents {
            current = &mut current.slot_mut(segment).children;
        }
        current.merge_child(last, node);
    }

    fn merge_child(&mut self, key: &str, node: ConfigNode) {
        self.slot_mut(key).merge(node);
    }

    /// Child node for `key`, created empty when missing. Keeps the existing
    /// key spelling.
    fn slot_mut(&mut self, key: &str) -> &mut ConfigNode {
        &mut self
            .entries
            .entry(normalize(key))
            .or_insert_with(|| Slot {
                key: key.to_string(),
                node: ConfigNode::default(),
            })
            .node
    }

    /// Render as JSON. Sections keyed exactly `0..n` render as arrays.
    pub fn to_json(&self) -> Value {
        self.render(false)
    }

    /// Lossless rendering: a node holding both a scalar and children renders
    /// as an object whose `""` key holds the scalar. Path segments are never
    /// empty, so that key cannot collide with a child.
    pub fn to_canonical_json(&self) -> Value {
        self.render(true)
    }

    fn render(&self, canonical: bool) -> Value {
        if let Some(items) = self.as_array() {
            return Value::Array(items.into_iter().map(|n| n.render(canonical)).collect());
        }
        Value::Object(self.render_map(canonical))
    }

    fn render_map(&self, canonical: bool) -> Map<String, Value> {
        let mut map = Map::new();
        for entry in self.entries.values() {
            map.insert(entry.key.clone(), entry.node.render(canonical));
        }
        map
    }

    fn as_array(&self) -> Option<Vec<&ConfigNode>> {
        if self.entries.is_empty() {
            return None;
        }
        (0..self.entries.len())
            .map(|i| self.entries.get(&i.to_string()).map(|e| &e.node))
            .collect()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn layer(value: Value) -> ConfigSection {
        ConfigSection::from_json("test", value).unwrap()
    }

    #[test]
    fn test_merge_recurses_into_sections() {
        let mut base = layer(json!({"Db": {"Timeout": 30, "Host": "localhost"}}));
        base.merge(layer(json!({"Db": {"Timeout": 60}})));

        assert_eq!(base.to_json(), json!({"Db": {"Host": "localhost", "Timeout": 60}}));
    }

    #[test]
    fn test_merge_is_case_insensitive_and_keeps_first_spelling() {
        let mut base = layer(json!({"Db": {"Timeout": 30}}));
        base.merge(layer(json!({"DB": {"TIMEOUT": 90}})));

        assert_eq!(base.to_json(), json!({"Db": {"Timeout": 90}}));
    }

    #[test]
    fn test_scalar_and_section_share_a_path() {
        let mut base = layer(json!({"Db": "inline"}));
        base.merge(layer(json!({"Db": {"Timeout": 1}})));
        let db = base.child("Db").unwrap();
        assert_eq!(db.as_value(), Some(&ConfigValue::from("inline")));
        assert_eq!(db.as_section().map(ConfigSection::len), Some(1));

        base.merge(layer(json!({"Db": "inline-again"})));
        let db = base.child("Db").unwrap();
        assert_eq!(db.as_value(), Some(&ConfigValue::from("inline-again")));
        assert_eq!(
            base.node(&KeyPath::parse("Db:Timeout")).and_then(ConfigNode::as_value),
            Some(&ConfigValue::Number(1u64.into()))
        );
    }

    #[test]
    fn test_later_null_keeps_children() {
        let mut base = layer(json!({"Db": {"Timeout": 30}}));
        base.merge(layer(json!({"Db": null})));

        assert_eq!(base.child("Db").unwrap().as_value(), Some(&ConfigValue::Null));
        assert_eq!(base.to_json(), json!({"Db": {"Timeout": 30}}));
        assert_eq!(base.to_canonical_json(), json!({"Db": {"": null, "Timeout": 30}}));
    }

    #[test]
    fn test_arrays_merge_by_index() {
        let mut base = layer(json!({"Hosts": ["a", "b", "c"]}));
        base.merge(layer(json!({"Hosts": ["x"]})));

        assert_eq!(base.to_json(), json!({"Hosts": ["x", "b", "c"]}));
    }

    #[test]
    fn test_set_creates_sections_and_keeps_scalars() {
        let mut section = layer(json!({"Db": 5}));
        section.set(&KeyPath::parse("Db:Timeout"), ConfigValue::from("90"));

        let db = section.child("Db").unwrap();
        assert_eq!(db.as_value(), Some(&ConfigValue::Number(5u64.into())));
        assert_eq!(section.to_json(), json!({"Db": {"Timeout": "90"}}));

        section.set(&KeyPath::parse("Db"), ConfigValue::from("flat"));
        assert_eq!(section.to_canonical_json(), json!({"Db": {"": "flat", "Timeout": "90"}}));
    }

    #[test]
    fn test_flat_keys_nest() {
        let mut section = layer(json!({"Db:Timeout": 30, "Db": {"Host": "localhost"}, "": 1}));
        assert_eq!(section.to_json(), json!({"Db": {"Host": "localhost", "Timeout": 30}}));

        section.set(&KeyPath::parse("db:timeout"), ConfigValue::from("90"));
        assert_eq!(section.to_json(), json!({"Db": {"Host": "localhost", "Timeout": "90"}}));
    }

    #[test]
    fn test_root_must_be_object() {
        let err = ConfigSection::from_json("appsettings.json", json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("root must be a JSON object"));
    }

    #[test]
    fn test_node_lookup() {
        let section = layer(json!({"Logging": {"LogLevel": {"Default": "Warning"}}}));
        let node = section.node(&KeyPath::parse("logging:loglevel:default")).unwrap();
        assert_eq!(node.as_value(), Some(&ConfigValue::from("Warning")));
    }
}
