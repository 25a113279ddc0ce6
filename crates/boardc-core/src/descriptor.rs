//! Struct descriptors: the validated output of every parser.
//!
//! A descriptor names the target structure type, optionally a variable name,
//! and an ordered initializer map. Field order is preserved exactly as the
//! parser inserted it so downstream emitters produce stable output.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One initializer value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InitValue {
    /// A string literal or symbolic constant.
    Str(String),
    /// An integer literal.
    Int(i64),
    /// A boolean literal.
    Bool(bool),
    /// A nested sub-structure (e.g. `flags`).
    Nested(InitMap),
}

impl From<&str> for InitValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for InitValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for InitValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for InitValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<InitMap> for InitValue {
    fn from(m: InitMap) -> Self {
        Self::Nested(m)
    }
}

/// Insertion-ordered map from member name to initializer value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitMap {
    entries: Vec<(String, InitValue)>,
}

impl InitMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a member. A replaced member keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<InitValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<InitValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a member.
    pub fn get(&self, key: &str) -> Option<&InitValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Member names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no members.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for InitMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// The typed record a parser produces for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDescriptor {
    /// Target structure type name.
    pub struct_type: String,
    /// Suggested variable name; derived from the entity name when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub struct_var: Option<String>,
    /// Ordered initializer.
    pub struct_init: InitMap,
}

impl StructDescriptor {
    /// Create a descriptor without a suggested variable name.
    pub fn new(struct_type: impl Into<String>, struct_init: InitMap) -> Self {
        Self {
            struct_type: struct_type.into(),
            struct_var: None,
            struct_init,
        }
    }

    /// Set the suggested variable name.
    pub fn with_var(mut self, var: impl Into<String>) -> Self {
        self.struct_var = Some(var.into());
        self
    }

    /// The variable name to emit for `entity`.
    pub fn var_name(&self, entity: &str) -> String {
        match &self.struct_var {
            Some(var) => var.clone(),
            None => default_var_name(entity),
        }
    }
}

/// `<entity>_cfg`, with non-identifier characters replaced by `_`.
pub fn default_var_name(entity: &str) -> String {
    let mut ident: String = entity
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident.push_str("_cfg");
    ident
}
