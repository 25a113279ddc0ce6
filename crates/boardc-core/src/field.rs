//! Single-field validation.
//!
//! The free functions check one YAML value against one constraint kind and
//! return the normalized value. [`Fields`] wraps an entity's `config` mapping,
//! applies defaults for absent keys and remembers which keys were read so the
//! caller can report the ones it never looked at.
//!
//! Booleans and `{0, 1}` flags are distinct kinds: [`boolean`] rejects `0`/`1`
//! and a `{0, 1}` [`IntRule::OneOf`] rejects `true`/`false`.

use serde_yaml::{Mapping, Value};

use crate::error::{Constraint, FieldError};

/// Integer constraint applied after the type check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntRule {
    /// Any integer.
    Any,
    /// `value >= n`.
    AtLeast(i64),
    /// `value > n`.
    GreaterThan(i64),
    /// `lo <= value <= hi`.
    InRange(i64, i64),
    /// Membership in an explicit set.
    OneOf(&'static [i64]),
}

/// The `{0, 1}` set used by flag fields.
pub const FLAG: &[i64] = &[0, 1];

/// Render a YAML value for an error message.
pub fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Sequence(_) => "<sequence>".into(),
        Value::Mapping(_) => "<mapping>".into(),
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, describe_value(&tagged.value)),
    }
}

fn fail(field: &str, value: &Value, constraint: Constraint) -> FieldError {
    FieldError {
        field: field.to_string(),
        value: describe_value(value),
        constraint,
    }
}

/// Check that `value` is an integer satisfying `rule`.
pub fn integer(field: &str, value: &Value, rule: IntRule) -> Result<i64, FieldError> {
    let n = match value {
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
    .ok_or_else(|| fail(field, value, Constraint::Integer))?;

    let violated = match rule {
        IntRule::Any => None,
        IntRule::AtLeast(min) if n < min => Some(Constraint::AtLeast(min)),
        IntRule::GreaterThan(bound) if n <= bound => Some(Constraint::GreaterThan(bound)),
        IntRule::InRange(lo, hi) if n < lo || n > hi => Some(Constraint::InRange(lo, hi)),
        IntRule::OneOf(set) if !set.contains(&n) => Some(Constraint::OneOf(set)),
        _ => None,
    };
    match violated {
        Some(constraint) => Err(fail(field, value, constraint)),
        None => Ok(n),
    }
}

/// Check that `value` is exactly a boolean.
pub fn boolean(field: &str, value: &Value) -> Result<bool, FieldError> {
    value
        .as_bool()
        .ok_or_else(|| fail(field, value, Constraint::Boolean))
}

/// Check that `value` is one of `choices`, returning the matching entry.
pub fn choice(
    field: &str,
    value: &Value,
    choices: &'static [&'static str],
) -> Result<&'static str, FieldError> {
    let s = value
        .as_str()
        .ok_or_else(|| fail(field, value, Constraint::String))?;
    choices
        .iter()
        .copied()
        .find(|c| *c == s)
        .ok_or_else(|| fail(field, value, Constraint::Choice(choices)))
}

/// Reader over an entity's `config` mapping.
#[derive(Debug)]
pub struct Fields<'a> {
    map: Option<&'a Mapping>,
    read: Vec<&'static str>,
}

impl<'a> Fields<'a> {
    /// Wrap a `config` mapping. `None` reads as an empty mapping.
    pub fn new(map: Option<&'a Mapping>) -> Self {
        Self {
            map,
            read: Vec::new(),
        }
    }

    fn lookup(&mut self, key: &'static str) -> Option<&'a Value> {
        self.read.push(key);
        self.map.and_then(|m| m.get(key))
    }

    /// Read an integer, falling back to `default` when absent.
    pub fn integer(
        &mut self,
        key: &'static str,
        default: i64,
        rule: IntRule,
    ) -> Result<i64, FieldError> {
        let value = self
            .lookup(key)
            .cloned()
            .unwrap_or_else(|| Value::Number(default.into()));
        integer(key, &value, rule)
    }

    /// Read a `{0, 1}` flag.
    pub fn flag(&mut self, key: &'static str, default: i64) -> Result<i64, FieldError> {
        self.integer(key, default, IntRule::OneOf(FLAG))
    }

    /// Read a boolean.
    pub fn boolean(&mut self, key: &'static str, default: bool) -> Result<bool, FieldError> {
        let value = self
            .lookup(key)
            .cloned()
            .unwrap_or(Value::Bool(default));
        boolean(key, &value)
    }

    /// Read a string restricted to `choices`.
    pub fn choice(
        &mut self,
        key: &'static str,
        default: &'static str,
        choices: &'static [&'static str],
    ) -> Result<&'static str, FieldError> {
        let value = self
            .lookup(key)
            .cloned()
            .unwrap_or_else(|| Value::String(default.to_string()));
        choice(key, &value, choices)
    }

    /// Keys present in the mapping that were never read, in mapping order.
    pub fn unread(&self) -> Vec<String> {
        let Some(map) = self.map else {
            return Vec::new();
        };
        map.keys()
            .map(|k| match k.as_str() {
                Some(s) => s.to_string(),
                None => describe_value(k),
            })
            .filter(|k| !self.read.iter().any(|r| r == k))
            .collect()
    }

    /// Log a warning for every key the parser did not read.
    pub fn warn_unread(&self, entity: &str, kind: &str) {
        for key in self.unread() {
            log::warn!("{kind} '{entity}': ignoring unknown config field '{key}'");
        }
    }
}
