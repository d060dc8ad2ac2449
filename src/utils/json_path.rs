//! Dot-notation field paths over `serde_json::Value` records.
//!
//! Paths are parsed once into segments ("detailedInfo.sampleMeals.breakfast"
//! becomes `["detailedInfo", "sampleMeals", "breakfast"]`) and then used for
//! both lookup and write-back, so bracket characters inside a field name are
//! never re-interpreted as array indexing.

use serde_json::{Map, Value};
use std::fmt;

/// Field path error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Cannot set value at path: {0}")]
    CannotSetValue(String),
}

/// A parsed dot-separated path into nested mappings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dot-notation path. Empty paths and empty segments are rejected.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(PathError::InvalidPath("Empty path".to_string()));
        }

        let mut segments = Vec::new();
        for (idx, part) in trimmed.split('.').enumerate() {
            if part.is_empty() {
                return Err(PathError::InvalidPath(format!(
                    "Empty path part at index {} in '{}'",
                    idx, trimmed
                )));
            }
            segments.push(part.to_string());
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolve the path against a record.
    ///
    /// A segment indexes into a mapping by key, or into a sequence when it is
    /// a decimal index (`meals.0.title`). Anything else yields `None`.
    pub fn get<'a>(&self, obj: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(obj, |current, key| match current {
                Value::Object(map) => map.get(key),
                Value::Array(items) => items.get(key.parse::<usize>().ok()?),
                _ => None,
            })
    }

    /// Set `value` at the path, creating intermediate mappings as needed.
    ///
    /// Sequences are indexed by numeric segments and padded with nulls;
    /// any other non-mapping root or intermediate is replaced by an empty
    /// mapping.
    pub fn set(&self, obj: &mut Value, value: Value) -> Result<(), PathError> {
        let slot = self.slot_mut(obj)?;
        *slot = value;
        Ok(())
    }

    /// Locate the array at this path, creating it (and any intermediates) if absent
    /// or if the current value is not an array.
    pub fn array_mut<'a>(&self, obj: &'a mut Value) -> Result<&'a mut Vec<Value>, PathError> {
        let slot = self.slot_mut(obj)?;
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }
        slot.as_array_mut()
            .ok_or_else(|| PathError::CannotSetValue(self.to_string()))
    }

    fn slot_mut<'a>(&self, obj: &'a mut Value) -> Result<&'a mut Value, PathError> {
        if self.segments.is_empty() {
            return Err(PathError::InvalidPath("No last part".to_string()));
        }

        let mut current = obj;
        for part in &self.segments {
            current = child_mut(current, part);
        }
        Ok(current)
    }
}

fn child_mut<'a>(value: &'a mut Value, key: &str) -> &'a mut Value {
    let index = if value.is_array() {
        key.parse::<usize>().ok()
    } else {
        None
    };

    match (value, index) {
        (Value::Array(items), Some(index)) => {
            if index >= items.len() {
                items.resize(index + 1, Value::Null);
            }
            &mut items[index]
        }
        (value, _) => ensure_object(value)
            .entry(key.to_string())
            .or_insert(Value::Null),
    }
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced by an object"),
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl std::str::FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Where an extracted string lives inside a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    /// A string stored directly at the field.
    Field(FieldPath),
    /// Element `i` of a string array stored at the field.
    Index(FieldPath, usize),
}

impl Address {
    /// Write `value` back at this address.
    pub fn write(&self, obj: &mut Value, value: Value) -> Result<(), PathError> {
        match self {
            Address::Field(path) => path.set(obj, value),
            Address::Index(path, index) => {
                let items = path.array_mut(obj)?;
                if *index >= items.len() {
                    items.resize(*index + 1, Value::Null);
                }
                items[*index] = value;
                Ok(())
            }
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Field(path) => write!(f, "{}", path),
            Address::Index(path, index) => write!(f, "{}[{}]", path, index),
        }
    }
}
