//! Extraction of translatable strings and write-back into cloned records.

use crate::utils::json_path::{Address, FieldPath};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// One extracted string: which record, where inside it, and its offset in
/// the flat text list handed to the batch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub object_index: usize,
    pub address: Address,
    pub text_index: usize,
}

/// Result of a single extraction pass over a list of records.
///
/// `texts[entry.text_index]` is the original string for `entry`; offsets are
/// assigned in record order, then field order, then array index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionPlan {
    pub entries: Vec<PathEntry>,
    pub texts: Vec<String>,
}

impl ExtractionPlan {
    pub fn extract(objects: &[Value], fields: &[FieldPath]) -> Self {
        let mut plan = Self::default();

        for (object_index, obj) in objects.iter().enumerate() {
            for field in fields {
                match field.get(obj) {
                    Some(Value::String(text)) if !text.trim().is_empty() => {
                        plan.push(object_index, Address::Field(field.clone()), text);
                    }
                    Some(Value::Array(items)) => {
                        for (index, item) in items.iter().enumerate() {
                            if let Value::String(text) = item {
                                if !text.trim().is_empty() {
                                    plan.push(
                                        object_index,
                                        Address::Index(field.clone(), index),
                                        text,
                                    );
                                }
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        plan
    }

    fn push(&mut self, object_index: usize, address: Address, text: &str) {
        self.entries.push(PathEntry {
            object_index,
            address,
            text_index: self.texts.len(),
        });
        self.texts.push(text.to_string());
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Clone `objects` and write `translated[i]` at every entry with `text_index == i`.
    ///
    /// A missing translation leaves the original string in place.
    pub fn reconstruct(&self, objects: &[Value], translated: &[String]) -> Vec<Value> {
        let mut out = objects.to_vec();

        for entry in &self.entries {
            let Some(text) = translated
                .get(entry.text_index)
                .or_else(|| self.texts.get(entry.text_index))
            else {
                continue;
            };
            let Some(target) = out.get_mut(entry.object_index) else {
                continue;
            };
            if let Err(e) = entry.address.write(target, Value::String(text.clone())) {
                warn!(error = %e, address = %entry.address, "cannot write translated text back");
            }
        }

        out
    }
}

/// Parse caller-supplied field paths, dropping (and logging) invalid ones.
pub fn parse_field_paths<S: AsRef<str>>(paths: &[S]) -> Vec<FieldPath> {
    paths
        .iter()
        .filter_map(|raw| match FieldPath::parse(raw.as_ref()) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(path = raw.as_ref(), error = %e, "ignoring field path");
                None
            }
        })
        .collect()
}

/// A string leaf found by [`extract_translatable_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatableText {
    pub text: String,
    /// Display path such as `detailedInfo.sampleMeals.breakfast[0]`.
    pub path: String,
}

/// Walk `value` and collect every non-blank string leaf whose display path
/// contains one of `fields` as a substring. An empty `fields` collects all.
pub fn extract_translatable_text<S: AsRef<str>>(
    value: &Value,
    fields: &[S],
) -> Vec<TranslatableText> {
    let mut found = Vec::new();
    walk(value, String::new(), fields, &mut found);
    found
}

fn walk<S: AsRef<str>>(
    current: &Value,
    path: String,
    fields: &[S],
    found: &mut Vec<TranslatableText>,
) {
    match current {
        Value::String(text) if !text.trim().is_empty() => {
            if fields.is_empty() || fields.iter().any(|f| path.contains(f.as_ref())) {
                found.push(TranslatableText {
                    text: text.clone(),
                    path,
                });
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                walk(item, format!("{}[{}]", path, index), fields, found);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                let next = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                walk(item, next, fields, found);
            }
        }
        _ => {}
    }
}
