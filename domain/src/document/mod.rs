//! Parsed configuration documents
//!
//! A [`ConfigDocument`] is the key-ordered tree of one YAML configuration
//! file. It is owned by whoever parsed it and goes stale as soon as the file
//! on disk changes; callers re-parse instead of patching a cached copy.
//!
//! Lookups take dotted paths (`nametag.placeholder`) and fall back to a
//! case-insensitive key match, so `File-Version` still answers a lookup for
//! `file-version`.

use crate::core::error::DomainError;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// In-memory tree of a single YAML configuration file.
///
/// The root is always a mapping. A file whose root is empty, a scalar or a
/// sequence parses into an empty document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    root: Mapping,
}

impl ConfigDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already parsed YAML value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Mapping(root) => Self { root },
            Value::Tagged(tagged) => Self::from_value(tagged.value),
            _ => Self::default(),
        }
    }

    /// Parses YAML source text.
    pub fn parse(source: &str) -> Result<Self, DomainError> {
        let value: Value = serde_yaml::from_str(source)?;
        Ok(Self::from_value(value))
    }

    /// Serializes the document back to YAML text.
    pub fn to_yaml(&self) -> Result<String, DomainError> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Serializes the document with a comment block kept in front of it.
    ///
    /// See [`leading_comments`] for extracting the block from a source file.
    pub fn to_yaml_with_header(&self, header: &str) -> Result<String, DomainError> {
        let body = self.to_yaml()?;
        if header.is_empty() {
            return Ok(body);
        }

        let mut output = String::with_capacity(header.len() + body.len() + 1);
        output.push_str(header);
        if !header.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(&body);
        Ok(output)
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Mapping {
        &mut self.root
    }

    pub fn into_value(self) -> Value {
        Value::Mapping(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Top-level keys in document order. Non-scalar keys are skipped.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.root.keys().filter_map(key_to_string)
    }

    /// Looks up a dotted path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = find_key(&self.root, first)?;
        for segment in segments {
            current = find_key(current.as_mapping()?, segment)?;
        }
        Some(current)
    }

    /// Looks up a dotted path and reads it as an integer.
    ///
    /// Integer-valued strings (`"7"`) are accepted.
    pub fn get_int(&self, path: &str) -> Option<i64> {
        self.get(path).and_then(value_as_int)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Sets a dotted path, creating intermediate mappings as needed.
    ///
    /// A non-mapping value sitting on an intermediate segment is replaced.
    pub fn set(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut current = &mut self.root;
        for segment in parents {
            let key = existing_key(current, segment).unwrap_or_else(|| Value::from(*segment));
            let slot = current
                .entry(key)
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            if !slot.is_mapping() {
                *slot = Value::Mapping(Mapping::new());
            }
            let Value::Mapping(next) = slot else {
                return;
            };
            current = next;
        }

        let key = existing_key(current, last).unwrap_or_else(|| Value::from(*last));
        current.insert(key, value);
    }

    /// Removes a dotted path and returns its value.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let (parents, last) = match path.rsplit_once('.') {
            Some((parents, last)) => (Some(parents), last),
            None => (None, path),
        };

        let parent = match parents {
            Some(parents) => {
                let mut current = &mut self.root;
                for segment in parents.split('.') {
                    let key = existing_key(current, segment)?;
                    current = current.get_mut(&key)?.as_mapping_mut()?;
                }
                current
            }
            None => &mut self.root,
        };

        let key = existing_key(parent, last)?;
        parent.remove(&key)
    }
}

/// Finds `key` in a mapping, exact match first, then case-insensitive.
pub fn find_key<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    if let Some(value) = map.get(key) {
        return Some(value);
    }
    map.iter()
        .find(|(k, _)| k.as_str().is_some_and(|k| k.eq_ignore_ascii_case(key)))
        .map(|(_, v)| v)
}

fn existing_key(map: &Mapping, key: &str) -> Option<Value> {
    if map.contains_key(key) {
        return Some(Value::from(key));
    }
    map.keys()
        .find(|k| k.as_str().is_some_and(|k| k.eq_ignore_ascii_case(key)))
        .cloned()
}

/// Renders a scalar mapping key as text.
pub fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Reads a YAML value as an integer.
pub fn value_as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Tagged(tagged) => value_as_int(&tagged.value),
        _ => None,
    }
}

/// Returns the comment block at the top of a YAML source.
///
/// The block ends at the first line that is neither blank nor a `#` comment.
pub fn leading_comments(source: &str) -> &str {
    let mut end = 0;
    for line in source.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            break;
        }
        end += line.len();
    }
    &source[..end]
}
