//! Structural profile of the logged WebSocket messages.
//!
//! Every received message is parsed as JSON and folded into a tree that
//! mirrors its shape: which keys appear, what JSON types they hold and a
//! short summary of the values seen. Messages are grouped by event name
//! (`t`), or by opcode (`op`) for messages without one.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::json;
use crate::models::{Cell, Field, Row};

pub const PROFILE_QUERY: &str = "SELECT id, dir, raw FROM message";

/// Distinct values a leaf remembers before it switches to a summary.
const DISTINCT_VALUES: usize = 10;

/// Direction code of messages the logger received.
const RECEIVED: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Null,
    Bool(bool),
    Number(String),
    Str(String),
}

impl std::fmt::Display for ValueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{}", Value::String(value.clone())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileNode {
    pub count: u64,
    /// Occurrences per JSON type, named the way the log tooling always has.
    pub types: IndexMap<&'static str, u64>,
    /// Object members, in order of first appearance.
    pub members: IndexMap<String, ProfileNode>,
    /// Shared node for every array element.
    pub elements: Option<Box<ProfileNode>>,
    pub values: IndexMap<ValueKey, u64>,
    pub charset: Option<BTreeSet<char>>,
    pub range: Option<(f64, f64)>,
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "dict",
        Value::Array(_) => "list",
        Value::String(_) => "str",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::Bool(_) => "bool",
        Value::Null => "NoneType",
    }
}

impl ProfileNode {
    pub fn observe(&mut self, value: &Value) {
        self.count += 1;
        *self.types.entry(type_name(value)).or_default() += 1;

        match value {
            Value::Object(map) => {
                for (key, member) in map {
                    self.members.entry(key.clone()).or_default().observe(member);
                }
            }
            Value::Array(items) => {
                let elements = self.elements.get_or_insert_with(Box::default);
                for item in items {
                    elements.observe(item);
                }
            }
            Value::String(text) => self.observe_str(text),
            Value::Number(number) => {
                let Some(as_float) = number.as_f64() else {
                    return;
                };
                self.observe_number(number.to_string(), as_float);
            }
            Value::Bool(flag) => self.count_value(ValueKey::Bool(*flag)),
            Value::Null => self.count_value(ValueKey::Null),
        }
    }

    #[must_use]
    pub fn is_container(&self) -> bool {
        self.types.contains_key("dict") || self.types.contains_key("list")
    }

    fn count_value(&mut self, key: ValueKey) {
        *self.values.entry(key).or_default() += 1;
    }

    fn observe_str(&mut self, text: &str) {
        if let Some(charset) = &mut self.charset {
            charset.extend(text.chars());
        } else if self.values.len() > DISTINCT_VALUES {
            let mut charset: BTreeSet<char> = text.chars().collect();
            for key in self.values.keys() {
                if let ValueKey::Str(seen) = key {
                    charset.extend(seen.chars());
                }
            }
            self.charset = Some(charset);
        } else {
            self.count_value(ValueKey::Str(text.to_string()));
        }
    }

    fn observe_number(&mut self, text: String, value: f64) {
        if let Some((min, max)) = &mut self.range {
            *min = min.min(value);
            *max = max.max(value);
        } else if self.values.len() > DISTINCT_VALUES {
            let range = self
                .values
                .keys()
                .filter_map(|key| match key {
                    ValueKey::Number(seen) => seen.parse::<f64>().ok(),
                    _ => None,
                })
                .fold((value, value), |(min, max), seen| (min.min(seen), max.max(seen)));
            self.range = Some(range);
        } else {
            self.count_value(ValueKey::Number(text));
        }
    }
}

/// Profile of all received messages, one tree per event name or opcode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageProfile {
    pub partitions: IndexMap<String, ProfileNode>,
    pub profiled: usize,
    /// Rows whose payload was not valid JSON.
    pub undecodable: usize,
}

impl MessageProfile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one `id, dir, raw` row into the profile.
    pub fn observe_row(&mut self, fields: &[Field], row: &Row) {
        let column = |name: &str| {
            fields
                .iter()
                .find(|field| field.name == name)
                .and_then(|field| row.get(field.index))
                .and_then(Cell::as_str)
        };
        let id = column("id").unwrap_or_default();
        let Some(raw) = column("raw") else {
            return;
        };

        let message = match json::parse(raw) {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(id, "error decoding message: {err}");
                self.undecodable += 1;
                return;
            }
        };

        if column("dir") != Some(RECEIVED) {
            return;
        }
        let Some(partition) = partition_key(&message) else {
            return;
        };
        self.partitions
            .entry(partition)
            .or_default()
            .observe(&message);
        self.profiled += 1;
    }
}

/// Event name when the message has a `t` key, opcode otherwise.
fn partition_key(message: &Value) -> Option<String> {
    let map = message.as_object()?;
    let key = match map.get("t") {
        Some(event) => event,
        None => map.get("op")?,
    };
    match key {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
