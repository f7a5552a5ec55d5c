//! Turns raw cell values into what the result table shows.
//!
//! A cell goes through, in order: the null check, then the first rule whose
//! field name matches, then plain pass-through. Rules only ever see non-null
//! text, and escaping happens once in [`RenderedCell::to_html`] no matter
//! which branch produced the cell.

use crate::page::escape_html;
use core_executor::{Cell, json};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

pub const NULL_MARKER: &str = "NULL";

/// Column width for payloads that are too long and not JSON.
pub const WRAP_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleHint {
    Plain,
    Preformatted,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    /// Display text, not yet escaped.
    pub text: String,
    pub hint: StyleHint,
}

impl RenderedCell {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hint: StyleHint::Plain,
        }
    }

    #[must_use]
    pub fn preformatted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hint: StyleHint::Preformatted,
        }
    }

    #[must_use]
    pub fn null() -> Self {
        Self {
            text: NULL_MARKER.to_string(),
            hint: StyleHint::Null,
        }
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        let text = escape_html(&self.text);
        match self.hint {
            StyleHint::Plain => format!("<td>{text}</td>"),
            StyleHint::Preformatted => format!("<td>\n<pre>{text}</pre>\n</td>"),
            StyleHint::Null => format!("<td class=\"sql-null\">{text}</td>"),
        }
    }
}

pub type CellTransform = fn(&str) -> RenderedCell;

#[derive(Debug, Clone)]
pub struct CellRule {
    pub field: String,
    pub transform: CellTransform,
}

#[derive(Debug, Clone)]
pub struct CellRenderer {
    rules: Vec<CellRule>,
}

impl Default for CellRenderer {
    /// The message log rules: `raw` payloads and `dir` codes.
    fn default() -> Self {
        Self::empty()
            .with_rule("raw", pretty_json_or_wrapped)
            .with_rule("dir", direction_label)
    }
}

impl CellRenderer {
    /// A renderer passing every non-null value through untouched.
    #[must_use]
    pub const fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule. Earlier rules win when field names collide.
    #[must_use]
    pub fn with_rule(mut self, field: impl Into<String>, transform: CellTransform) -> Self {
        self.rules.push(CellRule {
            field: field.into(),
            transform,
        });
        self
    }

    #[must_use]
    pub fn render(&self, field_name: &str, cell: &Cell) -> RenderedCell {
        let Some(raw) = cell.as_str() else {
            return RenderedCell::null();
        };
        self.rules
            .iter()
            .find(|rule| rule.field == field_name)
            .map_or_else(|| RenderedCell::plain(raw), |rule| (rule.transform)(raw))
    }
}

/// Pretty-printed JSON when `raw` parses, hard-wrapped text otherwise.
#[must_use]
pub fn pretty_json_or_wrapped(raw: &str) -> RenderedCell {
    let pretty = json::parse(raw)
        .ok()
        .and_then(|value| to_pretty_json(&value));
    RenderedCell::preformatted(pretty.unwrap_or_else(|| wrap(raw, WRAP_WIDTH)))
}

/// `0` and `1` are the receive and send direction codes of the logger.
#[must_use]
pub fn direction_label(raw: &str) -> RenderedCell {
    match raw {
        "0" => RenderedCell::plain("Receive"),
        "1" => RenderedCell::plain("Send"),
        other => RenderedCell::plain(other),
    }
}

fn to_pretty_json(value: &Value) -> Option<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer).ok()?;
    String::from_utf8(buf).ok()
}

/// Splits `text` into lines of at most `width` characters.
#[must_use]
pub fn wrap(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|line| line.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
