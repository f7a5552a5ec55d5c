#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::page::escape_html;
use crate::queries::render::{
    CellRenderer, RenderedCell, StyleHint, WRAP_WIDTH, pretty_json_or_wrapped,
};
use core_executor::{Cell, json};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e12f64..1.0e12).prop_map(Value::from),
        ".{0,24}".prop_map(Value::String),
    ]
}

/// Arbitrary JSON documents, a few levels deep.
fn json_value() -> impl Strategy<Value = Value> {
    json_leaf().prop_recursive(6, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::vec(("[a-z_]{0,8}", inner), 0..8)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Single-line text that does not parse as JSON.
fn non_json_text() -> impl Strategy<Value = String> {
    ".{0,400}".prop_filter("must not be JSON", |text| json::parse(text).is_err())
}

fn markup_heavy_text() -> impl Strategy<Value = String> {
    "[<>&\"'a-z {}:\\[\\]]{0,60}"
}

/// Inverse of `escape_html`.
fn unescape_html(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Number of `<` a cell of this kind carries in its own markup.
const fn tag_count(hint: StyleHint) -> usize {
    match hint {
        StyleHint::Plain | StyleHint::Null => 2,
        StyleHint::Preformatted => 4,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Pretty-printing a JSON payload never changes what it decodes to.
    #[test]
    fn json_payload_round_trips(value in json_value()) {
        let raw = value.to_string();
        let cell = pretty_json_or_wrapped(&raw);
        prop_assert_eq!(cell.hint, StyleHint::Preformatted);
        let reparsed = json::parse(&cell.text).unwrap();
        prop_assert_eq!(reparsed, json::parse(&raw).unwrap());
    }

    /// Text that is not JSON is cut into lines of the wrap width, in order.
    #[test]
    fn text_payload_is_wrapped(raw in non_json_text()) {
        let cell = pretty_json_or_wrapped(&raw);
        prop_assert_eq!(cell.hint, StyleHint::Preformatted);

        let lines: Vec<&str> = cell.text.split('\n').collect();
        let chars = raw.chars().count();
        prop_assert_eq!(lines.len(), chars.div_ceil(WRAP_WIDTH).max(1));
        for line in &lines[..lines.len() - 1] {
            prop_assert_eq!(line.chars().count(), WRAP_WIDTH);
        }
        prop_assert!(lines[lines.len() - 1].chars().count() <= WRAP_WIDTH);
        prop_assert_eq!(lines.concat(), raw);
    }

    /// Whatever the hint, the text ends up escaped and nothing else.
    #[test]
    fn every_style_hint_escapes(text in markup_heavy_text()) {
        for hint in [StyleHint::Plain, StyleHint::Preformatted, StyleHint::Null] {
            let cell = RenderedCell { text: text.clone(), hint };
            let html = cell.to_html();
            prop_assert_eq!(html.matches('<').count(), tag_count(hint), "{}", html);
            prop_assert!(!html.contains('\''));
            prop_assert!(html.contains(&escape_html(&text)));
        }
        let escaped = escape_html(&text);
        prop_assert!(!escaped.contains(['<', '>', '"', '\'']));
        prop_assert_eq!(unescape_html(&escaped), text);
    }

    /// Every renderer branch escapes what the store sent.
    #[test]
    fn every_rule_escapes(text in markup_heavy_text(), field in "raw|dir|t") {
        let cell = CellRenderer::default().render(&field, &Cell::from(text.as_str()));
        let html = cell.to_html();
        prop_assert_eq!(html.matches('<').count(), tag_count(cell.hint), "{}", html);
    }

    /// Rendering the same cell twice gives the same markup.
    #[test]
    fn rendering_is_idempotent(text in ".{0,200}", field in "raw|dir|t|op") {
        let renderer = CellRenderer::default();
        let cell = Cell::from(text.as_str());
        let first = renderer.render(&field, &cell);
        let second = renderer.render(&field, &cell);
        prop_assert_eq!(first.to_html(), second.to_html());
        prop_assert_eq!(first, second);
    }
}
