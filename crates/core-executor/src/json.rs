//! JSON decoding shared by everything that looks inside message payloads.

use serde::Deserialize;
use serde_json::Value;
use snafu::prelude::*;

/// Deepest nesting of arrays and objects a payload may have.
pub const MAX_JSON_DEPTH: usize = 512;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum JsonError {
    #[snafu(display("JSON nested {depth} levels deep, the limit is {MAX_JSON_DEPTH}"))]
    TooDeep { depth: usize },

    #[snafu(transparent)]
    Syntax { source: serde_json::Error },
}

/// Parses a whole payload, allowing nesting up to [`MAX_JSON_DEPTH`] instead
/// of the decoder's default of 128.
pub fn parse(raw: &str) -> Result<Value, JsonError> {
    let depth = nesting_depth(raw);
    ensure!(depth <= MAX_JSON_DEPTH, TooDeepSnafu { depth });

    let mut deserializer = serde_json::Deserializer::from_str(raw);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

/// Deepest bracket nesting outside of string literals.
fn nesting_depth(raw: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    let mut in_string = false;
    let mut escaped = false;
    for byte in raw.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}
