//! Rows the WebSocket logger writes into the `message` table.
//!
//! Secrets (`session_id` and `token` values) are blanked out of the payload
//! before it is stored. The opcode, sequence number and event name are
//! lifted into their own columns when the message carries them.

use serde_json::Value;

use crate::json::{self, JsonError};

pub const REDACTED: &str = "[REDACTED]";

pub const INSERT_MESSAGE: &str =
    "INSERT INTO message (dir, op, s, t, raw) VALUES (?, ?, ?, ?, ?)";

const SECRET_KEYS: [&str; 2] = ["session_id", "token"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Receive,
    Send,
}

impl Direction {
    #[must_use]
    pub const fn from_send(is_send: bool) -> Self {
        if is_send { Self::Send } else { Self::Receive }
    }

    /// Value of the `dir` column.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Receive => 0,
            Self::Send => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    pub dir: Direction,
    pub op: Option<String>,
    pub s: Option<String>,
    pub t: Option<String>,
    /// Payload text with secrets replaced.
    pub raw: String,
}

impl MessageRecord {
    /// Builds the row for one WebSocket frame.
    ///
    /// `op` is only filled for messages that carry both `op` and `d`, `s`
    /// only alongside those, and `t` only alongside `s`.
    pub fn from_raw(is_send: bool, raw: &str) -> Result<Self, JsonError> {
        let mut secrets = Vec::new();
        collect_secrets(&json::parse(raw)?, None, &mut secrets);

        let mut redacted = raw.to_string();
        let replacement = Value::from(REDACTED).to_string();
        for secret in secrets {
            let literal = Value::String(secret).to_string();
            redacted = redacted.replace(&literal, &replacement);
        }

        let message = json::parse(&redacted)?;
        let mut record = Self {
            dir: Direction::from_send(is_send),
            op: None,
            s: None,
            t: None,
            raw: redacted,
        };
        record.lift_columns(&message);
        Ok(record)
    }

    fn lift_columns(&mut self, message: &Value) {
        let Some(map) = message.as_object() else {
            return;
        };
        let (Some(op), true) = (map.get("op"), map.contains_key("d")) else {
            return;
        };
        self.op = column_text(op);
        let Some(s) = map.get("s") else {
            return;
        };
        self.s = column_text(s);
        self.t = map.get("t").and_then(column_text);
    }
}

/// Gathers the string values held directly under a secret key, at any depth.
fn collect_secrets(value: &Value, key: Option<&str>, secrets: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, member) in map {
                collect_secrets(member, Some(key), secrets);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_secrets(item, None, secrets);
            }
        }
        Value::String(text) if key.is_some_and(|key| SECRET_KEYS.contains(&key)) => {
            if !text.is_empty() && !secrets.contains(text) {
                secrets.push(text.clone());
            }
        }
        _ => {}
    }
}

fn column_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_identify_is_redacted() {
        let raw = r#"{"op":2,"d":{"token":"mfa.abc","properties":{"$os":"linux"},"large_threshold":250}}"#;
        let record = MessageRecord::from_raw(true, raw).unwrap();
        assert_eq!(record.dir, Direction::Send);
        assert_eq!(record.dir.code(), 1);
        assert_eq!(
            record.raw,
            r#"{"op":2,"d":{"token":"[REDACTED]","properties":{"$os":"linux"},"large_threshold":250}}"#
        );
        assert_eq!(record.op.as_deref(), Some("2"));
        assert_eq!(record.s, None);
        assert_eq!(record.t, None);
    }

    #[test]
    fn test_every_occurrence_of_a_secret_is_redacted() {
        let raw = r#"{"op":0,"s":1,"t":"READY","d":{"session_id":"f00d","sessions":[{"session_id":"beef"}],"echo":"f00d"}}"#;
        let record = MessageRecord::from_raw(false, raw).unwrap();
        assert!(!record.raw.contains("f00d"));
        assert!(!record.raw.contains("beef"));
        assert_eq!(record.raw.matches(REDACTED).count(), 3);
        assert_eq!(record.dir.code(), 0);
        assert_eq!(record.op.as_deref(), Some("0"));
        assert_eq!(record.s.as_deref(), Some("1"));
        assert_eq!(record.t.as_deref(), Some("READY"));
    }

    #[test]
    fn test_secret_keys_only_redact_strings() {
        let raw = r#"{"op":1,"d":{"token":null,"session_id":"","inner":{"token":["x"]}}}"#;
        let record = MessageRecord::from_raw(true, raw).unwrap();
        assert_eq!(record.raw, raw);
    }

    #[test]
    fn test_columns_follow_present_keys() {
        let heartbeat = MessageRecord::from_raw(true, r#"{"op":1,"d":41}"#).unwrap();
        assert_eq!(heartbeat.op.as_deref(), Some("1"));

        // `t` is only lifted next to `s`
        let no_seq = MessageRecord::from_raw(false, r#"{"op":0,"t":"READY","d":{}}"#).unwrap();
        assert_eq!((no_seq.s, no_seq.t), (None, None));

        let null_event = MessageRecord::from_raw(false, r#"{"op":11,"s":null,"t":null,"d":null}"#).unwrap();
        assert_eq!(null_event.op.as_deref(), Some("11"));
        assert_eq!((null_event.s, null_event.t), (None, None));

        // no `d`, no columns
        let bare = MessageRecord::from_raw(false, r#"{"op":9}"#).unwrap();
        assert_eq!(bare.op, None);

        let list = MessageRecord::from_raw(false, "[1, 2]").unwrap();
        assert_eq!(list.op, None);
        assert_eq!(list.raw, "[1, 2]");
    }

    #[test]
    fn test_undecodable_frame_is_rejected() {
        assert!(MessageRecord::from_raw(false, "not json").is_err());
    }
}
