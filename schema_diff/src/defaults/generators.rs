//! Stock default-value generators
//!
//! Each generator is a plain `fn() -> Value` so it can be registered directly.
//! Generators are called on every lookup; nothing is memoized.

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value, json};
use uuid::Uuid;

/// `""`
pub const fn string_default_generator() -> Value {
    Value::String(String::new())
}

/// `0`
pub fn number_default_generator() -> Value {
    Value::from(0)
}

/// `false`
pub const fn boolean_default_generator() -> Value {
    Value::Bool(false)
}

/// `[]`
pub const fn array_default_generator() -> Value {
    Value::Array(Vec::new())
}

/// `{}`
pub fn object_default_generator() -> Value {
    Value::Object(Map::new())
}

/// A fresh random (v4) UUID in lowercase hyphenated form
pub fn uuid_default_generator() -> Value {
    Value::String(Uuid::new_v4().to_string())
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn timestamp_default_generator() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Empty file stub awaiting upload
pub fn file_default_generator() -> Value {
    json!({ "fileId": "", "url": "", "status": "ready" })
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    reason = "tests should panic on unexpected values"
)]
mod tests {
    use regex::Regex;

    use super::*;

    #[test]
    fn uuid_is_v4_and_fresh() {
        let pattern =
            Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
                .expect("valid regex");
        let first = uuid_default_generator();
        let second = uuid_default_generator();
        assert!(pattern.is_match(first.as_str().expect("string")));
        assert!(pattern.is_match(second.as_str().expect("string")));
        assert_ne!(first, second);
    }

    #[test]
    fn timestamp_has_millisecond_precision() {
        let pattern =
            Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$").expect("valid regex");
        let value = timestamp_default_generator();
        assert!(pattern.is_match(value.as_str().expect("string")));
    }

    #[test]
    fn file_stub_shape() {
        assert_eq!(
            file_default_generator(),
            json!({ "fileId": "", "url": "", "status": "ready" })
        );
    }

    #[test]
    fn scalar_generators() {
        assert_eq!(string_default_generator(), json!(""));
        assert_eq!(number_default_generator(), json!(0));
        assert_eq!(boolean_default_generator(), json!(false));
        assert_eq!(array_default_generator(), json!([]));
        assert_eq!(object_default_generator(), json!({}));
    }
}
