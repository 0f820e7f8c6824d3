//! Type-change transformation planner
//!
//! Given the display types of a field before and after a change (as produced by
//! [`schema_type`](super::metadata::schema_type), including the `array<X>` shorthand),
//! this module plans the data conversion as a list of steps, rates how much
//! information the conversion may destroy, and synthesizes a before/after example.
//!
//! Planning order:
//! 1. scalar → `array<Y>`: wrap, then convert the scalar to `Y` if needed
//! 2. `array<X>` → scalar: keep the first element, then convert `X` if needed
//! 3. bare pairs from the direct conversion table
//! 4. anything else touching `object`: a single certain-loss step
//! 5. anything else: a single certain-loss fallback step with a `"?"` example
//!
//! Planning is pure and total: every non-equal pair of known types yields a plan.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;
use serde_json::{Value, json};
use strum::{AsRefStr, Display};

use super::metadata::UNKNOWN_TYPE;
use crate::json_schema::SchemaType;
use crate::types::parse_number;

/// Step name for wrapping a scalar into a one-element array
pub const WRAP_IN_ARRAY_STEP: &str = "wrap in array";

/// Step name for reducing an array to its first element
pub const UNWRAP_ARRAY_STEP: &str = "unwrap array (first element)";

/// Placeholder used where no meaningful example exists
const UNKNOWN_EXAMPLE: &str = "?";

/// How much information a conversion may destroy, ordered `None < Possible < Certain`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DataLossSeverity {
    /// Every value converts losslessly
    #[default]
    None,
    /// Some values lose information
    Possible,
    /// Information is always lost
    Certain,
}

/// One conversion step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformStep {
    /// Human-readable step name
    pub name:     String,
    /// Loss rating of this step alone
    pub severity: DataLossSeverity,
}

impl TransformStep {
    fn new(name: impl Into<String>, severity: DataLossSeverity) -> Self {
        Self {
            name: name.into(),
            severity,
        }
    }
}

/// A sample value and what it becomes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformationExample {
    /// Value under the old type
    pub before: Value,
    /// Value under the new type
    pub after:  Value,
}

/// Planned conversion between two types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationInfo {
    /// Illustrative sample conversion
    pub example:            TransformationExample,
    /// Highest severity over all steps
    pub data_loss_severity: DataLossSeverity,
    /// Steps in application order
    pub steps:              Vec<TransformStep>,
}

impl TransformationInfo {
    fn new(steps: Vec<TransformStep>, before: Value, after: Value) -> Self {
        let data_loss_severity = steps
            .iter()
            .map(|step| step.severity)
            .max()
            .unwrap_or_default();
        Self {
            example: TransformationExample { before, after },
            data_loss_severity,
            steps,
        }
    }
}

/// Fixed conversion between two bare types
#[derive(Debug, Clone)]
struct DirectTransformation {
    severity: DataLossSeverity,
    before:   Value,
    after:    Value,
}

impl DirectTransformation {
    const fn new(severity: DataLossSeverity, before: Value, after: Value) -> Self {
        Self {
            severity,
            before,
            after,
        }
    }
}

/// Conversions between the bare types string, number, boolean, object, and array
static DIRECT_TRANSFORMATIONS: LazyLock<HashMap<(SchemaType, SchemaType), DirectTransformation>> =
    LazyLock::new(|| {
        use DataLossSeverity::{Certain, None as Lossless, Possible};
        use SchemaType::{Array, Boolean, Number, Object, String as Text};
        let rule = DirectTransformation::new;

        [
            ((Number, Text), rule(Lossless, json!(123), json!("123"))),
            ((Boolean, Text), rule(Lossless, json!(true), json!("true"))),
            ((Boolean, Number), rule(Lossless, json!(true), json!(1))),
            ((Text, Number), rule(Possible, json!("abc"), json!(0))),
            ((Text, Boolean), rule(Possible, json!("hello"), json!(true))),
            ((Number, Boolean), rule(Possible, json!(42), json!(true))),
            ((Array, Text), rule(Possible, json!([1, 2]), json!("1"))),
            ((Array, Number), rule(Possible, json!([1, 2]), json!(1))),
            ((Array, Boolean), rule(Possible, json!([1, 2]), json!(true))),
            ((Text, Array), rule(Lossless, json!("hello"), json!(["hello"]))),
            ((Number, Array), rule(Lossless, json!(42), json!([42]))),
            ((Boolean, Array), rule(Lossless, json!(true), json!([true]))),
            ((Object, Text), rule(Certain, json!({ "a": 1 }), json!(""))),
            ((Object, Number), rule(Certain, json!({ "a": 1 }), json!(0))),
            ((Object, Boolean), rule(Certain, json!({ "a": 1 }), json!(false))),
            ((Object, Array), rule(Certain, json!({ "a": 1 }), json!([]))),
            ((Text, Object), rule(Certain, json!("hello"), json!({}))),
            ((Number, Object), rule(Certain, json!(42), json!({}))),
            ((Boolean, Object), rule(Certain, json!(true), json!({}))),
            ((Array, Object), rule(Certain, json!([1, 2]), json!({}))),
        ]
        .into_iter()
        .collect()
    });

/// Item type of the `array<X>` shorthand
fn typed_array_item(type_name: &str) -> Option<&str> {
    type_name.strip_prefix("array<")?.strip_suffix('>')
}

/// Bare type of a display type: `array<X>` collapses to `array`
fn base_type(type_name: &str) -> &str {
    if typed_array_item(type_name).is_some() {
        SchemaType::Array.as_ref()
    } else {
        type_name
    }
}

fn is_array(type_name: &str) -> bool {
    base_type(type_name) == SchemaType::Array.as_ref()
}

fn is_object(type_name: &str) -> bool {
    type_name == SchemaType::Object.as_ref()
}

fn direct_transformation(from: &str, to: &str) -> Option<&'static DirectTransformation> {
    let from = from.parse::<SchemaType>().ok()?;
    let to = to.parse::<SchemaType>().ok()?;
    DIRECT_TRANSFORMATIONS.get(&(from, to))
}

/// Table step for `from → to`, rated certain when the table has no entry
fn direct_step(from: &str, to: &str) -> TransformStep {
    let severity = direct_transformation(from, to)
        .map_or(DataLossSeverity::Certain, |direct| direct.severity);
    TransformStep::new(format!("{from}→{to}"), severity)
}

/// Canonical sample value of a type
fn sample_value(type_name: &str) -> Option<Value> {
    if let Some(item) = typed_array_item(type_name) {
        return sample_value(item).map(|sample| Value::Array(vec![sample]));
    }
    match type_name.parse::<SchemaType>().ok()? {
        SchemaType::String => Some(json!("hello")),
        SchemaType::Number => Some(json!(42)),
        SchemaType::Boolean => Some(json!(true)),
        SchemaType::Object => Some(json!({ "a": 1 })),
        SchemaType::Array => Some(json!([1, 2])),
        SchemaType::Ref => None,
    }
}

fn sample_or_unknown(type_name: &str) -> Value {
    sample_value(type_name).unwrap_or_else(|| json!(UNKNOWN_EXAMPLE))
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn to_number(value: &Value) -> Value {
    match value {
        Value::Number(_) => value.clone(),
        Value::String(text) => parse_number(text).unwrap_or_else(|| json!(0)),
        Value::Bool(flag) => json!(u8::from(*flag)),
        Value::Null | Value::Array(_) | Value::Object(_) => json!(0),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

/// Convert a sample into `target`
fn coerce(value: &Value, target: &str) -> Value {
    if let Some(item) = typed_array_item(target) {
        return Value::Array(vec![coerce(value, item)]);
    }
    match target.parse::<SchemaType>() {
        Ok(SchemaType::String) => Value::String(stringify(value)),
        Ok(SchemaType::Number) => to_number(value),
        Ok(SchemaType::Boolean) => Value::Bool(is_truthy(value)),
        _ => sample_value(target).unwrap_or_else(|| value.clone()),
    }
}

/// Scalar → `array<item>`
fn wrap_plan(from: &str, item: &str) -> TransformationInfo {
    let mut steps = vec![TransformStep::new(WRAP_IN_ARRAY_STEP, DataLossSeverity::None)];
    if from != item {
        steps.push(direct_step(from, item));
    }
    let before = sample_or_unknown(from);
    let after = Value::Array(vec![coerce(&before, item)]);
    TransformationInfo::new(steps, before, after)
}

/// `array<item>` → scalar
fn unwrap_plan(item: &str, to: &str) -> TransformationInfo {
    let mut steps = vec![TransformStep::new(UNWRAP_ARRAY_STEP, DataLossSeverity::Possible)];
    if item != to {
        steps.push(direct_step(item, to));
    }
    let element = sample_or_unknown(item);
    let after = coerce(&element, to);
    TransformationInfo::new(steps, Value::Array(vec![element.clone(), element]), after)
}

/// Plan the conversion from `from` to `to`
///
/// Returns `None` when the types are equal or either is unknown.
pub fn plan_transformation(from: &str, to: &str) -> Option<TransformationInfo> {
    if from == to || from == UNKNOWN_TYPE || to == UNKNOWN_TYPE {
        return None;
    }

    if let Some(item) = typed_array_item(to)
        && !is_array(from)
        && !is_object(from)
    {
        return Some(wrap_plan(from, item));
    }

    if let Some(item) = typed_array_item(from)
        && !is_array(to)
        && !is_object(to)
    {
        return Some(unwrap_plan(item, to));
    }

    if let Some(direct) = direct_transformation(from, to) {
        return Some(TransformationInfo::new(
            vec![TransformStep::new(format!("{from}→{to}"), direct.severity)],
            direct.before.clone(),
            direct.after.clone(),
        ));
    }

    if is_object(base_type(from)) || is_object(base_type(to)) {
        let (before, after) = direct_transformation(base_type(from), base_type(to)).map_or_else(
            || (json!(UNKNOWN_EXAMPLE), json!(UNKNOWN_EXAMPLE)),
            |direct| (direct.before.clone(), direct.after.clone()),
        );
        return Some(TransformationInfo::new(
            vec![TransformStep::new(format!("{from}→{to}"), DataLossSeverity::Certain)],
            before,
            after,
        ));
    }

    tracing::debug!("No transformation rule for '{from}' -> '{to}', using fallback");
    Some(TransformationInfo::new(
        vec![TransformStep::new(format!("{from}→{to}"), DataLossSeverity::Certain)],
        json!(UNKNOWN_EXAMPLE),
        json!(UNKNOWN_EXAMPLE),
    ))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests should panic on unexpected values"
)]
mod tests {
    use super::*;

    fn plan(from: &str, to: &str) -> TransformationInfo {
        plan_transformation(from, to).expect("plan")
    }

    fn step_names(info: &TransformationInfo) -> Vec<&str> {
        info.steps.iter().map(|step| step.name.as_str()).collect()
    }

    #[test]
    fn equal_or_unknown_types_have_no_plan() {
        assert!(plan_transformation("string", "string").is_none());
        assert!(plan_transformation("array<number>", "array<number>").is_none());
        assert!(plan_transformation("unknown", "string").is_none());
        assert!(plan_transformation("number", "unknown").is_none());
    }

    #[test]
    fn number_to_string_is_lossless() {
        let info = plan("number", "string");
        assert_eq!(info.data_loss_severity, DataLossSeverity::None);
        assert_eq!(info.example.before, json!(123));
        assert_eq!(info.example.after, json!("123"));
        assert_eq!(step_names(&info), vec!["number→string"]);
    }

    #[test]
    fn direct_table_severities() {
        let expectations = [
            ("boolean", "string", DataLossSeverity::None),
            ("boolean", "number", DataLossSeverity::None),
            ("string", "number", DataLossSeverity::Possible),
            ("string", "boolean", DataLossSeverity::Possible),
            ("number", "boolean", DataLossSeverity::Possible),
            ("array", "string", DataLossSeverity::Possible),
            ("array", "number", DataLossSeverity::Possible),
            ("array", "boolean", DataLossSeverity::Possible),
            ("string", "array", DataLossSeverity::None),
            ("number", "array", DataLossSeverity::None),
            ("boolean", "array", DataLossSeverity::None),
            ("object", "array", DataLossSeverity::Certain),
            ("array", "object", DataLossSeverity::Certain),
            ("object", "string", DataLossSeverity::Certain),
            ("number", "object", DataLossSeverity::Certain),
        ];
        for (from, to, severity) in expectations {
            let info = plan(from, to);
            assert_eq!(info.data_loss_severity, severity, "{from} -> {to}");
            assert_eq!(info.steps.len(), 1, "{from} -> {to}");
        }
    }

    #[test]
    fn wrap_into_same_item_type() {
        let info = plan("string", "array<string>");
        assert_eq!(info.data_loss_severity, DataLossSeverity::None);
        assert_eq!(
            info.steps,
            vec![TransformStep::new(WRAP_IN_ARRAY_STEP, DataLossSeverity::None)]
        );
        assert_eq!(info.example.before, json!("hello"));
        assert_eq!(info.example.after, json!(["hello"]));
    }

    #[test]
    fn wrap_with_item_conversion() {
        let info = plan("string", "array<number>");
        assert_eq!(step_names(&info), vec![WRAP_IN_ARRAY_STEP, "string→number"]);
        assert_eq!(info.data_loss_severity, DataLossSeverity::Possible);
        assert_eq!(info.example.after, json!([0]));

        let info = plan("number", "array<string>");
        assert_eq!(info.data_loss_severity, DataLossSeverity::None);
        assert_eq!(info.example.after, json!(["42"]));

        let info = plan("boolean", "array<number>");
        assert_eq!(info.example.after, json!([1]));
    }

    #[test]
    fn wrap_into_unmapped_item_is_certain() {
        let info = plan("string", "array<File>");
        assert_eq!(step_names(&info), vec![WRAP_IN_ARRAY_STEP, "string→File"]);
        assert_eq!(info.data_loss_severity, DataLossSeverity::Certain);
    }

    #[test]
    fn unwrap_then_convert() {
        let info = plan("array<number>", "string");
        assert_eq!(
            info.steps[0],
            TransformStep::new(UNWRAP_ARRAY_STEP, DataLossSeverity::Possible)
        );
        assert_eq!(info.steps[1].name, "number→string");
        assert_eq!(info.data_loss_severity, DataLossSeverity::Possible);
        assert_eq!(info.example.before, json!([42, 42]));
        assert_eq!(info.example.after, json!("42"));
    }

    #[test]
    fn unwrap_same_item_type_is_one_step() {
        let info = plan("array<boolean>", "boolean");
        assert_eq!(step_names(&info), vec![UNWRAP_ARRAY_STEP]);
        assert_eq!(info.example.before, json!([true, true]));
        assert_eq!(info.example.after, json!(true));
    }

    #[test]
    fn object_transitions_with_typed_arrays_are_certain() {
        let info = plan("object", "array<string>");
        assert_eq!(step_names(&info), vec!["object→array<string>"]);
        assert_eq!(info.data_loss_severity, DataLossSeverity::Certain);
        assert_eq!(info.example.before, json!({ "a": 1 }));

        let info = plan("array<number>", "object");
        assert_eq!(info.data_loss_severity, DataLossSeverity::Certain);
        assert_eq!(info.example.after, json!({}));
    }

    #[test]
    fn unmapped_pairs_fall_back() {
        for (from, to) in [
            ("File", "string"),
            ("array<string>", "array<number>"),
            ("array", "array<string>"),
        ] {
            let info = plan(from, to);
            assert_eq!(info.data_loss_severity, DataLossSeverity::Certain);
            assert_eq!(info.steps.len(), 1);
            assert_eq!(info.example.before, json!("?"));
            assert_eq!(info.example.after, json!("?"));
        }
    }

    #[test]
    fn severity_order() {
        assert!(DataLossSeverity::None < DataLossSeverity::Possible);
        assert!(DataLossSeverity::Possible < DataLossSeverity::Certain);
        assert_eq!(DataLossSeverity::Possible.to_string(), "possible");
    }

    #[test]
    fn nested_typed_array_target() {
        let info = plan("string", "array<array<string>>");
        assert_eq!(info.example.after, json!([["hello"]]));
        assert_eq!(info.data_loss_severity, DataLossSeverity::Certain);
    }
}
