//! Minimal example synthesis from schema fragments
//!
//! Given an arbitrary schema value, derive a small plausible JSON example.
//! This is a best-effort heuristic, not a validator: it never fails, and
//! unusable shapes degrade to `None` (or an empty object/list) which the
//! operation renderer treats as "no example".

use serde_json::{json, Map, Value};

/// Derive a minimal example for a schema fragment, or `None`
///
/// A literal `example` is always returned verbatim. Object-like schemas
/// produce a stub restricted to the `required` field list (first three
/// declared properties when no list is given); arrays wrap a synthesized
/// item; `allOf`/`oneOf`/`anyOf` recurse into the first branch of the
/// first non-empty combinator list.
pub fn synthesize(schema: &Value) -> Option<Value> {
    let obj = schema.as_object()?;
    if let Some(example) = obj.get("example") {
        return Some(example.clone());
    }
    let declared = obj.get("type").and_then(Value::as_str);
    if declared == Some("object")
        || obj.contains_key("properties")
        || obj.contains_key("required")
    {
        return Some(object_example(obj));
    }
    if declared == Some("array") {
        return Some(array_example(obj.get("items")));
    }
    for combinator in ["allOf", "oneOf", "anyOf"] {
        if let Some(first) = obj
            .get(combinator)
            .and_then(Value::as_array)
            .and_then(|branches| branches.first())
        {
            if let Some(example) = synthesize(first) {
                return Some(example);
            }
        }
    }
    None
}

fn object_example(obj: &Map<String, Value>) -> Value {
    let empty = Map::new();
    let props = obj
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let included: Vec<String> = match obj.get("required").and_then(Value::as_array) {
        Some(names) => names
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        None => props.keys().take(3).cloned().collect(),
    };

    let mut out = Map::new();
    for name in included {
        let stub = field_stub(&name, props.get(&name).and_then(Value::as_object));
        out.insert(name, stub);
    }
    Value::Object(out)
}

fn field_stub(name: &str, prop: Option<&Map<String, Value>>) -> Value {
    let Some(prop) = prop else {
        return Value::Null;
    };
    if let Some(target) = prop.get("$ref") {
        let mut reference = Map::new();
        reference.insert("$ref".to_string(), target.clone());
        return Value::Object(reference);
    }
    match prop.get("type").and_then(Value::as_str) {
        Some("string") => Value::String(string_stub(name)),
        Some("integer") | Some("number") => json!(1),
        Some("boolean") => json!(true),
        Some("array") => array_example(prop.get("items")),
        Some("object") => Value::Object(Map::new()),
        _ => Value::Null,
    }
}

/// Typed scalar defaults keyed off the field name
fn string_stub(name: &str) -> String {
    let lower = name.to_lowercase();
    if lower.ends_with("id") {
        "1234567890".to_string()
    } else if lower.contains("date") {
        "2025-08-21T00:00:00Z".to_string()
    } else if lower.contains("currency") {
        "RUB".to_string()
    } else {
        "text".to_string()
    }
}

fn array_example(items: Option<&Value>) -> Value {
    match items {
        None | Some(Value::Null) => json!([{}]),
        Some(item) if item.as_object().is_some_and(|m| m.is_empty()) => json!([{}]),
        Some(item) => match synthesize(item) {
            Some(example) => Value::Array(vec![example]),
            None => Value::Array(Vec::new()),
        },
    }
}
