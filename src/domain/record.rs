//! Records are plain JSON objects addressed by dotted field paths.

use serde_json::{Map, Value as JsonValue};

/// One entity instance (user, team, match, ...).
pub type Record = Map<String, JsonValue>;

/// Identity value stored at a schema's identity field.
pub type RecordId = i64;

/// Resolves a dotted path (`team1.name`) against a record.
///
/// Returns `None` when any segment is missing or a non-object is traversed.
pub fn field_at<'a>(record: &'a Record, path: &str) -> Option<&'a JsonValue> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = record.get(first)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Writes `value` at a dotted path, creating intermediate objects as needed.
///
/// A non-object value in the middle of the path is replaced by an object.
pub fn set_field_at(record: &mut Record, path: &str, value: JsonValue) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(last) = segments.pop() else {
        return;
    };

    let mut current = record;
    for segment in segments {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| JsonValue::Object(Map::new()));
        if !slot.is_object() {
            *slot = JsonValue::Object(Map::new());
        }
        current = match slot.as_object_mut() {
            Some(obj) => obj,
            None => return,
        };
    }
    current.insert(last.to_string(), value);
}

/// Text form of a scalar field used for search and categorical matching.
///
/// Null, arrays and objects have no text form and never match.
pub fn field_text(record: &Record, path: &str) -> Option<String> {
    match field_at(record, path)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Reads an identity from a JSON value; numeric strings are accepted.
pub fn id_from_json(value: &JsonValue) -> Option<RecordId> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    if let Some(s) = value.as_str() {
        return s.trim().parse::<RecordId>().ok();
    }
    None
}

/// Identity of `record` at `identity_field`, if present and numeric.
pub fn identity_of(record: &Record, identity_field: &str) -> Option<RecordId> {
    field_at(record, identity_field).and_then(id_from_json)
}
