//! Small total accessors over untrusted JSON.

use serde_json::{Map, Value};

static EMPTY: std::sync::LazyLock<Map<String, Value>> = std::sync::LazyLock::new(Map::new);

/// View any value as an object; non-objects read as empty.
pub(crate) fn as_record(value: &Value) -> &Map<String, Value> {
    value.as_object().unwrap_or(&EMPTY)
}

/// Resolve the first dotted path whose every step exists.
///
/// A path that resolves to `null` still counts as found, matching how the
/// payloads are probed key by key.
pub(crate) fn get_nested<'a>(payload: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths.iter().find_map(|path| {
        path.split('.')
            .try_fold(payload, |cursor, step| as_record(cursor).get(step))
    })
}

/// Non-blank string under `key`, trimmed.
pub(crate) fn trimmed_str<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// First non-blank trimmed string among `keys`.
pub(crate) fn first_str<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| trimmed_str(record, key))
}

/// First string among `keys` that is non-empty *before* trimming, returned untrimmed.
pub(crate) fn first_raw_str<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| {
        record
            .get(*key)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    })
}

/// Non-blank trimmed string at the first resolvable dotted path.
pub(crate) fn nested_str<'a>(payload: &'a Value, paths: &[&str]) -> Option<&'a str> {
    get_nested(payload, paths)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// First array among the direct keys, then among dotted paths.
pub(crate) fn first_array<'a>(
    payload: &'a Value,
    keys: &[&str],
    paths: &[&str],
) -> Option<&'a Vec<Value>> {
    let record = as_record(payload);
    keys.iter()
        .find_map(|key| record.get(*key).and_then(Value::as_array))
        .or_else(|| get_nested(payload, paths).and_then(Value::as_array))
}
