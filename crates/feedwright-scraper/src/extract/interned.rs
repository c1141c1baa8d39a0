//! Decoding for flattened payloads where values may be indices into the root
//! array (the `__NUXT_DATA__` format).

use serde_json::{Map, Value};

/// Resolves one field value against the payload root.
///
/// A non-negative integer that indexes into `root` is replaced by the element
/// at that index; every other value, including an out-of-range index, is
/// returned as is.
#[must_use]
pub fn resolve<'a>(root: &'a [Value], value: &'a Value) -> &'a Value {
    value
        .as_u64()
        .and_then(|index| usize::try_from(index).ok())
        .and_then(|index| root.get(index))
        .unwrap_or(value)
}

/// Resolves `object[key]` and renders it as text.
///
/// Strings are trimmed, numbers and booleans are formatted, and missing,
/// `null`, blank, or structured values give `None`.
#[must_use]
pub fn resolve_text(root: &[Value], object: &Map<String, Value>, key: &str) -> Option<String> {
    let value = resolve(root, object.get(key)?);
    let text = match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// The first object in `root` that has every key in `keys`.
#[must_use]
pub fn find_object_with_keys<'a>(
    root: &'a [Value],
    keys: &[&str],
) -> Option<&'a Map<String, Value>> {
    root.iter()
        .filter_map(Value::as_object)
        .find(|object| keys.iter().all(|key| object.contains_key(*key)))
}
