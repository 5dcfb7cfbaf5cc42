//! RFC 7396 JSON Merge Patch, used to layer the local config over the global one.
//!
//! - Objects merge recursively
//! - `null` in the patch deletes the key
//! - Arrays and scalars replace (a local `search_paths` list replaces the
//!   global one rather than extending it)

use serde_json::Value;

/// Apply `patch` on top of `target`.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use amalgam_config::merge::merge_patch;
///
/// let global = json!({"include": {"search_paths": ["/usr/include"], "max_depth": 64}});
/// let local = json!({"include": {"search_paths": ["vendor"]}});
/// assert_eq!(
///     merge_patch(global, local),
///     json!({"include": {"search_paths": ["vendor"], "max_depth": 64}})
/// );
/// ```
pub fn merge_patch(target: Value, patch: Value) -> Value {
    let Value::Object(patch_map) = patch else {
        return patch;
    };
    let mut target_map = match target {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };

    for (key, patch_value) in patch_map {
        if patch_value.is_null() {
            target_map.remove(&key);
            continue;
        }
        let existing = target_map.remove(&key).unwrap_or(Value::Null);
        target_map.insert(key, merge_patch(existing, patch_value));
    }
    Value::Object(target_map)
}
