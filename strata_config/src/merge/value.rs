//! Deep-merge mechanics for untyped JSON section values.

use serde_json::Value;

/// Overlay `incoming` onto `target`, updating `target` in place.
///
/// Behaviour:
/// - Objects merge recursively: keys unique to either side are kept, and
///   keys present in both merge per-key with `incoming` winning conflicts.
/// - Arrays form a set union: `target`'s elements keep their order, then
///   elements of `incoming` not already structurally equal to an existing
///   element are appended in their own order.
/// - Anything else (scalars, or a type mismatch between the two sides)
///   replaces `target` wholesale.
///
/// # Examples
///
/// ```rust
/// use strata_config::merge_value;
/// use serde_json::json;
///
/// let mut acc = json!({"a": 1, "b": {"x": 1}});
/// merge_value(&mut acc, json!({"b": {"y": 2}, "c": 3}));
/// assert_eq!(acc, json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3}));
///
/// // Arrays union structurally, preserving existing order.
/// let mut list = json!([1, 2]);
/// merge_value(&mut list, json!([2, 3]));
/// assert_eq!(list, json!([1, 2, 3]));
/// ```
pub fn merge_value(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(existing), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match existing.get_mut(&key) {
                    Some(slot) => merge_value(slot, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(existing), Value::Array(additions)) => {
            for item in additions {
                // Structural equality; duplicate elements are dropped.
                if !existing.contains(&item) {
                    existing.push(item);
                }
            }
        }
        (slot, replacement) => *slot = replacement,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::merge_value;

    #[rstest]
    #[case::scalar_replaces_scalar(json!(1), json!(2), json!(2))]
    #[case::object_replaces_scalar(json!("x"), json!({"a": 1}), json!({"a": 1}))]
    #[case::scalar_replaces_object(json!({"a": 1}), json!(true), json!(true))]
    #[case::array_replaces_object(json!({"a": 1}), json!([1]), json!([1]))]
    #[case::object_replaces_array(json!([1]), json!({"a": 1}), json!({"a": 1}))]
    #[case::null_replaces_value(json!({"a": 1}), json!(null), json!(null))]
    fn mismatched_shapes_replace(
        #[case] mut target: Value,
        #[case] incoming: Value,
        #[case] expected: Value,
    ) {
        merge_value(&mut target, incoming);
        assert_eq!(target, expected);
    }

    #[test]
    fn objects_union_with_incoming_winning_conflicts() {
        let mut target = json!({"keep": 1, "clash": {"deep": "old", "stay": true}});
        merge_value(&mut target, json!({"clash": {"deep": "new"}, "add": 2}));
        assert_eq!(
            target,
            json!({"keep": 1, "clash": {"deep": "new", "stay": true}, "add": 2})
        );
    }

    #[test]
    fn arrays_union_structurally() {
        let mut target = json!([{"id": 1}, "a"]);
        merge_value(&mut target, json!(["a", {"id": 1}, {"id": 2}]));
        assert_eq!(target, json!([{"id": 1}, "a", {"id": 2}]));
    }

    #[test]
    fn merge_is_idempotent() {
        let layer = json!({"obj": {"a": 1}, "arr": [1, {"k": "v"}], "s": "x"});
        let mut once = json!({});
        merge_value(&mut once, layer.clone());
        let mut twice = once.clone();
        merge_value(&mut twice, layer);
        assert_eq!(once, twice);
    }
}
