//! JSON Patch (RFC 6902) documents applied to the JSON form of an update DTO.
//!
//! Member names resolve exactly first and then ASCII case-insensitively, so
//! `/Name` and `/name` address the same member. A patch may not introduce a
//! member the target did not already have.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatchError {
    #[error("'{0}' is not a valid JSON pointer")]
    InvalidPointer(String),

    #[error("path '{0}' does not exist")]
    PathNotFound(String),

    #[error("'{0}' is not a member of the target")]
    UnknownMember(String),

    #[error("array index in '{0}' is out of bounds")]
    IndexOutOfBounds(String),

    #[error("cannot move '{from}' into its own child '{path}'")]
    MoveIntoChild { from: String, path: String },

    #[error("test failed at '{0}'")]
    TestFailed(String),

    #[error("the document root cannot be removed")]
    RootRemoval,

    #[error("malformed patch document: {0}")]
    Malformed(String),
}

/// A single patch operation, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

/// An ordered list of operations, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

impl PatchDocument {
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self(operations)
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    /// Applies every operation in order to a copy of `target`.
    ///
    /// The first failing operation aborts the batch; `target` is never
    /// modified.
    pub fn apply(&self, target: &Value) -> Result<Value, PatchError> {
        let mut doc = target.clone();
        for operation in &self.0 {
            apply_operation(&mut doc, target, operation)?;
        }
        ensure_known_members(target, &doc)?;
        Ok(doc)
    }
}

fn apply_operation(doc: &mut Value, original: &Value, operation: &PatchOperation) -> Result<(), PatchError> {
    match operation {
        PatchOperation::Add { path, value } => add(doc, original, &parse_pointer(path)?, path, value.clone()),
        PatchOperation::Remove { path } => remove(doc, &parse_pointer(path)?, path).map(drop),
        PatchOperation::Replace { path, value } => {
            *navigate_mut(doc, &parse_pointer(path)?, path)? = value.clone();
            Ok(())
        }
        PatchOperation::Move { from, path } => {
            let from_tokens = parse_pointer(from)?;
            let path_tokens = parse_pointer(path)?;
            get(doc, &from_tokens, from)?;
            if from_tokens == path_tokens {
                return Ok(());
            }
            if path_tokens.starts_with(&from_tokens) {
                return Err(PatchError::MoveIntoChild {
                    from: from.clone(),
                    path: path.clone(),
                });
            }
            let value = remove(doc, &from_tokens, from)?;
            add(doc, original, &path_tokens, path, value)
        }
        PatchOperation::Copy { from, path } => {
            let value = get(doc, &parse_pointer(from)?, from)?.clone();
            add(doc, original, &parse_pointer(path)?, path, value)
        }
        PatchOperation::Test { path, value } => {
            if json_eq(get(doc, &parse_pointer(path)?, path)?, value) {
                Ok(())
            } else {
                Err(PatchError::TestFailed(path.clone()))
            }
        }
    }
}

/// Splits an RFC 6901 pointer into unescaped reference tokens.
fn parse_pointer(pointer: &str) -> Result<Vec<String>, PatchError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let rest = pointer
        .strip_prefix('/')
        .ok_or_else(|| PatchError::InvalidPointer(pointer.to_string()))?;

    rest.split('/')
        .map(|token| unescape(token).ok_or_else(|| PatchError::InvalidPointer(pointer.to_string())))
        .collect()
}

fn unescape(token: &str) -> Option<String> {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

fn resolve_key(map: &Map<String, Value>, token: &str) -> Option<String> {
    if map.contains_key(token) {
        return Some(token.to_string());
    }
    map.keys().find(|key| key.eq_ignore_ascii_case(token)).cloned()
}

/// `-` is only meaningful as the append position of `add`.
fn array_index(token: &str, len: usize, allow_end: bool, pointer: &str) -> Result<usize, PatchError> {
    if token == "-" {
        return if allow_end {
            Ok(len)
        } else {
            Err(PatchError::IndexOutOfBounds(pointer.to_string()))
        };
    }
    if token.is_empty() || (token.len() > 1 && token.starts_with('0')) || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PatchError::PathNotFound(pointer.to_string()));
    }
    let index: usize = token
        .parse()
        .map_err(|_| PatchError::IndexOutOfBounds(pointer.to_string()))?;

    if index < len || (allow_end && index == len) {
        Ok(index)
    } else {
        Err(PatchError::IndexOutOfBounds(pointer.to_string()))
    }
}

fn get<'a>(doc: &'a Value, tokens: &[String], pointer: &str) -> Result<&'a Value, PatchError> {
    let mut current = doc;
    for token in tokens {
        current = match current {
            Value::Object(map) => resolve_key(map, token)
                .and_then(|key| map.get(&key))
                .ok_or_else(|| PatchError::PathNotFound(pointer.to_string()))?,
            Value::Array(items) => &items[array_index(token, items.len(), false, pointer)?],
            _ => return Err(PatchError::PathNotFound(pointer.to_string())),
        };
    }
    Ok(current)
}

fn navigate_mut<'a>(doc: &'a mut Value, tokens: &[String], pointer: &str) -> Result<&'a mut Value, PatchError> {
    let mut current = doc;
    for token in tokens {
        current = match current {
            Value::Object(map) => {
                let key = resolve_key(map, token).ok_or_else(|| PatchError::PathNotFound(pointer.to_string()))?;
                map.get_mut(&key)
                    .ok_or_else(|| PatchError::PathNotFound(pointer.to_string()))?
            }
            Value::Array(items) => {
                let index = array_index(token, items.len(), false, pointer)?;
                &mut items[index]
            }
            _ => return Err(PatchError::PathNotFound(pointer.to_string())),
        };
    }
    Ok(current)
}

/// Members removed earlier in the batch keep the casing they had in `original`.
fn add(doc: &mut Value, original: &Value, tokens: &[String], pointer: &str, value: Value) -> Result<(), PatchError> {
    let Some((last, parents)) = tokens.split_last() else {
        *doc = value;
        return Ok(());
    };

    match navigate_mut(doc, parents, pointer)? {
        Value::Object(map) => {
            let key = resolve_key(map, last)
                .or_else(|| original_member(original, parents, last, pointer))
                .unwrap_or_else(|| last.clone());
            map.insert(key, value);
            Ok(())
        }
        Value::Array(items) => {
            let index = array_index(last, items.len(), true, pointer)?;
            items.insert(index, value);
            Ok(())
        }
        _ => Err(PatchError::PathNotFound(pointer.to_string())),
    }
}

fn original_member(original: &Value, parents: &[String], token: &str, pointer: &str) -> Option<String> {
    get(original, parents, pointer)
        .ok()
        .and_then(Value::as_object)
        .and_then(|map| resolve_key(map, token))
}

fn remove(doc: &mut Value, tokens: &[String], pointer: &str) -> Result<Value, PatchError> {
    let Some((last, parents)) = tokens.split_last() else {
        return Err(PatchError::RootRemoval);
    };

    match navigate_mut(doc, parents, pointer)? {
        Value::Object(map) => resolve_key(map, last)
            .and_then(|key| map.remove(&key))
            .ok_or_else(|| PatchError::PathNotFound(pointer.to_string())),
        Value::Array(items) => {
            let index = array_index(last, items.len(), false, pointer)?;
            Ok(items.remove(index))
        }
        _ => Err(PatchError::PathNotFound(pointer.to_string())),
    }
}

/// Numbers compare by value, so `150` equals `150.0`.
fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y || x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => x.len() == y.len() && x.iter().zip(y).all(|(a, b)| json_eq(a, b)),
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len() && x.iter().all(|(key, a)| y.get(key).is_some_and(|b| json_eq(a, b)))
        }
        _ => a == b,
    }
}

fn ensure_known_members(original: &Value, patched: &Value) -> Result<(), PatchError> {
    if let (Value::Object(before), Value::Object(after)) = (original, patched) {
        if let Some(unknown) = after.keys().find(|key| !before.contains_key(*key)) {
            return Err(PatchError::UnknownMember(unknown.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn target() -> Value {
        json!({
            "name": "Vortex Race 3",
            "quantity": 4,
            "price": 150.0,
            "vendorGuid": "d406189b-01a1-404b-8147-cf9a81e1c283"
        })
    }

    fn patch(value: Value) -> PatchDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_replace_member() {
        let result = patch(json!([{"op": "replace", "path": "/quantity", "value": 10}]))
            .apply(&target())
            .unwrap();
        assert_eq!(result["quantity"], 10);
        assert_eq!(result["name"], "Vortex Race 3");
    }

    #[test]
    fn test_member_names_are_case_insensitive() {
        let result = patch(json!([
            {"op": "replace", "path": "/Name", "value": "Vortex"},
            {"op": "add", "path": "/VENDORGUID", "value": "x"}
        ]))
        .apply(&target())
        .unwrap();
        assert_eq!(result["name"], "Vortex");
        assert_eq!(result["vendorGuid"], "x");
        assert!(result.get("Name").is_none());
    }

    #[test]
    fn test_re_adding_removed_member_keeps_its_casing() {
        let result = patch(json!([
            {"op": "remove", "path": "/name"},
            {"op": "add", "path": "/Name", "value": "Vortex Race 3 TKL"}
        ]))
        .apply(&target())
        .unwrap();

        assert_eq!(result["name"], "Vortex Race 3 TKL");
        assert!(result.get("Name").is_none());
    }

    #[test]
    fn test_remove_leaves_member_absent() {
        let result = patch(json!([{"op": "remove", "path": "/name"}]))
            .apply(&target())
            .unwrap();
        assert!(result.get("name").is_none());
    }

    #[test]
    fn test_unknown_member_rejected() {
        let err = patch(json!([{"op": "add", "path": "/colour", "value": "red"}]))
            .apply(&target())
            .unwrap_err();
        assert_eq!(err, PatchError::UnknownMember("colour".to_string()));

        let err = patch(json!([{"op": "replace", "path": "/colour", "value": "red"}]))
            .apply(&target())
            .unwrap_err();
        assert_eq!(err, PatchError::PathNotFound("/colour".to_string()));
    }

    #[test]
    fn test_failed_test_aborts_batch() {
        let original = target();
        let err = patch(json!([
            {"op": "replace", "path": "/quantity", "value": 0},
            {"op": "test", "path": "/name", "value": "Something else"}
        ]))
        .apply(&original)
        .unwrap_err();
        assert_eq!(err, PatchError::TestFailed("/name".to_string()));
        assert_eq!(original, target());
    }

    #[test]
    fn test_numeric_test_ignores_representation() {
        assert!(patch(json!([{"op": "test", "path": "/price", "value": 150}]))
            .apply(&target())
            .is_ok());
    }

    #[test]
    fn test_move_and_copy() {
        let doc = json!({"a": {"b": 1}, "c": [1, 2]});

        let moved = patch(json!([{"op": "move", "from": "/a/b", "path": "/c/-"}]))
            .apply(&doc)
            .unwrap();
        assert_eq!(moved["c"], json!([1, 2, 1]));
        assert_eq!(moved["a"], json!({}));

        let copied = patch(json!([{"op": "copy", "from": "/c/0", "path": "/c/0"}]))
            .apply(&doc)
            .unwrap();
        assert_eq!(copied["c"], json!([1, 1, 2]));

        let err = patch(json!([{"op": "move", "from": "/a", "path": "/a/b"}]))
            .apply(&doc)
            .unwrap_err();
        assert!(matches!(err, PatchError::MoveIntoChild { .. }));
    }

    #[test]
    fn test_pointer_escapes() {
        let doc = json!({"a/b": 1, "m~n": 2});
        let result = patch(json!([
            {"op": "replace", "path": "/a~1b", "value": 10},
            {"op": "replace", "path": "/m~0n", "value": 20}
        ]))
        .apply(&doc)
        .unwrap();
        assert_eq!(result, json!({"a/b": 10, "m~n": 20}));

        let err = patch(json!([{"op": "remove", "path": "/m~2n"}])).apply(&doc).unwrap_err();
        assert!(matches!(err, PatchError::InvalidPointer(_)));

        let err = patch(json!([{"op": "remove", "path": "name"}])).apply(&doc).unwrap_err();
        assert!(matches!(err, PatchError::InvalidPointer(_)));
    }

    #[test]
    fn test_array_bounds() {
        let doc = json!({"items": [1]});
        assert!(patch(json!([{"op": "add", "path": "/items/1", "value": 2}])).apply(&doc).is_ok());

        let err = patch(json!([{"op": "add", "path": "/items/5", "value": 2}])).apply(&doc).unwrap_err();
        assert!(matches!(err, PatchError::IndexOutOfBounds(_)));

        let err = patch(json!([{"op": "remove", "path": "/items/-"}])).apply(&doc).unwrap_err();
        assert!(matches!(err, PatchError::IndexOutOfBounds(_)));
    }

    #[test]
    fn test_root_removal_rejected() {
        let err = patch(json!([{"op": "remove", "path": ""}])).apply(&target()).unwrap_err();
        assert_eq!(err, PatchError::RootRemoval);
    }

    #[test]
    fn test_unknown_op_does_not_deserialize() {
        let parsed: Result<PatchDocument, _> = serde_json::from_value(json!([{"op": "merge", "path": "/name"}]));
        assert!(parsed.is_err());
    }
}
