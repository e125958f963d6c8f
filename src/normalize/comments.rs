use serde_json::{Map, Value};

use crate::model::comment::{Comment, CommentThread};
use crate::model::work_item::WorkItemRecord;

/// Reshape the raw payload of the work-item comments endpoint.
///
/// Same permissive rules as the field normalizer: anything missing or of
/// the wrong shape falls back to its default, nothing errors.
pub fn normalize_comments(raw: &Value) -> CommentThread {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    let comments = obj
        .get("comments")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().map(comment).collect())
        .unwrap_or_default();

    CommentThread {
        total_count: int_field(obj, "totalCount"),
        count: int_field(obj, "count"),
        comments,
    }
}

/// Attach a normalized comment thread to an already-normalized record.
pub fn attach_comments(record: &mut WorkItemRecord, raw: &Value) {
    record.comments = Some(normalize_comments(raw));
}

fn comment(raw: &Value) -> Comment {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    Comment {
        id: int_field(obj, "id"),
        text: str_field(obj, "text"),
        created_by: obj
            .get("createdBy")
            .and_then(Value::as_object)
            .and_then(|identity| identity.get("displayName"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        created_date: str_field(obj, "createdDate"),
    }
}

fn int_field(obj: &Map<String, Value>, key: &str) -> i64 {
    obj.get(key).and_then(Value::as_i64).unwrap_or_default()
}

fn str_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
