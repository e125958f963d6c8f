pub mod comments;
pub mod window;

use serde_json::{Map, Value};

use crate::error::NormalizeError;
use crate::model::work_item::{CustomFields, SystemFields, WorkItemRecord};


/// Decides which raw field names land in the custom-fields bucket.
///
/// Keys starting with a platform prefix are never custom. When an allowlist
/// is configured, only listed keys are kept; otherwise every non-platform
/// key is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPolicy {
    pub platform_prefixes: Vec<String>,
    pub custom_allowlist: Option<Vec<String>>,
}

impl Default for FieldPolicy {
    fn default() -> Self {
        Self {
            platform_prefixes: vec!["System.".to_string(), "Microsoft.VSTS.".to_string()],
            custom_allowlist: None,
        }
    }
}

impl FieldPolicy {
    fn keeps(&self, key: &str) -> bool {
        if self.platform_prefixes.iter().any(|p| key.starts_with(p.as_str())) {
            return false;
        }
        match &self.custom_allowlist {
            Some(allow) => allow.iter().any(|name| name == key),
            None => true,
        }
    }
}

/// Reshapes raw work-item payloads into [`WorkItemRecord`]s.
///
/// Stateless apart from the field policy; every call is a pure
/// transformation over its input.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    policy: FieldPolicy,
}

impl Normalizer {
    pub fn new(policy: FieldPolicy) -> Self {
        Self { policy }
    }

    /// Normalize a batch, preserving input order and length.
    ///
    /// Malformed `fields` entries degrade to all-default system fields.
    /// A record without a usable `id` fails the whole batch with
    /// [`NormalizeError::MissingIdentifier`].
    pub fn normalize(&self, raw_items: &[Value]) -> Result<Vec<WorkItemRecord>, NormalizeError> {
        raw_items
            .iter()
            .enumerate()
            .map(|(index, raw)| self.normalize_item(raw, index))
            .collect()
    }

    fn normalize_item(&self, raw: &Value, index: usize) -> Result<WorkItemRecord, NormalizeError> {
        let id = item_id(raw).ok_or(NormalizeError::MissingIdentifier { index })?;

        // Absent, null, or non-object `fields` all read as an empty map.
        let empty = Map::new();
        let fields = raw
            .get("fields")
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        Ok(WorkItemRecord {
            id,
            system: system_fields(fields),
            custom: self.custom_fields(fields),
            comments: None,
        })
    }

    fn custom_fields(&self, fields: &Map<String, Value>) -> CustomFields {
        CustomFields(
            fields
                .iter()
                .filter(|(key, _)| self.policy.keeps(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }
}

/// Normalize a batch with the default field policy.
pub fn normalize(raw_items: &[Value]) -> Result<Vec<WorkItemRecord>, NormalizeError> {
    Normalizer::default().normalize(raw_items)
}

fn system_fields(fields: &Map<String, Value>) -> SystemFields {
    SystemFields {
        changed_date: str_field(fields, "System.ChangedDate"),
        title: str_field(fields, "System.Title"),
        work_item_type: str_field(fields, "System.WorkItemType"),
        state: str_field(fields, "System.State"),
        reason: str_field(fields, "System.Reason"),
        description: opt_str_field(fields, "System.Description"),
        assigned_to: display_name(fields, "System.AssignedTo"),
    }
}

fn item_id(raw: &Value) -> Option<String> {
    match raw.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn str_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn opt_str_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(String::from)
}

/// Pull `displayName` out of a nested identity field, empty when anything
/// along the path is missing or the wrong shape.
fn display_name(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_object)
        .and_then(|identity| identity.get("displayName"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
