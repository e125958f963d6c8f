use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::comment::CommentThread;

/// Platform-defined fields of an Azure DevOps work item.
///
/// Every string field defaults to empty when the raw payload lacks it;
/// `description` stays `None` (serialized as `null`) when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemFields {
    #[serde(default)]
    pub changed_date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub work_item_type: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `displayName` of the `System.AssignedTo` identity, empty if unassigned.
    #[serde(default)]
    pub assigned_to: String,
}

/// Organization-defined fields, keyed by their fully-qualified names verbatim.
///
/// The custom schema is unbounded per deployment, so values stay raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomFields(pub BTreeMap<String, Value>);

impl CustomFields {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

/// A normalized work item: source id plus system/custom field sub-records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemRecord {
    pub id: String,
    pub system: SystemFields,
    pub custom: CustomFields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<CommentThread>,
}
