use serde::{Deserialize, Serialize};

/// A single work-item comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub text: String,
    /// `displayName` of the comment author.
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_date: String,
}

/// The comment listing attached to a work item, with the endpoint's counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentThread {
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub comments: Vec<Comment>,
}
