use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{is_blank, Id};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Id,
    pub name: String,
    pub description: String,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Properties outside the base schema (such as `status`), kept as written.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    pub fn is_valid(&self) -> bool {
        !is_blank(Some(&self.name)) && !is_blank(Some(&self.description))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProjectInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateProjectInput {
    pub fn is_complete(&self) -> bool {
        !is_blank(self.name.as_deref()) && !is_blank(self.description.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectFilter {
    pub status: Option<String>,
}

impl ProjectFilter {
    /// `status` compares against an extra `status` property; projects that
    /// never had one are filtered out whenever a status is requested.
    pub fn matches(&self, project: &Project) -> bool {
        match &self.status {
            None => true,
            Some(status) => matches!(
                project.extra.get("status"),
                Some(Value::String(s)) if s == status
            ),
        }
    }
}

/// Outcome of a cascading project delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDeletion {
    pub project_id: Id,
    pub deleted_tasks: usize,
}
