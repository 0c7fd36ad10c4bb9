//! Issues (`/rest/api/2/issue`).
//!
//! Issues carry dynamically named custom fields (`customfield_<N>`) whose
//! names differ per instance, so unknown fields are retained in a raw map
//! instead of being dropped during deserialization.

use serde::Deserialize;
use serde_json::Value;

use crate::client::JiraClient;
use crate::error::Error;

/// An issue, identified by a project-scoped key.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// Internal issue id.
    pub id: String,
    /// Project-scoped key, e.g. `PB-1`.
    pub key: String,
    /// Field values, including custom fields.
    pub fields: IssueFields,
    /// API URL of this issue.
    #[serde(rename = "self", default)]
    pub self_url: Option<String>,
}

/// Field values of an issue.
///
/// Only `summary` is modeled explicitly; everything else, including every
/// `customfield_<N>`, lands in [`IssueFields::extra`] untyped.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueFields {
    /// Issue summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Remaining fields, keyed by field id.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl IssueFields {
    /// Raw value of a field by id, e.g. `customfield_10010`.
    #[must_use]
    pub fn custom_field(&self, field_id: &str) -> Option<&Value> {
        self.extra.get(field_id)
    }

    /// Serialized sprint membership entries stored under the given custom
    /// field.
    ///
    /// The value is an array of opaque strings of the informal form
    /// `...[id=37,rapidViewId=84,state=FUTURE,name=...]`. Their grammar is
    /// not contractual; use [`mentions_sprint`] rather than parsing.
    #[must_use]
    pub fn sprint_serials(&self, field_id: &str) -> Vec<&str> {
        self.custom_field(field_id)
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Whether a serialized sprint membership entry refers to the given sprint.
///
/// Matches the `[id=<sprintId>,` substring only; the rest of the entry's
/// format is unspecified and may change between server versions.
#[must_use]
pub fn mentions_sprint(serialized: &str, sprint_id: i64) -> bool {
    serialized.contains(&format!("[id={sprint_id},"))
}

impl JiraClient {
    /// Fetch an issue with its current field values.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the issue does not exist.
    pub async fn get_issue(&self, key: &str) -> Result<Issue, Error> {
        self.get(&format!("/rest/api/2/issue/{key}")).await
    }
}
