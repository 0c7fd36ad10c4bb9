//! Saved JQL filters (`/rest/api/2/filter`).
//!
//! A filter feeds the board built on top of it, so a filter must outlive
//! any board referencing it: create the filter first, delete it last.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::client::JiraClient;
use crate::error::Error;

/// A saved JQL search query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// Filter id. The core API returns this as a JSON string; it is
    /// normalized to an integer here.
    #[serde(deserialize_with = "id_from_string_or_int")]
    pub id: i64,
    /// Filter name.
    pub name: String,
    /// Filter description.
    #[serde(default)]
    pub description: Option<String>,
    /// The JQL query the filter saves.
    pub jql: String,
    /// Whether the filter is marked as a favourite for its owner.
    #[serde(default)]
    pub favourite: bool,
    /// Owning user.
    #[serde(default)]
    pub owner: Option<FilterOwner>,
    /// API URL of this filter.
    #[serde(rename = "self", default)]
    pub self_url: Option<String>,
}

/// Owner of a filter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOwner {
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Atlassian account id (Cloud) if present.
    #[serde(default)]
    pub account_id: Option<String>,
}

/// Request body for creating or updating a filter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFilter {
    /// Filter name.
    pub name: String,
    /// Filter description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JQL query string, e.g. `project = PB`.
    pub jql: String,
    /// Mark the filter as a favourite.
    pub favourite: bool,
}

/// Deserialize an id that the API may send as either a JSON string or a
/// number. Filter ids come back as strings while board and sprint ids are
/// numeric.
fn id_from_string_or_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Int(i64),
    }

    match StringOrInt::deserialize(deserializer)? {
        StringOrInt::Int(id) => Ok(id),
        StringOrInt::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

impl JiraClient {
    /// Create a new filter.
    ///
    /// # Errors
    /// Returns error if the request fails or the JQL is rejected.
    pub async fn create_filter(&self, req: &CreateFilter) -> Result<Filter, Error> {
        info!(name = %req.name, jql = %req.jql, "Creating filter");

        let filter: Filter = self.post("/rest/api/2/filter", req).await?;

        info!(filter_id = filter.id, "Filter created");
        Ok(filter)
    }

    /// Get a filter by id.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the filter does not exist.
    pub async fn get_filter(&self, id: i64) -> Result<Filter, Error> {
        self.get(&format!("/rest/api/2/filter/{id}")).await
    }

    /// Replace a filter's name, description, JQL and favourite flag.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn update_filter(&self, id: i64, req: &CreateFilter) -> Result<Filter, Error> {
        info!(filter_id = id, name = %req.name, "Updating filter");
        self.put(&format!("/rest/api/2/filter/{id}"), req).await
    }

    /// Delete a filter.
    ///
    /// Boards referencing the filter must be deleted first.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn delete_filter(&self, id: i64) -> Result<(), Error> {
        info!(filter_id = id, "Deleting filter");
        self.delete(&format!("/rest/api/2/filter/{id}")).await
    }
}
