//! Field metadata (`/rest/api/2/field`).
//!
//! Custom field ids vary per instance. The sprint membership field is
//! found by scanning field metadata for the field named `Sprint` and
//! reading its schema's custom id.

use serde::Deserialize;

use crate::client::JiraClient;
use crate::error::Error;

/// Name of the Jira Software field that stores sprint membership.
pub const SPRINT_FIELD_NAME: &str = "Sprint";

/// Metadata for one field of the instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field id, e.g. `summary` or `customfield_10010`.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this is a custom field.
    #[serde(default)]
    pub custom: Option<bool>,
    /// Type information. Absent for a few virtual fields.
    #[serde(default)]
    pub schema: Option<FieldSchema>,
}

/// Schema block of a field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    /// Value type, e.g. `string`, `array`.
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
    /// Custom field type key for custom fields.
    #[serde(default)]
    pub custom: Option<String>,
    /// Numeric custom field id for custom fields.
    #[serde(default)]
    pub custom_id: Option<i64>,
}

impl JiraClient {
    /// Fetch metadata for every field of the instance.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn fields(&self) -> Result<Vec<Field>, Error> {
        self.get("/rest/api/2/field").await
    }

    /// Resolve a custom field's `customfield_<N>` key by its display name.
    ///
    /// # Errors
    /// Returns [`Error::MissingField`] if no custom field with that name
    /// exists.
    pub async fn custom_field_key(&self, field_name: &str) -> Result<String, Error> {
        let fields = self.fields().await?;
        fields
            .iter()
            .find(|f| f.name == field_name)
            .and_then(|f| f.schema.as_ref())
            .and_then(|s| s.custom_id)
            .map(|id| format!("customfield_{id}"))
            .ok_or_else(|| Error::MissingField(field_name.to_string()))
    }

    /// Resolve the sprint membership field's `customfield_<N>` key.
    ///
    /// # Errors
    /// Returns [`Error::MissingField`] on instances without Jira Software.
    pub async fn sprint_field_key(&self) -> Result<String, Error> {
        self.custom_field_key(SPRINT_FIELD_NAME).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_deserialization() {
        let json = r#"[
            {
                "id": "summary",
                "name": "Summary",
                "custom": false,
                "schema": {"type": "string", "system": "summary"}
            },
            {
                "id": "customfield_10010",
                "name": "Sprint",
                "custom": true,
                "schema": {
                    "type": "array",
                    "items": "json",
                    "custom": "com.pyxis.greenhopper.jira:gh-sprint",
                    "customId": 10010
                }
            }
        ]"#;

        let fields: Vec<Field> = serde_json::from_str(json).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].id, "summary");
        assert_eq!(fields[0].custom, Some(false));
        assert!(fields[0].schema.as_ref().unwrap().custom_id.is_none());

        assert_eq!(fields[1].name, "Sprint");
        assert_eq!(fields[1].schema.as_ref().unwrap().custom_id, Some(10010));
    }

    #[test]
    fn test_field_without_schema() {
        let json = r#"[{"id": "thumbnail", "name": "Images"}]"#;
        let fields: Vec<Field> = serde_json::from_str(json).unwrap();
        assert!(fields[0].schema.is_none());
        assert!(fields[0].custom.is_none());
    }
}
