//! Agile boards (`/rest/agile/1.0/board`).

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::JiraClient;
use crate::error::Error;

/// Page size used when walking paginated board/sprint listings.
const PAGE_SIZE: u32 = 50;

/// An Agile board grouping issues via a filter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Board id.
    pub id: i64,
    /// Board name.
    pub name: String,
    /// Board type, `scrum` or `kanban`.
    #[serde(rename = "type", default)]
    pub board_type: Option<String>,
    /// Project the board lives in, when the server reports it.
    #[serde(default)]
    pub location: Option<BoardLocation>,
    /// API URL of this board.
    #[serde(rename = "self", default)]
    pub self_url: Option<String>,
}

/// Project location of a board, as reported by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardLocation {
    /// Project id.
    #[serde(default)]
    pub project_id: Option<i64>,
    /// Project key.
    #[serde(default)]
    pub project_key: Option<String>,
    /// Location display name.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Request body for creating a board.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoard {
    /// Board name.
    pub name: String,
    /// Board type, `scrum` or `kanban`.
    #[serde(rename = "type")]
    pub board_type: String,
    /// Id of the filter that feeds the board. The filter must outlive
    /// the board.
    pub filter_id: i64,
    /// Project to attach the board to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<CreateBoardLocation>,
}

/// Project location in a board creation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardLocation {
    /// Location type, always `project`.
    #[serde(rename = "type")]
    pub location_type: String,
    /// Project key or numeric id.
    pub project_key_or_id: String,
}

impl CreateBoard {
    /// Request for a scrum board on the given filter.
    #[must_use]
    pub fn scrum(name: impl Into<String>, filter_id: i64) -> Self {
        Self {
            name: name.into(),
            board_type: "scrum".to_string(),
            filter_id,
            location: None,
        }
    }

    /// Attach the board to a project.
    #[must_use]
    pub fn in_project(mut self, project_key_or_id: impl Into<String>) -> Self {
        self.location = Some(CreateBoardLocation {
            location_type: "project".to_string(),
            project_key_or_id: project_key_or_id.into(),
        });
        self
    }
}

/// Paginated envelope used by Agile API listings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    /// Index of the first returned item.
    pub start_at: u32,
    /// Requested page size.
    pub max_results: u32,
    /// Total matching items, when the server reports it.
    #[serde(default)]
    pub total: Option<u32>,
    /// Whether this is the final page.
    #[serde(default)]
    pub is_last: Option<bool>,
    /// Items on this page.
    pub values: Vec<T>,
}

impl<T> Paged<T> {
    /// Whether a further page should be requested.
    #[must_use]
    pub fn has_more(&self) -> bool {
        match (self.is_last, self.total) {
            (Some(last), _) => !last,
            // Older servers omit isLast on some endpoints.
            (None, Some(total)) => u64::from(self.start_at) + (self.values.len() as u64)
                < u64::from(total),
            (None, None) => self.values.len() as u64 == u64::from(self.max_results),
        }
    }
}

impl JiraClient {
    /// Create a new board on an existing filter.
    ///
    /// # Errors
    /// Returns error if the request fails or the filter id is invalid.
    pub async fn create_board(&self, req: &CreateBoard) -> Result<Board, Error> {
        info!(
            name = %req.name,
            board_type = %req.board_type,
            filter_id = req.filter_id,
            "Creating board"
        );

        let board: Board = self.post("/rest/agile/1.0/board", req).await?;

        info!(board_id = board.id, "Board created");
        Ok(board)
    }

    /// Get a board by id.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the board does not exist.
    pub async fn get_board(&self, id: i64) -> Result<Board, Error> {
        self.get(&format!("/rest/agile/1.0/board/{id}")).await
    }

    /// List all boards visible to the caller, walking every page.
    ///
    /// # Errors
    /// Returns error if any page request fails.
    pub async fn list_boards(&self) -> Result<Vec<Board>, Error> {
        let mut boards = Vec::new();
        let mut start_at = 0;

        loop {
            let page: Paged<Board> = self
                .get(&format!(
                    "/rest/agile/1.0/board?startAt={start_at}&maxResults={PAGE_SIZE}"
                ))
                .await?;

            let has_more = page.has_more();
            start_at += page.values.len() as u32;
            boards.extend(page.values);

            if !has_more {
                return Ok(boards);
            }
        }
    }

    /// Delete a board.
    ///
    /// Sprints on the board must be deleted first; the filter backing the
    /// board must be deleted after.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn delete_board(&self, id: i64) -> Result<(), Error> {
        info!(board_id = id, "Deleting board");
        self.delete(&format!("/rest/agile/1.0/board/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_deserialization() {
        let json = r#"{
            "id": 84,
            "self": "https://example.atlassian.net/rest/agile/1.0/board/84",
            "name": "board-abc123",
            "type": "scrum",
            "location": {
                "projectId": 10000,
                "projectKey": "PB",
                "displayName": "Project B (PB)"
            }
        }"#;

        let board: Board = serde_json::from_str(json).unwrap();
        assert_eq!(board.id, 84);
        assert_eq!(board.name, "board-abc123");
        assert_eq!(board.board_type.as_deref(), Some("scrum"));
        let location = board.location.unwrap();
        assert_eq!(location.project_key.as_deref(), Some("PB"));
        assert_eq!(location.project_id, Some(10000));
    }

    #[test]
    fn test_create_board_serialization() {
        let req = CreateBoard::scrum("board-abc123", 10042).in_project("PB");

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["name"], "board-abc123");
        assert_eq!(json["type"], "scrum");
        assert_eq!(json["filterId"], 10042);
        assert_eq!(json["location"]["type"], "project");
        assert_eq!(json["location"]["projectKeyOrId"], "PB");
    }

    #[test]
    fn test_create_board_omits_missing_location() {
        let req = CreateBoard::scrum("b", 1);
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("location").is_none());
    }

    #[test]
    fn test_paged_has_more_from_is_last() {
        let page: Paged<Board> = serde_json::from_str(
            r#"{"startAt": 0, "maxResults": 50, "isLast": false, "values": []}"#,
        )
        .unwrap();
        assert!(page.has_more());

        let page: Paged<Board> = serde_json::from_str(
            r#"{"startAt": 50, "maxResults": 50, "isLast": true, "values": []}"#,
        )
        .unwrap();
        assert!(!page.has_more());
    }

    #[test]
    fn test_paged_has_more_from_total() {
        let json = r#"{
            "startAt": 0,
            "maxResults": 1,
            "total": 2,
            "values": [{"id": 1, "name": "a"}]
        }"#;
        let page: Paged<Board> = serde_json::from_str(json).unwrap();
        assert!(page.has_more());

        let json = r#"{
            "startAt": 1,
            "maxResults": 1,
            "total": 2,
            "values": [{"id": 2, "name": "b"}]
        }"#;
        let page: Paged<Board> = serde_json::from_str(json).unwrap();
        assert!(!page.has_more());
    }
}
