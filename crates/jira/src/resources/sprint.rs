//! Sprints (`/rest/agile/1.0/sprint`).
//!
//! Sprints belong to a board and are created in `future` state. Servers
//! are inconsistent about state casing (`future` vs `FUTURE`), so the
//! state enum deserializes case-insensitively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::JiraClient;
use crate::error::Error;
use crate::resources::board::Paged;

/// Sprint lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintState {
    /// Not yet started. The state of every freshly created sprint.
    #[serde(alias = "FUTURE", alias = "Future")]
    Future,
    /// Currently running.
    #[serde(alias = "ACTIVE", alias = "Active")]
    Active,
    /// Completed.
    #[serde(alias = "CLOSED", alias = "Closed")]
    Closed,
    /// Unrecognized state.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for SprintState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Future => write!(f, "future"),
            Self::Active => write!(f, "active"),
            Self::Closed => write!(f, "closed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A time-boxed iteration container on a board.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    /// Sprint id.
    pub id: i64,
    /// Sprint name.
    pub name: String,
    /// Current state.
    pub state: SprintState,
    /// Id of the board the sprint was created on.
    #[serde(default)]
    pub origin_board_id: Option<i64>,
    /// Planned start.
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Planned end.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// API URL of this sprint.
    #[serde(rename = "self", default)]
    pub self_url: Option<String>,
}

/// Request body for creating a sprint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSprint {
    /// Sprint name.
    pub name: String,
    /// Board to create the sprint on.
    pub origin_board_id: i64,
    /// Planned start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    /// Planned end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl CreateSprint {
    /// Request for an undated sprint on the given board.
    #[must_use]
    pub fn new(name: impl Into<String>, origin_board_id: i64) -> Self {
        Self {
            name: name.into(),
            origin_board_id,
            start_date: None,
            end_date: None,
        }
    }
}

/// Partial-update body for a sprint state transition.
#[derive(Debug, Serialize)]
struct UpdateSprintState {
    state: SprintState,
}

/// Body for associating issues with a sprint or the backlog.
#[derive(Debug, Serialize)]
struct IssueAssignment<'a> {
    issues: &'a [String],
}

impl JiraClient {
    /// Create a sprint on a board. The sprint starts in `future` state.
    ///
    /// # Errors
    /// Returns error if the request fails or the board id is invalid.
    pub async fn create_sprint(&self, req: &CreateSprint) -> Result<Sprint, Error> {
        info!(
            name = %req.name,
            board_id = req.origin_board_id,
            "Creating sprint"
        );

        let sprint: Sprint = self.post("/rest/agile/1.0/sprint", req).await?;

        info!(
            sprint_id = sprint.id,
            state = %sprint.state,
            "Sprint created"
        );
        Ok(sprint)
    }

    /// Get a sprint by id.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the sprint does not exist.
    pub async fn get_sprint(&self, id: i64) -> Result<Sprint, Error> {
        self.get(&format!("/rest/agile/1.0/sprint/{id}")).await
    }

    /// Transition a sprint to a new state.
    ///
    /// `future` → `active` starts the sprint, `active` → `closed` completes
    /// it. Sent as a partial update so dates are left untouched.
    ///
    /// # Errors
    /// Returns error if the request fails or the transition is rejected.
    pub async fn update_sprint_state(
        &self,
        id: i64,
        state: SprintState,
    ) -> Result<Sprint, Error> {
        info!(sprint_id = id, state = %state, "Updating sprint state");
        self.post(
            &format!("/rest/agile/1.0/sprint/{id}"),
            &UpdateSprintState { state },
        )
        .await
    }

    /// Delete a sprint. Issues in the sprint return to the backlog.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn delete_sprint(&self, id: i64) -> Result<(), Error> {
        info!(sprint_id = id, "Deleting sprint");
        self.delete(&format!("/rest/agile/1.0/sprint/{id}")).await
    }

    /// List every sprint on a board, walking every page.
    ///
    /// # Errors
    /// Returns error if any page request fails.
    pub async fn list_sprints(&self, board_id: i64) -> Result<Vec<Sprint>, Error> {
        let mut sprints = Vec::new();
        let mut start_at = 0;

        loop {
            let page: Paged<Sprint> = self
                .get(&format!(
                    "/rest/agile/1.0/board/{board_id}/sprint?startAt={start_at}&maxResults=50"
                ))
                .await?;

            let has_more = page.has_more();
            start_at += page.values.len() as u32;
            sprints.extend(page.values);

            if !has_more {
                return Ok(sprints);
            }
        }
    }

    /// Move issues into a sprint.
    ///
    /// The issues show up in the sprint membership custom field on each
    /// issue; see [`crate::resources::field`] for discovering that field.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn add_issues_to_sprint(
        &self,
        sprint_id: i64,
        issues: &[String],
    ) -> Result<(), Error> {
        info!(sprint_id, count = issues.len(), "Adding issues to sprint");
        self.post_no_content(
            &format!("/rest/agile/1.0/sprint/{sprint_id}/issue"),
            &IssueAssignment { issues },
        )
        .await
    }

    /// Move issues out of any sprint, back to the backlog.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn move_issues_to_backlog(&self, issues: &[String]) -> Result<(), Error> {
        info!(count = issues.len(), "Moving issues to backlog");
        self.post_no_content("/rest/agile/1.0/backlog/issue", &IssueAssignment { issues })
            .await
    }
}
