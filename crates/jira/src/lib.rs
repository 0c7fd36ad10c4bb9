//! Jira REST API client for board, sprint and filter automation.
//!
//! Wraps the Jira core (`/rest/api/2`) and Agile (`/rest/agile/1.0`) REST
//! APIs with typed resources for the scrum lifecycle: saved filters, the
//! boards built on them, and the sprints run on those boards.
//!
//! # Example
//!
//! ```rust,ignore
//! use jira::{CreateSprint, JiraClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = JiraClient::from_env()?;
//!
//!     // Create a sprint on an existing board
//!     let sprint = client.create_sprint(&CreateSprint::new("sprint-1", 84)).await?;
//!     assert_eq!(sprint.state, jira::SprintState::Future);
//!
//!     // Put an issue in it and read the membership back
//!     client.add_issues_to_sprint(sprint.id, &["PB-1".into()]).await?;
//!     let field = client.sprint_field_key().await?;
//!     let issue = client.get_issue("PB-1").await?;
//!     assert!(issue.fields.sprint_serials(&field)
//!         .iter()
//!         .any(|s| jira::mentions_sprint(s, sprint.id)));
//!
//!     client.delete_sprint(sprint.id).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod retry;
pub mod scaffold;

pub use client::JiraClient;
pub use config::{Credentials, JiraConfig};
pub use error::Error;
pub use resources::{
    mentions_sprint, Board, CreateBoard, CreateFilter, CreateSprint, Field, Filter, Issue,
    Paged, Sprint, SprintState,
};
pub use retry::{with_retry_async, RetryConfig};
pub use scaffold::{ScaffoldSpec, ScrumScaffold};
