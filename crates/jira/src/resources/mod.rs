//! Typed Jira resources and their client operations.
//!
//! One module per resource. Each holds the resource's serde models and
//! extends [`crate::client::JiraClient`] with the operations for that
//! resource.

pub mod board;
pub mod field;
pub mod filter;
pub mod issue;
pub mod sprint;

pub use board::{Board, CreateBoard, Paged};
pub use field::{Field, FieldSchema, SPRINT_FIELD_NAME};
pub use filter::{CreateFilter, Filter};
pub use issue::{mentions_sprint, Issue, IssueFields};
pub use sprint::{CreateSprint, Sprint, SprintState};
