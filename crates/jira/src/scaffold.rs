//! Ordered setup and teardown of a scrum environment.
//!
//! A working sprint needs three resources with a strict dependency order:
//! the filter feeds the board, the board hosts the sprint. Creation runs
//! filter → board → sprint; teardown must run sprint → board → filter or
//! the server rejects the deletes.

use tracing::{info, warn};

use crate::client::JiraClient;
use crate::error::Error;
use crate::resources::board::{Board, CreateBoard};
use crate::resources::filter::{CreateFilter, Filter};
use crate::resources::sprint::{CreateSprint, Sprint};

/// Names and scoping for a scrum environment.
#[derive(Debug, Clone)]
pub struct ScaffoldSpec {
    /// Name for the backing filter.
    pub filter_name: String,
    /// Name for the board.
    pub board_name: String,
    /// JQL the filter saves, e.g. `project = PB`.
    pub jql: String,
    /// Description for the backing filter.
    pub description: Option<String>,
    /// Project to attach the board to.
    pub project: Option<String>,
}

/// A filter/board pair created in dependency order, with an optional
/// sprint on top.
#[derive(Debug)]
pub struct ScrumScaffold {
    /// The backing filter. Deleted last.
    pub filter: Filter,
    /// The board built on the filter.
    pub board: Board,
    /// Sprint created on the board, if any. Deleted first.
    pub sprint: Option<Sprint>,
}

impl ScrumScaffold {
    /// Create the filter, then the board on top of it.
    ///
    /// If board creation fails the filter is rolled back so a failed setup
    /// leaves nothing behind on the server.
    ///
    /// # Errors
    /// Returns the first creation error.
    pub async fn create(client: &JiraClient, spec: &ScaffoldSpec) -> Result<Self, Error> {
        let filter = client
            .create_filter(&CreateFilter {
                name: spec.filter_name.clone(),
                description: spec.description.clone(),
                jql: spec.jql.clone(),
                favourite: true,
            })
            .await?;

        let mut board_req = CreateBoard::scrum(&spec.board_name, filter.id);
        if let Some(project) = &spec.project {
            board_req = board_req.in_project(project);
        }

        let board = match client.create_board(&board_req).await {
            Ok(board) => board,
            Err(e) => {
                if let Err(cleanup) = client.delete_filter(filter.id).await {
                    warn!(
                        filter_id = filter.id,
                        error = %cleanup,
                        "Failed to roll back filter after board creation failure"
                    );
                }
                return Err(e);
            }
        };

        info!(
            filter_id = filter.id,
            board_id = board.id,
            "Scrum scaffold created"
        );

        Ok(Self {
            filter,
            board,
            sprint: None,
        })
    }

    /// Create a sprint on the scaffold's board and track it for teardown.
    ///
    /// # Errors
    /// Returns error if sprint creation fails; the scaffold itself stays
    /// intact and can still be torn down.
    pub async fn add_sprint(
        &mut self,
        client: &JiraClient,
        name: impl Into<String>,
    ) -> Result<&Sprint, Error> {
        let sprint = client
            .create_sprint(&CreateSprint::new(name, self.board.id))
            .await?;
        Ok(self.sprint.insert(sprint))
    }

    /// Delete everything in reverse acquisition order: sprint, then board,
    /// then filter.
    ///
    /// A scaffold whose sprint was never created (or whose creation
    /// failed) skips the sprint delete.
    ///
    /// # Errors
    /// Returns the first deletion error; later resources are left on the
    /// server in that case.
    pub async fn teardown(self, client: &JiraClient) -> Result<(), Error> {
        if let Some(sprint) = &self.sprint {
            client.delete_sprint(sprint.id).await?;
        }

        client.delete_board(self.board.id).await?;
        // Only now is the filter unreferenced.
        client.delete_filter(self.filter.id).await?;

        info!("Scrum scaffold torn down");
        Ok(())
    }
}
