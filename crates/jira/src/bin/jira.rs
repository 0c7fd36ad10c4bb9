//! Jira CLI - board, sprint and filter automation.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use jira::resources::board::CreateBoard;
use jira::resources::filter::CreateFilter;
use jira::resources::sprint::{CreateSprint, SprintState};
use jira::retry::{with_retry_async, RetryConfig};
use jira::scaffold::{ScaffoldSpec, ScrumScaffold};
use jira::{Credentials, JiraClient, JiraConfig};

/// Jira CLI - manage boards, sprints and filters.
#[derive(Parser)]
#[command(name = "jira")]
#[command(about = "Manage Jira boards, sprints and filters")]
struct Cli {
    /// Jira base URL (or set `JIRA_URL` env var).
    #[arg(long, env = "JIRA_URL")]
    url: String,

    /// Account email for basic auth (or set `JIRA_USER` env var).
    #[arg(long, env = "JIRA_USER")]
    user: Option<String>,

    /// API token for basic auth (or set `JIRA_API_TOKEN` env var).
    #[arg(long, env = "JIRA_API_TOKEN")]
    api_token: Option<String>,

    /// Personal access token for bearer auth (or set `JIRA_PAT` env var).
    #[arg(long, env = "JIRA_PAT")]
    pat: Option<String>,

    /// Enable verbose logging.
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all boards visible to the caller.
    Boards,

    /// Get details of a specific board.
    Board {
        /// Board ID.
        #[arg(long)]
        id: i64,
    },

    /// List sprints on a board.
    Sprints {
        /// Board ID.
        #[arg(long)]
        board: i64,
    },

    /// Create a filter.
    CreateFilter {
        /// Filter name.
        #[arg(long)]
        name: String,

        /// JQL query the filter saves.
        #[arg(long)]
        jql: String,

        /// Filter description.
        #[arg(long)]
        description: Option<String>,
    },

    /// Create a scrum board on an existing filter.
    CreateBoard {
        /// Board name.
        #[arg(long)]
        name: String,

        /// Filter ID the board is built on.
        #[arg(long)]
        filter_id: i64,

        /// Project key or ID to attach the board to.
        #[arg(long)]
        project: Option<String>,
    },

    /// Create a sprint on a board.
    CreateSprint {
        /// Sprint name.
        #[arg(long)]
        name: String,

        /// Board ID.
        #[arg(long)]
        board: i64,
    },

    /// Start a sprint (future -> active).
    StartSprint {
        /// Sprint ID.
        #[arg(long)]
        id: i64,
    },

    /// Close a sprint (active -> closed).
    CloseSprint {
        /// Sprint ID.
        #[arg(long)]
        id: i64,
    },

    /// Move issues into a sprint.
    AddIssues {
        /// Sprint ID.
        #[arg(long)]
        sprint: i64,

        /// Issue keys (comma-separated).
        #[arg(long, value_delimiter = ',')]
        issues: Vec<String>,
    },

    /// Move issues back to the backlog.
    Backlog {
        /// Issue keys (comma-separated).
        #[arg(long, value_delimiter = ',')]
        issues: Vec<String>,
    },

    /// Show an issue's sprint membership.
    Issue {
        /// Issue key (e.g. PB-1).
        #[arg(long)]
        key: String,
    },

    /// Delete a sprint.
    DeleteSprint {
        /// Sprint ID.
        #[arg(long)]
        id: i64,
    },

    /// Delete a board. Delete its sprints first.
    DeleteBoard {
        /// Board ID.
        #[arg(long)]
        id: i64,
    },

    /// Delete a filter. Delete boards referencing it first.
    DeleteFilter {
        /// Filter ID.
        #[arg(long)]
        id: i64,
    },

    /// Full scrum setup: create filter + board (+ optional sprint) in
    /// dependency order, rolling back on failure.
    Provision {
        /// Name prefix; the filter, board and sprint are named from it.
        #[arg(long)]
        name: String,

        /// JQL feeding the board (e.g. "project = PB").
        #[arg(long)]
        jql: String,

        /// Project key or ID to attach the board to.
        #[arg(long)]
        project: Option<String>,

        /// Also create an initial sprint.
        #[arg(long, default_value = "false")]
        with_sprint: bool,
    },

    /// Tear down a scrum setup in reverse order: sprint, board, filter.
    Teardown {
        /// Sprint ID, if one was created.
        #[arg(long)]
        sprint: Option<i64>,

        /// Board ID.
        #[arg(long)]
        board: i64,

        /// Filter ID.
        #[arg(long)]
        filter: i64,
    },
}

/// Pick credentials from the CLI arguments. Basic auth wins when both
/// forms are present.
fn credentials(cli: &Cli) -> Result<Credentials> {
    match (&cli.user, &cli.api_token, &cli.pat) {
        (Some(user), Some(token), _) => Ok(Credentials::Basic {
            username: user.clone(),
            api_token: token.clone(),
        }),
        (_, _, Some(pat)) => Ok(Credentials::Bearer { token: pat.clone() }),
        _ => anyhow::bail!("set --user and --api-token, or --pat"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Create client
    let credentials = credentials(&cli)?;
    let config =
        JiraConfig::new(&cli.url, credentials).context("Failed to build Jira config")?;
    let client = JiraClient::new(config).context("Failed to create Jira client")?;

    let retry = RetryConfig::default();

    match cli.command {
        Commands::Boards => {
            let boards =
                with_retry_async(&retry, "list boards", || client.list_boards()).await?;
            println!("\n{:<10} {:<30} {:<8} {:<12}", "ID", "NAME", "TYPE", "PROJECT");
            println!("{}", "-".repeat(64));
            for board in boards {
                println!(
                    "{:<10} {:<30} {:<8} {:<12}",
                    board.id,
                    board.name,
                    board.board_type.unwrap_or_default(),
                    board
                        .location
                        .and_then(|l| l.project_key)
                        .unwrap_or_default()
                );
            }
        }

        Commands::Board { id } => {
            let board =
                with_retry_async(&retry, "get board", || client.get_board(id)).await?;
            println!("ID:     {}", board.id);
            println!("Name:   {}", board.name);
            println!("Type:   {}", board.board_type.unwrap_or_default());
            if let Some(location) = board.location {
                println!(
                    "Project: {} ({})",
                    location.project_key.unwrap_or_default(),
                    location.project_id.unwrap_or_default()
                );
            }
        }

        Commands::Sprints { board } => {
            let sprints =
                with_retry_async(&retry, "list sprints", || client.list_sprints(board))
                    .await?;
            println!("\n{:<10} {:<30} {:<10}", "ID", "NAME", "STATE");
            println!("{}", "-".repeat(52));
            for sprint in sprints {
                println!("{:<10} {:<30} {:<10}", sprint.id, sprint.name, sprint.state);
            }
        }

        Commands::CreateFilter {
            name,
            jql,
            description,
        } => {
            let filter = client
                .create_filter(&CreateFilter {
                    name,
                    description,
                    jql,
                    favourite: true,
                })
                .await?;
            println!("Created filter {} ({})", filter.id, filter.name);
        }

        Commands::CreateBoard {
            name,
            filter_id,
            project,
        } => {
            let mut req = CreateBoard::scrum(name, filter_id);
            if let Some(project) = project {
                req = req.in_project(project);
            }
            let board = client.create_board(&req).await?;
            println!("Created board {} ({})", board.id, board.name);
        }

        Commands::CreateSprint { name, board } => {
            let sprint = client.create_sprint(&CreateSprint::new(name, board)).await?;
            println!(
                "Created sprint {} ({}) in state {}",
                sprint.id, sprint.name, sprint.state
            );
        }

        Commands::StartSprint { id } => {
            let sprint = client.update_sprint_state(id, SprintState::Active).await?;
            println!("Sprint {} is now {}", sprint.id, sprint.state);
        }

        Commands::CloseSprint { id } => {
            let sprint = client.update_sprint_state(id, SprintState::Closed).await?;
            println!("Sprint {} is now {}", sprint.id, sprint.state);
        }

        Commands::AddIssues { sprint, issues } => {
            client.add_issues_to_sprint(sprint, &issues).await?;
            println!("Added {} issue(s) to sprint {sprint}", issues.len());
        }

        Commands::Backlog { issues } => {
            client.move_issues_to_backlog(&issues).await?;
            println!("Moved {} issue(s) to the backlog", issues.len());
        }

        Commands::Issue { key } => {
            let sprint_field = client.sprint_field_key().await?;
            let issue =
                with_retry_async(&retry, "get issue", || client.get_issue(&key)).await?;
            println!("Key:     {}", issue.key);
            println!(
                "Summary: {}",
                issue.fields.summary.as_deref().unwrap_or_default()
            );
            let serials = issue.fields.sprint_serials(&sprint_field);
            if serials.is_empty() {
                println!("Sprints: (none)");
            } else {
                println!("Sprints ({sprint_field}):");
                for serial in serials {
                    println!("  {serial}");
                }
            }
        }

        Commands::DeleteSprint { id } => {
            client.delete_sprint(id).await?;
            println!("Deleted sprint {id}");
        }

        Commands::DeleteBoard { id } => {
            client.delete_board(id).await?;
            println!("Deleted board {id}");
        }

        Commands::DeleteFilter { id } => {
            client.delete_filter(id).await?;
            println!("Deleted filter {id}");
        }

        Commands::Provision {
            name,
            jql,
            project,
            with_sprint,
        } => {
            let spec = ScaffoldSpec {
                filter_name: format!("filter-{name}"),
                board_name: format!("board-{name}"),
                jql,
                description: Some(format!("Backing filter for board-{name}")),
                project,
            };

            let mut scaffold = ScrumScaffold::create(&client, &spec).await?;
            println!("Created filter {}", scaffold.filter.id);
            println!("Created board  {}", scaffold.board.id);

            if with_sprint {
                let sprint = scaffold
                    .add_sprint(&client, format!("sprint-{name}"))
                    .await?;
                println!("Created sprint {} in state {}", sprint.id, sprint.state);
            }

            info!("Provisioning complete");
        }

        Commands::Teardown {
            sprint,
            board,
            filter,
        } => {
            // Reverse acquisition order; the server rejects out-of-order
            // deletes while references still exist.
            if let Some(sprint) = sprint {
                client.delete_sprint(sprint).await?;
                println!("Deleted sprint {sprint}");
            }
            client.delete_board(board).await?;
            println!("Deleted board {board}");
            client.delete_filter(filter).await?;
            println!("Deleted filter {filter}");
        }
    }

    Ok(())
}
