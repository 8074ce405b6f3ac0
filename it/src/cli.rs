//! CLI argument parsing for the issue tracker

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{BugStatus, DeveloperId, IssueId, Priority, StoryStatus};

#[derive(Parser, Debug)]
#[command(name = "it")]
#[command(
    author,
    version,
    about = "Issue tracker with capacity-bounded weekly planning",
    long_about = None,
    after_help = "Logs are written to: ~/.local/share/issuetracker/logs/issuetracker.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage developers
    Developer {
        #[command(subcommand)]
        command: DeveloperCommand,
    },

    /// Manage stories
    Story {
        #[command(subcommand)]
        command: StoryCommand,
    },

    /// Manage bugs
    Bug {
        #[command(subcommand)]
        command: BugCommand,
    },

    /// Show the weekly plan for outstanding stories
    Plan {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum DeveloperCommand {
    /// Register a developer
    Create {
        /// Developer name
        name: String,
    },

    /// Show a developer
    Get { id: DeveloperId },

    /// Rename a developer
    Update {
        id: DeveloperId,

        /// New name
        name: String,
    },

    /// Remove a developer; their issues become unassigned
    Delete { id: DeveloperId },

    /// List all developers
    List,
}

#[derive(Subcommand, Debug)]
pub enum StoryCommand {
    /// Create a story with status NEW
    Create {
        title: String,

        /// Story points (must be positive)
        #[arg(short, long)]
        points: u32,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Show a story
    Get { id: IssueId },

    /// Replace a story's fields
    Update {
        id: IssueId,

        title: String,

        #[arg(short, long)]
        points: u32,

        /// new, estimated or completed
        #[arg(short, long)]
        status: StoryStatus,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a story
    Delete { id: IssueId },

    /// List stories, optionally filtered by status
    List {
        /// Only stories with this status (repeatable)
        #[arg(short, long)]
        status: Vec<StoryStatus>,
    },

    /// Assign a developer to a story
    Assign { id: IssueId, developer_id: DeveloperId },
}

#[derive(Subcommand, Debug)]
pub enum BugCommand {
    /// Create a bug with status NEW
    Create {
        title: String,

        /// critical, major or minor
        #[arg(short, long)]
        priority: Priority,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Show a bug
    Get { id: IssueId },

    /// Replace a bug's fields
    Update {
        id: IssueId,

        title: String,

        #[arg(short, long)]
        priority: Priority,

        /// new, verified or resolved
        #[arg(short, long)]
        status: BugStatus,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a bug
    Delete { id: IssueId },

    /// Assign a developer to a bug
    Assign { id: IssueId, developer_id: DeveloperId },
}

/// Output format for the plan command
#[derive(Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_plan_defaults_to_text() {
        let cli = Cli::parse_from(["it", "plan"]);
        assert!(matches!(
            cli.command,
            Command::Plan {
                format: OutputFormat::Text
            }
        ));
    }

    #[test]
    fn test_cli_parse_plan_json() {
        let cli = Cli::parse_from(["it", "plan", "--format", "json"]);
        assert!(matches!(
            cli.command,
            Command::Plan {
                format: OutputFormat::Json
            }
        ));
    }

    #[test]
    fn test_cli_parse_global_options() {
        let cli = Cli::parse_from(["it", "developer", "list", "--config", "/tmp/it.yml", "--log-level", "debug"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/it.yml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_cli_parse_developer_create() {
        let cli = Cli::parse_from(["it", "developer", "create", "Ada"]);
        match cli.command {
            Command::Developer {
                command: DeveloperCommand::Create { name },
            } => assert_eq!(name, "Ada"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_story_update() {
        let cli = Cli::parse_from([
            "it", "story", "update", "3", "Checkout", "--points", "5", "--status", "ESTIMATED",
        ]);
        match cli.command {
            Command::Story {
                command:
                    StoryCommand::Update {
                        id,
                        title,
                        points,
                        status,
                        description,
                    },
            } => {
                assert_eq!(id, 3);
                assert_eq!(title, "Checkout");
                assert_eq!(points, 5);
                assert_eq!(status, StoryStatus::Estimated);
                assert!(description.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_story_list_statuses() {
        let cli = Cli::parse_from(["it", "story", "list", "-s", "new", "-s", "estimated"]);
        match cli.command {
            Command::Story {
                command: StoryCommand::List { status },
            } => assert_eq!(status, vec![StoryStatus::New, StoryStatus::Estimated]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_priority() {
        let result = Cli::try_parse_from(["it", "bug", "create", "Crash", "--priority", "urgent"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("table".parse::<OutputFormat>().is_err());
    }
}
