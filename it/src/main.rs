//! it - issue tracker CLI
//!
//! CLI entry point for managing developers, stories and bugs and for
//! printing the weekly plan.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use issuetracker::cli::{BugCommand, Cli, Command, DeveloperCommand, OutputFormat, StoryCommand};
use issuetracker::config::Config;
use issuetracker::domain::{Bug, BugUpdate, Developer, NewBug, NewStory, Story, StoryUpdate};
use issuetracker::planning::PlanService;
use issuetracker::store::{StoreError, StoreManager};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("issuetracker")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("issuetracker.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log level comes from the config file before the full load
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(
        db_path = %config.storage.db_path.display(),
        average_story_points = config.planning.average_story_points,
        "issuetracker starting"
    );

    let manager = StoreManager::spawn(&config.storage.db_path).context("Failed to open issue database")?;

    debug!(command = ?cli.command, "main: dispatching command");
    let result = match cli.command {
        Command::Developer { command } => cmd_developer(&manager, command).await,
        Command::Story { command } => cmd_story(&manager, command, &config).await,
        Command::Bug { command } => cmd_bug(&manager, command, &config).await,
        Command::Plan { format } => cmd_plan(&manager, &config, format).await,
    };

    // Drain the actor before exit so pending writes are not lost
    if let Err(e) = manager.shutdown().await {
        debug!(error = %e, "main: store shutdown failed");
    }

    if let Err(e) = &result
        && let Some(store_error) = e.downcast_ref::<StoreError>()
        && store_error.is_client_error()
    {
        debug!(error = %store_error, "main: client error");
        eprintln!("{} {}", "✗".red(), store_error);
        std::process::exit(2);
    }
    result
}

async fn cmd_developer(manager: &StoreManager, command: DeveloperCommand) -> Result<()> {
    match command {
        DeveloperCommand::Create { name } => {
            let dev = manager.create_developer(name).await?;
            println!("{} Created developer {}", "✓".green(), format_developer(&dev));
        }
        DeveloperCommand::Get { id } => {
            let dev = manager.get_developer(id).await?;
            println!("{}", format_developer(&dev));
        }
        DeveloperCommand::Update { id, name } => {
            let dev = manager.update_developer(id, name).await?;
            println!("{} Updated developer {}", "✓".green(), format_developer(&dev));
        }
        DeveloperCommand::Delete { id } => {
            manager.delete_developer(id).await?;
            println!("{} Deleted developer #{}", "✓".green(), id);
        }
        DeveloperCommand::List => {
            let developers = manager.list_developers().await?;
            if developers.is_empty() {
                println!("No developers");
            }
            for dev in &developers {
                println!("{}", format_developer(dev));
            }
        }
    }
    Ok(())
}

async fn cmd_story(manager: &StoreManager, command: StoryCommand, config: &Config) -> Result<()> {
    let date_format = config.output.date_format.as_str();
    match command {
        StoryCommand::Create {
            title,
            points,
            description,
        } => {
            let story = manager
                .create_story(NewStory {
                    title,
                    description,
                    story_point: points,
                })
                .await?;
            println!("{} Created story {}", "✓".green(), format_story(&story, date_format));
        }
        StoryCommand::Get { id } => {
            let story = manager.get_story(id).await?;
            println!("{}", format_story(&story, date_format));
        }
        StoryCommand::Update {
            id,
            title,
            points,
            status,
            description,
        } => {
            let story = manager
                .update_story(
                    id,
                    StoryUpdate {
                        title,
                        description,
                        story_point: points,
                        status,
                    },
                )
                .await?;
            println!("{} Updated story {}", "✓".green(), format_story(&story, date_format));
        }
        StoryCommand::Delete { id } => {
            manager.delete_story(id).await?;
            println!("{} Deleted story #{}", "✓".green(), id);
        }
        StoryCommand::List { status } => {
            let stories = manager.list_stories(status).await?;
            if stories.is_empty() {
                println!("No stories");
            }
            for story in &stories {
                println!("{}", format_story(story, date_format));
            }
        }
        StoryCommand::Assign { id, developer_id } => {
            manager.assign_story(id, developer_id).await?;
            println!("{} Assigned story #{} to developer #{}", "✓".green(), id, developer_id);
        }
    }
    Ok(())
}

async fn cmd_bug(manager: &StoreManager, command: BugCommand, config: &Config) -> Result<()> {
    let date_format = config.output.date_format.as_str();
    match command {
        BugCommand::Create {
            title,
            priority,
            description,
        } => {
            let bug = manager
                .create_bug(NewBug {
                    title,
                    description,
                    priority,
                })
                .await?;
            println!("{} Created bug {}", "✓".green(), format_bug(&bug, date_format));
        }
        BugCommand::Get { id } => {
            let bug = manager.get_bug(id).await?;
            println!("{}", format_bug(&bug, date_format));
        }
        BugCommand::Update {
            id,
            title,
            priority,
            status,
            description,
        } => {
            let bug = manager
                .update_bug(
                    id,
                    BugUpdate {
                        title,
                        description,
                        priority,
                        status,
                    },
                )
                .await?;
            println!("{} Updated bug {}", "✓".green(), format_bug(&bug, date_format));
        }
        BugCommand::Delete { id } => {
            manager.delete_bug(id).await?;
            println!("{} Deleted bug #{}", "✓".green(), id);
        }
        BugCommand::Assign { id, developer_id } => {
            manager.assign_bug(id, developer_id).await?;
            println!("{} Assigned bug #{} to developer #{}", "✓".green(), id, developer_id);
        }
    }
    Ok(())
}

async fn cmd_plan(manager: &StoreManager, config: &Config, format: OutputFormat) -> Result<()> {
    let service = PlanService::new(
        manager.clone(),
        config.planning.average_story_points,
        config.output.date_format.clone(),
    );
    let plan = service.get_plan().await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?);
        }
        OutputFormat::Text => {
            print!("{}", plan.render_text());
            if plan.is_empty() {
                println!();
            }
        }
    }
    Ok(())
}

fn format_developer(dev: &Developer) -> String {
    format!("#{} {}", dev.id, dev.name.cyan())
}

fn format_assignee(developer: Option<&Developer>) -> String {
    developer
        .map(|d| d.name.clone())
        .unwrap_or_else(|| "unassigned".to_string())
}

fn format_story(story: &Story, date_format: &str) -> String {
    format!(
        "#{} {} [{}] {}pt {} {}",
        story.id,
        story.title.cyan(),
        story.status,
        story.story_point,
        format_assignee(story.developer.as_ref()).dimmed(),
        story.creation_date.format(date_format).to_string().dimmed()
    )
}

fn format_bug(bug: &Bug, date_format: &str) -> String {
    format!(
        "#{} {} [{}] {} {} {}",
        bug.id,
        bug.title.cyan(),
        bug.status,
        bug.priority.to_string().yellow(),
        format_assignee(bug.developer.as_ref()).dimmed(),
        bug.creation_date.format(date_format).to_string().dimmed()
    )
}
