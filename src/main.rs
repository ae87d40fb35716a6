use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kbase::{Config, Database, NewQuestion, QuestionId, QuestionService};
use tracing_subscriber::EnvFilter;

/// kbase - tagged question/answer knowledge base
#[derive(Parser)]
#[command(name = "kbase")]
#[command(about = "A question/answer knowledge base with multi-valued tags")]
#[command(version)]
struct Cli {
    /// Database file, overriding KBASE_DB_PATH
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Add a new question with optional tags
    Add(AddCommand),
    /// Show a question with its tags as JSON
    Show {
        #[arg(value_name = "ID")]
        id: i64,
    },
    /// List questions tagged with any of the given values
    Search(TagArgs),
    /// Attach tag values to an existing question
    Link {
        #[arg(value_name = "ID")]
        id: i64,
        #[command(flatten)]
        tag: TagArgs,
    },
    /// Detach tag values from a question
    Withdraw {
        #[arg(value_name = "ID")]
        id: i64,
        #[command(flatten)]
        tag: TagArgs,
    },
    /// Remove a question (not supported)
    Remove {
        #[arg(value_name = "ID")]
        id: i64,
    },
}

/// Add a new question
#[derive(Parser)]
struct AddCommand {
    /// The question title
    #[arg(long, value_name = "TITLE")]
    title: String,

    /// The answer text
    #[arg(long, value_name = "ANSWER")]
    answer: String,

    /// Tag in NAME=VALUE[,VALUE...] form, repeatable
    #[arg(short, long = "tag", value_name = "TAG", value_parser = parse_tag)]
    tags: Vec<(String, Vec<String>)>,
}

/// A tag name followed by its values
#[derive(Parser)]
struct TagArgs {
    /// The tag name
    #[arg(value_name = "NAME")]
    name: String,

    /// One or more tag values
    #[arg(value_name = "VALUE", required = true, num_args = 1..)]
    values: Vec<String>,
}

impl TagArgs {
    fn value_refs(&self) -> Vec<&str> {
        self.values.iter().map(String::as_str).collect()
    }
}

/// Errors the CLI reports to the user rather than treating as failures.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("question {0} not found")]
    NotFound(QuestionId),
}

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let result = Config::from_env().and_then(|config| run(cli, config));

    if let Err(e) = result {
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors are unknown questions and unsupported operations.
/// Internal errors include database failures and I/O errors.
fn is_user_error(error: &anyhow::Error) -> bool {
    if error.downcast_ref::<CliError>().is_some() {
        return true;
    }
    error
        .downcast_ref::<kbase::Error>()
        .is_some_and(kbase::Error::is_user_error)
}

fn init_logging(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli, mut config: Config) -> Result<()> {
    if let Some(path) = cli.db {
        config.db_path = path;
    }
    init_logging(&config.log_filter);

    config.ensure_database_directory()?;
    let db = Database::open(&config.db_path).context("Failed to open database")?;
    let service = QuestionService::new(db);

    let output = execute(&cli.command, &service)?;
    println!("{output}");
    Ok(())
}

/// Executes a command against a service and returns the text to print.
///
/// Separated from `run` to allow testing with in-memory databases.
fn execute(command: &Commands, service: &QuestionService) -> Result<String> {
    match command {
        Commands::Add(cmd) => {
            let question = cmd
                .tags
                .iter()
                .fold(NewQuestion::new(&cmd.title, &cmd.answer), |q, (name, values)| {
                    q.tag(name, values)
                });
            let id = service
                .create_question(&question)
                .context("Failed to create question")?;
            Ok(format!("Question created (id: {id})"))
        }
        Commands::Show { id } => {
            let id = QuestionId::new(*id);
            let question = service.get_question(id)?.ok_or(CliError::NotFound(id))?;
            Ok(serde_json::to_string_pretty(&question)?)
        }
        Commands::Search(tag) => {
            let questions = service.search_questions(&tag.name, &tag.value_refs())?;
            Ok(serde_json::to_string_pretty(&questions)?)
        }
        Commands::Link { id, tag } => {
            let outcome = service.link_tags(QuestionId::new(*id), &tag.name, &tag.value_refs())?;
            Ok(format!(
                "Linked {} value(s): {} created, {} existing",
                outcome.created + outcome.existed,
                outcome.created,
                outcome.existed
            ))
        }
        Commands::Withdraw { id, tag } => {
            let removed =
                service.withdraw_tags(QuestionId::new(*id), &tag.name, &tag.value_refs())?;
            Ok(format!("Removed {removed} link(s)"))
        }
        Commands::Remove { id } => {
            service.remove_question(QuestionId::new(*id))?;
            Ok(format!("Question {id} removed"))
        }
    }
}

/// Parses a `NAME=VALUE[,VALUE...]` tag argument.
///
/// Values are split on commas, trimmed, and empty entries dropped.
fn parse_tag(input: &str) -> std::result::Result<(String, Vec<String>), String> {
    let (name, values) = input
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE[,VALUE...], got '{input}'"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err("tag name cannot be empty".to_string());
    }

    let values: Vec<String> = values
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if values.is_empty() {
        return Err(format!("tag '{name}' needs at least one value"));
    }

    Ok((name.to_string(), values))
}
