//! Command-line driver for the QuickNote operation surface.
//!
//! # Responsibility
//! - Resolve configuration, start logging and initialize the schema.
//! - Dispatch exactly one registry operation and print its JSON result.
//!
//! Failures from the operation itself are printed to stderr as
//! `{"kind": ..., "message": ...}` with exit status 1.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use quicknote_core::{
    flush_logging, init_logging, logging_status, Arguments, Config, NotesServer,
    OperationRegistry,
};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "quicknote", version, about = "Persistent notes with a tool/resource/prompt surface")]
struct Cli {
    /// Notes database path (overrides QUICKNOTE_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute log directory (overrides QUICKNOTE_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (overrides QUICKNOTE_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the notes table if it does not exist.
    Init,
    /// List registered operations of one kind.
    List {
        #[arg(value_enum)]
        kind: OperationKind,
    },
    /// Call a tool, e.g. `call add_note --args '{"title":"a","content":"b"}'`.
    Call {
        name: String,
        /// JSON object with the tool arguments.
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Read a resource, e.g. `read note://all`.
    Read { uri: String },
    /// Render a prompt, e.g. `prompt summarize_notes --args '{"style":"detailed"}'`.
    Prompt {
        name: String,
        /// JSON object with the prompt arguments.
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OperationKind {
    Tools,
    Resources,
    Prompts,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let result = run(cli);
    flush_logging();
    result
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = resolve_config(&cli);

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).map_err(|err| anyhow!(err))?;
    }

    let server = NotesServer::start(&config)
        .with_context(|| format!("failed to initialize `{}`", config.db_path.display()))?;
    if let Some((level, log_dir)) = logging_status() {
        info!(
            "event=cli_start module=cli status=ok db_path={} log_level={} log_dir={}",
            server.db_path().display(),
            level,
            log_dir.display()
        );
    }

    let registry = OperationRegistry::new();
    let outcome = match cli.command {
        Command::Init => Ok(Value::String(format!(
            "Initialized '{}'.",
            server.db_path().display()
        ))),
        Command::List { kind } => Ok(list_operations(&registry, kind)?),
        Command::Call { name, args } => {
            let arguments = parse_arguments(&args)?;
            registry.call_tool(&server, &name, &arguments)
        }
        Command::Read { uri } => registry.read_resource(&server, &uri),
        Command::Prompt { name, args } => {
            let arguments = parse_arguments(&args)?;
            registry
                .get_prompt(&server, &name, &arguments)
                .map(Value::String)
        }
    };

    match outcome {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", serde_json::to_string(&err)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn resolve_config(cli: &Cli) -> Config {
    let mut config = Config::from_env();
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config
}

fn list_operations(registry: &OperationRegistry, kind: OperationKind) -> Result<Value> {
    let value = match kind {
        OperationKind::Tools => serde_json::to_value(registry.list_tools())?,
        OperationKind::Resources => serde_json::to_value(registry.list_resources())?,
        OperationKind::Prompts => serde_json::to_value(registry.list_prompts())?,
    };
    Ok(value)
}

fn parse_arguments(raw: &str) -> Result<Arguments> {
    match serde_json::from_str::<Value>(raw).context("--args must be valid JSON")? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("--args must be a JSON object, got `{other}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_arguments, Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_call_with_arguments() {
        let cli = Cli::parse_from([
            "quicknote",
            "--db",
            "/tmp/notes.db",
            "call",
            "add_note",
            "--args",
            r#"{"title":"a","content":"b"}"#,
        ]);
        match cli.command {
            Command::Call { name, args } => {
                assert_eq!(name, "add_note");
                let arguments = parse_arguments(&args).unwrap();
                assert_eq!(arguments["title"], "a");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_object_arguments() {
        assert!(parse_arguments("[1, 2]").is_err());
        assert!(parse_arguments("not json").is_err());
    }
}
