//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::task;
use crate::domain::Tasks;
use crate::parser::is_no_tasks_title;
use crate::storage::{Config, Document};

#[derive(Parser)]
#[command(name = "mdtasks")]
#[command(author, version, about = "Inspect the tasks declared in a markdown document")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Markdown document to read (searched for in parent directories)
    #[arg(long, short = 'F', global = true, env = "MDTASKS_FILE")]
    pub file: Option<PathBuf>,

    /// Title of the section that holds the tasks
    #[arg(long, global = true, env = "MDTASKS_HEADING")]
    pub heading: Option<String>,

    /// Output format
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks
    List,

    /// Show the details of one task
    Show {
        /// Task name
        name: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let config = Config::load_from(&cwd)?;

    let format = cli
        .format
        .unwrap_or_else(|| config.global.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("mdtasks starting");
    if let Some(root) = &config.project_root {
        output.verbose_ctx("config", &format!("Project root: {}", root.display()));
    }

    let tasks = load(&cli, &config, &cwd, &output)?;

    match cli.command {
        Commands::List => task::list(&output, &tasks)?,
        Commands::Show { name } => task::show(&output, &tasks, &name)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Locates the document and parses its tasks
fn load(cli: &Cli, config: &Config, cwd: &Path, output: &Output) -> Result<Tasks> {
    let file = cli.file.clone().unwrap_or_else(|| config.file());
    let heading = cli.heading.clone().unwrap_or_else(|| config.heading());

    let document = Document::locate(&file, &config.search_root(cwd))?;
    output.verbose_ctx("load", &format!("Reading {}", document.path().display()));

    match document.load_tasks(&heading) {
        Ok(tasks) => {
            output.verbose_ctx("load", &format!("Parsed {} tasks", tasks.len()));
            Ok(tasks)
        }
        Err(e) if is_no_tasks_title(&e) => Err(e.context(format!(
            "Add a '## {}' heading to {} to declare tasks",
            heading,
            document.path().display()
        ))),
        Err(e) => Err(e),
    }
}
