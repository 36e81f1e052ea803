//! Plankit CLI - MVP plan builder tooling
//!
//! Usage:
//!   plankit serve [--port 5000]          Run the plan CRUD API
//!   plankit export <draft> [--format]    Render a saved draft
//!   plankit check <draft>                Validate a draft step by step
//!   plankit draft show|clear             Inspect the local draft slot
//!   plankit templates [id]               List or show built-in templates

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use plankit_core::{templates, FormSnapshot};
use plankit_export::{export_file_name, json_export, print_document, text_summary};
use plankit_server::MemStorage;
use plankit_wizard::{DraftStore, FileDraftStore, WizardController};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "plankit")]
#[command(author, version, about = "MVP plan builder tooling")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the plan CRUD API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,
    },

    /// Render a saved draft (a FormSnapshot JSON file) for sharing
    Export {
        /// Path to the draft JSON file
        draft: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,

        /// Directory to write the rendered file into (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Validate a draft against the wizard rules, step by step
    Check {
        /// Path to the draft JSON file
        draft: PathBuf,
    },

    /// Inspect or clear the locally saved draft slot
    Draft {
        #[command(subcommand)]
        action: DraftCommands,

        /// Directory holding the draft file
        #[arg(long, default_value = ".plankit")]
        dir: PathBuf,
    },

    /// List built-in plan templates, or show one as JSON
    Templates {
        /// Template id (e.g. "ecommerce")
        id: Option<String>,
    },
}

#[derive(Subcommand)]
enum DraftCommands {
    /// Print the saved draft as JSON
    Show,
    /// Delete the saved draft
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Html,
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to initialize logging")?;

    match cli.command {
        Commands::Serve { port } => {
            let storage = Arc::new(MemStorage::new());
            plankit_server::serve(&format!("0.0.0.0:{}", port), storage).await
        }
        Commands::Export { draft, format, out } => export(&draft, format, out.as_deref()),
        Commands::Check { draft } => check(&draft),
        Commands::Draft { action, dir } => draft_slot(action, &dir),
        Commands::Templates { id } => show_templates(id.as_deref()),
    }
}

fn check(draft: &std::path::Path) -> Result<()> {
    let content = std::fs::read_to_string(draft)
        .with_context(|| format!("Failed to read draft {}", draft.display()))?;
    let snapshot: FormSnapshot =
        serde_json::from_str(&content).context("Draft is not a valid plan snapshot")?;

    let mut wizard = WizardController::new();
    wizard.restore(snapshot);

    let mut all_valid = true;
    for (index, step) in plankit_core::steps().iter().enumerate() {
        let validation = wizard.step_validation(index)?;
        let mark = if validation.is_valid { "ok" } else { "incomplete" };
        println!("step {} ({}): {}", index + 1, step.title, mark);

        if !validation.is_valid {
            all_valid = false;
            for (field, message) in plankit_core::step_errors(wizard.snapshot(), index)? {
                println!("    {}: {}", field, message);
            }
        }
    }

    if !all_valid {
        anyhow::bail!("draft is not ready to submit");
    }
    println!("draft is complete");
    Ok(())
}

fn draft_slot(action: DraftCommands, dir: &std::path::Path) -> Result<()> {
    let store = FileDraftStore::new(dir);
    match action {
        DraftCommands::Show => match store.load() {
            Some(snapshot) => println!("{}", serde_json::to_string_pretty(&snapshot)?),
            None => println!("No draft found in {}", dir.display()),
        },
        DraftCommands::Clear => {
            store.clear()?;
            info!("draft cleared");
        }
    }
    Ok(())
}

fn export(
    draft: &std::path::Path,
    format: ExportFormat,
    out: Option<&std::path::Path>,
) -> Result<()> {
    let content = std::fs::read_to_string(draft)
        .with_context(|| format!("Failed to read draft {}", draft.display()))?;
    let snapshot: FormSnapshot =
        serde_json::from_str(&content).context("Draft is not a valid plan snapshot")?;

    let (rendered, file_name) = match format {
        ExportFormat::Html => (
            print_document(&snapshot, chrono::Utc::now()),
            export_file_name(&snapshot.title).replace(".json", ".html"),
        ),
        ExportFormat::Text => (
            text_summary(&snapshot),
            export_file_name(&snapshot.title).replace(".json", ".txt"),
        ),
        ExportFormat::Json => (json_export(&snapshot)?, export_file_name(&snapshot.title)),
    };

    match out {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let path = dir.join(file_name);
            std::fs::write(&path, rendered)?;
            info!("wrote {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn show_templates(id: Option<&str>) -> Result<()> {
    match id {
        Some(id) => {
            let template = plankit_core::template(id)
                .with_context(|| format!("No template named \"{}\"", id))?;
            println!("{}", serde_json::to_string_pretty(&template.snapshot)?);
        }
        None => {
            for template in templates() {
                println!("{:<14} {:<18} {}", template.id, template.name, template.description);
            }
        }
    }
    Ok(())
}
