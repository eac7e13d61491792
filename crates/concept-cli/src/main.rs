//! # concepts
//!
//! Terminal host for the concept loader: list, resolve, and inject from the
//! command line, or drive a line-oriented chat session that runs the
//! session-start, turn-start, and toggle hooks the way an agent host would.

#![deny(unsafe_code)]

mod terminal;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use concept_core::logging::init_subscriber;
use concept_engine::{ConceptExtension, TurnStartEvent};
use concept_settings::{ConceptSettings, load_settings};

use crate::terminal::TerminalUi;

/// Concept reference loader.
#[derive(Parser, Debug)]
#[command(name = "concepts", about = "Resolve and inject concept documents")]
struct Cli {
    /// Concepts directory (overrides settings).
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Marker prefix (overrides settings).
    #[arg(long, global = true)]
    prefix: Option<String>,

    /// Log filter (overrides settings, e.g. `debug` or `concept_engine=trace`).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List resolvable concept names.
    List,
    /// Resolve the references in TEXT and print what loads and what is missing.
    Resolve {
        /// Text to scan for markers.
        text: String,
    },
    /// Print the instructions a single turn would produce.
    Inject {
        /// Base instructions.
        #[arg(long, default_value = "")]
        instructions: String,
        /// The user's prompt.
        prompt: String,
    },
    /// Interactive session: `/concept` toggles, `/new` restarts, `/quit` exits.
    Chat {
        /// Base instructions.
        #[arg(long, default_value = "")]
        instructions: String,
    },
}

impl Cli {
    fn apply_overrides(&self, settings: &mut ConceptSettings) {
        if let Some(dir) = &self.dir {
            settings.store.dir = dir.display().to_string();
        }
        if let Some(prefix) = &self.prefix {
            settings.markers.prefix.clone_from(prefix);
        }
        if let Some(level) = &self.log_level {
            settings.logging.level.clone_from(level);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings().context("Failed to load settings")?;
    cli.apply_overrides(&mut settings);
    init_subscriber(&settings.logging.level);

    let ext = ConceptExtension::from_settings(&settings)
        .context("Failed to configure concept loader")?;
    tracing::debug!(store = %ext.store().describe(), "concept loader ready");

    match cli.command {
        Command::List => {
            for name in ext.list_available() {
                println!("{name}");
            }
        }
        Command::Resolve { text } => {
            let resolution = ext.resolve(&text);
            for name in resolution.loaded_names() {
                println!("{name}");
            }
            for name in resolution.missing() {
                eprintln!("missing: {}", ext.store().document_label(name));
            }
        }
        Command::Inject {
            instructions,
            prompt,
        } => {
            let ui = TerminalUi::stdin();
            ext.on_session_start(&ui);
            let result = ext.on_turn_start(&TurnStartEvent { instructions, prompt }, &ui);
            println!("{}", result.instructions);
        }
        Command::Chat { instructions } => chat(&ext, &instructions).await?,
    }
    Ok(())
}

async fn chat(ext: &ConceptExtension, instructions: &str) -> Result<()> {
    let ui = TerminalUi::stdin();
    ext.on_session_start(&ui);

    while let Some(line) = ui.read_line().await.context("Failed to read input")? {
        match line.trim() {
            "" => {}
            "/quit" => break,
            "/new" => ext.on_session_start(&ui),
            "/concept" => {
                let _ = ext.toggle_concept(&ui).await;
            }
            prompt => {
                let event = TurnStartEvent {
                    instructions: instructions.to_string(),
                    prompt: prompt.to_string(),
                };
                let result = ext.on_turn_start(&event, &ui);
                println!("{}\n", result.instructions);
            }
        }
    }
    Ok(())
}
