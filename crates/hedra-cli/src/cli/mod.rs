//! CLI for the Hedra study-artifact generator.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use hedra_core::artifact::ArtifactKind;
use hedra_core::config;
use hedra_core::history_db::HistoryDb;
use std::path::PathBuf;

use commands::{
    run_completions, run_history, run_note, run_process, run_remove, run_usage, NoteAction,
};

/// Top-level CLI for Hedra.
#[derive(Debug, Parser)]
#[command(name = "hedra")]
#[command(about = "Hedra: turn lecture files into study artifacts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Process a lecture file into a study artifact.
    Process {
        /// Path to the lecture file (audio/pdf/docx/image/txt).
        file: PathBuf,
        /// Artifact to generate: transcript, summary, quiz, flashcards, study-plan.
        #[arg(long, default_value = "summary")]
        artifact: ArtifactKind,
    },

    /// Show the processing history.
    History,

    /// Show usage counters (successful generations per artifact kind).
    Usage,

    /// Manage notes attached to a processed lecture.
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },

    /// Remove a lecture (and its notes) from the history by ID.
    Remove {
        /// Lecture identifier.
        id: i64,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Completions need neither config nor database.
        if let CliCommand::Completions { shell } = &cli.command {
            run_completions(*shell);
            return Ok(());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let db = HistoryDb::open_default().await?;

        match cli.command {
            CliCommand::Process { file, artifact } => run_process(&db, &cfg, &file, artifact).await?,
            CliCommand::History => run_history(&db).await?,
            CliCommand::Usage => run_usage(&db).await?,
            CliCommand::Note { action } => run_note(&db, action).await?,
            CliCommand::Remove { id } => run_remove(&db, id).await?,
            CliCommand::Completions { .. } => unreachable!("handled above"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
