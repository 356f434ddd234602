mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "proctor-cli")]
#[command(about = "Proctor CLI - Judge submissions and inspect language profiles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Judge a source file against stored test cases or custom input
    Run {
        /// Language of the submission (python, javascript, java, cpp)
        #[arg(short, long)]
        language: String,

        /// Path to the source file
        #[arg(short, long)]
        source: PathBuf,

        /// Problem title, used for reference lookup
        #[arg(short, long)]
        title: String,

        /// Entry-point method on the Solution class
        #[arg(short, long, required_unless_present = "conceptual")]
        entry: Option<String>,

        /// Path to a JSON file holding the test cases
        #[arg(long)]
        tests: Option<PathBuf>,

        /// Custom input as a JSON array of arguments
        #[arg(long)]
        custom: Option<String>,

        /// Treat the submission as conceptual (accepted without execution)
        #[arg(long)]
        conceptual: bool,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List configured language profiles
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            language,
            source,
            title,
            entry,
            tests,
            custom,
            conceptual,
            json,
        } => {
            commands::run(
                &language,
                &source,
                &title,
                entry.as_deref().unwrap_or(""),
                tests.as_deref(),
                custom.as_deref(),
                conceptual,
                json,
            )
            .await?;
        }
        Commands::Languages => {
            commands::languages()?;
        }
    }

    Ok(())
}
