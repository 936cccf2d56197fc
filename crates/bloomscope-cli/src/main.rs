//! bloomscope CLI: classify exam questions by Bloom's Taxonomy level.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "bloomscope",
    version,
    about = "Bloom's Taxonomy question classifier"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single question
    Classify {
        /// The question text
        question: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyse question papers
    Analyze {
        /// Document file, or a directory of documents
        #[arg(long)]
        input: PathBuf,

        /// Output formats: json, html, csv, all (comma-separated)
        #[arg(long)]
        format: Option<String>,

        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Max documents analysed concurrently
        #[arg(long)]
        parallelism: Option<usize>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the taxonomy levels and their keywords
    Levels {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a starter config and a sample question paper
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bloomscope=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify { question, json } => commands::classify::execute(&question, json),
        Commands::Analyze {
            input,
            format,
            output,
            parallelism,
            config,
        } => commands::analyze::execute(input, format, output, parallelism, config).await,
        Commands::Levels { json } => commands::levels::execute(json),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
