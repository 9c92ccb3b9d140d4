//! spacebio: NASA space biology research dashboard.
//! Entry point for the command-line front end.

mod commands;
mod config;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use spacebio_llm::SummaryKind;
use spacebio_search::library::LibraryCategory;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::graph::{FrameFormat, LayoutArgs};
use commands::FilterArgs;
use config::Config;
use session::Session;

#[derive(Parser)]
#[command(name = "spacebio", version, about = "NASA space biology research dashboard")]
struct Cli {
    /// Path to spacebio.toml
    #[arg(long, global = true, env = "SPACEBIO_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SummaryStyle {
    Plain,
    Technical,
}

impl From<SummaryStyle> for SummaryKind {
    fn from(style: SummaryStyle) -> Self {
        match style {
            SummaryStyle::Plain => SummaryKind::Plain,
            SummaryStyle::Technical => SummaryKind::Technical,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search the publication catalog
    Search {
        /// Free-text query; blank lists everything
        #[arg(default_value = "")]
        query: String,
        #[command(flatten)]
        filter: FilterArgs,
        /// Maximum results shown (default from config)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Lay out the knowledge graph and export a frame
    Graph {
        #[command(flatten)]
        layout: LayoutArgs,
        #[arg(long, value_enum, default_value = "svg")]
        format: FrameFormat,
        /// Write the frame to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Also run the animation loop for this many milliseconds
        #[arg(long)]
        animate_ms: Option<u64>,
    },
    /// Select the graph node under a point
    Select {
        x: f64,
        y: f64,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Show a publication summary
    Summary {
        id: u32,
        #[arg(long, value_enum, default_value = "plain")]
        style: SummaryStyle,
        /// Generate a fresh summary with the configured model
        #[arg(long)]
        generate: bool,
    },
    /// Publications grouped by year
    Timeline {
        #[arg(long)]
        year: Option<u16>,
    },
    /// Browse the PDF library
    Library {
        /// Substring matched against title, content and keywords
        #[arg(long, short)]
        query: Option<String>,
        #[arg(long, value_parser = commands::library::parse_category)]
        category: Option<LibraryCategory>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Papers sharing keywords with a library paper
    Related {
        id: String,
        #[arg(long, default_value_t = 5)]
        limit: usize,
        /// Also ask the model for further research directions
        #[arg(long)]
        suggest: bool,
    },
    /// Print the local path of a library paper's PDF
    Open { id: String },
    /// Analyse a library paper with the configured model
    Analyze { id: String },
    /// Ask the research assistant one question
    Ask { question: String },
    /// Interactive chat with the research assistant
    Chat,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("spacebio=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    info!("🚀 spacebio {} starting up", env!("CARGO_PKG_VERSION"));
    let config = Config::load(cli.config.as_deref())?;
    let session = Session::open(config)?;
    let json = cli.json;

    match cli.command {
        Commands::Search { query, filter, limit } => {
            commands::catalog::search(&session, &query, filter.into(), limit, json).await
        }
        Commands::Graph { layout, format, output, animate_ms } => {
            commands::graph::graph(&session, layout, format, output, animate_ms).await
        }
        Commands::Select { x, y, layout } => commands::graph::select(&session, layout, x, y, json).await,
        Commands::Summary { id, style, generate } => {
            commands::catalog::summary(&session, id, style.into(), generate, json).await
        }
        Commands::Timeline { year } => commands::catalog::timeline(&session, year, json).await,
        Commands::Library { query, category, page } => {
            commands::library::library(&session, query.as_deref(), category, page, json)
        }
        Commands::Related { id, limit, suggest } => {
            commands::library::related(&session, &id, limit, suggest, json).await
        }
        Commands::Open { id } => commands::library::open(&session, &id).await,
        Commands::Analyze { id } => commands::library::analyze(&session, &id).await,
        Commands::Ask { question } => commands::assistant::ask(&session, &question, json).await,
        Commands::Chat => commands::assistant::chat(&session).await,
    }
}
