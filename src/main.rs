//! semviz CLI: ontology graphs for visualization.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use semviz::config::EngineConfig;
use semviz::engine::Engine;
use semviz::source::OntologyFormat;

#[derive(Parser)]
#[command(name = "semviz", version, about = "RDF ontology → bounded visualization graph")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit compact instead of pretty-printed JSON.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the (capped) node/edge graph of an ontology file.
    Graph {
        /// Path to the ontology document.
        file: PathBuf,

        /// Serialization of the document (see `semviz formats`).
        #[arg(long, short, default_value = "turtle")]
        format: OntologyFormat,

        /// Keep at most this many nodes, ranked by degree.
        #[arg(long, allow_negative_numbers = true)]
        max_nodes: Option<i64>,
    },

    /// Show incoming and outgoing connections of one node.
    Details {
        /// Path to the ontology document.
        file: PathBuf,

        /// Full identifier of the node.
        node_id: String,

        #[arg(long, short, default_value = "turtle")]
        format: OntologyFormat,
    },

    /// Count nodes, edges and distinct relationship labels.
    Stats {
        /// Path to the ontology document.
        file: PathBuf,

        #[arg(long, short, default_value = "turtle")]
        format: OntologyFormat,
    },

    /// List supported serialization formats and their aliases.
    Formats,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path).into_diagnostic()?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Graph {
            file,
            format,
            max_nodes,
        } => {
            let engine = Engine::new(config).into_diagnostic()?;
            let content = read_document(&file)?;
            let graph = engine
                .parse_graph(&content, format, max_nodes)
                .into_diagnostic()?;
            print_json(&graph, cli.compact)?;
        }

        Commands::Details {
            file,
            node_id,
            format,
        } => {
            let engine = Engine::new(config).into_diagnostic()?;
            let content = read_document(&file)?;
            let details = engine
                .node_details(&content, format, &node_id)
                .into_diagnostic()?;
            print_json(&details, cli.compact)?;
        }

        Commands::Stats { file, format } => {
            let engine = Engine::new(config).into_diagnostic()?;
            let content = read_document(&file)?;
            let stats = engine.statistics(&content, format).into_diagnostic()?;
            print_json(&stats, cli.compact)?;
        }

        Commands::Formats => {
            println!("Supported formats:");
            for format in OntologyFormat::ALL {
                println!("  {:<10} {}", format.as_str(), format.aliases().join(", "));
            }
        }
    }

    Ok(())
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .into_diagnostic()
        .map_err(|e| e.wrap_err(format!("failed to read {}", path.display())))
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .into_diagnostic()?;
    println!("{json}");
    Ok(())
}
