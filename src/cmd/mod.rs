mod graph;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "schema-graph")]
#[command(version)]
#[command(
    about = "Derive table relationship graphs from database schema metadata",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a relationship graph from a metadata document
    Graph {
        /// Metadata document (JSON, or YAML by .yaml/.yml extension)
        file: PathBuf,

        /// Output file (default: stdout). png/svg/pdf extensions render via Graphviz
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: dot, mermaid, json (detected from output extension if omitted)
        #[arg(short, long)]
        format: Option<String>,

        /// Relation strategy: fk, infer, auto
        #[arg(short, long, default_value = "auto")]
        strategy: String,

        /// Edge identity: columns (labeled edge per column pair) or tables (one edge per table pair)
        #[arg(short, long, default_value = "columns")]
        mode: String,

        /// Layout direction: tb, lr (overrides config)
        #[arg(short, long)]
        layout: Option<String>,

        /// Only include these tables (comma-separated, glob patterns)
        #[arg(short, long)]
        tables: Option<String>,

        /// Exclude these tables (comma-separated, glob patterns)
        #[arg(short, long)]
        exclude: Option<String>,

        /// YAML config file for naming convention and style
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Candidate table patterns for inference, e.g. "{prefix},{prefix}s" (overrides config)
        #[arg(long)]
        candidates: Option<String>,

        /// Database name for the graph title (overrides the metadata document)
        #[arg(long)]
        database: Option<String>,

        /// Treat diagnostics as errors
        #[arg(long)]
        strict: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,

        /// Verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the JSON Schema of `graph --json` output
    Schema {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Whether verbose logging was requested
    pub fn verbose(&self) -> bool {
        matches!(self, Commands::Graph { verbose: true, .. })
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Graph {
            file,
            output,
            format,
            strategy,
            mode,
            layout,
            tables,
            exclude,
            config,
            candidates,
            database,
            strict,
            json,
            verbose: _,
        } => graph::run(graph::GraphArgs {
            file,
            output,
            format,
            strategy,
            mode,
            layout,
            tables,
            exclude,
            config,
            candidates,
            database,
            strict,
            json,
        }),
        Commands::Schema { output } => {
            let text = crate::json_schema::graph_schema_json();
            match output {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    eprintln!("Schema written to: {}", path.display());
                }
                None => println!("{}", text),
            }
            Ok(())
        }
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "schema-graph",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
