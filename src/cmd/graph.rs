//! Graph command implementation.

use crate::config::GraphConfig;
use crate::diagnostics::print_summary;
use crate::graph::{build_graph_json, to_dot, to_json, to_mermaid, Layout, OutputFormat, RenderMode};
use crate::pipeline::{generate, GenerateOptions, Generation};
use crate::relation::RelationStrategy;
use crate::schema::SchemaMetadata;
use anyhow::{bail, Context, Result};
use glob::Pattern;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Parsed arguments of the graph command
pub struct GraphArgs {
    pub file: PathBuf,
    pub output: Option<PathBuf>,
    pub format: Option<String>,
    pub strategy: String,
    pub mode: String,
    pub layout: Option<String>,
    pub tables: Option<String>,
    pub exclude: Option<String>,
    pub config: Option<PathBuf>,
    pub candidates: Option<String>,
    pub database: Option<String>,
    pub strict: bool,
    pub json: bool,
}

/// Run the graph command
pub fn run(args: GraphArgs) -> Result<()> {
    let format = resolve_format(args.json, args.format.as_deref(), args.output.as_deref())?;
    let should_render = check_render_target(format, args.output.as_deref())?;
    let human = !matches!(format, OutputFormat::Json);

    if !args.file.exists() {
        bail!("input file does not exist: {}", args.file.display());
    }

    let options = build_options(&args)?;
    let metadata = SchemaMetadata::load(&args.file)?;

    if human {
        eprintln!(
            "Generating graph: {} [strategy: {}, mode: {}]",
            args.file.display(),
            options.strategy,
            options.mode
        );
    }

    let generation = generate(&metadata, &options)?;

    let output_content = match format {
        OutputFormat::Dot => to_dot(&generation.description, &options.style),
        OutputFormat::Mermaid => to_mermaid(&generation.description, &options.style),
        OutputFormat::Json => to_json(&build_graph_json(
            &generation.description,
            &generation.strategy.to_string(),
            &generation.cycles,
            &generation.diagnostics,
        )),
    };

    match args.output {
        Some(ref out_path) if should_render => {
            render_with_graphviz(&output_content, out_path)?;
        }
        Some(ref out_path) => {
            let mut file = File::create(out_path)
                .with_context(|| format!("failed to create {}", out_path.display()))?;
            file.write_all(output_content.as_bytes())?;
            if human {
                eprintln!("Graph written to: {}", out_path.display());
            }
        }
        None => print!("{}", output_content),
    }

    if human {
        print_report(&generation);
    }

    Ok(())
}

/// Resolve the output format from flags and output extension
fn resolve_format(json: bool, format: Option<&str>, output: Option<&Path>) -> Result<OutputFormat> {
    if json {
        return Ok(OutputFormat::Json);
    }
    if let Some(f) = format {
        return f.parse().map_err(|e: String| anyhow::anyhow!(e));
    }
    Ok(output
        .and_then(|out| out.extension())
        .and_then(|e| e.to_str())
        .and_then(OutputFormat::from_extension)
        .unwrap_or(OutputFormat::Dot))
}

/// Whether the output path names an image that Graphviz must render
fn is_render_target(output: Option<&Path>) -> bool {
    output
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_lowercase().as_str(), "png" | "svg" | "pdf"))
        .unwrap_or(false)
}

/// Image outputs are rendered from DOT only; reject other formats up front
fn check_render_target(format: OutputFormat, output: Option<&Path>) -> Result<bool> {
    if !is_render_target(output) {
        return Ok(false);
    }
    if format != OutputFormat::Dot {
        let path = output.map(|p| p.display().to_string()).unwrap_or_default();
        bail!(
            "cannot write {} output to {}: png/svg/pdf files are rendered from DOT only",
            format,
            path
        );
    }
    Ok(true)
}

/// Merge config file and CLI flags into generation options
fn build_options(args: &GraphArgs) -> Result<GenerateOptions> {
    let config = match args.config {
        Some(ref path) => GraphConfig::load(path)?,
        None => GraphConfig::default(),
    };

    let mut naming = config.naming;
    if let Some(ref list) = args.candidates {
        naming = naming.with_candidate_list(list)?;
    }

    let mut style = config.style;
    if let Some(ref layout) = args.layout {
        style.layout = layout.parse::<Layout>().map_err(|e| anyhow::anyhow!(e))?;
    }

    let strategy: RelationStrategy = args.strategy.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let mode: RenderMode = args.mode.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    Ok(GenerateOptions {
        strategy,
        mode,
        naming,
        style,
        include: parse_patterns(args.tables.as_deref())?,
        exclude: parse_patterns(args.exclude.as_deref())?,
        database: args.database.clone(),
        strict: args.strict,
    })
}

/// Parse a comma-separated glob list
fn parse_patterns(list: Option<&str>) -> Result<Vec<Pattern>> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Pattern::new(s).with_context(|| format!("invalid table pattern: {}", s)))
        .collect()
}

fn print_report(generation: &Generation) {
    print_summary(&generation.diagnostics, generation.diagnostics_truncated);

    if !generation.cycles.is_empty() {
        eprintln!("\nCycles detected ({}):", generation.cycles.len());
        for (i, cycle) in generation.cycles.iter().enumerate() {
            eprintln!("  {}. {}", i + 1, cycle.display());
        }
    }

    let desc = &generation.description;
    eprintln!(
        "\nGraph: {} of {} tables, {} relationships ({})",
        desc.node_count(),
        generation.table_count,
        desc.edge_count(),
        generation.strategy
    );
}

/// Render DOT to PNG/SVG/PDF using Graphviz
fn render_with_graphviz(dot_source: &str, output_path: &Path) -> Result<()> {
    let ext = output_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png")
        .to_lowercase();

    let mut child = Command::new("dot")
        .arg(format!("-T{}", ext))
        .arg("-o")
        .arg(output_path)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!(
                    "Graphviz 'dot' command not found. Install Graphviz or use --format dot instead."
                )
            } else {
                anyhow::anyhow!("Failed to run dot: {}", e)
            }
        })?;

    feed_and_wait(&mut child, dot_source.as_bytes())?;

    eprintln!("Rendered to: {}", output_path.display());
    Ok(())
}

/// Write `input` to the child's stdin, then always reap the child before
/// reporting either a failed exit status or a failed write
fn feed_and_wait(child: &mut Child, input: &[u8]) -> Result<()> {
    let write_result = match child.stdin.take() {
        // Dropping stdin at the end of this arm closes the pipe
        Some(mut stdin) => stdin.write_all(input),
        None => Ok(()),
    };

    let status = child.wait()?;
    if !status.success() {
        bail!("Graphviz dot command failed with status: {}", status);
    }
    write_result.context("failed to write DOT source to Graphviz")?;
    Ok(())
}
