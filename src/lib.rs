// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod selection;
pub mod types;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::{default_config_path, load_and_validate};
use crate::config::model::ConfigFile;
use crate::graph::AssetGraph;
use crate::selection::{
    AssetSelection, KeyPattern, SelectionClause, SelectionQuery, SelectionResolver, TraversalDepth,
};
use crate::types::OutputFormat;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - definitions loading and validation
/// - clause splitting and parsing
/// - graph construction and resolution
/// - output rendering
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let cfg = load_and_validate(&config_path)
        .with_context(|| format!("loading asset definitions from {:?}", config_path))?;

    let query = SelectionQuery::parse(
        args.selection
            .iter()
            .flat_map(|arg| selection::split_clauses(arg)),
    )?;
    debug!(clauses = query.clauses().len(), "parsed selection query");

    if args.dry_run {
        print_dry_run(&cfg, &query);
        return Ok(());
    }

    let graph = AssetGraph::from_config(&cfg);
    let policy = args.unresolved.unwrap_or_else(|| cfg.unresolved_keys());
    info!(assets = graph.len(), ?policy, "resolving selection");

    let selection = SelectionResolver::new(&graph, policy).resolve(&query)?;
    print!("{}", render_selection(&selection, args.format)?);

    Ok(())
}

/// Render a resolved selection for stdout.
pub fn render_selection(selection: &AssetSelection, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(selection
            .keys()
            .iter()
            .map(|k| format!("{k}\n"))
            .collect()),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(selection)?;
            out.push('\n');
            Ok(out)
        }
    }
}

fn describe_depth(depth: TraversalDepth) -> String {
    match depth {
        TraversalDepth::Layers(0) => "none".to_string(),
        TraversalDepth::Layers(n) => format!("{n} layer(s)"),
        TraversalDepth::Unbounded => "all".to_string(),
    }
}

fn describe_clause(clause: &SelectionClause) -> String {
    match clause.pattern() {
        KeyPattern::Literal(key) => format!(
            "key {key}, upstream: {}, downstream: {}",
            describe_depth(clause.upstream()),
            describe_depth(clause.downstream())
        ),
        KeyPattern::Wildcard(pattern) => format!("wildcard {}", pattern.as_str()),
    }
}

/// Simple dry-run output: print assets, deps and parsed clauses.
fn print_dry_run(cfg: &ConfigFile, query: &SelectionQuery) {
    println!("assetsel dry-run");
    println!("  config.unresolved_keys = {:?}", cfg.unresolved_keys());
    println!();

    println!("assets ({}):", cfg.assets().len());
    for (key, asset) in cfg.assets().iter() {
        println!("  - {key}");
        if !asset.deps.is_empty() {
            let deps: Vec<String> = asset.deps.iter().map(|d| d.to_string()).collect();
            println!("      deps: {:?}", deps);
        }
        if let Some(ref group) = asset.group {
            println!("      group: {group}");
        }
        if let Some(ref description) = asset.description {
            println!("      description: {description}");
        }
    }
    println!();

    println!("clauses ({}):", query.clauses().len());
    for clause in query.clauses() {
        println!("  - {clause}: {}", describe_clause(clause));
    }

    debug!("dry-run complete (nothing resolved)");
}
