mod address;
mod cli;
mod config;
mod error;
mod graph;
mod manifest;
mod output;
mod query;
mod source_kind;

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use config::ImportScopeConfig;
use graph::TargetGraph;
use manifest::{LoadDiagnostics, TargetManifest};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scope {
            manifest,
            depth,
            format,
        } => {
            let (graph, _) = load_graph(&manifest)?;
            let rows = query::scope::import_scope(&graph, depth)?;
            output::print_scope(&rows, depth, &format);
        }
        Commands::Depths { manifest, format } => {
            let (graph, _) = load_graph(&manifest)?;
            let rows = query::scope::depth_listing(&graph)?;
            let max_depth = graph.max_depth()?;
            output::print_depths(&rows, max_depth, &format);
        }
        Commands::Stats { manifest, format } => {
            let (graph, diagnostics) = load_graph(&manifest)?;
            let stats = query::stats::target_stats(&graph, diagnostics)?;
            output::print_stats(&stats, &format);
        }
        Commands::Check { manifest } => {
            let (graph, _) = load_graph(&manifest)?;
            let max_depth = graph.max_depth()?;
            println!(
                "ok: {} target(s), max depth {}",
                graph.target_count(),
                max_depth
            );
        }
    }

    Ok(())
}

/// Load the manifest, apply the configured alias-type set, and build the
/// graph. Configuration is looked up next to the manifest file.
fn load_graph(manifest_path: &Path) -> Result<(TargetGraph, LoadDiagnostics)> {
    let config_dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    let config = ImportScopeConfig::load(config_dir);

    let manifest = TargetManifest::from_path(manifest_path)?;
    let loaded = manifest.into_nodes(&config.alias_set());
    let diagnostics = loaded.diagnostics;
    let graph = TargetGraph::build(loaded.nodes)?;
    Ok((graph, diagnostics))
}
