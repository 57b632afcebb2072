use serde::Serialize;

use crate::cli::OutputFormat;
use crate::query::scope::{DepthRow, ScopeRow};
use crate::query::stats::TargetStats;

/// Print the import scope result.
///
/// Compact: one line per target, `<depth> <address> (<kind>[, markers])`.
/// JSON: an object with the depth bound and the row array, pretty-printed.
pub fn print_scope(rows: &[ScopeRow], depth: usize, format: &OutputFormat) {
    match format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ScopeDocument<'a> {
                depth: usize,
                target_count: usize,
                targets: &'a [ScopeRow],
            }
            print_json(&ScopeDocument {
                depth,
                target_count: rows.len(),
                targets: rows,
            });
        }
        OutputFormat::Compact => {
            for row in rows {
                let mut markers = vec![row.source_kind.display_name()];
                if row.is_root {
                    markers.push("root");
                }
                if row.is_alias {
                    markers.push("alias");
                }
                if row.via_alias {
                    markers.push("via-alias");
                }
                println!("{} {} ({})", row.depth, row.address, markers.join(", "));
            }
            println!("{} target(s) at depth <= {}", rows.len(), depth);
        }
    }
}

/// Print the full depth listing plus the max depth summary line.
pub fn print_depths(rows: &[DepthRow], max_depth: usize, format: &OutputFormat) {
    match format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct DepthDocument<'a> {
                max_depth: usize,
                targets: &'a [DepthRow],
            }
            print_json(&DepthDocument {
                max_depth,
                targets: rows,
            });
        }
        OutputFormat::Compact => {
            for row in rows {
                let root_marker = if row.is_root { " (root)" } else { "" };
                println!("{} {}{}", row.depth, row.address, root_marker);
            }
            println!("max depth: {max_depth}");
        }
    }
}

/// Print manifest/graph statistics.
pub fn print_stats(stats: &TargetStats, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(stats),
        OutputFormat::Compact => {
            println!(
                "{} targets ({} roots, {} aliases), {} dependency edges",
                stats.target_count, stats.root_count, stats.alias_count, stats.dependency_edges,
            );
            println!(
                "  {} source, {} test, {} resource, {} test-resource",
                stats.source_targets,
                stats.test_targets,
                stats.resource_targets,
                stats.test_resource_targets,
            );
            println!("  max depth: {}", stats.max_depth);
            if stats.skipped_targets > 0 || stats.skipped_dependencies > 0 {
                eprintln!(
                    "  {} target(s) and {} dependency reference(s) skipped (unparseable address)",
                    stats.skipped_targets, stats.skipped_dependencies,
                );
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("error serialising output: {e}"),
    }
}
