use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Incremental import-depth resolver for monorepo build targets.
///
/// import-scope ingests the target listing exported by the build tool, builds
/// the dependency graph over it, and answers depth-bounded scope queries so a
/// large-repository import can pull in only N hops of dependencies around the
/// targets the user actually selected.
#[derive(Parser, Debug)]
#[command(
    name = "import-scope",
    version,
    about,
    long_about = None,
    propagate_version = true,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for query results.
#[derive(Clone, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    /// Compact one-line-per-target format (default).
    #[default]
    Compact,
    /// Structured JSON suitable for programmatic consumption.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the targets visible at a given import depth, after alias expansion.
    ///
    /// The scope is every target within --depth hops of a root, closed over
    /// pass-through targets: an included alias always drags in its direct
    /// dependencies, even past the depth bound.
    Scope {
        /// Path to the target manifest exported by the build tool.
        manifest: PathBuf,

        /// Maximum dependency depth to include (0 = only the root targets).
        #[arg(short, long, default_value_t = 0)]
        depth: usize,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Compact)]
        format: OutputFormat,
    },

    /// Print every target with its BFS depth from the nearest root.
    Depths {
        /// Path to the target manifest exported by the build tool.
        manifest: PathBuf,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Compact)]
        format: OutputFormat,
    },

    /// Aggregate statistics: counts by source kind, roots, aliases, max depth.
    Stats {
        /// Path to the target manifest exported by the build tool.
        manifest: PathBuf,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Compact)]
        format: OutputFormat,
    },

    /// Validate a manifest: dependency closure, root set, root reachability.
    ///
    /// Exits non-zero when the graph is structurally unusable for an import
    /// (dangling dependency, no roots, or an unreachable target).
    Check {
        /// Path to the target manifest exported by the build tool.
        manifest: PathBuf,
    },
}
