use std::collections::BTreeSet;

use crate::address::TargetAddress;
use crate::source_kind::SourceKind;

/// Per-target record built once from the build tool's export.
///
/// Immutable after manifest conversion; the graph takes the whole node map at
/// construction and exposes only read queries, so nothing here needs
/// defensive copying.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TargetNode {
    pub address: TargetAddress,
    /// Declared dependencies. Ordered so edge insertion (and with it every
    /// traversal) is deterministic.
    pub dependencies: BTreeSet<TargetAddress>,
    /// Explicitly selected for import; BFS depth-0 anchor.
    pub is_root: bool,
    /// Pass-through target: not independently buildable, so including it
    /// always pulls in its direct dependencies.
    pub is_alias: bool,
    pub source_kind: SourceKind,
    /// Raw declared type string as exported by the build tool.
    pub declared_type: String,
}
