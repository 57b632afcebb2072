use serde::Serialize;

use crate::address::TargetAddress;
use crate::error::ScopeError;
use crate::graph::TargetGraph;
use crate::source_kind::SourceKind;

/// A single target admitted into the import scope at a given depth bound.
#[derive(Debug, Clone, Serialize)]
pub struct ScopeRow {
    pub address: TargetAddress,
    /// BFS depth from the nearest root.
    pub depth: usize,
    pub source_kind: SourceKind,
    pub is_root: bool,
    pub is_alias: bool,
    /// True when the target sits beyond the requested depth bound and entered
    /// the scope only through alias expansion.
    pub via_alias: bool,
}

/// Compute the import scope at `depth`: the depth-bounded node set plus alias
/// closure, as rows sorted by depth ascending then address.
pub fn import_scope(graph: &TargetGraph, depth: usize) -> Result<Vec<ScopeRow>, ScopeError> {
    let depths = graph.depths()?;
    let included = graph.nodes_up_to_level(depth)?;

    let mut rows: Vec<ScopeRow> = included
        .into_iter()
        .map(|address| {
            let target = &graph[&address];
            let row_depth = depths[&address];
            ScopeRow {
                depth: row_depth,
                source_kind: target.source_kind,
                is_root: target.is_root,
                is_alias: target.is_alias,
                via_alias: row_depth > depth,
                address,
            }
        })
        .collect();

    rows.sort_by(|a, b| a.depth.cmp(&b.depth).then_with(|| a.address.cmp(&b.address)));
    Ok(rows)
}

/// One target with its assigned depth, for the full depth listing.
#[derive(Debug, Clone, Serialize)]
pub struct DepthRow {
    pub address: TargetAddress,
    pub depth: usize,
    pub source_kind: SourceKind,
    pub is_root: bool,
}

/// Every target with its BFS depth, sorted by depth ascending then address.
pub fn depth_listing(graph: &TargetGraph) -> Result<Vec<DepthRow>, ScopeError> {
    let depths = graph.depths()?;

    let mut rows: Vec<DepthRow> = depths
        .iter()
        .map(|(address, depth)| {
            let target = &graph[address];
            DepthRow {
                address: address.clone(),
                depth,
                source_kind: target.source_kind,
                is_root: target.is_root,
            }
        })
        .collect();

    rows.sort_by(|a, b| a.depth.cmp(&b.depth).then_with(|| a.address.cmp(&b.address)));
    Ok(rows)
}
