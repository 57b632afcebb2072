use serde::Serialize;

use crate::error::ScopeError;
use crate::graph::TargetGraph;
use crate::manifest::LoadDiagnostics;
use crate::source_kind::SourceKind;

/// Aggregated statistics over a loaded target manifest and its graph.
#[derive(Debug, Serialize)]
pub struct TargetStats {
    pub target_count: usize,
    pub root_count: usize,
    pub alias_count: usize,
    pub dependency_edges: usize,
    pub source_targets: usize,
    pub test_targets: usize,
    pub resource_targets: usize,
    pub test_resource_targets: usize,
    /// Manifest entries dropped because their address failed to parse.
    pub skipped_targets: usize,
    /// Dependency strings dropped because they failed to parse.
    pub skipped_dependencies: usize,
    pub max_depth: usize,
}

/// Compute statistics from a built `TargetGraph` and its load diagnostics.
///
/// Runs the depth assignment, so it fails on the same structural errors as
/// any other depth query.
pub fn target_stats(
    graph: &TargetGraph,
    diagnostics: LoadDiagnostics,
) -> Result<TargetStats, ScopeError> {
    let max_depth = graph.max_depth()?;

    let mut root_count = 0usize;
    let mut alias_count = 0usize;
    let mut source_targets = 0usize;
    let mut test_targets = 0usize;
    let mut resource_targets = 0usize;
    let mut test_resource_targets = 0usize;

    for target in graph.targets() {
        if target.is_root {
            root_count += 1;
        }
        if target.is_alias {
            alias_count += 1;
        }
        match target.source_kind {
            SourceKind::Source => source_targets += 1,
            SourceKind::Test => test_targets += 1,
            SourceKind::Resource => resource_targets += 1,
            SourceKind::TestResource => test_resource_targets += 1,
        }
    }

    Ok(TargetStats {
        target_count: graph.target_count(),
        root_count,
        alias_count,
        dependency_edges: graph.dependency_edge_count(),
        source_targets,
        test_targets,
        resource_targets,
        test_resource_targets,
        skipped_targets: diagnostics.skipped_targets,
        skipped_dependencies: diagnostics.skipped_dependencies,
        max_depth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::address::TargetAddress;
    use crate::graph::node::TargetNode;

    fn addr(text: &str) -> TargetAddress {
        TargetAddress::parse(text).expect("test address should parse")
    }

    fn node(address: &str, deps: &[&str], is_root: bool, declared_type: &str) -> TargetNode {
        TargetNode {
            address: addr(address),
            dependencies: deps.iter().map(|d| addr(d)).collect(),
            is_root,
            is_alias: declared_type.eq_ignore_ascii_case("alias"),
            source_kind: SourceKind::classify(declared_type),
            declared_type: declared_type.to_owned(),
        }
    }

    #[test]
    fn test_stats_breakdown() {
        let nodes: BTreeMap<_, _> = [
            node("a", &["b", "t", "r"], true, "java_library"),
            node("b", &[], false, "alias"),
            node("t", &["tr"], false, "junit_tests"),
            node("r", &[], false, "resources"),
            node("tr", &[], false, "test_resources"),
        ]
        .into_iter()
        .map(|n| (n.address.clone(), n))
        .collect();
        let graph = TargetGraph::build(nodes).expect("graph should build");

        let stats = target_stats(
            &graph,
            LoadDiagnostics {
                skipped_targets: 2,
                skipped_dependencies: 1,
            },
        )
        .expect("stats should succeed");

        assert_eq!(stats.target_count, 5);
        assert_eq!(stats.root_count, 1);
        assert_eq!(stats.alias_count, 1);
        assert_eq!(stats.dependency_edges, 4);
        assert_eq!(stats.source_targets, 2);
        assert_eq!(stats.test_targets, 1);
        assert_eq!(stats.resource_targets, 1);
        assert_eq!(stats.test_resource_targets, 1);
        assert_eq!(stats.skipped_targets, 2);
        assert_eq!(stats.skipped_dependencies, 1);
        assert_eq!(stats.max_depth, 2);
    }
}
