pub mod node;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::ops::Index;
use std::sync::OnceLock;

use petgraph::Directed;
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableGraph};

use crate::address::TargetAddress;
use crate::error::ScopeError;
use crate::source_kind::SourceKind;
use node::TargetNode;

/// Depth assignment produced by the multi-source BFS over the root set.
///
/// Computed at most once per graph; covers every node (a node left without a
/// depth fails the computation instead, see [`ScopeError::OrphanedNode`]).
#[derive(Debug, Clone)]
pub struct DepthAssignment {
    by_address: HashMap<TargetAddress, usize>,
    max: usize,
}

impl DepthAssignment {
    /// BFS hop-count of `address` from the nearest root.
    #[allow(dead_code)]
    pub fn depth_of(&self, address: &TargetAddress) -> Option<usize> {
        self.by_address.get(address).copied()
    }

    /// Maximum assigned depth across the whole graph.
    pub fn max_depth(&self) -> usize {
        self.max
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TargetAddress, usize)> {
        self.by_address.iter().map(|(address, &depth)| (address, depth))
    }
}

impl Index<&TargetAddress> for DepthAssignment {
    type Output = usize;

    fn index(&self, address: &TargetAddress) -> &usize {
        &self.by_address[address]
    }
}

/// The target dependency graph: a directed petgraph StableGraph over
/// [`TargetNode`]s with an O(1) address lookup index.
///
/// Built once from a completed node map, queried read-only, then discarded.
/// An edge `A -> B` means "A declares B as a dependency".
#[derive(Debug)]
pub struct TargetGraph {
    graph: StableGraph<TargetNode, (), Directed>,
    /// Maps addresses to their node indices for O(1) lookup.
    address_index: HashMap<TargetAddress, NodeIndex>,
    /// Memoized depth assignment; `OnceLock` gives the single-flight
    /// guarantee, so concurrent first queries observe one computation.
    depths: OnceLock<Result<DepthAssignment, ScopeError>>,
}

impl TargetGraph {
    /// Build the graph from a completed address -> node map.
    ///
    /// The map must be closed over dependencies: every address referenced in
    /// any node's dependency set must itself be a key. A dangling reference
    /// fails here with [`ScopeError::MalformedGraph`] rather than at query
    /// time.
    pub fn build(nodes: BTreeMap<TargetAddress, TargetNode>) -> Result<TargetGraph, ScopeError> {
        for (address, target) in &nodes {
            for dep in &target.dependencies {
                if !nodes.contains_key(dep) {
                    return Err(ScopeError::MalformedGraph {
                        dependent: address.clone(),
                        missing: dep.clone(),
                    });
                }
            }
        }

        let mut graph = StableGraph::with_capacity(nodes.len(), 0);
        let mut address_index = HashMap::with_capacity(nodes.len());
        for (address, target) in nodes {
            let idx = graph.add_node(target);
            address_index.insert(address, idx);
        }

        let mut edges: Vec<(NodeIndex, NodeIndex)> = Vec::new();
        for idx in graph.node_indices() {
            for dep in &graph[idx].dependencies {
                edges.push((idx, address_index[dep]));
            }
        }
        for (from, to) in edges {
            graph.add_edge(from, to, ());
        }

        Ok(TargetGraph {
            graph,
            address_index,
            depths: OnceLock::new(),
        })
    }

    /// The depth assignment, computed lazily on first call and cached for the
    /// graph's lifetime. Fails with [`ScopeError::NoTargetRoot`] when no node
    /// is a root, or [`ScopeError::OrphanedNode`] when some node is
    /// unreachable from every root.
    pub fn depths(&self) -> Result<&DepthAssignment, ScopeError> {
        self.depths
            .get_or_init(|| self.compute_depths())
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Maximum depth over all nodes. Requires a successful depth assignment.
    pub fn max_depth(&self) -> Result<usize, ScopeError> {
        Ok(self.depths()?.max_depth())
    }

    /// Multi-source BFS layering from the root set.
    ///
    /// Every root is seeded at depth 0 before any expansion, so an incoming
    /// edge from another root can never push a root to a positive depth. A
    /// non-root node gets `1 + min(depth of predecessor)`, the standard
    /// unweighted shortest-path layering; the first assignment wins and the
    /// node is never revisited.
    fn compute_depths(&self) -> Result<DepthAssignment, ScopeError> {
        let mut depth_by_idx: HashMap<NodeIndex, usize> = HashMap::new();
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();

        for idx in self.graph.node_indices() {
            if self.graph[idx].is_root {
                depth_by_idx.insert(idx, 0);
                queue.push_back(idx);
            }
        }
        if queue.is_empty() {
            return Err(ScopeError::NoTargetRoot);
        }

        while let Some(current) = queue.pop_front() {
            let next_depth = depth_by_idx[&current] + 1;
            for dep in self.graph.neighbors_directed(current, Direction::Outgoing) {
                if !depth_by_idx.contains_key(&dep) {
                    depth_by_idx.insert(dep, next_depth);
                    queue.push_back(dep);
                }
            }
        }

        // Every target is expected to be reachable from some root; report the
        // first offender (in address order) as a structural-integrity error.
        let orphan = self
            .graph
            .node_indices()
            .filter(|idx| !depth_by_idx.contains_key(idx))
            .map(|idx| self.graph[idx].address.clone())
            .min();
        if let Some(address) = orphan {
            return Err(ScopeError::OrphanedNode(address));
        }

        let max = depth_by_idx.values().copied().max().unwrap_or(0);
        let by_address = depth_by_idx
            .into_iter()
            .map(|(idx, depth)| (self.graph[idx].address.clone(), depth))
            .collect();
        Ok(DepthAssignment { by_address, max })
    }

    /// All addresses visible at import depth `level`, after alias expansion.
    ///
    /// Base set = every node with `depth <= level`. Then, to a fixed point:
    /// every alias in the set contributes its direct dependencies regardless
    /// of their own depth (they may lie beyond `level`), and newly added
    /// aliases expand in turn. Each node expands at most once, so the closure
    /// terminates. An alias root therefore makes even the level-0 result
    /// larger than the literal root set.
    pub fn nodes_up_to_level(&self, level: usize) -> Result<HashSet<TargetAddress>, ScopeError> {
        let depths = self.depths()?;

        let mut included: HashSet<NodeIndex> = HashSet::new();
        let mut expand: VecDeque<NodeIndex> = VecDeque::new();
        for idx in self.graph.node_indices() {
            if depths[&self.graph[idx].address] <= level {
                included.insert(idx);
                expand.push_back(idx);
            }
        }

        let mut expanded: HashSet<NodeIndex> = HashSet::new();
        while let Some(idx) = expand.pop_front() {
            if !self.graph[idx].is_alias || !expanded.insert(idx) {
                continue;
            }
            for dep in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                if included.insert(dep) {
                    expand.push_back(dep);
                }
            }
        }

        Ok(included
            .into_iter()
            .map(|idx| self.graph[idx].address.clone())
            .collect())
    }

    /// Look up a node by address.
    pub fn node(&self, address: &TargetAddress) -> Option<&TargetNode> {
        self.address_index.get(address).map(|&idx| &self.graph[idx])
    }

    /// Per-address source-kind lookup for the model-construction consumer.
    #[allow(dead_code)]
    pub fn source_kind(&self, address: &TargetAddress) -> Option<SourceKind> {
        self.node(address).map(|target| target.source_kind)
    }

    /// Per-address dependency-set lookup for the model-construction consumer.
    #[allow(dead_code)]
    pub fn dependencies(&self, address: &TargetAddress) -> Option<&BTreeSet<TargetAddress>> {
        self.node(address).map(|target| &target.dependencies)
    }

    /// Iterate all target nodes.
    pub fn targets(&self) -> impl Iterator<Item = &TargetNode> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Number of targets in the graph.
    pub fn target_count(&self) -> usize {
        self.address_index.len()
    }

    /// Number of declared dependency edges.
    pub fn dependency_edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Index<&TargetAddress> for TargetGraph {
    type Output = TargetNode;

    fn index(&self, address: &TargetAddress) -> &TargetNode {
        &self.graph[self.address_index[address]]
    }
}
