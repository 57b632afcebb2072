use thiserror::Error;

use crate::address::TargetAddress;

/// Structural errors raised while building or querying the target graph.
///
/// All three are terminal for the resolution session: they propagate to the
/// caller unchanged and are never downgraded to warnings. `Clone` because the
/// depth computation is memoized and a cached failure is handed to every
/// subsequent caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// A node's dependency set references an address that is not a key in the
    /// supplied node map. Raised at construction, before any query runs.
    #[error("target {dependent} depends on {missing}, which is not in the target set")]
    MalformedGraph {
        dependent: TargetAddress,
        missing: TargetAddress,
    },

    /// The root set is empty; there is no valid depth assignment. The user
    /// must select at least one target for import.
    #[error("no root targets selected; depth assignment requires at least one root")]
    NoTargetRoot,

    /// A node was never reached by the multi-source BFS. The upstream export
    /// is expected to be closed over root reachability, so this signals
    /// inconsistent input data.
    #[error("target {0} is not reachable from any root target")]
    OrphanedNode(TargetAddress),
}
