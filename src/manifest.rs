use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::address::TargetAddress;
use crate::config::AliasTypes;
use crate::graph::node::TargetNode;
use crate::source_kind::SourceKind;

/// The target listing exported by the build tool, as raw JSON.
///
/// Keys are target address strings; the map type keeps them in address-string
/// order and collapses duplicate keys (last entry wins).
#[derive(Debug, Deserialize)]
pub struct TargetManifest {
    targets: BTreeMap<String, TargetEntry>,
}

/// One exported target record.
#[derive(Debug, Deserialize)]
pub struct TargetEntry {
    /// Declared type string; drives source-kind classification and, via the
    /// injected pass-through set, alias detection.
    #[serde(default, rename = "type")]
    declared_type: String,
    /// Explicitly selected for import.
    #[serde(default)]
    root: bool,
    /// Declared dependency address strings.
    #[serde(default)]
    dependencies: Vec<String>,
}

/// Per-load diagnostics: how many entries the loader had to skip.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadDiagnostics {
    /// Target keys that failed address parsing (entry dropped).
    pub skipped_targets: usize,
    /// Dependency strings that failed address parsing (declaring target kept).
    pub skipped_dependencies: usize,
}

/// Node map ready for `TargetGraph::build`, plus load diagnostics.
#[derive(Debug)]
pub struct LoadedTargets {
    pub nodes: BTreeMap<TargetAddress, TargetNode>,
    pub diagnostics: LoadDiagnostics,
}

impl TargetManifest {
    /// Read and deserialize a manifest file.
    pub fn from_path(path: &Path) -> Result<TargetManifest> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read target manifest {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse target manifest {}", path.display()))
    }

    /// Convert the raw listing into the immutable node map.
    ///
    /// Malformed addresses are recoverable at this boundary: an unparseable
    /// target key drops that entry, an unparseable dependency string drops
    /// just that edge. Both are logged and counted, never fatal.
    pub fn into_nodes(self, alias_types: &AliasTypes) -> LoadedTargets {
        let mut nodes = BTreeMap::new();
        let mut diagnostics = LoadDiagnostics::default();

        for (raw_address, entry) in self.targets {
            let Some(address) = TargetAddress::parse(&raw_address) else {
                warn!(address = %raw_address, "skipping target with unparseable address");
                diagnostics.skipped_targets += 1;
                continue;
            };

            let mut dependencies = BTreeSet::new();
            for raw_dep in &entry.dependencies {
                match TargetAddress::parse(raw_dep) {
                    Some(dep) => {
                        dependencies.insert(dep);
                    }
                    None => {
                        warn!(
                            target = %address,
                            dependency = %raw_dep,
                            "skipping unparseable dependency address"
                        );
                        diagnostics.skipped_dependencies += 1;
                    }
                }
            }

            let target = TargetNode {
                address: address.clone(),
                dependencies,
                is_root: entry.root,
                is_alias: alias_types.is_alias(&entry.declared_type),
                source_kind: SourceKind::classify(&entry.declared_type),
                declared_type: entry.declared_type,
            };
            nodes.insert(address, target);
        }

        debug!(
            targets = nodes.len(),
            skipped_targets = diagnostics.skipped_targets,
            skipped_dependencies = diagnostics.skipped_dependencies,
            "converted target manifest"
        );
        LoadedTargets { nodes, diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(text: &str) -> TargetAddress {
        TargetAddress::parse(text).expect("test address should parse")
    }

    fn load(json: &str) -> LoadedTargets {
        let manifest: TargetManifest =
            serde_json::from_str(json).expect("test manifest should deserialize");
        manifest.into_nodes(&AliasTypes::default())
    }

    #[test]
    fn test_full_entry() {
        let loaded = load(
            r#"{
                "targets": {
                    "java/com/app:app": {
                        "type": "java_library",
                        "root": true,
                        "dependencies": ["java/com/lib:", "third_party/guava"]
                    }
                }
            }"#,
        );
        let node = &loaded.nodes[&addr("java/com/app:app")];
        assert!(node.is_root);
        assert!(!node.is_alias);
        assert_eq!(node.source_kind, SourceKind::Source);
        assert_eq!(node.dependencies.len(), 2);
        assert!(node.dependencies.contains(&addr("third_party/guava")));
    }

    #[test]
    fn test_missing_fields_default() {
        let loaded = load(r#"{"targets": {"a/b": {}}}"#);
        let node = &loaded.nodes[&addr("a/b")];
        assert!(!node.is_root);
        assert!(!node.is_alias);
        assert_eq!(node.declared_type, "");
        assert_eq!(node.source_kind, SourceKind::Source);
        assert!(node.dependencies.is_empty());
    }

    #[test]
    fn test_alias_detection_uses_injected_set() {
        let manifest: TargetManifest = serde_json::from_str(
            r#"{"targets": {
                "a/b": {"type": "target_group"},
                "a/c": {"type": "Alias"}
            }}"#,
        )
        .unwrap();
        let loaded = manifest.into_nodes(&AliasTypes::with_extra(["target_group"]));
        assert!(loaded.nodes[&addr("a/b")].is_alias);
        // Built-in "alias" matches case-insensitively.
        assert!(loaded.nodes[&addr("a/c")].is_alias);
    }

    #[test]
    fn test_unparseable_target_key_is_skipped() {
        let loaded = load(r#"{"targets": {"::": {"root": true}, "a/b": {}}}"#);
        assert_eq!(loaded.nodes.len(), 1);
        assert_eq!(loaded.diagnostics.skipped_targets, 1);
        assert!(loaded.nodes.contains_key(&addr("a/b")));
    }

    #[test]
    fn test_unparseable_dependency_is_skipped_entry_kept() {
        let loaded = load(r#"{"targets": {"a/b": {"dependencies": [":", "a/c"]}, "a/c": {}}}"#);
        let node = &loaded.nodes[&addr("a/b")];
        assert_eq!(node.dependencies.len(), 1);
        assert_eq!(loaded.diagnostics.skipped_dependencies, 1);
    }

    #[test]
    fn test_equivalent_keys_collapse() {
        // "a/b" and "a/b:b" normalize to the same address; one node survives.
        let loaded = load(r#"{"targets": {"a/b": {"root": true}, "a/b:b": {}}}"#);
        assert_eq!(loaded.nodes.len(), 1);
    }

    #[test]
    fn test_classification_flows_from_declared_type() {
        let loaded = load(
            r#"{"targets": {
                "a/t": {"type": "junit_tests"},
                "a/r": {"type": "resources"},
                "a/tr": {"type": "test_resources"}
            }}"#,
        );
        assert_eq!(loaded.nodes[&addr("a/t")].source_kind, SourceKind::Test);
        assert_eq!(loaded.nodes[&addr("a/r")].source_kind, SourceKind::Resource);
        assert_eq!(
            loaded.nodes[&addr("a/tr")].source_kind,
            SourceKind::TestResource
        );
    }
}
