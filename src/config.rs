use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// Declared-type names always treated as pass-through targets.
const BUILTIN_ALIAS_TYPES: &[&str] = &["alias"];

/// Configuration loaded from `import-scope.toml` next to the manifest.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ImportScopeConfig {
    /// Additional declared-type names treated as pass-through/alias targets
    /// (beyond the built-in set).
    pub alias_types: Option<Vec<String>>,
}

impl ImportScopeConfig {
    /// Load configuration from `import-scope.toml` in the given directory.
    ///
    /// Returns a default (empty) configuration if the file does not exist or
    /// cannot be parsed.
    pub fn load(dir: &Path) -> ImportScopeConfig {
        let config_path = dir.join("import-scope.toml");

        if !config_path.exists() {
            return ImportScopeConfig::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<ImportScopeConfig>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    warn!("failed to parse import-scope.toml: {err}. Using defaults.");
                    ImportScopeConfig::default()
                }
            },
            Err(err) => {
                warn!("failed to read import-scope.toml: {err}. Using defaults.");
                ImportScopeConfig::default()
            }
        }
    }

    /// The effective pass-through set: built-ins plus configured names.
    pub fn alias_set(&self) -> AliasTypes {
        AliasTypes::with_extra(
            self.alias_types
                .iter()
                .flatten()
                .map(String::as_str),
        )
    }
}

/// Case-insensitive set of declared-type names treated as pass-through/alias
/// targets. Injected into manifest conversion so alias detection is never
/// hard-coded into the graph algorithm.
#[derive(Debug, Clone)]
pub struct AliasTypes(HashSet<String>);

impl AliasTypes {
    /// Built-in set plus extra names from configuration.
    pub fn with_extra<'a>(extra: impl IntoIterator<Item = &'a str>) -> AliasTypes {
        let names = BUILTIN_ALIAS_TYPES
            .iter()
            .copied()
            .chain(extra)
            .map(str::to_lowercase)
            .collect();
        AliasTypes(names)
    }

    /// Whether a declared type string names a pass-through target.
    pub fn is_alias(&self, declared_type: &str) -> bool {
        self.0.contains(&declared_type.to_lowercase())
    }
}

impl Default for AliasTypes {
    fn default() -> Self {
        AliasTypes::with_extra([])
    }
}
