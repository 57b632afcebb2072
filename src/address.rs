use std::fmt;

use serde::{Serialize, Serializer};

/// Which targets an address selects within its directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    /// A single named target in the directory (`path:target`, or bare `path`
    /// with the target name implied by the last path segment).
    OneInDir,
    /// All targets declared directly in the directory, non-recursive (`path:`).
    AllInDirFlat,
    /// All targets under the directory, recursive (`path::`).
    AllInDirDeep,
}

/// A parsed, normalized build target address.
///
/// Identity is structural over `(path, target, kind)`; trailing and repeated
/// `/` separators are normalized away at parse time, so `a/b/` and `a/b` are
/// the same node key. The derived `Ord` sorts by directory path first, which
/// gives query output its deterministic ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetAddress {
    path: Vec<String>,
    target: Option<String>,
    kind: AddressKind,
}

impl TargetAddress {
    /// Parse a textual target specification.
    ///
    /// The four accepted forms:
    /// - `path:target` -> one target in the directory
    /// - `path:`       -> all targets directly in the directory
    /// - `path::`      -> all targets under the directory, recursive
    /// - `path`        -> shorthand for `path:<last segment>`
    ///
    /// Returns `None` when the path component is empty (`":"`, `"::"`,
    /// `":name"`, `""`).
    pub fn parse(text: &str) -> Option<TargetAddress> {
        if let Some(dir) = text.strip_suffix("::") {
            return Some(TargetAddress {
                path: split_path(dir)?,
                target: None,
                kind: AddressKind::AllInDirDeep,
            });
        }
        if let Some(dir) = text.strip_suffix(':') {
            return Some(TargetAddress {
                path: split_path(dir)?,
                target: None,
                kind: AddressKind::AllInDirFlat,
            });
        }
        if let Some((dir, name)) = text.rsplit_once(':') {
            return Some(TargetAddress {
                path: split_path(dir)?,
                target: Some(name.to_owned()),
                kind: AddressKind::OneInDir,
            });
        }
        // Bare path: the target name is implied by the last segment.
        let path = split_path(text)?;
        let target = path.last().cloned();
        Some(TargetAddress {
            path,
            target,
            kind: AddressKind::OneInDir,
        })
    }

    /// Directory path segments.
    // Structural accessors are consumed by the model-construction side of the
    // import, not by the CLI row queries.
    #[allow(dead_code)]
    pub fn directory(&self) -> &[String] {
        &self.path
    }

    /// Explicit or implied target name. `None` for the all-in-dir forms.
    #[allow(dead_code)]
    pub fn target_name(&self) -> Option<&str> {
        self.target.as_deref()
    }

    #[allow(dead_code)]
    pub fn kind(&self) -> AddressKind {
        self.kind
    }
}

fn split_path(raw: &str) -> Option<Vec<String>> {
    let segments: Vec<String> = raw
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}

impl fmt::Display for TargetAddress {
    /// Canonical text form; exact inverse of [`TargetAddress::parse`].
    ///
    /// A `OneInDir` address whose target equals its last path segment prints
    /// as the bare-path shorthand.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = self.path.join("/");
        match self.kind {
            AddressKind::OneInDir => {
                let target = self.target.as_deref().unwrap_or_default();
                if self.path.last().map(String::as_str) == Some(target) {
                    write!(f, "{dir}")
                } else {
                    write!(f, "{dir}:{target}")
                }
            }
            AddressKind::AllInDirFlat => write!(f, "{dir}:"),
            AddressKind::AllInDirDeep => write!(f, "{dir}::"),
        }
    }
}

impl Serialize for TargetAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> TargetAddress {
        TargetAddress::parse(text).unwrap_or_else(|| panic!("{text:?} should parse"))
    }

    #[test]
    fn test_parse_one_in_dir_explicit() {
        let addr = parse("java/com/app:app-lib");
        assert_eq!(addr.kind(), AddressKind::OneInDir);
        assert_eq!(addr.directory(), ["java", "com", "app"]);
        assert_eq!(addr.target_name(), Some("app-lib"));
    }

    #[test]
    fn test_parse_bare_path_implies_last_segment() {
        let addr = parse("a/b/c");
        assert_eq!(addr.kind(), AddressKind::OneInDir);
        assert_eq!(addr.directory(), ["a", "b", "c"]);
        assert_eq!(addr.target_name(), Some("c"));
    }

    #[test]
    fn test_parse_all_in_dir_flat() {
        let addr = parse("a/b:");
        assert_eq!(addr.kind(), AddressKind::AllInDirFlat);
        assert_eq!(addr.target_name(), None);
    }

    #[test]
    fn test_parse_all_in_dir_deep() {
        let addr = parse("a/b::");
        assert_eq!(addr.kind(), AddressKind::AllInDirDeep);
        assert_eq!(addr.target_name(), None);
    }

    #[test]
    fn test_empty_path_forms_fail() {
        assert_eq!(TargetAddress::parse(":"), None);
        assert_eq!(TargetAddress::parse("::"), None);
        assert_eq!(TargetAddress::parse(":name"), None);
        assert_eq!(TargetAddress::parse(""), None);
    }

    #[test]
    fn test_trailing_separator_normalizes() {
        assert_eq!(parse("a/b/"), parse("a/b"));
        assert_eq!(parse("a//b"), parse("a/b"));
        assert_eq!(parse("a/b/:x"), parse("a/b:x"));
    }

    #[test]
    fn test_bare_path_equals_explicit_form() {
        // `a/b/c` is shorthand for `a/b/c:c`: same node identity.
        assert_eq!(parse("a/b/c"), parse("a/b/c:c"));
    }

    #[test]
    fn test_flat_and_deep_are_distinct() {
        assert_ne!(parse("a/b:"), parse("a/b::"));
        assert_ne!(parse("a/b:"), parse("a/b"));
    }

    #[test]
    fn test_display_round_trip() {
        for text in [
            "a",
            "a/b/c",
            "a/b:x",
            "a/b:",
            "a/b::",
            "java/com/app:app-lib",
            "third_party/guava",
        ] {
            let addr = parse(text);
            assert_eq!(
                TargetAddress::parse(&addr.to_string()),
                Some(addr.clone()),
                "round trip failed for {text:?} (printed as {addr})"
            );
        }
    }

    #[test]
    fn test_display_shorthand_when_target_matches_last_segment() {
        assert_eq!(parse("a/b/c:c").to_string(), "a/b/c");
        assert_eq!(parse("a/b:x").to_string(), "a/b:x");
        assert_eq!(parse("a/b:").to_string(), "a/b:");
        assert_eq!(parse("a/b::").to_string(), "a/b::");
    }

    #[test]
    fn test_ordering_is_by_directory_then_target() {
        let mut addrs = vec![parse("b/x"), parse("a/z:t"), parse("a/z:s")];
        addrs.sort();
        assert_eq!(
            addrs.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["a/z:s", "a/z:t", "b/x"]
        );
    }
}
