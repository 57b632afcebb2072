use serde::Serialize;

/// The role a target's files play in the imported project.
///
/// Plain enum, cheap to copy; classified once per target from the declared
/// type string and carried on the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Production sources (default for unrecognized type strings).
    Source,
    /// Test sources.
    Test,
    /// Production resources.
    Resource,
    /// Test resources.
    TestResource,
}

impl SourceKind {
    /// Classify a declared target type string. Total; never fails.
    ///
    /// Case-insensitive substring match, most specific first: a type naming
    /// both "test" and "resource" is a test resource, not either alone.
    pub fn classify(declared_type: &str) -> SourceKind {
        let lower = declared_type.to_lowercase();
        match (lower.contains("test"), lower.contains("resource")) {
            (true, true) => SourceKind::TestResource,
            (false, true) => SourceKind::Resource,
            (true, false) => SourceKind::Test,
            (false, false) => SourceKind::Source,
        }
    }

    /// Human-readable name for compact output.
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceKind::Source => "source",
            SourceKind::Test => "test",
            SourceKind::Resource => "resource",
            SourceKind::TestResource => "test-resource",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_precedence() {
        assert_eq!(SourceKind::classify("test_resource"), SourceKind::TestResource);
        assert_eq!(SourceKind::classify("resources"), SourceKind::Resource);
        assert_eq!(SourceKind::classify("junit_tests"), SourceKind::Test);
        assert_eq!(SourceKind::classify("java_library"), SourceKind::Source);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(SourceKind::classify("TEST"), SourceKind::Test);
        assert_eq!(SourceKind::classify("Resource"), SourceKind::Resource);
        assert_eq!(SourceKind::classify("Test_Resources"), SourceKind::TestResource);
    }

    #[test]
    fn test_classify_defaults_to_source() {
        assert_eq!(SourceKind::classify(""), SourceKind::Source);
        assert_eq!(SourceKind::classify("anything_else"), SourceKind::Source);
        assert_eq!(SourceKind::classify("☃"), SourceKind::Source);
    }
}
