use serde::Serialize;

pub const RULES_VERSION: &str = "1.0.0";
pub const RULES_LAST_UPDATED: &str = "2024-12-24";

const SOURCES: [&str; 2] = [
    "IARC Monographs on the Identification of Carcinogenic Hazards to Humans",
    "California Proposition 65 (Safe Drinking Water and Toxic Enforcement Act)",
];

const CONFLICT_RESOLUTION: &str = "IARC classifications take precedence over Prop 65 when both \
sources classify an ingredient. Within IARC, Group 1 > 2A > 2B > 3.";

const DISCLAIMER: &str = "This classification system is for informational purposes only. \
Risk assessments are based on published scientific data but do not constitute medical advice.";

/// Snapshot describing the active rule table.
///
/// Each call to [`metadata`] builds a fresh value, so changes a caller makes
/// to its copy never leak into later calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RulesMetadata {
    pub version: String,
    pub last_updated: String,
    pub sources: Vec<String>,
    pub conflict_resolution: String,
    pub disclaimer: String,
}

pub fn metadata() -> RulesMetadata {
    RulesMetadata {
        version: RULES_VERSION.to_string(),
        last_updated: RULES_LAST_UPDATED.to_string(),
        sources: SOURCES.iter().map(|s| s.to_string()).collect(),
        conflict_resolution: CONFLICT_RESOLUTION.to_string(),
        disclaimer: DISCLAIMER.to_string(),
    }
}

/// Owned [`RULES_VERSION`], used as the serde default for old cache entries.
pub fn rules_version_owned() -> String {
    RULES_VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_version_follows_semver() {
        let semver = Regex::new(r"^\d+\.\d+\.\d+$").unwrap();
        assert!(semver.is_match(RULES_VERSION));
    }

    #[test]
    fn test_metadata_contains_required_fields() {
        let meta = metadata();
        assert_eq!(meta.version, RULES_VERSION);
        assert_eq!(meta.last_updated, RULES_LAST_UPDATED);
        assert_eq!(meta.sources.len(), 2);
        assert!(meta.conflict_resolution.contains("IARC"));
        assert!(meta.disclaimer.contains("medical advice"));
    }

    #[test]
    fn test_metadata_is_copy() {
        let mut first = metadata();
        first.version = "hacked".to_string();
        first.sources.clear();

        let second = metadata();
        assert_eq!(second.version, RULES_VERSION);
        assert_eq!(second.sources.len(), 2);
    }

    #[test]
    fn test_metadata_serializes_with_snake_case_keys() {
        let json = serde_json::to_value(metadata()).unwrap();
        for key in ["version", "last_updated", "sources", "conflict_resolution", "disclaimer"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json["sources"].is_array());
    }
}
