use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::models::{ClassificationSource, RiskLevel};

/// One authored rule. Each canonical name has exactly one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RiskRule {
    pub risk: RiskLevel,
    pub source: ClassificationSource,
    pub notes: String,
}

#[derive(Deserialize)]
struct RuleFile {
    rules: HashMap<String, RiskRule>,
}

static RISK_RULES_JSON: &str = include_str!("../data/risk_rules.json");

static RISK_RULES: LazyLock<HashMap<String, RiskRule>> = LazyLock::new(|| {
    let file: RuleFile =
        serde_json::from_str(RISK_RULES_JSON).expect("risk_rules.json should be valid JSON");
    file.rules
});

/// Risk, source and notes for a canonical ingredient name.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup<'a> {
    pub risk: RiskLevel,
    pub source: ClassificationSource,
    pub notes: Option<&'a str>,
}

/// Result for names without a rule.
const DEFAULT_LOOKUP: Lookup<'static> = Lookup {
    risk: RiskLevel::Safe,
    source: ClassificationSource::None,
    notes: None,
};

/// Look up the rule for a canonical name.
///
/// The key is lowercased and trimmed again, so callers that skipped
/// normalization still match. Names without a rule are `(safe, NONE, None)`.
pub fn lookup(canonical: &str) -> Lookup<'static> {
    let key = canonical.trim().to_lowercase();
    match RISK_RULES.get(&key) {
        Some(rule) => Lookup {
            risk: rule.risk,
            source: rule.source,
            notes: Some(rule.notes.as_str()),
        },
        None => DEFAULT_LOOKUP,
    }
}

/// All authored rules, sorted by descending risk and then by name.
pub fn rules() -> Vec<(&'static str, &'static RiskRule)> {
    let mut all: Vec<(&'static str, &'static RiskRule)> = RISK_RULES
        .iter()
        .map(|(name, rule)| (name.as_str(), rule))
        .collect();
    all.sort_by(|a, b| b.1.risk.cmp(&a.1.risk).then_with(|| a.0.cmp(b.0)));
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(name: &str) -> RiskLevel {
        lookup(name).risk
    }

    #[test]
    fn test_known_carcinogen_returns_critical() {
        assert_eq!(risk("processed meat"), RiskLevel::Critical);
        assert_eq!(risk("alcohol"), RiskLevel::Critical);
        assert_eq!(risk("ethanol"), RiskLevel::Critical);
    }

    #[test]
    fn test_probable_carcinogen_returns_high() {
        assert_eq!(risk("acrylamide"), RiskLevel::High);
        assert_eq!(risk("sodium nitrite"), RiskLevel::High);
        assert_eq!(risk("glyphosate"), RiskLevel::High);
    }

    #[test]
    fn test_possible_carcinogen_returns_moderate() {
        assert_eq!(risk("aspartame"), RiskLevel::Moderate);
        assert_eq!(risk("monosodium glutamate"), RiskLevel::Moderate);
        assert_eq!(risk("sodium benzoate"), RiskLevel::Moderate);
    }

    #[test]
    fn test_minor_concern_returns_low() {
        assert_eq!(risk("allura red"), RiskLevel::Low);
        assert_eq!(risk("tartrazine"), RiskLevel::Low);
        assert_eq!(risk("sucralose"), RiskLevel::Low);
    }

    #[test]
    fn test_unknown_ingredient_returns_default() {
        for name in ["water", "salt", "sugar", "totally_made_up_ingredient", ""] {
            assert_eq!(lookup(name), DEFAULT_LOOKUP, "{name:?}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(risk("Aspartame"), RiskLevel::Moderate);
        assert_eq!(risk("ASPARTAME"), RiskLevel::Moderate);
        assert_eq!(risk(" AsParTaMe "), RiskLevel::Moderate);
    }

    #[test]
    fn test_returns_source_and_notes() {
        let hit = lookup("processed meat");
        assert_eq!(hit.risk, RiskLevel::Critical);
        assert_eq!(hit.source, ClassificationSource::IarcGroup1);
        assert!(hit.notes.unwrap().to_lowercase().contains("carcinogenic"));

        let hit = lookup("aspartame");
        assert_eq!(hit.source, ClassificationSource::IarcGroup2B);
        assert!(hit.notes.unwrap().contains("2023"));
    }

    #[test]
    fn test_returns_prop65_source() {
        let hit = lookup("erythrosine");
        assert_eq!(hit.risk, RiskLevel::High);
        assert_eq!(hit.source, ClassificationSource::Prop65Carcinogen);
    }

    #[test]
    fn test_iarc_authored_over_prop65() {
        // Aspartame is listed by both bodies; the table carries the IARC entry.
        assert!(lookup("aspartame").source.to_string().starts_with("IARC"));
    }

    #[test]
    fn test_table_keys_are_canonical() {
        for (name, rule) in rules() {
            assert_eq!(name, name.trim().to_lowercase(), "key {name:?}");
            assert!(!rule.notes.is_empty(), "missing notes for {name}");
        }
    }

    #[test]
    fn test_rules_sorted_by_risk() {
        let all = rules();
        assert!(all.len() >= 30);
        assert_eq!(all.first().unwrap().1.risk, RiskLevel::Critical);
        assert!(all.windows(2).all(|w| w[0].1.risk >= w[1].1.risk));
    }
}
