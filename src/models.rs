use serde::{Deserialize, Serialize};

/// Risk attached to an ingredient or a whole product.
///
/// Variant order is the total order used for aggregation:
/// `Safe < Low < Moderate < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Low,
    Moderate,
    High,
    Critical,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Safe => write!(f, "safe"),
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Critical => write!(f, "critical"),
        }
    }
}

/// Authoritative origin of a rule.
///
/// When several bodies classify the same ingredient, the rule table carries
/// only the entry from the highest-priority source (see [`priority`](Self::priority)).
/// Nothing resolves conflicts at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationSource {
    #[serde(rename = "IARC_GROUP_1")]
    IarcGroup1,
    #[serde(rename = "IARC_GROUP_2A")]
    IarcGroup2A,
    #[serde(rename = "IARC_GROUP_2B")]
    IarcGroup2B,
    #[serde(rename = "IARC_GROUP_3")]
    IarcGroup3,
    #[serde(rename = "PROP65_CARCINOGEN")]
    Prop65Carcinogen,
    #[serde(rename = "PROP65_REPRODUCTIVE")]
    Prop65Reproductive,
    #[serde(rename = "NONE")]
    None,
}

impl ClassificationSource {
    /// Every source, most authoritative first.
    pub const ALL: [ClassificationSource; 7] = [
        ClassificationSource::IarcGroup1,
        ClassificationSource::IarcGroup2A,
        ClassificationSource::IarcGroup2B,
        ClassificationSource::Prop65Carcinogen,
        ClassificationSource::Prop65Reproductive,
        ClassificationSource::IarcGroup3,
        ClassificationSource::None,
    ];

    /// Curation priority: higher wins when authoring the table.
    pub fn priority(&self) -> u8 {
        match self {
            ClassificationSource::IarcGroup1 => 100,
            ClassificationSource::IarcGroup2A => 90,
            ClassificationSource::IarcGroup2B => 80,
            ClassificationSource::Prop65Carcinogen => 70,
            ClassificationSource::Prop65Reproductive => 65,
            ClassificationSource::IarcGroup3 => 60,
            ClassificationSource::None => 0,
        }
    }
}

impl std::fmt::Display for ClassificationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassificationSource::IarcGroup1 => write!(f, "IARC_GROUP_1"),
            ClassificationSource::IarcGroup2A => write!(f, "IARC_GROUP_2A"),
            ClassificationSource::IarcGroup2B => write!(f, "IARC_GROUP_2B"),
            ClassificationSource::IarcGroup3 => write!(f, "IARC_GROUP_3"),
            ClassificationSource::Prop65Carcinogen => write!(f, "PROP65_CARCINOGEN"),
            ClassificationSource::Prop65Reproductive => write!(f, "PROP65_REPRODUCTIVE"),
            ClassificationSource::None => write!(f, "NONE"),
        }
    }
}

/// Classification of one parsed ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientResult {
    pub raw: String,
    pub canonical: String,
    pub risk: RiskLevel,
    /// Omitted for safe ingredients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ClassificationSource>,
    /// Omitted for safe ingredients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Output of the classification pipeline for one ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationOutcome {
    pub ingredients: Vec<IngredientResult>,
    pub overall_risk: RiskLevel,
}

/// Product data as returned by a product source.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub ingredients_text: Option<String>,
}

/// Result of scanning one barcode; this is what gets cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub barcode: String,
    pub product_name: String,
    pub ingredients: Vec<IngredientResult>,
    pub overall_risk: RiskLevel,
    #[serde(default)]
    pub cached: bool,
    /// Entries written before versioning was introduced carry the active version.
    #[serde(default = "crate::rules::metadata::rules_version_owned")]
    pub rules_version: String,
}
