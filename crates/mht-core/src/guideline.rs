// crates/mht-core/src/guideline.rs
use serde::{Deserialize, Serialize};

/// Id prefix that marks records carried over from the traditional guideline set.
pub const LEGACY_PREFIX: &str = "legacy-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuidelineCategory {
    Indications,
    Contraindications,
    Risks,
    Routes,
    Dosing,
    Monitoring,
    Alternatives,
    Counseling,
}

impl GuidelineCategory {
    pub fn label(&self) -> &'static str {
        match self {
            GuidelineCategory::Indications => "Indications",
            GuidelineCategory::Contraindications => "Contraindications",
            GuidelineCategory::Risks => "Risks",
            GuidelineCategory::Routes => "Routes",
            GuidelineCategory::Dosing => "Dosing",
            GuidelineCategory::Monitoring => "Monitoring",
            GuidelineCategory::Alternatives => "Alternatives",
            GuidelineCategory::Counseling => "Counseling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Critical,
    Important,
    Standard,
}

impl PriorityTier {
    pub fn label(&self) -> &'static str {
        match self {
            PriorityTier::Critical => "CRITICAL",
            PriorityTier::Important => "IMPORTANT",
            PriorityTier::Standard => "STANDARD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvidenceGrade {
    Strong,
    Conditional,
    #[serde(rename = "Expert Opinion")]
    ExpertOpinion,
}

impl EvidenceGrade {
    pub fn label(&self) -> &'static str {
        match self {
            EvidenceGrade::Strong => "Strong",
            EvidenceGrade::Conditional => "Conditional",
            EvidenceGrade::ExpertOpinion => "Expert Opinion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvidenceLevel {
    High,
    Moderate,
    Low,
    #[serde(rename = "Very Low")]
    VeryLow,
}

impl EvidenceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            EvidenceLevel::High => "High",
            EvidenceLevel::Moderate => "Moderate",
            EvidenceLevel::Low => "Low",
            EvidenceLevel::VeryLow => "Very Low",
        }
    }
}

/// Strength-of-evidence level attached to a single citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceLevel {
    A,
    B,
    C,
    #[serde(rename = "GPP")]
    GoodPracticePoint,
}

impl ReferenceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ReferenceLevel::A => "A",
            ReferenceLevel::B => "B",
            ReferenceLevel::C => "C",
            ReferenceLevel::GoodPracticePoint => "GPP",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub source: String,
    pub year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub level: ReferenceLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
    pub grade: EvidenceGrade,
    pub evidence_level: EvidenceLevel,
    pub references: Vec<Reference>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReferenceItem {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default)]
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReferenceCard {
    pub title: String,
    pub items: Vec<QuickReferenceItem>,
}

/// Entry point into a named decision tree collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub tree: String,
    pub root: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineContent {
    pub overview: String,
    pub key_points: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    // Absent lists deserialize as empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clinical_pearls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patient_counseling: Vec<String>,
}

/// A single clinical guideline. Defined at build time and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineRecord {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub category: GuidelineCategory,
    pub priority: PriorityTier,
    pub content: GuidelineContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_tree: Option<TreeEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_reference: Option<QuickReferenceCard>,
    pub last_updated: String,
}

impl GuidelineRecord {
    pub fn is_legacy(&self) -> bool {
        self.id.starts_with(LEGACY_PREFIX)
    }

    /// Records carrying a decision tree or a quick-reference card.
    pub fn has_tools(&self) -> bool {
        self.decision_tree.is_some() || self.quick_reference.is_some()
    }

    /// Every text field searched by the catalog, in display order.
    pub fn searchable_text(&self) -> impl Iterator<Item = &str> {
        let content = &self.content;
        std::iter::once(self.title.as_str())
            .chain(std::iter::once(content.overview.as_str()))
            .chain(content.key_points.iter().map(String::as_str))
            .chain(content.recommendations.iter().map(|rec| rec.text.as_str()))
            .chain(content.clinical_pearls.iter().map(String::as_str))
            .chain(content.patient_counseling.iter().map(String::as_str))
    }
}
