// crates/mht-core/src/catalog.rs
//! Query functions over guideline records: substring search, category
//! filtering, per-category counts and id lookup.
//!
//! Search and category filtering are independent predicates over a single
//! record, so applying them in either order selects the same records. Screens
//! apply the category filter first.

use crate::guideline::{GuidelineRecord, PriorityTier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryKey {
    #[default]
    All,
    Legacy,
    Comprehensive,
    Critical,
    Important,
    Tools,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 6] = [
        CategoryKey::All,
        CategoryKey::Legacy,
        CategoryKey::Comprehensive,
        CategoryKey::Critical,
        CategoryKey::Important,
        CategoryKey::Tools,
    ];

    /// Unrecognized keys fall back to `All`, which leaves input unchanged.
    pub fn parse(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "legacy" => CategoryKey::Legacy,
            "comprehensive" => CategoryKey::Comprehensive,
            "critical" => CategoryKey::Critical,
            "important" => CategoryKey::Important,
            "tools" => CategoryKey::Tools,
            _ => CategoryKey::All,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            CategoryKey::All => "all",
            CategoryKey::Legacy => "legacy",
            CategoryKey::Comprehensive => "comprehensive",
            CategoryKey::Critical => "critical",
            CategoryKey::Important => "important",
            CategoryKey::Tools => "tools",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryKey::All => "All",
            CategoryKey::Legacy => "Traditional",
            CategoryKey::Comprehensive => "Evidence-Based",
            CategoryKey::Critical => "Critical",
            CategoryKey::Important => "Important",
            CategoryKey::Tools => "Tools",
        }
    }

    pub fn matches(&self, record: &GuidelineRecord) -> bool {
        match self {
            CategoryKey::All => true,
            CategoryKey::Legacy => record.is_legacy(),
            CategoryKey::Comprehensive => !record.is_legacy(),
            CategoryKey::Critical => record.priority == PriorityTier::Critical,
            CategoryKey::Important => record.priority == PriorityTier::Important,
            CategoryKey::Tools => record.has_tools(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub all: usize,
    pub legacy: usize,
    pub comprehensive: usize,
    pub critical: usize,
    pub important: usize,
    pub tools: usize,
}

impl CategoryCounts {
    pub fn get(&self, key: CategoryKey) -> usize {
        match key {
            CategoryKey::All => self.all,
            CategoryKey::Legacy => self.legacy,
            CategoryKey::Comprehensive => self.comprehensive,
            CategoryKey::Critical => self.critical,
            CategoryKey::Important => self.important,
            CategoryKey::Tools => self.tools,
        }
    }
}

/// Case-insensitive substring search. A blank query returns the input as is.
pub fn search<'a, I>(query: &str, records: I) -> Vec<&'a GuidelineRecord>
where
    I: IntoIterator<Item = &'a GuidelineRecord>,
{
    if query.trim().is_empty() {
        return records.into_iter().collect();
    }

    let needle = query.to_lowercase();
    records
        .into_iter()
        .filter(|record| {
            record
                .searchable_text()
                .any(|text| text.to_lowercase().contains(&needle))
        })
        .collect()
}

pub fn filter_by_category<'a, I>(key: CategoryKey, records: I) -> Vec<&'a GuidelineRecord>
where
    I: IntoIterator<Item = &'a GuidelineRecord>,
{
    records.into_iter().filter(|record| key.matches(record)).collect()
}

pub fn count_by_category<'a, I>(records: I) -> CategoryCounts
where
    I: IntoIterator<Item = &'a GuidelineRecord>,
{
    let records: Vec<&GuidelineRecord> = records.into_iter().collect();
    let count = |key: CategoryKey| records.iter().filter(|record| key.matches(record)).count();

    CategoryCounts {
        all: count(CategoryKey::All),
        legacy: count(CategoryKey::Legacy),
        comprehensive: count(CategoryKey::Comprehensive),
        critical: count(CategoryKey::Critical),
        important: count(CategoryKey::Important),
        tools: count(CategoryKey::Tools),
    }
}

/// Linear lookup. `None` is expected for stale ids.
pub fn get_by_id<'a, I>(id: &str, records: I) -> Option<&'a GuidelineRecord>
where
    I: IntoIterator<Item = &'a GuidelineRecord>,
{
    records.into_iter().find(|record| record.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guideline::*;

    fn record(id: &str, priority: PriorityTier) -> GuidelineRecord {
        GuidelineRecord {
            id: id.to_string(),
            title: format!("Title {}", id),
            icon: "info".to_string(),
            category: GuidelineCategory::Indications,
            priority,
            content: GuidelineContent {
                overview: String::new(),
                key_points: vec![],
                recommendations: vec![],
                clinical_pearls: vec![],
                warnings: vec![],
                patient_counseling: vec![],
            },
            decision_tree: None,
            quick_reference: None,
            last_updated: "2024-01-15".to_string(),
        }
    }

    fn ids(records: &[&GuidelineRecord]) -> Vec<String> {
        records.iter().map(|record| record.id.clone()).collect()
    }

    #[test]
    fn test_two_record_example() {
        let records = vec![
            record("legacy-a", PriorityTier::Critical),
            record("b", PriorityTier::Important),
        ];

        assert_eq!(ids(&filter_by_category(CategoryKey::Critical, &records)), vec!["legacy-a"]);
        assert_eq!(ids(&filter_by_category(CategoryKey::Legacy, &records)), vec!["legacy-a"]);
        assert_eq!(
            count_by_category(&records),
            CategoryCounts {
                all: 2,
                legacy: 1,
                comprehensive: 1,
                critical: 1,
                important: 1,
                tools: 0,
            }
        );
    }

    #[test]
    fn test_tools_filter() {
        let mut with_card = record("card", PriorityTier::Standard);
        with_card.quick_reference = Some(QuickReferenceCard {
            title: "Card".to_string(),
            items: vec![],
        });
        let mut with_tree = record("tree", PriorityTier::Standard);
        with_tree.decision_tree = Some(TreeEntry {
            tree: "t".to_string(),
            root: "r".to_string(),
        });
        let records = vec![with_card, record("plain", PriorityTier::Standard), with_tree];

        assert_eq!(ids(&filter_by_category(CategoryKey::Tools, &records)), vec!["card", "tree"]);
    }

    #[test]
    fn test_unknown_category_is_identity() {
        let records = vec![record("a", PriorityTier::Standard), record("legacy-b", PriorityTier::Critical)];
        let key = CategoryKey::parse("no-such-category");
        assert_eq!(key, CategoryKey::All);
        assert_eq!(ids(&filter_by_category(key, &records)), vec!["a", "legacy-b"]);
    }

    #[test]
    fn test_blank_query_is_identity() {
        let records = vec![record("x", PriorityTier::Standard), record("y", PriorityTier::Standard)];
        assert_eq!(ids(&search("", &records)), vec!["x", "y"]);
        assert_eq!(ids(&search("   \t", &records)), vec!["x", "y"]);
    }

    #[test]
    fn test_search_fields() {
        let mut pearl = record("pearl", PriorityTier::Standard);
        pearl.content.clinical_pearls.push("Transdermal ESTROGEN has lower VTE risk".to_string());
        let mut counsel = record("counsel", PriorityTier::Standard);
        counsel.content.patient_counseling.push("Discuss estrogen options".to_string());
        let mut warned = record("warned", PriorityTier::Standard);
        warned.content.warnings.push("Estrogen warning".to_string());
        let records = vec![pearl, counsel, warned];

        // warnings are not part of the searched text
        assert_eq!(ids(&search("estrogen", &records)), vec!["pearl", "counsel"]);
        assert_eq!(ids(&search("title PEARL", &records)), vec!["pearl"]);
        assert!(search("zzz", &records).is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let records = vec![record("a", PriorityTier::Standard)];
        assert_eq!(get_by_id("a", &records).map(|r| r.id.as_str()), Some("a"));
        assert!(get_by_id("removed", &records).is_none());
    }
}
