// crates/mht-core/src/library.rs
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::catalog::{self, CategoryCounts, CategoryKey};
use crate::decision::{DecisionTreeSet, DecisionTreeNode};
use crate::guideline::GuidelineRecord;
use crate::{MhtError, Result};

const GUIDELINES_JSON: &str = include_str!("../data/guidelines.json");
const DECISION_TREES_JSON: &str = include_str!("../data/decision_trees.json");

/// Guideline records plus the decision trees they link to.
#[derive(Debug, Clone)]
pub struct GuidelineLibrary {
    records: Vec<GuidelineRecord>,
    trees: DecisionTreeSet,
}

impl GuidelineLibrary {
    /// Load the bundled dataset: traditional records first, then the
    /// evidence-based set.
    pub fn builtin() -> Result<Self> {
        Self::from_json(GUIDELINES_JSON, DECISION_TREES_JSON)
    }

    pub fn from_json(guidelines: &str, trees: &str) -> Result<Self> {
        let records: Vec<GuidelineRecord> = serde_json::from_str(guidelines)?;
        let trees: DecisionTreeSet = serde_json::from_str(trees)?;
        Self::new(records, trees)
    }

    pub fn new(records: Vec<GuidelineRecord>, trees: DecisionTreeSet) -> Result<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(MhtError::DuplicateGuideline(record.id.clone()));
            }
        }

        for tree in trees.trees() {
            let mut nodes = HashSet::new();
            for node in &tree.nodes {
                if !nodes.insert(node.id.as_str()) {
                    return Err(MhtError::DuplicateNode {
                        tree: tree.key.clone(),
                        node: node.id.clone(),
                    });
                }
            }
        }

        for record in &records {
            if let Some(entry) = &record.decision_tree {
                let resolved = trees.tree(&entry.tree).and_then(|tree| tree.node(&entry.root));
                if resolved.is_none() {
                    return Err(MhtError::MissingTreeEntry {
                        guideline: record.id.clone(),
                        tree: entry.tree.clone(),
                        root: entry.root.clone(),
                    });
                }
            }
        }

        // Dangling option targets only break the option that uses them.
        for dangling in trees.dangling_references() {
            warn!(
                "Decision node {}/{} links to unknown node '{}'",
                dangling.tree, dangling.node, dangling.missing
            );
        }

        debug!("Loaded {} guidelines and {} decision trees", records.len(), trees.trees().len());
        Ok(Self { records, trees })
    }

    pub fn records(&self) -> &[GuidelineRecord] {
        &self.records
    }

    pub fn trees(&self) -> &DecisionTreeSet {
        &self.trees
    }

    pub fn get(&self, id: &str) -> Option<&GuidelineRecord> {
        catalog::get_by_id(id, &self.records)
    }

    /// Category filter first, then search.
    pub fn query(&self, category: CategoryKey, search: &str) -> Vec<&GuidelineRecord> {
        let narrowed = catalog::filter_by_category(category, &self.records);
        catalog::search(search, narrowed)
    }

    pub fn counts(&self) -> CategoryCounts {
        catalog::count_by_category(&self.records)
    }

    /// Root node of the decision tree attached to a guideline, if any.
    pub fn decision_root(&self, guideline_id: &str) -> Option<(&str, &DecisionTreeNode)> {
        let entry = self.get(guideline_id)?.decision_tree.as_ref()?;
        let tree = self.trees.tree(&entry.tree)?;
        tree.node(&entry.root).map(|node| (tree.key.as_str(), node))
    }
}
