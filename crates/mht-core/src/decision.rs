// crates/mht-core/src/decision.rs
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Decision,
    Outcome,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
        }
    }
}

/// An answer offered at a decision node. Either moves to another node or
/// ends the flow with an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DecisionOption {
    Navigate {
        text: String,
        next_node_id: String,
    },
    Outcome {
        text: String,
        outcome_text: String,
        #[serde(default)]
        risk_tier: Option<RiskTier>,
    },
}

impl DecisionOption {
    pub fn text(&self) -> &str {
        match self {
            DecisionOption::Navigate { text, .. } | DecisionOption::Outcome { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTreeNode {
    pub id: String,
    #[serde(default)]
    pub question: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<DecisionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl DecisionTreeNode {
    /// Nodes without options end the flow on arrival.
    pub fn is_terminal(&self) -> bool {
        self.options.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub key: String,
    pub nodes: Vec<DecisionTreeNode>,
}

impl DecisionTree {
    pub fn node(&self, id: &str) -> Option<&DecisionTreeNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub tree: String,
    pub node: String,
    pub missing: String,
}

/// Named decision trees in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionTreeSet {
    trees: Vec<DecisionTree>,
}

impl DecisionTreeSet {
    pub fn new(trees: Vec<DecisionTree>) -> Self {
        Self { trees }
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    pub fn tree(&self, key: &str) -> Option<&DecisionTree> {
        self.trees.iter().find(|tree| tree.key == key)
    }

    /// Resolve a node id to the first tree, in declaration order, that
    /// defines it. Ids are not namespaced by tree.
    pub fn find_node(&self, id: &str) -> Option<(&str, &DecisionTreeNode)> {
        self.trees
            .iter()
            .find_map(|tree| tree.node(id).map(|node| (tree.key.as_str(), node)))
    }

    /// Every navigate option whose target cannot be resolved in any tree.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();
        for tree in &self.trees {
            for node in &tree.nodes {
                for option in &node.options {
                    if let DecisionOption::Navigate { next_node_id, .. } = option {
                        if self.find_node(next_node_id).is_none() {
                            dangling.push(DanglingReference {
                                tree: tree.key.clone(),
                                node: node.id.clone(),
                                missing: next_node_id.clone(),
                            });
                        }
                    }
                }
            }
        }
        dangling
    }

    /// Number of transitions on the longest path from the entry `root` of
    /// `tree` to a terminal. Unresolvable targets and back-edges end a path.
    pub fn longest_path(&self, tree: &str, root: &str) -> usize {
        let Some((key, node)) = self
            .tree(tree)
            .and_then(|found| found.node(root).map(|node| (found.key.as_str(), node)))
        else {
            return 0;
        };
        let mut visiting = HashSet::new();
        self.longest_from(key, node, &mut visiting)
    }

    fn longest_from<'a>(
        &'a self,
        tree: &'a str,
        node: &'a DecisionTreeNode,
        visiting: &mut HashSet<(&'a str, &'a str)>,
    ) -> usize {
        let key = (tree, node.id.as_str());
        if !visiting.insert(key) {
            return 0;
        }

        let mut longest = 0;
        for option in &node.options {
            let depth = match option {
                DecisionOption::Navigate { next_node_id, .. } => match self.find_node(next_node_id) {
                    Some((next_tree, next)) => 1 + self.longest_from(next_tree, next, visiting),
                    None => 1,
                },
                DecisionOption::Outcome { .. } => 1,
            };
            longest = longest.max(depth);
        }

        visiting.remove(&key);
        longest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigate(text: &str, next: &str) -> DecisionOption {
        DecisionOption::Navigate {
            text: text.to_string(),
            next_node_id: next.to_string(),
        }
    }

    fn node(id: &str, options: Vec<DecisionOption>) -> DecisionTreeNode {
        DecisionTreeNode {
            id: id.to_string(),
            question: format!("{}?", id),
            kind: if options.is_empty() { NodeKind::Outcome } else { NodeKind::Decision },
            options,
            outcome: None,
            recommendation: None,
        }
    }

    fn create_test_trees() -> DecisionTreeSet {
        DecisionTreeSet::new(vec![
            DecisionTree {
                key: "first".to_string(),
                nodes: vec![
                    node("start", vec![navigate("a", "shared"), navigate("b", "missing")]),
                    node("shared", vec![]),
                ],
            },
            DecisionTree {
                key: "second".to_string(),
                nodes: vec![
                    node("entry", vec![navigate("go", "shared")]),
                    node("shared", vec![navigate("deeper", "leaf")]),
                    node("leaf", vec![]),
                ],
            },
        ])
    }

    #[test]
    fn test_first_declared_tree_wins() {
        let trees = create_test_trees();

        // "shared" exists in both trees; the earlier declaration is used
        // even when the caller sits in the later tree.
        let (tree, node) = trees.find_node("shared").unwrap();
        assert_eq!(tree, "first");
        assert!(node.options.is_empty());
    }

    #[test]
    fn test_lookup_crosses_trees() {
        let trees = create_test_trees();
        let (tree, node) = trees.find_node("leaf").unwrap();
        assert_eq!(tree, "second");
        assert_eq!(node.id, "leaf");
        assert!(trees.find_node("missing").is_none());
    }

    #[test]
    fn test_dangling_references() {
        let trees = create_test_trees();
        let dangling = trees.dangling_references();
        assert_eq!(
            dangling,
            vec![DanglingReference {
                tree: "first".to_string(),
                node: "start".to_string(),
                missing: "missing".to_string(),
            }]
        );
    }

    #[test]
    fn test_longest_path() {
        let trees = create_test_trees();
        // entry -> shared resolves to the terminal "shared" of the first tree
        assert_eq!(trees.longest_path("second", "entry"), 1);
        assert_eq!(trees.longest_path("first", "start"), 1);
        assert_eq!(trees.longest_path("first", "nowhere"), 0);
    }

    #[test]
    fn test_longest_path_survives_cycles() {
        let trees = DecisionTreeSet::new(vec![DecisionTree {
            key: "loop".to_string(),
            nodes: vec![node("a", vec![navigate("to b", "b")]), node("b", vec![navigate("to a", "a")])],
        }]);
        assert_eq!(trees.longest_path("loop", "a"), 2);
    }
}
