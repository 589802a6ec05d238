// crates/mht-runtime/src/session.rs
//! Cursor over a decision tree: the current node plus the labels of every
//! option chosen so far.

use mht_core::{DecisionOption, DecisionTreeNode, DecisionTreeSet, RiskTier};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Decision node '{0}' not found")]
    UnknownNode(String),

    #[error("Decision tree entry {tree}/{root} not found")]
    UnknownEntry { tree: String, root: String },

    #[error("Guideline '{0}' has no decision tree")]
    NoDecisionTree(String),

    #[error("Option {index} not available at '{node}' ({available} options)")]
    NoSuchOption {
        node: String,
        index: usize,
        available: usize,
    },

    #[error("An outcome is showing; start over or acknowledge it first")]
    OutcomePending,
}

/// Outcome surfaced by an outcome option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub label: String,
    pub text: String,
    pub risk_tier: Option<RiskTier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<'a> {
    /// Moved to a node. `terminal` is set when it has no further options.
    Moved {
        node: &'a DecisionTreeNode,
        terminal: bool,
    },
    Outcome(DecisionOutcome),
}

#[derive(Debug, Clone)]
pub struct DecisionSession<'a> {
    trees: &'a DecisionTreeSet,
    root_tree: &'a str,
    root: &'a DecisionTreeNode,
    current_tree: &'a str,
    current: &'a DecisionTreeNode,
    path: Vec<String>,
    outcome: Option<DecisionOutcome>,
}

impl<'a> DecisionSession<'a> {
    pub fn start(trees: &'a DecisionTreeSet, tree: &str, root: &str) -> Result<Self, SessionError> {
        let (root_tree, root_node) = trees
            .tree(tree)
            .and_then(|found| found.node(root).map(|node| (found.key.as_str(), node)))
            .ok_or_else(|| SessionError::UnknownEntry {
                tree: tree.to_string(),
                root: root.to_string(),
            })?;

        Ok(Self {
            trees,
            root_tree,
            root: root_node,
            current_tree: root_tree,
            current: root_node,
            path: Vec::new(),
            outcome: None,
        })
    }

    pub fn current(&self) -> &'a DecisionTreeNode {
        self.current
    }

    pub fn current_tree(&self) -> &'a str {
        self.current_tree
    }

    /// Labels of the chosen options, one per transition.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn pending_outcome(&self) -> Option<&DecisionOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some() || self.current.is_terminal()
    }

    /// Apply the option at `index` of the current node. On error the session
    /// is left exactly as it was.
    pub fn choose(&mut self, index: usize) -> Result<Step<'a>, SessionError> {
        if self.outcome.is_some() {
            return Err(SessionError::OutcomePending);
        }

        let current = self.current;
        let option = current
            .options
            .get(index)
            .ok_or_else(|| SessionError::NoSuchOption {
                node: current.id.clone(),
                index,
                available: current.options.len(),
            })?;

        match option {
            DecisionOption::Navigate { text, next_node_id } => {
                let Some((tree, node)) = self.trees.find_node(next_node_id) else {
                    warn!(
                        "Option '{}' at {}/{} points at unknown node '{}'",
                        text, self.current_tree, current.id, next_node_id
                    );
                    return Err(SessionError::UnknownNode(next_node_id.clone()));
                };

                debug!("Decision moved {} -> {}/{}", current.id, tree, node.id);
                self.current_tree = tree;
                self.current = node;
                self.path.push(text.clone());
                Ok(Step::Moved {
                    node,
                    terminal: node.is_terminal(),
                })
            }
            DecisionOption::Outcome {
                text,
                outcome_text,
                risk_tier,
            } => {
                let outcome = DecisionOutcome {
                    label: text.clone(),
                    text: outcome_text.clone(),
                    risk_tier: *risk_tier,
                };
                self.path.push(text.clone());
                self.outcome = Some(outcome.clone());
                Ok(Step::Outcome(outcome))
            }
        }
    }

    /// Back to the root with an empty path.
    pub fn start_over(&mut self) {
        self.current_tree = self.root_tree;
        self.current = self.root;
        self.path.clear();
        self.outcome = None;
    }

    /// Dismiss a pending outcome, keeping the cursor and path.
    pub fn acknowledge(&mut self) -> Option<DecisionOutcome> {
        self.outcome.take()
    }
}
