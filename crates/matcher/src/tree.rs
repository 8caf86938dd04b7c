//! Fixed decision tree over the four similarity scores.
//!
//! The tree is data, not logic: an index-linked table of predicate nodes and
//! boolean leaves, built once and never mutated. The tuned topology ships as
//! [`DecisionTree::tuned`]; its cut points came out of offline tree
//! construction and are independent of any [`ThresholdConfig`].
//!
//! [`ThresholdConfig`]: crate::similarity::ThresholdConfig

use fingerprint::HashKind;
use serde::{Deserialize, Serialize};

use crate::types::{MatchError, SimilarityVector};

/// One node of a decision tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal predicate: `similarity[kind] <= threshold` selects
    /// `on_true`, otherwise `on_false`. Children are node-table indices.
    Branch {
        kind: HashKind,
        threshold: f64,
        on_true: usize,
        on_false: usize,
    },
    /// Terminal verdict.
    Leaf { verdict: bool },
}

/// An immutable, index-linked decision tree. Node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Build a tree from a node table, validating the topology: the table
    /// must be non-empty, every branch threshold finite, and every child
    /// index in range and strictly after its parent (which rules out cycles
    /// and guarantees traversal terminates).
    pub fn new(nodes: Vec<TreeNode>) -> Result<Self, MatchError> {
        if nodes.is_empty() {
            return Err(MatchError::InvalidTopology {
                node: 0,
                reason: "tree has no nodes".to_string(),
            });
        }
        for (index, node) in nodes.iter().enumerate() {
            if let TreeNode::Branch {
                threshold,
                on_true,
                on_false,
                ..
            } = node
            {
                if !threshold.is_finite() {
                    return Err(MatchError::InvalidTopology {
                        node: index,
                        reason: format!("non-finite threshold {threshold}"),
                    });
                }
                for child in [*on_true, *on_false] {
                    if child >= nodes.len() {
                        return Err(MatchError::InvalidTopology {
                            node: index,
                            reason: format!(
                                "child index {child} out of range for {} nodes",
                                nodes.len()
                            ),
                        });
                    }
                    if child <= index {
                        return Err(MatchError::InvalidTopology {
                            node: index,
                            reason: format!("child index {child} does not point forward"),
                        });
                    }
                }
            }
        }
        Ok(Self { nodes })
    }

    /// The hand-tuned production tree. The comparison direction (`<=`) and
    /// branch order of every node are load-bearing; changing either moves
    /// the classification boundary.
    pub fn tuned() -> Self {
        let branch = |kind, threshold, on_true, on_false| TreeNode::Branch {
            kind,
            threshold,
            on_true,
            on_false,
        };
        let leaf = |verdict| TreeNode::Leaf { verdict };
        Self::new(vec![
            branch(HashKind::Dhash, 0.334, 1, 3),
            branch(HashKind::Whash, 0.277, 5, 2),
            branch(HashKind::Nmfhash, 0.829, 6, 7),
            branch(HashKind::Nmfhash, 0.976, 4, 8),
            branch(HashKind::Phash, 0.347, 9, 10),
            leaf(true),
            leaf(false),
            leaf(true),
            leaf(true),
            leaf(true),
            leaf(false),
        ])
        .expect("tuned decision tree topology is valid")
    }

    /// Node table view, for audits and topology tests.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Evaluate the tree against a similarity vector.
    ///
    /// All four entries must be present and finite before traversal starts;
    /// an entry the traversal would not even touch still fails the
    /// precondition.
    pub fn evaluate(&self, sims: &SimilarityVector) -> Result<bool, MatchError> {
        for kind in HashKind::ALL {
            sims.require(kind)?;
        }
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { verdict } => return Ok(*verdict),
                TreeNode::Branch {
                    kind,
                    threshold,
                    on_true,
                    on_false,
                } => {
                    let score = sims.require(*kind)?;
                    index = if score <= *threshold { *on_true } else { *on_false };
                }
            }
        }
    }
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::tuned()
    }
}
