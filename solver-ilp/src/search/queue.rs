//! Open-node frontier for B&B tree exploration.

use std::collections::VecDeque;

use super::SearchNode;
use crate::settings::NodeSelection;

/// Chooses which open node to explore next.
///
/// `open` is in insertion order and never empty when this is called.
pub trait NodeSelector {
    /// Return the position of the selected node in `open`.
    fn select(&self, open: &VecDeque<SearchNode>) -> usize;
}

impl NodeSelector for NodeSelection {
    fn select(&self, open: &VecDeque<SearchNode>) -> usize {
        match self {
            NodeSelection::BestFirst => {
                // Greatest relaxation objective, first occurrence on ties
                let mut best = 0;
                for (i, node) in open.iter().enumerate().skip(1) {
                    if node.obj_val > open[best].obj_val {
                        best = i;
                    }
                }
                best
            }
            NodeSelection::DepthFirst => open.len() - 1,
            NodeSelection::BreadthFirst => 0,
        }
    }
}

/// Set of open (unexplored) nodes.
///
/// The only materialized part of the search tree: nodes are dropped once
/// popped and branched.
pub struct Frontier<S: NodeSelector = NodeSelection> {
    /// Node selection strategy.
    selector: S,

    /// Open nodes in insertion order.
    nodes: VecDeque<SearchNode>,
}

impl<S: NodeSelector> Frontier<S> {
    /// Create an empty frontier with the given strategy.
    pub fn new(selector: S) -> Self {
        Self {
            selector,
            nodes: VecDeque::new(),
        }
    }

    /// Add a node to the frontier.
    pub fn push(&mut self, node: SearchNode) {
        self.nodes.push_back(node);
    }

    /// Remove and return the next node to explore.
    pub fn pop(&mut self) -> Option<SearchNode> {
        if self.nodes.is_empty() {
            return None;
        }
        let idx = self.selector.select(&self.nodes);
        self.nodes.remove(idx)
    }

    /// Greatest relaxation objective among open nodes (None if empty).
    pub fn best_bound(&self) -> Option<f64> {
        self.nodes.iter().map(|n| n.obj_val).reduce(f64::max)
    }

    /// Check if the frontier is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the number of open nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
