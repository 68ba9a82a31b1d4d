//! Ordered, duplicate-free node selection.

use crate::graph::{NodeRef, StoryGraph};
use kurbo::Rect;

/// How a selection gesture combines with the existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectMode {
    /// Clear first, then select.
    #[default]
    Replace,
    /// Toggle each affected node in or out.
    Modify,
}

impl SelectMode {
    /// `Modify` when the modify key is held, `Replace` otherwise.
    pub fn from_modifier(held: bool) -> Self {
        if held {
            SelectMode::Modify
        } else {
            SelectMode::Replace
        }
    }
}

/// The set of currently selected nodes.
///
/// Entries keep the order in which they were added. Like every [`NodeRef`]
/// holder, a selection must be remapped with
/// [`Selection::invalidate_following_removal`] whenever a node is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    nodes: Vec<NodeRef>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check if a node is selected.
    pub fn contains(&self, node: NodeRef) -> bool {
        self.nodes.contains(&node)
    }

    /// Selected nodes in selection order.
    pub fn as_slice(&self) -> &[NodeRef] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.nodes.iter().copied()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Append a node if it is not already selected. Returns true if added.
    pub fn insert(&mut self, node: NodeRef) -> bool {
        if self.contains(node) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    /// Remove a node, keeping the order of the rest. Returns true if it was selected.
    pub fn remove(&mut self, node: NodeRef) -> bool {
        match self.nodes.iter().position(|&n| n == node) {
            Some(pos) => {
                self.nodes.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove the node if selected, append it otherwise.
    pub fn toggle(&mut self, node: NodeRef) {
        if !self.remove(node) {
            self.nodes.push(node);
        }
    }

    /// Clear, then select the given nodes in order, skipping duplicates.
    pub fn replace_with(&mut self, nodes: impl IntoIterator<Item = NodeRef>) {
        self.nodes.clear();
        for node in nodes {
            self.insert(node);
        }
    }

    /// Apply a single-node click selection.
    pub fn select_node(&mut self, node: NodeRef, mode: SelectMode) {
        match mode {
            SelectMode::Replace => self.replace_with([node]),
            SelectMode::Modify => self.toggle(node),
        }
    }

    /// Select every node whose center lies in `rect`, boundary included.
    pub fn select_in_rect(&mut self, graph: &StoryGraph, rect: Rect, mode: SelectMode) {
        let hits = graph.nodes_in_rect(rect);
        match mode {
            SelectMode::Replace => self.replace_with(hits),
            SelectMode::Modify => {
                for node in hits {
                    self.toggle(node);
                }
            }
        }
    }

    /// Drop the removed node and shift later entries down, exactly as
    /// choice destinations are shifted.
    pub fn invalidate_following_removal(&mut self, removed: NodeRef) {
        self.nodes.retain_mut(|node| match node.after_removal(removed) {
            Some(shifted) => {
                *node = shifted;
                true
            }
            None => false,
        });
    }

}
