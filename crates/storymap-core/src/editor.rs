//! Draft state for the node property editor.
//!
//! The editor works on a copy of the node. Choice rows can be added, removed
//! and switched off freely; nothing reaches the graph until the draft is
//! accepted, at which point title, body and the enabled rows are written in
//! one go.

use crate::error::GraphResult;
use crate::graph::{Choice, NodeRef, StoryGraph, shift_after_removal};

/// One editable choice row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceRow {
    pub label: String,
    pub dest: usize,
    /// Disabled rows are kept in the draft but not written back.
    pub enabled: bool,
}

impl From<&Choice> for ChoiceRow {
    fn from(choice: &Choice) -> Self {
        Self {
            label: choice.label.clone(),
            dest: choice.dest,
            enabled: true,
        }
    }
}

/// Uncommitted edits to a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDraft {
    node: NodeRef,
    pub title: String,
    pub body: String,
    rows: Vec<ChoiceRow>,
}

impl NodeDraft {
    /// Copy a node's editable fields into a new draft.
    pub fn open(graph: &StoryGraph, node: NodeRef) -> GraphResult<Self> {
        let data = graph.node(node)?;
        Ok(Self {
            node,
            title: data.title().to_string(),
            body: data.body().to_string(),
            rows: data.choices().iter().map(ChoiceRow::from).collect(),
        })
    }

    /// The node this draft was opened on.
    pub fn node(&self) -> NodeRef {
        self.node
    }

    pub fn rows(&self) -> &[ChoiceRow] {
        &self.rows
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut ChoiceRow> {
        self.rows.get_mut(index)
    }

    /// Append an enabled row and return its index.
    pub fn add_row(&mut self, label: impl Into<String>, dest: usize) -> usize {
        self.rows.push(ChoiceRow {
            label: label.into(),
            dest,
            enabled: true,
        });
        self.rows.len() - 1
    }

    pub fn remove_row(&mut self, index: usize) -> Option<ChoiceRow> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    /// Enable or disable a row. Returns false if there is no such row.
    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                row.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// The choices this draft would write, in row order.
    pub fn choices(&self) -> Vec<Choice> {
        self.rows
            .iter()
            .filter(|row| row.enabled)
            .map(|row| Choice::new(row.label.clone(), row.dest))
            .collect()
    }

    /// Remap the draft after `removed` was deleted from the graph.
    ///
    /// The draft's own node and every row destination shift the same way
    /// the graph shifts its choices, and rows that led to the removed node
    /// are dropped. Returns false if the draft's own node was removed.
    pub fn follow_removal(&mut self, removed: NodeRef) -> bool {
        let Some(node) = self.node.after_removal(removed) else {
            return false;
        };
        self.node = node;
        self.rows.retain_mut(|row| match shift_after_removal(row.dest, removed.index()) {
            Some(dest) => {
                row.dest = dest;
                true
            }
            None => false,
        });
        true
    }

    /// Write the draft to its node.
    pub fn accept(self, graph: &mut StoryGraph) -> GraphResult<()> {
        let choices = self.choices();
        let node = graph.node_mut(self.node)?;
        node.set_title(self.title);
        node.set_body(self.body);
        node.set_choices(choices);
        log::debug!("editor accepted for node {}", self.node.index());
        Ok(())
    }

    /// Discard the draft.
    pub fn reject(self) {
        log::debug!("editor rejected for node {}", self.node.index());
    }
}
