//! Moving one node, or the whole selection, with the pointer.

use crate::graph::{NodeRef, StoryGraph};
use crate::selection::Selection;
use kurbo::{Point, Vec2};

/// A captured node and where it was when the drag began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEntry {
    pub node: NodeRef,
    pub origin: Point,
}

/// An active drag. Dropping it without [`commit`](Self::commit) or
/// [`cancel`](Self::cancel) leaves nodes wherever the last update put them.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// The node the pointer went down on.
    anchor: NodeRef,
    /// Pointer position at begin.
    start: Point,
    /// Pointer position at the last update.
    current: Point,
    /// Latched on the first update that sees the pointer move at all.
    moved: bool,
    entries: Vec<DragEntry>,
}

/// What a finished drag did.
#[derive(Debug, Clone, PartialEq)]
pub struct DragOutcome {
    pub anchor: NodeRef,
    /// Whether the pointer moved at any point during the drag.
    pub moved: bool,
    /// Net displacement applied to every captured node.
    pub delta: Vec2,
    /// Nodes that were still captured at the end.
    pub nodes: Vec<NodeRef>,
}

impl DragSession {
    /// Start dragging `anchor`.
    ///
    /// If the anchor is selected the whole selection moves with it; otherwise
    /// only the anchor moves and the selection is left untouched. Returns
    /// `None` if the anchor does not address a node.
    pub fn begin(
        graph: &StoryGraph,
        selection: &Selection,
        anchor: NodeRef,
        pointer: Point,
    ) -> Option<Self> {
        let Ok(anchor_node) = graph.node(anchor) else {
            log::warn!("drag refused: node {} does not exist", anchor.index());
            return None;
        };

        let entries: Vec<DragEntry> = if selection.contains(anchor) {
            selection
                .iter()
                .filter_map(|node| {
                    graph
                        .position(node)
                        .ok()
                        .map(|origin| DragEntry { node, origin })
                })
                .collect()
        } else {
            vec![DragEntry {
                node: anchor,
                origin: anchor_node.position,
            }]
        };

        log::debug!(
            "drag began on node {} with {} nodes",
            anchor.index(),
            entries.len()
        );
        Some(Self {
            anchor,
            start: pointer,
            current: pointer,
            moved: false,
            entries,
        })
    }

    pub fn anchor(&self) -> NodeRef {
        self.anchor
    }

    /// Pointer position when the drag began.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Whether the pointer has moved since the drag began.
    pub fn moved(&self) -> bool {
        self.moved
    }

    /// Captured nodes with their starting positions.
    pub fn entries(&self) -> &[DragEntry] {
        &self.entries
    }

    /// Net pointer displacement since begin.
    pub fn delta(&self) -> Vec2 {
        self.current - self.start
    }

    /// Check if removing `node` would delete or shift any captured reference.
    pub fn conflicts_with_removal(&self, node: NodeRef) -> bool {
        self.entries.iter().any(|entry| entry.node >= node)
    }

    /// Move every captured node by the displacement from the start point.
    ///
    /// Returns false without touching the graph if the pointer has not moved
    /// since the last update. Entries whose node no longer exists are dropped.
    pub fn update(&mut self, graph: &mut StoryGraph, pointer: Point) -> bool {
        if pointer == self.current {
            return false;
        }
        self.current = pointer;
        self.moved = true;

        let delta = self.delta();
        self.entries.retain(|entry| match graph.set_position(entry.node, entry.origin + delta) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("dropping node {} from drag: {}", entry.node.index(), err);
                false
            }
        });
        true
    }

    /// Apply a final update at `pointer` and finish.
    pub fn commit(mut self, graph: &mut StoryGraph, pointer: Point) -> DragOutcome {
        self.update(graph, pointer);
        log::debug!(
            "drag committed: {} nodes by ({}, {})",
            self.entries.len(),
            self.delta().x,
            self.delta().y
        );
        DragOutcome {
            anchor: self.anchor,
            moved: self.moved,
            delta: self.delta(),
            nodes: self.entries.iter().map(|entry| entry.node).collect(),
        }
    }

    /// Put every captured node back where it started.
    pub fn cancel(self, graph: &mut StoryGraph) -> DragOutcome {
        let start = self.start;
        log::debug!("drag cancelled on node {}", self.anchor.index());
        self.commit(graph, start)
    }
}
