//! The story graph: situations (nodes) connected by labeled choices (arcs).
//!
//! Node identity is its position in the node sequence. Adding a node appends
//! and never renumbers; removing a node shifts every later index down by one
//! and rewrites choice destinations so that each surviving choice still leads
//! to the same situation it did before.

use crate::error::{GraphError, GraphResult};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Destination used by [`Choice::terminal`]. Never a valid node index.
pub const TERMINAL_DEST: usize = usize::MAX;

/// Where an index ends up after the node at `removed` is deleted.
///
/// Returns `None` when `index` addressed the removed node itself. This is the
/// single shift rule shared by choice destinations, selections and drags.
pub fn shift_after_removal(index: usize, removed: usize) -> Option<usize> {
    match index.cmp(&removed) {
        Ordering::Less => Some(index),
        Ordering::Equal => None,
        Ordering::Greater => Some(index - 1),
    }
}

/// A handle to a node, valid until the next removal unless remapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeRef(usize);

impl NodeRef {
    /// Create a reference addressing the given index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The addressed index.
    pub fn index(self) -> usize {
        self.0
    }

    /// Remap this reference across the removal of `removed`.
    pub fn after_removal(self, removed: NodeRef) -> Option<NodeRef> {
        shift_after_removal(self.0, removed.0).map(NodeRef)
    }
}

/// A labeled choice leading out of a node.
///
/// A destination that is not a valid node index under the current node count
/// denotes an ending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Text shown for this choice.
    pub label: String,
    /// Index of the node this choice leads to.
    pub dest: usize,
}

impl Choice {
    /// Create a choice leading to `dest`.
    pub fn new(label: impl Into<String>, dest: usize) -> Self {
        Self {
            label: label.into(),
            dest,
        }
    }

    /// Create a choice that ends the story.
    pub fn terminal(label: impl Into<String>) -> Self {
        Self::new(label, TERMINAL_DEST)
    }
}

/// What a choice resolves to under the current node count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceTarget {
    Node(NodeRef),
    Terminal,
}

/// A story situation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Center of the node on the canvas.
    pub position: Point,
    pub title: String,
    pub body: String,
    /// Outgoing choices, in display order.
    pub choices: Vec<Choice>,
}

impl Node {
    /// Create an empty node at the given position.
    pub fn new(position: Point) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Replace the whole outgoing choice list at once.
    pub fn set_choices(&mut self, choices: Vec<Choice>) {
        self.choices = choices;
    }
}

/// The branching-narrative graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryGraph {
    nodes: Vec<Node>,
    /// Current-state cursor. Not validated against the node count.
    state: usize,
}

impl StoryGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Two-node starter graph: "first" leads to "second" via "choice 1".
    pub fn demo() -> Self {
        let mut graph = Self::new();
        let first = graph.add_node(Point::new(50.0, 50.0));
        let second = graph.add_node(Point::new(200.0, 80.0));
        if let Ok(node) = graph.node_mut(first) {
            node.set_title("first");
            node.set_body("hello this is bob");
            node.choices.push(Choice::new("choice 1", second.index()));
        }
        if let Ok(node) = graph.node_mut(second) {
            node.set_title("second");
            node.set_body("hello this is fred");
        }
        graph
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the current-state cursor.
    pub fn state(&self) -> usize {
        self.state
    }

    /// Set the current-state cursor. Callers are responsible for bounds.
    pub fn set_state(&mut self, state: usize) {
        self.state = state;
    }

    /// Check whether a reference addresses an existing node.
    pub fn contains(&self, node: NodeRef) -> bool {
        node.0 < self.nodes.len()
    }

    fn check(&self, node: NodeRef) -> GraphResult<usize> {
        if self.contains(node) {
            Ok(node.0)
        } else {
            Err(GraphError::OutOfRange {
                index: node.0,
                len: self.nodes.len(),
            })
        }
    }

    /// Append an empty node at `position` and return its reference.
    pub fn add_node(&mut self, position: Point) -> NodeRef {
        self.nodes.push(Node::new(position));
        let node = NodeRef(self.nodes.len() - 1);
        log::debug!("added node {} at ({}, {})", node.0, position.x, position.y);
        node
    }

    /// Remove a node and return it.
    ///
    /// Choices elsewhere that led to the removed node are deleted. Choices
    /// leading to later nodes are renumbered so they keep their target, and
    /// terminal choices stay terminal.
    pub fn remove_node(&mut self, node: NodeRef) -> GraphResult<Node> {
        let index = self.check(node)?;
        let removed = self.nodes.remove(index);

        let mut dropped = 0usize;
        for remaining in &mut self.nodes {
            remaining.choices.retain_mut(|choice| match shift_after_removal(choice.dest, index) {
                Some(dest) => {
                    choice.dest = dest;
                    true
                }
                None => {
                    dropped += 1;
                    false
                }
            });
        }

        log::debug!(
            "removed node {} ({:?}); dropped {} incoming choices",
            index,
            removed.title,
            dropped
        );
        Ok(removed)
    }

    /// Get a node with bounds checking.
    pub fn node(&self, node: NodeRef) -> GraphResult<&Node> {
        let index = self.check(node)?;
        Ok(&self.nodes[index])
    }

    /// Get a mutable node with bounds checking.
    pub fn node_mut(&mut self, node: NodeRef) -> GraphResult<&mut Node> {
        let index = self.check(node)?;
        Ok(&mut self.nodes[index])
    }

    /// Get a node without bounds checking.
    ///
    /// # Safety
    ///
    /// `node` must address an existing node (`node.index() < self.len()`).
    /// Calling this with a stale or out-of-range reference is undefined
    /// behavior.
    pub unsafe fn node_unchecked(&self, node: NodeRef) -> &Node {
        debug_assert!(self.contains(node));
        // SAFETY: upheld by the caller.
        unsafe { self.nodes.get_unchecked(node.0) }
    }

    /// Get a mutable node without bounds checking.
    ///
    /// # Safety
    ///
    /// Same contract as [`StoryGraph::node_unchecked`].
    pub unsafe fn node_unchecked_mut(&mut self, node: NodeRef) -> &mut Node {
        debug_assert!(self.contains(node));
        // SAFETY: upheld by the caller.
        unsafe { self.nodes.get_unchecked_mut(node.0) }
    }

    /// Get a node's position.
    pub fn position(&self, node: NodeRef) -> GraphResult<Point> {
        Ok(self.node(node)?.position)
    }

    /// Move a node.
    pub fn set_position(&mut self, node: NodeRef, position: Point) -> GraphResult<()> {
        self.node_mut(node)?.position = position;
        Ok(())
    }

    /// Get a node's outgoing choices.
    pub fn choices(&self, node: NodeRef) -> GraphResult<&[Choice]> {
        Ok(self.node(node)?.choices())
    }

    /// Replace a node's outgoing choices atomically.
    pub fn set_choices(&mut self, node: NodeRef, choices: Vec<Choice>) -> GraphResult<()> {
        self.node_mut(node)?.set_choices(choices);
        Ok(())
    }

    /// Check whether a choice ends the story under the current node count.
    pub fn is_terminal(&self, choice: &Choice) -> bool {
        choice.dest >= self.nodes.len()
    }

    /// Resolve a choice against the current node count.
    pub fn choice_target(&self, choice: &Choice) -> ChoiceTarget {
        if self.is_terminal(choice) {
            ChoiceTarget::Terminal
        } else {
            ChoiceTarget::Node(NodeRef(choice.dest))
        }
    }

    /// Find the lowest-index node whose center lies within `radius` of `point`.
    pub fn find_node_containing(&self, point: Point, radius: f64) -> Option<NodeRef> {
        let sqr_radius = radius * radius;
        self.nodes
            .iter()
            .position(|node| (point - node.position).hypot2() <= sqr_radius)
            .map(NodeRef)
    }

    /// All nodes whose center lies inside `rect`, boundary included, in index order.
    pub fn nodes_in_rect(&self, rect: Rect) -> Vec<NodeRef> {
        self.iter()
            .filter(|(_, node)| contains_inclusive(rect, node.position))
            .map(|(node, _)| node)
            .collect()
    }

    /// Iterate nodes with their references, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeRef, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeRef(i), node))
    }

    /// References to every node, in index order.
    pub fn node_refs(&self) -> impl Iterator<Item = NodeRef> + use<> {
        (0..self.nodes.len()).map(NodeRef)
    }

    /// Bounding box of all node centers.
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.nodes.iter().map(|node| node.position);
        let first = points.next()?;
        let start = Rect::from_points(first, first);
        Some(points.fold(start, |rect, p| rect.union_pt(p)))
    }

    /// Serialize the graph to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a graph from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Closed-interval point containment; points on any edge count as inside.
pub fn contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}
