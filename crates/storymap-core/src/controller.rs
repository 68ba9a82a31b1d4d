//! Routes pointer and keyboard input to gestures and graph edits.
//!
//! The controller owns the graph, the selection and whichever gesture is in
//! progress. It is the only place that performs structural edits while
//! references are held, so it is also where those references get remapped.

use crate::config::EditorConfig;
use crate::editor::NodeDraft;
use crate::error::{GraphError, GraphResult};
use crate::graph::{Node, NodeRef, StoryGraph};
use crate::input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent};
use crate::selection::{SelectMode, Selection};
use crate::session::{DragSession, Instant, RectSelectSession, TickSchedule};
use kurbo::{Point, Rect};

/// The gesture in progress. At most one exists at a time.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(DragSession),
    Sweeping(RectSelectSession),
}

/// A UI-level side effect the host should carry out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Nothing changed.
    None,
    /// Visible state changed; repaint.
    Redraw,
    /// Open the property editor for this node.
    OpenEditor(NodeRef),
    /// Open the background context menu at this point.
    OpenContextMenu(Point),
}

/// Interaction state for one story map.
#[derive(Debug, Clone)]
pub struct InteractionController {
    graph: StoryGraph,
    selection: Selection,
    gesture: Gesture,
    config: EditorConfig,
    input: InputState,
    drag_ticks: TickSchedule,
    sweep_ticks: TickSchedule,
    /// Where the background context menu was opened.
    context_point: Option<Point>,
    /// Draft for the node whose editor is open.
    editor: Option<NodeDraft>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(StoryGraph::new(), EditorConfig::default())
    }
}

impl InteractionController {
    /// Create a controller over an existing graph.
    pub fn new(graph: StoryGraph, config: EditorConfig) -> Self {
        Self {
            graph,
            selection: Selection::new(),
            gesture: Gesture::Idle,
            drag_ticks: TickSchedule::new(config.drag_interval()),
            sweep_ticks: TickSchedule::new(config.select_interval()),
            config,
            input: InputState::new(),
            context_point: None,
            editor: None,
        }
    }

    pub fn graph(&self) -> &StoryGraph {
        &self.graph
    }

    /// Give up the graph.
    pub fn into_graph(self) -> StoryGraph {
        self.graph
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging(_))
    }

    pub fn is_sweeping(&self) -> bool {
        matches!(self.gesture, Gesture::Sweeping(_))
    }

    /// The sweep rectangle while a sweep is in progress.
    pub fn sweep_rect(&self) -> Option<Rect> {
        match &self.gesture {
            Gesture::Sweeping(sweep) => Some(sweep.rect()),
            _ => None,
        }
    }

    /// Record the pointer position without an event, for hosts that sample
    /// the cursor on each tick.
    pub fn set_pointer_position(&mut self, position: Point) {
        self.input.pointer_position = position;
    }

    /// Update modifier keys state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.input.modifiers = modifiers;
    }

    fn select_mode(&self) -> SelectMode {
        SelectMode::from_modifier(self.config.modify_key.is_held(self.input.modifiers))
    }

    /// Mutable access to a node's non-structural fields.
    pub fn node_mut(&mut self, node: NodeRef) -> GraphResult<&mut Node> {
        self.graph.node_mut(node)
    }

    // --- pointer and keyboard ---

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Effect {
        self.input.handle_pointer_event(&event);
        match event {
            PointerEvent::Down { position, button } => match button {
                MouseButton::Left => self.press(position),
                MouseButton::Right => self.context_press(position),
                MouseButton::Middle => Effect::None,
            },
            PointerEvent::Up { position, button } if button == MouseButton::Left => {
                self.release(position)
            }
            PointerEvent::Move { position } => self.advance(position),
            PointerEvent::DoubleClick { position, button } if button == MouseButton::Left => {
                self.double_click(position)
            }
            _ => Effect::None,
        }
    }

    /// Process a key event.
    pub fn handle_key_event(&mut self, event: KeyEvent) -> Effect {
        let KeyEvent::Pressed(key) = event else {
            return Effect::None;
        };
        match key.as_str() {
            "Escape" => {
                if self.cancel_gesture() {
                    Effect::Redraw
                } else {
                    Effect::None
                }
            }
            "Delete" | "Backspace" => match self.delete_selected() {
                Ok(0) => Effect::None,
                Ok(_) => Effect::Redraw,
                Err(err) => {
                    log::warn!("delete refused: {}", err);
                    Effect::None
                }
            },
            "a" | "A" if self.config.modify_key.is_held(self.input.modifiers) => {
                self.select_all();
                Effect::Redraw
            }
            _ => Effect::None,
        }
    }

    fn press(&mut self, position: Point) -> Effect {
        if !matches!(self.gesture, Gesture::Idle) {
            return Effect::None;
        }
        let now = Instant::now();
        match self.graph.find_node_containing(position, self.config.node_radius) {
            Some(node) => {
                let Some(drag) = DragSession::begin(&self.graph, &self.selection, node, position)
                else {
                    return Effect::None;
                };
                self.gesture = Gesture::Dragging(drag);
                self.drag_ticks.arm(now);
            }
            None => {
                self.gesture = Gesture::Sweeping(RectSelectSession::begin(position));
                self.sweep_ticks.arm(now);
            }
        }
        Effect::Redraw
    }

    fn context_press(&mut self, position: Point) -> Effect {
        if !matches!(self.gesture, Gesture::Idle) {
            return Effect::None;
        }
        if self.graph.find_node_containing(position, self.config.node_radius).is_some() {
            return Effect::None;
        }
        self.context_point = Some(position);
        Effect::OpenContextMenu(position)
    }

    fn release(&mut self, position: Point) -> Effect {
        let mode = self.select_mode();
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => Effect::None,
            Gesture::Dragging(drag) => {
                self.drag_ticks.disarm();
                let outcome = drag.commit(&mut self.graph, position);
                if !outcome.moved && self.graph.contains(outcome.anchor) {
                    self.selection.select_node(outcome.anchor, mode);
                }
                Effect::Redraw
            }
            Gesture::Sweeping(sweep) => {
                self.sweep_ticks.disarm();
                sweep.commit(&self.graph, &mut self.selection, position, mode);
                Effect::Redraw
            }
        }
    }

    fn double_click(&mut self, position: Point) -> Effect {
        let cancelled = self.is_dragging() && self.cancel_gesture();

        match self.graph.find_node_containing(position, self.config.node_radius) {
            Some(node) => match self.open_editor(node) {
                Ok(_) => Effect::OpenEditor(node),
                Err(err) => {
                    log::warn!("could not open editor: {}", err);
                    Effect::None
                }
            },
            None if cancelled => Effect::Redraw,
            None => Effect::None,
        }
    }

    /// Feed a pointer position to the active gesture.
    fn advance(&mut self, position: Point) -> Effect {
        let changed = match &mut self.gesture {
            Gesture::Idle => false,
            Gesture::Dragging(drag) => drag.update(&mut self.graph, position),
            Gesture::Sweeping(sweep) => sweep.update(position),
        };
        if changed {
            Effect::Redraw
        } else {
            Effect::None
        }
    }

    /// Advance the active gesture to the last known pointer position.
    pub fn tick(&mut self) -> Effect {
        self.advance(self.input.pointer_position)
    }

    /// Tick if the active gesture's schedule is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Effect {
        let due = match self.gesture {
            Gesture::Idle => false,
            Gesture::Dragging(_) => self.drag_ticks.due(now),
            Gesture::Sweeping(_) => self.sweep_ticks.due(now),
        };
        if due { self.tick() } else { Effect::None }
    }

    /// Cancel whatever gesture is in progress. Returns true if one was.
    pub fn cancel_gesture(&mut self) -> bool {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => false,
            Gesture::Dragging(drag) => {
                self.drag_ticks.disarm();
                drag.cancel(&mut self.graph);
                true
            }
            Gesture::Sweeping(sweep) => {
                self.sweep_ticks.disarm();
                sweep.cancel();
                true
            }
        }
    }

    // --- selection ---

    pub fn select_all(&mut self) {
        self.selection.replace_with(self.graph.node_refs());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- structural edits ---

    /// Append a node. Appending never shifts existing references, so this
    /// is allowed during any gesture.
    pub fn add_node(&mut self, position: Point) -> NodeRef {
        self.graph.add_node(position)
    }

    /// Add a node where the background context menu was opened.
    pub fn add_node_from_context_menu(&mut self) -> Option<NodeRef> {
        let point = self.context_point.take()?;
        Some(self.add_node(point))
    }

    fn check_removal(&self, node: NodeRef) -> GraphResult<()> {
        if !self.graph.contains(node) {
            return Err(GraphError::OutOfRange {
                index: node.index(),
                len: self.graph.len(),
            });
        }
        if let Gesture::Dragging(drag) = &self.gesture {
            if drag.conflicts_with_removal(node) {
                return Err(GraphError::Busy {
                    index: node.index(),
                });
            }
        }
        Ok(())
    }

    /// Remove a node and remap every reference the controller holds.
    pub fn remove_node(&mut self, node: NodeRef) -> GraphResult<Node> {
        self.check_removal(node)?;
        let removed = self.graph.remove_node(node)?;
        self.selection.invalidate_following_removal(node);
        if let Some(draft) = &mut self.editor {
            if !draft.follow_removal(node) {
                log::debug!("closing editor: node {} was removed", node.index());
                self.editor = None;
            }
        }
        Ok(removed)
    }

    /// Remove every selected node. Returns how many were removed.
    pub fn delete_selected(&mut self) -> GraphResult<usize> {
        let mut doomed: Vec<NodeRef> = self
            .selection
            .iter()
            .filter(|&n| self.graph.contains(n))
            .collect();
        // highest first, so the remaining entries keep their indices
        doomed.sort_unstable_by(|a, b| b.cmp(a));
        if let Some(&lowest) = doomed.last() {
            self.check_removal(lowest)?;
        }
        for &node in &doomed {
            self.remove_node(node)?;
        }
        if !doomed.is_empty() {
            log::info!("deleted {} selected nodes", doomed.len());
        }
        Ok(doomed.len())
    }

    // --- editor ---

    /// Open the property editor on a node, replacing any open draft.
    pub fn open_editor(&mut self, node: NodeRef) -> GraphResult<&mut NodeDraft> {
        let draft = NodeDraft::open(&self.graph, node)?;
        if let Some(previous) = self.editor.take() {
            previous.reject();
        }
        Ok(self.editor.insert(draft))
    }

    /// The open draft, kept in step with removals while it is open.
    pub fn editor(&self) -> Option<&NodeDraft> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut NodeDraft> {
        self.editor.as_mut()
    }

    /// Write the open draft back to its node and close the editor.
    pub fn commit_editor(&mut self) -> GraphResult<()> {
        let draft = self.editor.take().ok_or(GraphError::EditorClosed)?;
        draft.accept(&mut self.graph)
    }

    /// Close the editor without applying the draft. Returns true if one was open.
    pub fn cancel_editor(&mut self) -> bool {
        match self.editor.take() {
            Some(draft) => {
                draft.reject();
                true
            }
            None => false,
        }
    }
}
