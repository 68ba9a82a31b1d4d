//! Rubber-band rectangle selection.

use crate::graph::StoryGraph;
use crate::selection::{SelectMode, Selection};
use kurbo::{Point, Rect};

/// An active rectangle sweep over the canvas background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectSelectSession {
    /// Corner where the pointer went down.
    pub start: Point,
    /// Corner following the pointer.
    pub current: Point,
}

impl RectSelectSession {
    /// Start a sweep with both corners at `pointer`.
    pub fn begin(pointer: Point) -> Self {
        log::debug!("sweep began at ({}, {})", pointer.x, pointer.y);
        Self {
            start: pointer,
            current: pointer,
        }
    }

    /// The swept rectangle, normalized.
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.start, self.current)
    }

    /// Move the trailing corner. Returns false if it did not change.
    pub fn update(&mut self, pointer: Point) -> bool {
        if pointer == self.current {
            return false;
        }
        self.current = pointer;
        true
    }

    /// Finish the sweep at `pointer` and apply it to the selection.
    pub fn commit(
        mut self,
        graph: &StoryGraph,
        selection: &mut Selection,
        pointer: Point,
        mode: SelectMode,
    ) -> Rect {
        self.update(pointer);
        let rect = self.rect();
        selection.select_in_rect(graph, rect, mode);
        log::debug!("sweep committed ({:?}), {} selected", mode, selection.len());
        rect
    }

    /// Abandon the sweep. The selection is not touched.
    pub fn cancel(self) {
        log::debug!("sweep cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeRef;

    fn graph() -> StoryGraph {
        let mut graph = StoryGraph::new();
        graph.add_node(Point::new(10.0, 10.0));
        graph.add_node(Point::new(40.0, 40.0));
        graph.add_node(Point::new(90.0, 90.0));
        graph
    }

    #[test]
    fn test_rect_is_normalized() {
        let mut sweep = RectSelectSession::begin(Point::new(50.0, 50.0));
        assert!(sweep.update(Point::new(0.0, 60.0)));
        assert_eq!(sweep.rect(), Rect::new(0.0, 50.0, 50.0, 60.0));
        assert!(!sweep.update(Point::new(0.0, 60.0)));
    }

    #[test]
    fn test_commit_replace() {
        let graph = graph();
        let mut selection = Selection::new();
        selection.insert(NodeRef::new(2));

        let sweep = RectSelectSession::begin(Point::new(40.0, 40.0));
        let rect = sweep.commit(&graph, &mut selection, Point::ZERO, SelectMode::Replace);

        assert_eq!(rect, Rect::new(0.0, 0.0, 40.0, 40.0));
        assert_eq!(selection.as_slice(), &[NodeRef::new(0), NodeRef::new(1)]);
    }

    #[test]
    fn test_commit_modify() {
        let graph = graph();
        let mut selection = Selection::new();
        selection.replace_with([NodeRef::new(0), NodeRef::new(2)]);

        let mut sweep = RectSelectSession::begin(Point::new(0.0, 0.0));
        sweep.update(Point::new(20.0, 20.0));
        let end = Point::new(50.0, 50.0);
        sweep.commit(&graph, &mut selection, end, SelectMode::Modify);

        assert_eq!(selection.as_slice(), &[NodeRef::new(2), NodeRef::new(1)]);
    }

    #[test]
    fn test_cancel_keeps_selection() {
        let graph = graph();
        let mut selection = Selection::new();
        selection.insert(NodeRef::new(1));

        let mut sweep = RectSelectSession::begin(Point::ZERO);
        sweep.update(Point::new(100.0, 100.0));
        sweep.cancel();

        assert_eq!(selection.as_slice(), &[NodeRef::new(1)]);
        assert_eq!(graph.len(), 3);
    }
}
