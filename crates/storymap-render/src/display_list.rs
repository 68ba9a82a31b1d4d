//! Display-list building.
//!
//! Paint order is nodes, then arcs, then selection halos, then the sweep
//! rectangle, so selection feedback always sits on top.

use crate::renderer::RenderContext;
use kurbo::{BezPath, Circle, Line, Point, Rect, Vec2};
use peniko::Color;
use storymap_core::{ChoiceTarget, EditorConfig};

/// Outline style.
#[derive(Debug, Clone, Copy)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub dashed: bool,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dashed: false,
        }
    }

    pub fn dashed(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dashed: true,
        }
    }
}

/// One thing to draw.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// A situation: its outline plus the text to lay out at its center.
    Node {
        circle: Circle,
        title: String,
        body: String,
        stroke: Stroke,
    },
    /// A choice leading to another node. `head` is a closed triangle to fill.
    Arc {
        shaft: Line,
        head: BezPath,
        label: String,
        stroke: Stroke,
    },
    /// A choice that ends the story.
    Terminal {
        glyph: Line,
        label: String,
        stroke: Stroke,
    },
    /// Ring around a selected node.
    Halo {
        circle: Circle,
        stroke: Stroke,
    },
    /// The rectangle being swept out.
    SweepRect {
        rect: Rect,
        stroke: Stroke,
    },
}

/// Shaft and head of an arrow between two node centers.
///
/// Both ends are pulled back to the node rims. Returns `None` when the rims
/// overlap and there is no room for an arrow.
pub fn arc_geometry(from: Point, to: Point, config: &EditorConfig) -> Option<(Line, BezPath)> {
    let radius = config.node_radius;
    let span = to - from;
    let length = span.hypot();
    if length < 2.0 * radius {
        return None;
    }

    let dir = span / length;
    let right = Vec2::new(-dir.y, dir.x);
    let start = from + dir * radius;
    let stop = to - dir * radius;
    let base = stop - dir * config.arrow_height;

    let mut head = BezPath::new();
    head.move_to(stop - dir * config.arrow_recess);
    head.line_to(base + right * config.arrow_width);
    head.line_to(base - right * config.arrow_width);
    head.close_path();

    Some((Line::new(start, base), head))
}

/// Build the draw commands for one frame.
pub fn build_display_list(ctx: &RenderContext) -> Vec<DrawCommand> {
    let graph = ctx.graph;
    let config = ctx.config;
    let mut commands = Vec::with_capacity(graph.len() * 2 + ctx.selection.len() + 1);

    for (_, node) in graph.iter() {
        commands.push(DrawCommand::Node {
            circle: Circle::new(node.position, config.node_radius),
            title: node.title().to_string(),
            body: node.body().to_string(),
            stroke: ctx.style.node,
        });
    }

    for (_, node) in graph.iter() {
        for choice in node.choices() {
            match graph.choice_target(choice) {
                ChoiceTarget::Node(dest) => {
                    // SAFETY: choice_target only resolves in-range destinations.
                    let target = unsafe { graph.node_unchecked(dest) }.position;
                    if let Some((shaft, head)) = arc_geometry(node.position, target, config) {
                        commands.push(DrawCommand::Arc {
                            shaft,
                            head,
                            label: choice.label.clone(),
                            stroke: ctx.style.arc,
                        });
                    }
                }
                ChoiceTarget::Terminal => {
                    let glyph = Line::new(
                        node.position,
                        node.position + Vec2::new(0.0, config.terminal_glyph_length),
                    );
                    commands.push(DrawCommand::Terminal {
                        glyph,
                        label: choice.label.clone(),
                        stroke: ctx.style.arc,
                    });
                }
            }
        }
    }

    for selected in ctx.selection.iter() {
        match graph.position(selected) {
            Ok(center) => commands.push(DrawCommand::Halo {
                circle: Circle::new(center, config.select_halo_radius),
                stroke: ctx.style.selection,
            }),
            Err(err) => log::warn!("skipping halo for stale selection entry: {}", err),
        }
    }

    if let Some(rect) = ctx.sweep_rect {
        commands.push(DrawCommand::SweepRect {
            rect,
            stroke: ctx.style.selection,
        });
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;
    use storymap_core::{Choice, NodeRef, Selection, StoryGraph};

    fn build(graph: &StoryGraph, selection: &Selection, sweep: Option<Rect>) -> Vec<DrawCommand> {
        let config = EditorConfig::default();
        let ctx = RenderContext::new(graph, selection, &config).with_sweep_rect(sweep);
        build_display_list(&ctx)
    }

    fn count(commands: &[DrawCommand], pred: impl Fn(&DrawCommand) -> bool) -> usize {
        commands.iter().filter(|cmd| pred(*cmd)).count()
    }

    fn approx(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn test_arrow_geometry() {
        let config = EditorConfig::default();
        let from = Point::new(0.0, 0.0);
        let (shaft, head) = arc_geometry(from, Point::new(100.0, 0.0), &config).unwrap();

        assert!(approx(shaft.p0, Point::new(30.0, 0.0)));
        assert!(approx(shaft.p1, Point::new(58.0, 0.0)));

        let points: Vec<Point> = head
            .elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(points.len(), 3);
        assert!(approx(points[0], Point::new(68.0, 0.0)));
        assert!(approx(points[1], Point::new(58.0, 6.0)));
        assert!(approx(points[2], Point::new(58.0, -6.0)));
    }

    #[test]
    fn test_no_arrow_between_overlapping_nodes() {
        let config = EditorConfig::default();
        let arrow = arc_geometry(Point::ZERO, Point::new(59.0, 0.0), &config);
        assert!(arrow.is_none());
    }

    #[test]
    fn test_demo_graph_draws_nodes_then_arc() {
        let commands = build(&StoryGraph::demo(), &Selection::new(), None);

        assert_eq!(commands.len(), 3);
        let titles: Vec<&str> = commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Node { title, .. } => Some(title.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
        match &commands[2] {
            DrawCommand::Arc { label, .. } => assert_eq!(label, "choice 1"),
            other => panic!("expected arc, got {other:?}"),
        }
    }

    #[test]
    fn test_terminal_choice_draws_glyph() {
        let mut graph = StoryGraph::demo();
        graph
            .node_mut(NodeRef::new(1))
            .unwrap()
            .choices
            .push(Choice::terminal("the end"));

        let commands = build(&graph, &Selection::new(), None);
        let glyph = commands
            .iter()
            .find_map(|cmd| match cmd {
                DrawCommand::Terminal { glyph, .. } => Some(*glyph),
                _ => None,
            })
            .unwrap();
        assert!(approx(glyph.p0, Point::new(200.0, 80.0)));
        assert!(approx(glyph.p1, Point::new(200.0, 100.0)));
    }

    #[test]
    fn test_arcs_follow_renumbered_targets() {
        let is_arc = |cmd: &DrawCommand| matches!(cmd, DrawCommand::Arc { .. });
        let is_terminal = |cmd: &DrawCommand| matches!(cmd, DrawCommand::Terminal { .. });

        let mut graph = StoryGraph::demo();
        graph
            .node_mut(NodeRef::new(0))
            .unwrap()
            .choices
            .push(Choice::new("ending", 2));
        graph.add_node(Point::new(400.0, 400.0));
        let before = build(&graph, &Selection::new(), None);
        assert_eq!(count(&before, is_arc), 2);

        graph.remove_node(NodeRef::new(1)).unwrap();
        let after = build(&graph, &Selection::new(), None);
        assert_eq!(count(&after, is_arc), 1);
        assert_eq!(count(&after, is_terminal), 0);
    }

    #[test]
    fn test_halos_and_sweep_on_top() {
        let graph = StoryGraph::demo();
        let mut selection = Selection::new();
        selection.insert(NodeRef::new(1));
        selection.insert(NodeRef::new(7));
        let sweep = Rect::new(0.0, 0.0, 10.0, 10.0);

        let commands = build(&graph, &selection, Some(sweep));

        assert_eq!(commands.len(), 5);
        match &commands[3] {
            DrawCommand::Halo { circle, stroke } => {
                assert!(approx(circle.center, Point::new(200.0, 80.0)));
                assert!((circle.radius - 36.0).abs() < f64::EPSILON);
                assert!(stroke.dashed);
            }
            other => panic!("expected halo, got {other:?}"),
        }
        match &commands[4] {
            DrawCommand::SweepRect { rect, .. } => assert_eq!(rect.area(), sweep.area()),
            other => panic!("expected sweep rect, got {other:?}"),
        }
    }
}
