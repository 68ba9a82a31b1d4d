//! Renderer trait abstraction.

use crate::display_list::{DrawCommand, Stroke, build_display_list};
use kurbo::Rect;
use peniko::Color;
use storymap_core::{EditorConfig, InteractionController, Selection, StoryGraph};

/// Colors and stroke widths for each kind of element.
#[derive(Debug, Clone, Copy)]
pub struct RenderStyle {
    pub background: Color,
    pub node: Stroke,
    pub arc: Stroke,
    /// Used for selection halos and the sweep rectangle.
    pub selection: Stroke,
}

impl Default for RenderStyle {
    fn default() -> Self {
        let black = Color::from_rgba8(0, 0, 0, 255);
        Self {
            background: Color::from_rgba8(255, 255, 255, 255),
            node: Stroke::solid(black, 3.0),
            arc: Stroke::solid(black, 3.0),
            selection: Stroke::dashed(Color::from_rgba8(0xef, 0xb1, 0x2b, 255), 3.0),
        }
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    pub graph: &'a StoryGraph,
    pub selection: &'a Selection,
    /// Sweep rectangle while a rectangle selection is in progress.
    pub sweep_rect: Option<Rect>,
    pub config: &'a EditorConfig,
    pub style: RenderStyle,
}

impl<'a> RenderContext<'a> {
    /// Create a render context with the default style and no sweep.
    pub fn new(graph: &'a StoryGraph, selection: &'a Selection, config: &'a EditorConfig) -> Self {
        Self {
            graph,
            selection,
            sweep_rect: None,
            config,
            style: RenderStyle::default(),
        }
    }

    /// Capture everything visible from a controller.
    pub fn from_controller(controller: &'a InteractionController) -> Self {
        Self::new(
            controller.graph(),
            controller.selection(),
            controller.config(),
        )
        .with_sweep_rect(controller.sweep_rect())
    }

    /// Set the sweep rectangle.
    pub fn with_sweep_rect(mut self, rect: Option<Rect>) -> Self {
        self.sweep_rect = rect;
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.style.background
    }
}

/// A renderer that keeps the last frame's display list.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded for the last frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Renderer for RecordingRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.commands = build_display_list(ctx);
    }
}
