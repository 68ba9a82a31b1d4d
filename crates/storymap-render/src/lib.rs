//! Storymap Render Library
//!
//! Turns a story map and its interaction state into a display list of
//! geometric draw commands. Backends implement [`Renderer`] and decide how
//! those commands become pixels.

mod display_list;
mod renderer;

pub use display_list::{DrawCommand, Stroke, arc_geometry, build_display_list};
pub use renderer::{RecordingRenderer, RenderContext, RenderStyle, Renderer};
