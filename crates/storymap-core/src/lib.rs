//! Storymap Core Library
//!
//! Platform-agnostic data structures and interaction logic for editing a
//! branching-narrative graph: situations connected by labeled choices.

pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod graph;
pub mod input;
pub mod selection;
pub mod session;

pub use config::{EditorConfig, ModifyKey};
pub use controller::{Effect, Gesture, InteractionController};
pub use editor::{ChoiceRow, NodeDraft};
pub use error::{ConfigError, ConfigResult, GraphError, GraphResult};
pub use graph::{Choice, ChoiceTarget, Node, NodeRef, StoryGraph, TERMINAL_DEST};
pub use input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use selection::{SelectMode, Selection};
pub use session::{DragOutcome, DragSession, RectSelectSession, TickSchedule};
