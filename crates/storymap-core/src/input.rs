//! Pointer and keyboard input events.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Pointer event, in canvas coordinates.
///
/// Hosts deliver `DoubleClick` in place of the second `Down` of a double
/// click, followed by the usual `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    DoubleClick {
        position: Point,
        button: MouseButton,
    },
}

impl PointerEvent {
    /// Where the event happened.
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::DoubleClick { position, .. } => position,
        }
    }
}

/// Keyboard event type. Keys are named ("Escape", "Delete", "a").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Pointer and modifier state as last reported by the host.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last known pointer position; sampled by session ticks.
    pub pointer_position: Point,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        self.pointer_position = event.position();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_track_position() {
        let mut input = InputState::new();

        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        assert_eq!(input.pointer_position, Point::new(100.0, 100.0));

        input.handle_pointer_event(&PointerEvent::Move {
            position: Point::new(3.0, 4.0),
        });
        assert_eq!(input.pointer_position, Point::new(3.0, 4.0));
    }
}
