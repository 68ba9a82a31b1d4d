//! Interactive gestures.
//!
//! A session exists only between its begin and its commit or cancel. Each
//! session type is the payload of the active state; the idle state is the
//! absence of a session, so there is no "active but empty" value to guard
//! against.

mod drag;
mod sweep;
mod tick;

pub use drag::{DragEntry, DragOutcome, DragSession};
pub use sweep::RectSelectSession;
pub use tick::{Instant, TickSchedule};
