//! Overlapping panels gesture engine
//!
//! A draggable three-panel layout for touch UIs: a fixed center panel
//! flanked by a start and an end panel that slide in from beneath it. This
//! crate is the gesture-to-state translation engine only: it turns a raw
//! stream of pointer events into a continuous center offset and a discrete
//! panel state per side, handling locking, fling detection, layout
//! direction, animation, and exclusion regions where child content owns
//! the gesture. Rendering, accessibility, and state persistence stay with
//! the host.
//!
//! The entry point is [`PanelsController`]: feed it pointer events via
//! [`PanelsController::handle_pointer_event`], drive animation from the
//! frame clock via [`PanelsController::tick`], and observe side panel
//! state through registered listeners.

pub mod animation;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod gesture;
pub mod listener;
pub mod state;
pub mod tracing;
pub mod velocity;

// Re-export commonly used types
pub use config::{LayoutDirection, PanelsConfig};
pub use controller::{EventClaim, PanelsController};
pub use geometry::{Rect, Viewport};
pub use gesture::{PointerEvent, PointerKind};
pub use listener::ListenerId;
pub use state::{LockState, Panel, PanelState, Side};
