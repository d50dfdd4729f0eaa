//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait the terminal frontend implements.
//! It provides a unified interface for event polling, rendering, and cleanup.

pub mod events;
pub mod tui;

use crate::core::AppCore;
use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

/// Frontend trait
///
/// The Frontend trait separates rendering concerns from business logic.
/// The core never sees terminal types; it only receives converted events
/// and is read back during `render`.
pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events (keyboard, resize, paste) converted to
    /// the frontend-agnostic `FrontendEvent` enum. Empty if nothing arrived
    /// within the poll timeout.
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current application state
    ///
    /// Called once per loop iteration. Mutable because the frontend takes
    /// pending form seeds and feedback from the core while drawing.
    fn render(&mut self, core: &mut AppCore) -> Result<()>;

    /// Restore the terminal before the application exits
    fn cleanup(&mut self) -> Result<()>;

    /// Current terminal size in characters as `(width, height)`
    fn size(&self) -> (u16, u16);
}
