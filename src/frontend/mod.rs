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
/// Frontends read the view model from [`AppCore`] and feed input back as
/// `FrontendEvent`s.
pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events (keyboard, mouse, resize) converted to the
    /// frontend-agnostic `FrontendEvent` enum, or an empty list if none arrived.
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current application state
    fn render(&mut self, core: &AppCore) -> Result<()>;

    /// Restore the terminal before the application exits
    fn cleanup(&mut self) -> Result<()>;

    /// Get current terminal size in characters
    fn size(&self) -> (u16, u16);
}
