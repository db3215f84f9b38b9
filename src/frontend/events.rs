//! Frontend-agnostic input events.
//!
//! The terminal frontend translates crossterm's event stream into this enum
//! so the event loop only handles one event shape.

use crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};

/// Events emitted by frontends, converted to this unified format
#[derive(Debug, Clone, PartialEq)]
pub enum FrontendEvent {
    /// Keyboard input
    Key {
        code: KeyCode,
        modifiers: KeyModifiers,
    },
    /// Mouse input
    Mouse {
        kind: MouseEventKind,
        x: u16,
        y: u16,
        modifiers: KeyModifiers,
    },
    /// Terminal resize
    Resize { width: u16, height: u16 },
}

impl FrontendEvent {
    /// Create a key event
    pub fn key(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::Key { code, modifiers }
    }

    /// Create a mouse event
    pub fn mouse(kind: MouseEventKind, x: u16, y: u16, modifiers: KeyModifiers) -> Self {
        Self::Mouse {
            kind,
            x,
            y,
            modifiers,
        }
    }

    /// Create a resize event
    pub fn resize(width: u16, height: u16) -> Self {
        Self::Resize { width, height }
    }
}
