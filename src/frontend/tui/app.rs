use crate::core::input_router::FormHit;
use crate::core::AppCore;
use crate::frontend::tui::generator_form::GeneratorForm;
use crate::frontend::{Frontend, FrontendEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// TUI Frontend using ratatui
///
/// This frontend renders the generator form using ratatui (terminal UI library)
/// and handles events via crossterm.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    poll_timeout: Duration,
    form: GeneratorForm,
    restored: bool,
}

impl TuiFrontend {
    /// Create a new TUI frontend
    ///
    /// Initializes terminal in raw mode, enables mouse capture, and enters alternate screen.
    pub fn new() -> Result<Self> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            poll_timeout: Duration::from_millis(16), // ~60 FPS
            form: GeneratorForm::new(),
            restored: false,
        })
    }

    /// Set poll timeout (for controlling frame rate)
    pub fn set_poll_timeout(&mut self, timeout: Duration) {
        self.poll_timeout = timeout;
    }

    /// Map a mouse event onto the form as it was last drawn
    pub fn mouse_hit(&mut self, kind: MouseEventKind, x: u16, y: u16) -> Option<FormHit> {
        self.form.handle_mouse(kind, x, y)
    }

    /// Convert crossterm event to FrontendEvent
    fn convert_event(event: Event) -> Option<FrontendEvent> {
        match event {
            Event::Key(key_event) => {
                // Only process key press events (ignore repeats and releases)
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(FrontendEvent::key(key_event.code, key_event.modifiers))
            }
            Event::Mouse(mouse_event) => Some(FrontendEvent::mouse(
                mouse_event.kind,
                mouse_event.column,
                mouse_event.row,
                mouse_event.modifiers,
            )),
            Event::Resize(w, h) => Some(FrontendEvent::resize(w, h)),
            _ => None,
        }
    }
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let mut events = Vec::new();

        // Block up to the timeout for the first event, then drain without waiting
        let mut timeout = self.poll_timeout;
        while event::poll(timeout)? {
            if let Some(frontend_event) = Self::convert_event(event::read()?) {
                events.push(frontend_event);
            }
            timeout = Duration::ZERO;
        }

        Ok(events)
    }

    fn render(&mut self, core: &AppCore) -> Result<()> {
        let view = core.controller.view_model();
        let focus = core.focus;
        let ui = &core.config.ui;
        let form = &mut self.form;

        self.terminal.draw(|f| {
            let area = f.area();
            form.render(area, f.buffer_mut(), &view, focus, ui);
        })?;

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        let size = self.terminal.size().unwrap_or_default();
        (size.width, size.height)
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent};

    #[test]
    fn test_convert_key_press() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE));
        assert_eq!(
            TuiFrontend::convert_event(event),
            Some(FrontendEvent::key(KeyCode::Char('g'), KeyModifiers::NONE))
        );
    }

    #[test]
    fn test_convert_ignores_key_release() {
        let mut key = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(TuiFrontend::convert_event(Event::Key(key)), None);
    }

    #[test]
    fn test_convert_mouse_and_resize() {
        let mouse = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 9,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            TuiFrontend::convert_event(mouse),
            Some(FrontendEvent::mouse(
                MouseEventKind::Down(MouseButton::Left),
                12,
                9,
                KeyModifiers::NONE
            ))
        );
        assert_eq!(
            TuiFrontend::convert_event(Event::Resize(80, 24)),
            Some(FrontendEvent::resize(80, 24))
        );
        assert_eq!(TuiFrontend::convert_event(Event::FocusGained), None);
    }
}
