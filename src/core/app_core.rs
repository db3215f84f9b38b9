use crate::clipboard;
use crate::config::Config;
use crate::core::form_controller::{Effect, FormController};
use crate::core::generator::IndexSource;
use crate::core::input_router::{self, FormField, FormHit, FormInput};
use crossterm::event::KeyEvent;
use rand::rngs::ThreadRng;

/// Core application state (frontend-agnostic)
///
/// AppCore owns the form controller plus the bits of interaction state that
/// are not part of the widget itself: which field has focus and whether the
/// app is still running. Frontends feed it input and read its view model.
pub struct AppCore<R: IndexSource = ThreadRng> {
    /// Application configuration
    pub config: Config,

    /// Widget state machine
    pub controller: FormController<R>,

    /// Field receiving keyboard input
    pub focus: FormField,

    /// Application running flag
    pub running: bool,

    /// Set whenever something visible changed
    pub needs_render: bool,
}

impl AppCore<ThreadRng> {
    /// Mount the form with settings from config and the thread-local RNG
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: IndexSource> AppCore<R> {
    pub fn with_rng(config: Config, rng: R) -> Self {
        let controller = FormController::new(config.generator_config(), rng);
        Self {
            config,
            controller,
            focus: FormField::default(),
            running: true,
            needs_render: true,
        }
    }

    /// Route a key press and run whatever it asks for
    pub fn handle_key(&mut self, key: KeyEvent) {
        let length = self.controller.state().config.length;
        if let Some(input) = input_router::route_key(key, self.focus, length) {
            let effects = self.handle_input(input);
            self.apply_effects(effects);
        }
    }

    /// Handle a click or drag on a form element
    pub fn handle_hit(&mut self, hit: FormHit) {
        self.focus = hit.field();
        let effects = self.handle_input(FormInput::Action(hit.action()));
        self.apply_effects(effects);
    }

    /// Update state for one input and return the effects it produced
    pub fn handle_input(&mut self, input: FormInput) -> Vec<Effect> {
        self.needs_render = true;
        match input {
            FormInput::Quit => {
                tracing::info!("Quit requested");
                self.running = false;
                Vec::new()
            }
            FormInput::Focus(field) => {
                self.focus = field;
                Vec::new()
            }
            FormInput::Action(action) => {
                tracing::debug!("Dispatching {:?}", action);
                self.controller.dispatch(action)
            }
        }
    }

    /// Perform side effects. Clipboard failures are logged, never surfaced.
    pub fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CopyToClipboard(text) => clipboard::copy_quietly(&text),
            }
        }
    }
}
