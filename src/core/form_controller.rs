//! Form controller - turns user actions into state changes and side effects
//!
//! Every transition is `(old state, action) -> (new state, effects)`. Effects
//! are returned, never performed here, so the whole state machine can be
//! driven in tests without a terminal or a clipboard.

use crate::core::generator::{self, IndexSource};
use crate::data::ui_state::{CharClass, GeneratedPassword, GeneratorConfig, Phase, UiState};
use crate::data::view_model::ViewModel;

/// User intent, independent of how it was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Slider moved. Out-of-range values are clamped.
    ChangeLength(i64),
    ToggleClass(CharClass),
    Generate,
    Copy,
}

/// Side effect requested by a transition
#[derive(Clone, PartialEq, Eq)]
pub enum Effect {
    CopyToClipboard(String),
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::CopyToClipboard(text) => {
                write!(f, "CopyToClipboard(<{} chars>)", text.chars().count())
            }
        }
    }
}

/// Apply one action to a state.
pub fn transition<S: IndexSource + ?Sized>(
    mut state: UiState,
    action: Action,
    rng: &mut S,
) -> (UiState, Vec<Effect>) {
    let mut effects = Vec::new();

    match action {
        Action::ChangeLength(value) => {
            let length = GeneratorConfig::clamp_length(value);
            if length as i64 != value {
                tracing::debug!("Clamped length {} to {}", value, length);
            }
            state.config.length = length;
        }
        Action::ToggleClass(class) => {
            state.config.toggle(class);
            tracing::debug!("{:?} enabled: {}", class, state.config.is_enabled(class));
        }
        Action::Generate => match generator::generate(&state.config, rng) {
            Ok(password) if password.is_empty() => {
                // No class enabled: nothing to show
                state.password = None;
                state.phase = Phase::Idle;
            }
            Ok(password) => {
                state.password = Some(GeneratedPassword::new(password));
                state.phase = Phase::Generated;
            }
            Err(e) => {
                // Length is clamped on the way in, so this means a bad initial config
                tracing::warn!("Generate rejected: {}", e);
            }
        },
        Action::Copy => {
            if !state.has_copyable_password() {
                tracing::debug!("Copy ignored, nothing generated yet");
            } else if let Some(password) = &state.password {
                effects.push(Effect::CopyToClipboard(password.as_str().to_string()));
                state.phase = Phase::Copied;
            }
        }
    }

    (state, effects)
}

/// Owns the widget state and the random source for its lifetime
pub struct FormController<R: IndexSource> {
    state: UiState,
    rng: R,
}

impl<R: IndexSource> FormController<R> {
    /// Mount the widget with the given initial settings
    pub fn new(config: GeneratorConfig, rng: R) -> Self {
        Self {
            state: UiState::new(config),
            rng,
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let (state, effects) = transition(std::mem::take(&mut self.state), action, &mut self.rng);
        self.state = state;
        effects
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn view_model(&self) -> ViewModel {
        ViewModel::from_state(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ui_state::{MAX_LENGTH, MIN_LENGTH, PLACEHOLDER};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn controller() -> FormController<StdRng> {
        FormController::new(GeneratorConfig::default(), StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_initial_state_shows_placeholder() {
        let ctl = controller();
        assert_eq!(ctl.state().phase, Phase::Idle);
        assert_eq!(ctl.state().displayed_text(), PLACEHOLDER);
        assert!(ctl.state().password.is_none());
    }

    #[test]
    fn test_copy_before_generate_is_noop() {
        let mut ctl = controller();
        let before = ctl.state().clone();
        let effects = ctl.dispatch(Action::Copy);
        assert!(effects.is_empty());
        assert_eq!(ctl.state(), &before);
    }

    #[test]
    fn test_generate_shows_real_password() {
        let mut ctl = controller();
        let effects = ctl.dispatch(Action::Generate);
        assert!(effects.is_empty());
        assert_eq!(ctl.state().phase, Phase::Generated);

        let shown = ctl.state().displayed_text().to_string();
        assert_ne!(shown, PLACEHOLDER);
        assert_eq!(shown.chars().count(), 8);
    }

    #[test]
    fn test_copy_after_generate_emits_clipboard_write() {
        let mut ctl = controller();
        ctl.dispatch(Action::Generate);
        let password = ctl.state().displayed_text().to_string();

        let effects = ctl.dispatch(Action::Copy);
        assert_eq!(effects, vec![Effect::CopyToClipboard(password.clone())]);
        assert_eq!(ctl.state().phase, Phase::Copied);

        // Copying again writes again and stays in Copied
        let effects = ctl.dispatch(Action::Copy);
        assert_eq!(effects, vec![Effect::CopyToClipboard(password)]);
        assert_eq!(ctl.state().phase, Phase::Copied);
    }

    #[test]
    fn test_generate_after_copy_resets_feedback() {
        let mut ctl = controller();
        ctl.dispatch(Action::Generate);
        ctl.dispatch(Action::Copy);
        ctl.dispatch(Action::Generate);
        assert_eq!(ctl.state().phase, Phase::Generated);
    }

    #[test]
    fn test_change_length_clamps() {
        let mut ctl = controller();
        ctl.dispatch(Action::ChangeLength(3));
        assert_eq!(ctl.state().config.length, MIN_LENGTH);
        ctl.dispatch(Action::ChangeLength(33));
        assert_eq!(ctl.state().config.length, MAX_LENGTH);
        ctl.dispatch(Action::ChangeLength(20));
        assert_eq!(ctl.state().config.length, 20);

        ctl.dispatch(Action::Generate);
        assert_eq!(ctl.state().displayed_text().chars().count(), 20);
    }

    #[test]
    fn test_change_length_keeps_current_password() {
        let mut ctl = controller();
        ctl.dispatch(Action::Generate);
        let before = ctl.state().password.clone();
        ctl.dispatch(Action::ChangeLength(16));
        assert_eq!(ctl.state().password, before);
        assert_eq!(ctl.state().phase, Phase::Generated);
    }

    #[test]
    fn test_toggle_class_changes_pool() {
        let mut ctl = controller();
        ctl.dispatch(Action::ToggleClass(CharClass::Uppercase));
        ctl.dispatch(Action::ToggleClass(CharClass::Digits));
        ctl.dispatch(Action::ChangeLength(32));
        ctl.dispatch(Action::Generate);
        assert!(ctl
            .state()
            .displayed_text()
            .chars()
            .all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generate_with_no_class_returns_to_placeholder() {
        let mut ctl = controller();
        ctl.dispatch(Action::Generate);
        assert_eq!(ctl.state().phase, Phase::Generated);

        for class in [CharClass::Lowercase, CharClass::Uppercase, CharClass::Digits] {
            ctl.dispatch(Action::ToggleClass(class));
        }
        ctl.dispatch(Action::Generate);

        assert_eq!(ctl.state().phase, Phase::Idle);
        assert_eq!(ctl.state().displayed_text(), PLACEHOLDER);
        assert!(ctl.dispatch(Action::Copy).is_empty());
    }

    #[test]
    fn test_invalid_initial_length_leaves_state_untouched() {
        let config = GeneratorConfig {
            length: 64,
            ..GeneratorConfig::default()
        };
        let mut ctl = FormController::new(config, StdRng::seed_from_u64(0));
        ctl.dispatch(Action::Generate);
        assert_eq!(ctl.state().phase, Phase::Idle);
        assert!(ctl.state().password.is_none());
    }

    #[test]
    fn test_transition_is_pure_over_state() {
        let state = UiState::default();
        let mut rng = StdRng::seed_from_u64(11);
        let (next, effects) =
            transition(state.clone(), Action::ToggleClass(CharClass::Symbols), &mut rng);
        assert!(effects.is_empty());
        assert!(next.config.include_symbols);
        assert!(!state.config.include_symbols);
    }

    #[test]
    fn test_effect_debug_hides_password() {
        let effect = Effect::CopyToClipboard("s3cret!!".to_string());
        let shown = format!("{:?}", effect);
        assert!(!shown.contains("s3cret"));
    }
}
