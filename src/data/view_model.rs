//! View model - everything a frontend needs to draw the form
//!
//! Derived from [`UiState`] on demand. Frontends project it onto whatever
//! surface they own and never look at the raw state.

use super::ui_state::{CharClass, Phase, UiState, MAX_LENGTH, MIN_LENGTH};

pub const TITLE: &str = "Password Generator";
pub const RESULT_TITLE: &str = "Generated Password";
pub const GENERATE_LABEL: &str = "Generate Password";
pub const COPY_HINT: &str = "click to copy";
pub const COPIED_HINT: &str = "copied";
pub const EMPTY_POOL_WARNING: &str = "Select at least one character set";

/// One checkbox row
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleRow {
    pub class: CharClass,
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub title: &'static str,
    pub result_title: &'static str,
    pub result_text: String,
    pub length: usize,
    pub length_label: String,
    pub slider_min: usize,
    pub slider_max: usize,
    /// 0.0 at the minimum, 100.0 at the maximum
    pub slider_fill_percent: f64,
    pub toggles: Vec<ToggleRow>,
    pub copy_hint_visible: bool,
    pub copied_visible: bool,
    pub copy_enabled: bool,
    pub pool_empty: bool,
}

impl ViewModel {
    pub fn from_state(state: &UiState) -> Self {
        let length = state.config.length;
        Self {
            title: TITLE,
            result_title: RESULT_TITLE,
            result_text: state.displayed_text().to_string(),
            length,
            length_label: format!("length: {}", length),
            slider_min: MIN_LENGTH,
            slider_max: MAX_LENGTH,
            slider_fill_percent: fill_percent(length),
            toggles: CharClass::DISPLAY_ORDER
                .iter()
                .map(|class| ToggleRow {
                    class: *class,
                    label: class.label(),
                    checked: state.config.is_enabled(*class),
                })
                .collect(),
            copy_hint_visible: state.phase == Phase::Generated,
            copied_visible: state.phase == Phase::Copied,
            copy_enabled: state.has_copyable_password(),
            pool_empty: state.config.pool_is_empty(),
        }
    }

    /// Text of whichever copy hint is showing, if any
    pub fn feedback_text(&self) -> Option<&'static str> {
        if self.copied_visible {
            Some(COPIED_HINT)
        } else if self.copy_hint_visible {
            Some(COPY_HINT)
        } else {
            None
        }
    }
}

/// Slider fill as `(value - min) / (max - min) * 100`
pub fn fill_percent(length: usize) -> f64 {
    let span = (MAX_LENGTH - MIN_LENGTH) as f64;
    ((length as f64 - MIN_LENGTH as f64) / span * 100.0).clamp(0.0, 100.0)
}
