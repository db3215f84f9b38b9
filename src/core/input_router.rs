//! Input routing for the generator form
//!
//! Routes keyboard input to a [`FormInput`] based on:
//! - Which field currently has focus
//! - Global shortcuts that work from any field

use crate::core::form_controller::Action;
use crate::data::ui_state::{CharClass, MAX_LENGTH, MIN_LENGTH};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Slider step for PageUp/PageDown
const PAGE_STEP: i64 = 4;

/// Focusable parts of the form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Slider,
    Toggle(CharClass),
    Generate,
    Result,
}

impl FormField {
    pub const ORDER: [FormField; 7] = [
        FormField::Slider,
        FormField::Toggle(CharClass::Uppercase),
        FormField::Toggle(CharClass::Lowercase),
        FormField::Toggle(CharClass::Digits),
        FormField::Toggle(CharClass::Symbols),
        FormField::Generate,
        FormField::Result,
    ];

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    /// Tab: go forwards with wraparound
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// Shift+Tab: go backwards with wraparound
    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

/// What a key press or click means for the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormInput {
    Action(Action),
    Focus(FormField),
    Quit,
}

/// Part of the form under the mouse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormHit {
    /// Slider track, with the length under the pointer
    Slider(i64),
    Toggle(CharClass),
    Generate,
    Result,
}

impl FormHit {
    pub fn field(&self) -> FormField {
        match self {
            FormHit::Slider(_) => FormField::Slider,
            FormHit::Toggle(class) => FormField::Toggle(*class),
            FormHit::Generate => FormField::Generate,
            FormHit::Result => FormField::Result,
        }
    }

    pub fn action(&self) -> Action {
        match self {
            FormHit::Slider(length) => Action::ChangeLength(*length),
            FormHit::Toggle(class) => Action::ToggleClass(*class),
            FormHit::Generate => Action::Generate,
            FormHit::Result => Action::Copy,
        }
    }
}

/// Route a key event given the focused field and the current slider value
pub fn route_key(key: KeyEvent, focus: FormField, length: usize) -> Option<FormInput> {
    let length = length as i64;

    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(FormInput::Quit)
        }
        KeyCode::Esc | KeyCode::Char('q') => Some(FormInput::Quit),
        KeyCode::Tab | KeyCode::Down => Some(FormInput::Focus(focus.next())),
        KeyCode::BackTab | KeyCode::Up => Some(FormInput::Focus(focus.prev())),
        KeyCode::Char('g') => Some(FormInput::Action(Action::Generate)),
        KeyCode::Char('c') => Some(FormInput::Action(Action::Copy)),
        KeyCode::Left if focus == FormField::Slider => {
            Some(FormInput::Action(Action::ChangeLength(length - 1)))
        }
        KeyCode::Right if focus == FormField::Slider => {
            Some(FormInput::Action(Action::ChangeLength(length + 1)))
        }
        KeyCode::PageDown if focus == FormField::Slider => {
            Some(FormInput::Action(Action::ChangeLength(length - PAGE_STEP)))
        }
        KeyCode::PageUp if focus == FormField::Slider => {
            Some(FormInput::Action(Action::ChangeLength(length + PAGE_STEP)))
        }
        KeyCode::Home if focus == FormField::Slider => {
            Some(FormInput::Action(Action::ChangeLength(MIN_LENGTH as i64)))
        }
        KeyCode::End if focus == FormField::Slider => {
            Some(FormInput::Action(Action::ChangeLength(MAX_LENGTH as i64)))
        }
        KeyCode::Char(' ') | KeyCode::Enter => match focus {
            FormField::Toggle(class) => Some(FormInput::Action(Action::ToggleClass(class))),
            FormField::Generate => Some(FormInput::Action(Action::Generate)),
            FormField::Result => Some(FormInput::Action(Action::Copy)),
            FormField::Slider => None,
        },
        _ => None,
    }
}
