//! UI State - generator settings and the last generated password
//!
//! This module contains UI state that is independent of rendering.
//! The controller mutates it, frontends read the derived view model.

use std::fmt;

/// Slider lower bound
pub const MIN_LENGTH: usize = 4;
/// Slider upper bound
pub const MAX_LENGTH: usize = 32;
/// Slider position at mount
pub const DEFAULT_LENGTH: usize = 8;

/// Text shown in the result box before anything is generated
pub const PLACEHOLDER: &str = "CLICK GENERATE";

/// Character classes that can contribute to the sampling pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digits,
    Symbols,
}

impl CharClass {
    /// Pool assembly order
    pub const ALL: [CharClass; 4] = [
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Digits,
        CharClass::Symbols,
    ];

    /// Order the toggles appear in the form
    pub const DISPLAY_ORDER: [CharClass; 4] = [
        CharClass::Uppercase,
        CharClass::Lowercase,
        CharClass::Digits,
        CharClass::Symbols,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Lowercase => "Include Lowercase",
            Self::Uppercase => "Include Uppercase",
            Self::Digits => "Include Numbers",
            Self::Symbols => "Include Symbols",
        }
    }
}

/// Length plus per-class toggles fed to the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub length: usize,
    pub include_lowercase: bool,
    pub include_uppercase: bool,
    pub include_digits: bool,
    pub include_symbols: bool,
}

impl GeneratorConfig {
    pub fn is_enabled(&self, class: CharClass) -> bool {
        match class {
            CharClass::Lowercase => self.include_lowercase,
            CharClass::Uppercase => self.include_uppercase,
            CharClass::Digits => self.include_digits,
            CharClass::Symbols => self.include_symbols,
        }
    }

    pub fn toggle(&mut self, class: CharClass) {
        let flag = match class {
            CharClass::Lowercase => &mut self.include_lowercase,
            CharClass::Uppercase => &mut self.include_uppercase,
            CharClass::Digits => &mut self.include_digits,
            CharClass::Symbols => &mut self.include_symbols,
        };
        *flag = !*flag;
    }

    /// True when no class is enabled
    pub fn pool_is_empty(&self) -> bool {
        !CharClass::ALL.iter().any(|c| self.is_enabled(*c))
    }

    /// Clamp a raw slider value into the accepted range
    pub fn clamp_length(value: i64) -> usize {
        value.clamp(MIN_LENGTH as i64, MAX_LENGTH as i64) as usize
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            include_lowercase: true,
            include_uppercase: true,
            include_digits: true,
            include_symbols: false,
        }
    }
}

/// One generation result. Replaced wholesale, never edited.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedPassword(String);

impl GeneratedPassword {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Keep secrets out of log lines that format state with {:?}
impl fmt::Debug for GeneratedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeneratedPassword(<{} chars>)", self.len())
    }
}

/// Copy feedback phase of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing generated, placeholder shown
    #[default]
    Idle,
    /// Password shown with the "click to copy" hint
    Generated,
    /// Password copied, "copied" hint shown
    Copied,
}

/// Widget state from mount to unmount
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiState {
    pub config: GeneratorConfig,
    pub password: Option<GeneratedPassword>,
    pub phase: Phase,
}

impl UiState {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            password: None,
            phase: Phase::Idle,
        }
    }

    /// What the result box shows right now
    pub fn displayed_text(&self) -> &str {
        match &self.password {
            Some(password) if !password.is_empty() => password.as_str(),
            _ => PLACEHOLDER,
        }
    }

    /// Copy is only meaningful once a real password is on screen
    pub fn has_copyable_password(&self) -> bool {
        let shown = self.displayed_text();
        !shown.is_empty() && shown != PLACEHOLDER
    }
}
