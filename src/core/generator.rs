//! Password generation
//!
//! Builds a character pool from the enabled classes and samples from it
//! uniformly with replacement. Randomness comes in through [`IndexSource`]
//! so callers (and tests) decide which generator backs it.

use crate::data::ui_state::{CharClass, GeneratorConfig, MAX_LENGTH, MIN_LENGTH};
use thiserror::Error;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*(){}[]=<>/,.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("password length {length} is outside {min}..={max}")]
    InvalidConfig {
        length: usize,
        min: usize,
        max: usize,
    },
}

/// Uniform random index provider
pub trait IndexSource {
    /// Return an index in `0..upper`. `upper` is never zero.
    fn next_index(&mut self, upper: usize) -> usize;
}

impl<R: rand::Rng> IndexSource for R {
    fn next_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// Characters contributed by a single class
pub fn class_chars(class: CharClass) -> &'static str {
    match class {
        CharClass::Lowercase => LOWERCASE,
        CharClass::Uppercase => UPPERCASE,
        CharClass::Digits => DIGITS,
        CharClass::Symbols => SYMBOLS,
    }
}

/// Concatenate the enabled classes in lowercase, uppercase, digits, symbols order
pub fn build_pool(config: &GeneratorConfig) -> Vec<char> {
    CharClass::ALL
        .iter()
        .filter(|class| config.is_enabled(**class))
        .flat_map(|class| class_chars(*class).chars())
        .collect()
}

/// Generate one password.
///
/// Returns an empty string when no class is enabled. The length check runs
/// first, so an out-of-range length is rejected even with an empty pool.
pub fn generate<S: IndexSource + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut S,
) -> Result<String, GeneratorError> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&config.length) {
        return Err(GeneratorError::InvalidConfig {
            length: config.length,
            min: MIN_LENGTH,
            max: MAX_LENGTH,
        });
    }

    let pool = build_pool(config);
    if pool.is_empty() {
        tracing::debug!("No character class enabled, returning empty password");
        return Ok(String::new());
    }

    let password: String = (0..config.length)
        .map(|_| pool[rng.next_index(pool.len())])
        .collect();

    tracing::debug!(
        "Generated {} chars from a pool of {}",
        config.length,
        pool.len()
    );
    Ok(password)
}
