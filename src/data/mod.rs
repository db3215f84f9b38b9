//! Data layer - Pure state without UI coupling
//!
//! Holds the generator settings, the widget state, and the view model derived
//! from it. NO imports from frontend/ or any rendering code.

pub mod ui_state;
pub mod view_model;

pub use ui_state::*;
