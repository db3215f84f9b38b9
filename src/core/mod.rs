//! Core business logic layer
//!
//! This module contains password generation, the form state machine and
//! input routing. NO imports from frontend/ or rendering code.
//! Core updates data structures in the data layer, frontends read and render.

pub mod app_core;
pub mod form_controller;
pub mod generator;
pub mod input_router;

pub use app_core::AppCore;
pub use generator::generate;
