//! Presentation layer handling terminal UI and user input.
//!
//! This module lays out the terminal screen with ratatui, draws the form,
//! workout list and map, and turns keyboard and mouse input into calls on
//! the application state.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
