//! mapty - Terminal Workout Log Library
//!
//! Log runs and rides against positions on a map, keep them in a list, and
//! persist them between sessions.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;
pub mod config;

pub use domain::*;
pub use application::*;
