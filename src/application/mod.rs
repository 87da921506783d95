//! Application layer managing state and workout workflows.
//!
//! This module coordinates between the domain layer and the presentation
//! layer: the workout collection, the entry form, the list and map views,
//! and the application state that ties them together.

pub mod form;
pub mod state;
pub mod store;
pub mod view;

pub use form::*;
pub use state::*;
pub use store::*;
pub use view::*;
