//! Domain layer: workout records, their validation and domain errors.

pub mod models;
pub mod validation;
pub mod errors;

pub use models::*;
pub use validation::*;
pub use errors::*;
