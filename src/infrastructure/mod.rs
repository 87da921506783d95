//! Infrastructure layer providing external service integrations.
//!
//! Durable storage, position lookup and log output live here, behind the
//! narrow interfaces the application layer consumes.

pub mod persistence;
pub mod geolocation;
pub mod logging;

pub use persistence::*;
pub use geolocation::*;
pub use logging::*;
