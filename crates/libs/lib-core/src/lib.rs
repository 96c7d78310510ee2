//! # Core Library
//!
//! Core models, query building, database access, configuration, and the
//! application error type for the marketplace backend.

pub mod clock;
pub mod config;
pub mod dto;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use clock::{Clock, IdGenerator, ManualClock, SequentialIds, SystemClock, UuidV7Ids};
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{create_pool, DbPool};
