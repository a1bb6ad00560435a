//! Shared types for the delivery workspace
//!
//! Models, error types and small utilities used by delivery-core and by the
//! UI layer that consumes its decisions.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
