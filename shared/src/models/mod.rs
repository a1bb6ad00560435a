//! Data models
//!
//! Shared between delivery-core and the UI layer (via serde).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64`.

pub mod decision;
pub mod delivery_zone;
pub mod postal_code;
pub mod product_restriction;

// Re-exports
pub use decision::*;
pub use delivery_zone::*;
pub use postal_code::*;
pub use product_restriction::*;
