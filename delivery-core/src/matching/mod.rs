//! Zone Matching Module
//!
//! Decides whether a customer postal code belongs to a zone. Shared by the
//! product restriction and vendor zone resolvers.

pub mod matcher;
mod rule;

pub use matcher::{CustomerMatcher, matches, matches_async, matches_with_location, parse_logged};
pub use rule::{ZoneConfigError, ZoneRule, validate_zone_value};
