//! Postal Code Module
//!
//! Cached lookup of city / IBGE region for a postal code (CEP), plus the HTTP
//! geocoding adapter used when the local table does not know a code.

mod lookup;
mod viacep;

pub use lookup::{DEFAULT_CACHE_CAPACITY, PostalCodeLookup};
pub use viacep::{DEFAULT_VIACEP_URL, ViaCepClient};
