//! Services Module
//!
//! Resolution pipeline: restrictions, vendor zones, and the decision facade.

pub mod decision;
pub mod restriction;
pub mod vendor_zone;

pub use decision::DeliveryDecisionService;
pub use restriction::{RestrictionOutcome, RestrictionResolver};
pub use vendor_zone::{VendorZoneResolver, ZoneSummary};
