//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod membership;
pub mod tracks;

pub use membership::{MembershipError, MembershipService};
pub use tracks::TrackService;
