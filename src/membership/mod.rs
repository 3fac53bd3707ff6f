//! Membership lifecycle model
//!
//! The membership record tracks a party's admission status on the network
//! (pending, active, suspended; revocation removes the record) and the
//! roles it holds. Roles are immutable bundles of administrative
//! permissions; the union of a record's role permissions decides which
//! lifecycle transitions its holder may authorize.
//!
//! Everything here is pure data plus side-effect-free predicates. The
//! transaction-verification layer consults the predicates and treats a
//! false answer as a hard rejection of the attempted transition.

mod record;
mod roles;

pub use record::{MembershipProjection, MembershipRecord, MembershipStatus, QuerySchema};
pub use roles::{Permission, Role};
