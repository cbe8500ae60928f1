//! Domain models for the outreach platform
//!
//! Plain serde data structures shared between the server's persistence,
//! service, and HTTP layers. Wire field names (camelCase) are fixed here via
//! serde attributes; existing mobile clients depend on them, so changes to
//! renames are breaking.
//!
//! # Module Organization
//!
//! - `organization`: organizations and their type classification
//! - `practitioner`: health workers and their organization membership
//! - `assignment`: the Organization x Jurisdiction x Plan relation
//! - `plan`: plan definitions synchronized to clients by `serverVersion`
//! - `campaign`: campaign metadata
//! - `location`: location detail projections

pub mod assignment;
pub mod campaign;
pub mod location;
pub mod organization;
pub mod plan;
pub mod practitioner;

pub use assignment::{AssignedLocation, UserAssignment};
pub use campaign::Campaign;
pub use location::LocationDetail;
pub use organization::{CodeableConcept, Coding, Organization};
pub use plan::{Jurisdiction, Period, PlanDefinition};
pub use practitioner::Practitioner;
