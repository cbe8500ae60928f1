//! Request handlers for API endpoints
//!
//! Handlers extract and validate request parameters, invoke the domain
//! services, and map results to JSON responses. Error mapping to status
//! codes lives on [`crate::Error`].

pub mod campaign;
pub mod organization;
pub mod plan;
