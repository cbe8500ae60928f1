//! Outreach Server - Rust implementation
//!
//! A health-data management server with:
//! - Organization, practitioner, plan, and campaign REST resources
//! - Organization x Jurisdiction x Plan assignment with validity windows
//! - Incremental client sync driven by a monotonic `serverVersion` watermark
//! - OAuth2 resource-server authentication against an external IdP

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
