//! Domain services
//!
//! Services validate input, apply the assignment/sync rules, and delegate
//! storage to the store traits in [`crate::db::traits`]. Collaborators are
//! injected explicitly; nothing is read from ambient state.

pub mod campaign;
pub mod organization;
pub mod plan;
pub mod practitioner;

pub use campaign::CampaignService;
pub use organization::OrganizationService;
pub use plan::PlanService;
pub use practitioner::PractitionerService;

use crate::{Error, Result};

/// Reject empty/blank required identifiers with `InvalidArgument`.
pub(crate) fn require(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{what} is required")));
    }
    Ok(())
}
