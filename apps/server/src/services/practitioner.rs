//! Practitioner service

use crate::db::traits::PractitionerStore;
use crate::services::require;
use crate::Result;
use outreach_models::Practitioner;
use std::sync::Arc;

pub struct PractitionerService {
    practitioners: Arc<dyn PractitionerStore>,
}

impl PractitionerService {
    pub fn new(practitioners: Arc<dyn PractitionerStore>) -> Self {
        Self { practitioners }
    }

    pub async fn by_organization(
        &self,
        organization_identifier: &str,
    ) -> Result<Vec<Practitioner>> {
        require(organization_identifier, "organization identifier")?;
        self.practitioners
            .by_organization(organization_identifier)
            .await
    }
}
