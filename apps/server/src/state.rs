//! Application state shared across handlers

use crate::auth::AuthManager;
use crate::db::{
    self, AssignmentStore, CampaignStore, LocationStore, OrganizationStore, PlanStore,
    PostgresAssignmentStore, PostgresCampaignStore, PostgresLocationStore,
    PostgresOrganizationStore, PostgresPlanStore, PostgresPractitionerStore, PractitionerStore,
};
use crate::services::{CampaignService, OrganizationService, PlanService, PractitionerService};
use crate::Config;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: AuthManager,
    pub organizations: Arc<OrganizationService>,
    pub plans: Arc<PlanService>,
    pub campaigns: Arc<CampaignService>,
    pub practitioners: Arc<PractitionerService>,
}

impl AppState {
    /// Connect to PostgreSQL, run migrations, and wire the services.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = db::connect(&config.database).await?;

        let organizations = Arc::new(PostgresOrganizationStore::new(pool.clone()));
        let assignments = Arc::new(PostgresAssignmentStore::new(pool.clone()));
        let plans = Arc::new(PostgresPlanStore::new(pool.clone()));
        let campaigns = Arc::new(PostgresCampaignStore::new(pool.clone()));
        let practitioners = Arc::new(PostgresPractitionerStore::new(pool.clone()));
        let locations = Arc::new(PostgresLocationStore::new(pool));

        Self::from_stores(
            config,
            organizations,
            assignments,
            plans,
            campaigns,
            practitioners,
            locations,
        )
    }

    /// Wire services against explicit store implementations. Tests use this
    /// with in-memory stores.
    #[allow(clippy::too_many_arguments)]
    pub fn from_stores(
        config: Config,
        organizations: Arc<dyn OrganizationStore>,
        assignments: Arc<dyn AssignmentStore>,
        plans: Arc<dyn PlanStore>,
        campaigns: Arc<dyn CampaignStore>,
        practitioners: Arc<dyn PractitionerStore>,
        locations: Arc<dyn LocationStore>,
    ) -> anyhow::Result<Self> {
        let config = Arc::new(config);
        let auth = AuthManager::new(config.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize auth: {e:?}"))?;

        Ok(Self {
            config,
            auth,
            organizations: Arc::new(OrganizationService::new(
                organizations,
                assignments.clone(),
                practitioners.clone(),
            )),
            plans: Arc::new(PlanService::new(plans, assignments, locations)),
            campaigns: Arc::new(CampaignService::new(campaigns)),
            practitioners: Arc::new(PractitionerService::new(practitioners)),
        })
    }
}
