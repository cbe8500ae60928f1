//! Campaign service

use crate::db::traits::CampaignStore;
use crate::services::require;
use crate::Result;
use outreach_models::Campaign;
use std::sync::Arc;

pub struct CampaignService {
    campaigns: Arc<dyn CampaignStore>,
}

impl CampaignService {
    pub fn new(campaigns: Arc<dyn CampaignStore>) -> Self {
        Self { campaigns }
    }

    pub async fn all(&self) -> Result<Vec<Campaign>> {
        self.campaigns.all().await
    }

    pub async fn get(&self, identifier: &str) -> Result<Option<Campaign>> {
        require(identifier, "campaign identifier")?;
        self.campaigns.by_identifier(identifier).await
    }

    pub async fn add(&self, campaign: &Campaign) -> Result<Campaign> {
        require(&campaign.identifier, "campaign identifier")?;
        self.campaigns.insert(campaign).await
    }

    pub async fn update(&self, campaign: &Campaign) -> Result<Campaign> {
        require(&campaign.identifier, "campaign identifier")?;
        self.campaigns.update(campaign).await
    }

    /// Campaigns past the watermark; campaign sync is unscoped.
    pub async fn sync_by_server_version(&self, server_version: i64) -> Result<Vec<Campaign>> {
        self.campaigns.newer_than(server_version).await
    }
}
