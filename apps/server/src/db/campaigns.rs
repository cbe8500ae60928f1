//! Campaign repository

use crate::db::{next_server_version_sql, traits::CampaignStore};
use crate::Result;
use async_trait::async_trait;
use outreach_models::Campaign;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};

#[derive(Debug, Clone)]
pub struct PostgresCampaignStore {
    pool: PgPool,
}

impl PostgresCampaignStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Result<Campaign> {
        let document: JsonValue = row.try_get("document")?;
        let mut campaign: Campaign = serde_json::from_value(document)
            .map_err(|e| crate::Error::Internal(format!("Corrupt campaign document: {e}")))?;
        campaign.server_version = row.try_get("server_version")?;
        Ok(campaign)
    }

    async fn next_server_version(&self) -> Result<i64> {
        let row = sqlx::query(&next_server_version_sql("campaigns"))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("next_version")?)
    }

    fn to_document(campaign: &Campaign) -> Result<JsonValue> {
        serde_json::to_value(campaign)
            .map_err(|e| crate::Error::Internal(format!("Serialize campaign: {e}")))
    }
}

#[async_trait]
impl CampaignStore for PostgresCampaignStore {
    async fn all(&self) -> Result<Vec<Campaign>> {
        let rows = sqlx::query(
            "SELECT server_version, document FROM campaigns ORDER BY server_version",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn by_identifier(&self, identifier: &str) -> Result<Option<Campaign>> {
        let row = sqlx::query(
            "SELECT server_version, document FROM campaigns WHERE identifier = $1",
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn insert(&self, campaign: &Campaign) -> Result<Campaign> {
        let mut stored = campaign.clone();
        stored.server_version = self.next_server_version().await?;

        sqlx::query(
            r#"
            INSERT INTO campaigns (identifier, server_version, document)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&stored.identifier)
        .bind(stored.server_version)
        .bind(Self::to_document(&stored)?)
        .execute(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn update(&self, campaign: &Campaign) -> Result<Campaign> {
        let mut stored = campaign.clone();
        stored.server_version = self.next_server_version().await?;

        let result = sqlx::query(
            r#"
            UPDATE campaigns
            SET server_version = $2, document = $3
            WHERE identifier = $1
            "#,
        )
        .bind(&stored.identifier)
        .bind(stored.server_version)
        .bind(Self::to_document(&stored)?)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(crate::Error::NotFound(format!(
                "Campaign {}",
                stored.identifier
            )));
        }
        Ok(stored)
    }

    async fn newer_than(&self, server_version: i64) -> Result<Vec<Campaign>> {
        let rows = sqlx::query(
            r#"
            SELECT server_version, document
            FROM campaigns
            WHERE server_version > $1
            ORDER BY server_version
            "#,
        )
        .bind(server_version)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }
}
