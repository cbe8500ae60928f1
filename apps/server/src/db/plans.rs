//! Plan repository
//!
//! Plans are stored as JSONB documents with `identifier` and
//! `server_version` extracted into indexed columns. The stored document is
//! the source of truth; the columns exist for sync range queries.

use crate::db::{next_server_version_sql, traits::PlanStore};
use crate::Result;
use async_trait::async_trait;
use outreach_models::PlanDefinition;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};

#[derive(Debug, Clone)]
pub struct PostgresPlanStore {
    pool: PgPool,
}

impl PostgresPlanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Result<PlanDefinition> {
        let document: JsonValue = row.try_get("document")?;
        let mut plan: PlanDefinition = serde_json::from_value(document)
            .map_err(|e| crate::Error::Internal(format!("Corrupt plan document: {e}")))?;
        // The column is authoritative for the watermark.
        plan.server_version = row.try_get("server_version")?;
        Ok(plan)
    }

    async fn next_server_version(&self) -> Result<i64> {
        let row = sqlx::query(&next_server_version_sql("plans"))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("next_version")?)
    }

    fn to_document(plan: &PlanDefinition) -> Result<JsonValue> {
        serde_json::to_value(plan)
            .map_err(|e| crate::Error::Internal(format!("Serialize plan: {e}")))
    }
}

#[async_trait]
impl PlanStore for PostgresPlanStore {
    async fn all(&self) -> Result<Vec<PlanDefinition>> {
        let rows = sqlx::query(
            "SELECT server_version, document FROM plans ORDER BY server_version",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn by_identifiers(&self, identifiers: &[String]) -> Result<Vec<PlanDefinition>> {
        let rows = sqlx::query(
            r#"
            SELECT server_version, document
            FROM plans
            WHERE identifier = ANY($1)
            ORDER BY server_version
            "#,
        )
        .bind(identifiers)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn insert(&self, plan: &PlanDefinition) -> Result<PlanDefinition> {
        let mut stored = plan.clone();
        stored.server_version = self.next_server_version().await?;

        sqlx::query(
            r#"
            INSERT INTO plans (identifier, server_version, document)
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

    async fn update(&self, plan: &PlanDefinition) -> Result<PlanDefinition> {
        let mut stored = plan.clone();
        stored.server_version = self.next_server_version().await?;

        let result = sqlx::query(
            r#"
            UPDATE plans
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
            return Err(crate::Error::NotFound(format!("Plan {}", stored.identifier)));
        }
        Ok(stored)
    }

    async fn newer_than(&self, server_version: i64) -> Result<Vec<PlanDefinition>> {
        let rows = sqlx::query(
            r#"
            SELECT server_version, document
            FROM plans
            WHERE server_version > $1
            ORDER BY server_version
            "#,
        )
        .bind(server_version)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn page(&self, server_version: i64, limit: i64) -> Result<Vec<PlanDefinition>> {
        let rows = sqlx::query(
            r#"
            SELECT server_version, document
            FROM plans
            WHERE server_version > $1
            ORDER BY server_version
            LIMIT $2
            "#,
        )
        .bind(server_version)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn identifiers(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT identifier FROM plans ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| Ok(row.try_get("identifier")?))
            .collect()
    }
}
