//! Location repository

use crate::db::traits::LocationStore;
use crate::Result;
use async_trait::async_trait;
use outreach_models::LocationDetail;
use sqlx::{PgPool, Row};

#[derive(Debug, Clone)]
pub struct PostgresLocationStore {
    pool: PgPool,
}

impl PostgresLocationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationStore for PostgresLocationStore {
    async fn details_by_plan(&self, plan_identifier: &str) -> Result<Vec<LocationDetail>> {
        // Locations reached through the plan's assignment records.
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT l.identifier, l.name
            FROM locations l
            JOIN assigned_locations al ON al.jurisdiction_id = l.identifier
            WHERE al.plan_id = $1
            ORDER BY l.identifier
            "#,
        )
        .bind(plan_identifier)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(LocationDetail {
                    identifier: row.try_get("identifier")?,
                    name: row.try_get("name")?,
                })
            })
            .collect()
    }
}
