//! Assignment repository

use crate::db::traits::AssignmentStore;
use crate::Result;
use async_trait::async_trait;
use outreach_models::AssignedLocation;
use sqlx::{PgPool, Row};

#[derive(Debug, Clone)]
pub struct PostgresAssignmentStore {
    pool: PgPool,
}

impl PostgresAssignmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Result<AssignedLocation> {
        Ok(AssignedLocation {
            organization_id: row.try_get("organization_id")?,
            jurisdiction_id: row.try_get("jurisdiction_id")?,
            plan_id: row.try_get("plan_id")?,
            from_date: row.try_get("from_date")?,
            to_date: row.try_get("to_date")?,
        })
    }
}

#[async_trait]
impl AssignmentStore for PostgresAssignmentStore {
    async fn upsert(&self, assignment: &AssignedLocation) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO assigned_locations
                (organization_id, jurisdiction_id, plan_id, from_date, to_date)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (organization_id, jurisdiction_id, plan_id)
            DO UPDATE SET from_date = EXCLUDED.from_date,
                          to_date = EXCLUDED.to_date,
                          updated_at = now()
            "#,
        )
        .bind(&assignment.organization_id)
        .bind(&assignment.jurisdiction_id)
        .bind(&assignment.plan_id)
        .bind(assignment.from_date)
        .bind(assignment.to_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn by_organizations(
        &self,
        organization_ids: &[String],
    ) -> Result<Vec<AssignedLocation>> {
        let rows = sqlx::query(
            r#"
            SELECT organization_id, jurisdiction_id, plan_id, from_date, to_date
            FROM assigned_locations
            WHERE organization_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(organization_ids)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn by_plan(&self, plan_id: &str) -> Result<Vec<AssignedLocation>> {
        let rows = sqlx::query(
            r#"
            SELECT organization_id, jurisdiction_id, plan_id, from_date, to_date
            FROM assigned_locations
            WHERE plan_id = $1
            ORDER BY id
            "#,
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }
}
