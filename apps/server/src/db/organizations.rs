//! Organization repository

use crate::db::traits::{OrganizationSearchFilter, OrganizationStore};
use crate::Result;
use async_trait::async_trait;
use outreach_models::Organization;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};

#[derive(Debug, Clone)]
pub struct PostgresOrganizationStore {
    pool: PgPool,
}

impl PostgresOrganizationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Result<Organization> {
        let organization_type = row
            .try_get::<Option<JsonValue>, _>("organization_type")?
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| crate::Error::Internal(format!("Corrupt organization type: {e}")))?;

        Ok(Organization {
            id: row.try_get("id")?,
            identifier: row.try_get("identifier")?,
            active: row.try_get("active")?,
            name: row.try_get("name")?,
            part_of: row.try_get("part_of")?,
            organization_type,
            member_count: row.try_get("member_count").ok().flatten(),
        })
    }

    /// Valid `order_by` column names; anything else falls back to `id`.
    fn order_column(filter: &OrganizationSearchFilter) -> &'static str {
        match filter.order_by.as_deref() {
            Some("identifier") => "identifier",
            Some("name") => "name",
            _ => "id",
        }
    }
}

#[async_trait]
impl OrganizationStore for PostgresOrganizationStore {
    async fn all(&self) -> Result<Vec<Organization>> {
        let rows = sqlx::query(
            r#"
            SELECT id, identifier, active, name, part_of, organization_type,
                   NULL::BIGINT AS member_count
            FROM organizations
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn by_identifier(&self, identifier: &str) -> Result<Option<Organization>> {
        let row = sqlx::query(
            r#"
            SELECT id, identifier, active, name, part_of, organization_type,
                   NULL::BIGINT AS member_count
            FROM organizations
            WHERE identifier = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn encompassing_location(&self, location_id: &str) -> Result<Vec<Organization>> {
        // Walk up the location tree, then select organizations assigned to
        // the location itself or any ancestor.
        let rows = sqlx::query(
            r#"
            WITH RECURSIVE ancestors AS (
                SELECT identifier, parent_identifier
                FROM locations
                WHERE identifier = $1
                UNION ALL
                SELECT l.identifier, l.parent_identifier
                FROM locations l
                JOIN ancestors a ON l.identifier = a.parent_identifier
            )
            SELECT DISTINCT o.id, o.identifier, o.active, o.name, o.part_of,
                   o.organization_type, NULL::BIGINT AS member_count
            FROM organizations o
            JOIN assigned_locations al ON al.organization_id = o.identifier
            WHERE al.jurisdiction_id IN (SELECT identifier FROM ancestors)
            ORDER BY o.id
            "#,
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn insert(&self, organization: &Organization) -> Result<()> {
        let organization_type = organization
            .organization_type
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| crate::Error::Internal(format!("Serialize organization type: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO organizations (identifier, active, name, part_of, organization_type)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&organization.identifier)
        .bind(organization.active)
        .bind(&organization.name)
        .bind(organization.part_of)
        .bind(organization_type)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, organization: &Organization) -> Result<()> {
        let organization_type = organization
            .organization_type
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| crate::Error::Internal(format!("Serialize organization type: {e}")))?;

        let result = sqlx::query(
            r#"
            UPDATE organizations
            SET active = $2, name = $3, part_of = $4, organization_type = $5
            WHERE identifier = $1
            "#,
        )
        .bind(&organization.identifier)
        .bind(organization.active)
        .bind(&organization.name)
        .bind(organization.part_of)
        .bind(organization_type)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(crate::Error::NotFound(format!(
                "Organization {}",
                organization.identifier
            )));
        }
        Ok(())
    }

    async fn search(&self, filter: &OrganizationSearchFilter) -> Result<Vec<Organization>> {
        let order = Self::order_column(filter);
        let direction = if filter.descending { "DESC" } else { "ASC" };
        let page_size = filter.page_size.max(1) as i64;
        let offset = (filter.page_number.max(1) as i64 - 1) * page_size;

        let sql = format!(
            r#"
            SELECT o.id, o.identifier, o.active, o.name, o.part_of,
                   o.organization_type,
                   (SELECT COUNT(*) FROM practitioner_roles pr
                    WHERE pr.organization_identifier = o.identifier) AS member_count
            FROM organizations o
            WHERE ($1::TEXT IS NULL OR o.name ILIKE '%' || $1 || '%')
            ORDER BY o.{order} {direction}
            LIMIT $2 OFFSET $3
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(&filter.name)
            .bind(page_size)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn count(&self, filter: &OrganizationSearchFilter) -> Result<i64> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total
            FROM organizations
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(&filter.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.try_get("total")?)
    }
}
