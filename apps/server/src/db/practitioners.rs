//! Practitioner repository (identity collaborator)

use crate::db::traits::PractitionerStore;
use crate::Result;
use async_trait::async_trait;
use outreach_models::Practitioner;
use sqlx::{PgPool, Row};

#[derive(Debug, Clone)]
pub struct PostgresPractitionerStore {
    pool: PgPool,
}

impl PostgresPractitionerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Result<Practitioner> {
        Ok(Practitioner {
            identifier: row.try_get("identifier")?,
            active: row.try_get("active")?,
            name: row.try_get("name")?,
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
        })
    }
}

#[async_trait]
impl PractitionerStore for PostgresPractitionerStore {
    async fn by_organization(
        &self,
        organization_identifier: &str,
    ) -> Result<Vec<Practitioner>> {
        let rows = sqlx::query(
            r#"
            SELECT p.identifier, p.active, p.name, p.user_id, p.username
            FROM practitioners p
            JOIN practitioner_roles pr ON pr.practitioner_identifier = p.identifier
            WHERE pr.organization_identifier = $1
            ORDER BY p.id
            "#,
        )
        .bind(organization_identifier)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn organizations_for_user(
        &self,
        user_id: &str,
    ) -> Result<Option<(Practitioner, Vec<String>)>> {
        let row = sqlx::query(
            r#"
            SELECT identifier, active, name, user_id, username
            FROM practitioners
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let practitioner = Self::from_row(&row)?;

        let org_rows = sqlx::query(
            r#"
            SELECT organization_identifier
            FROM practitioner_roles
            WHERE practitioner_identifier = $1
            ORDER BY organization_identifier
            "#,
        )
        .bind(&practitioner.identifier)
        .fetch_all(&self.pool)
        .await?;

        let organizations = org_rows
            .iter()
            .map(|row| Ok(row.try_get("organization_identifier")?))
            .collect::<Result<Vec<String>>>()?;

        Ok(Some((practitioner, organizations)))
    }
}
