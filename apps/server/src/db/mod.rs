//! Database layer - repositories and data access

pub mod assignments;
pub mod campaigns;
pub mod locations;
pub mod organizations;
pub mod plans;
pub mod practitioners;
pub mod traits;

pub use assignments::PostgresAssignmentStore;
pub use campaigns::PostgresCampaignStore;
pub use locations::PostgresLocationStore;
pub use organizations::PostgresOrganizationStore;
pub use plans::PostgresPlanStore;
pub use practitioners::PostgresPractitionerStore;
pub use traits::{
    AssignmentStore, CampaignStore, LocationStore, OrganizationSearchFilter, OrganizationStore,
    PlanStore, PractitionerStore,
};

use crate::config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Connect to PostgreSQL and run pending migrations.
pub async fn connect(config: &DatabaseConfig) -> crate::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect(&config.url)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| crate::Error::Internal(format!("Migration failed: {e}")))?;

    Ok(pool)
}

/// Next value for the `serverVersion` watermark of `table`.
///
/// Epoch millis, but never less than the current maximum plus one, so the
/// watermark stays strictly increasing even if the clock steps backwards.
pub(crate) fn next_server_version_sql(table: &str) -> String {
    format!(
        "SELECT GREATEST(\
             (EXTRACT(EPOCH FROM clock_timestamp()) * 1000)::BIGINT, \
             (SELECT COALESCE(MAX(server_version), 0) + 1 FROM {table})\
         ) AS next_version"
    )
}
