//! Store traits for the persistence and identity collaborators
//!
//! Services are wired against these traits rather than concrete
//! repositories, so production uses PostgreSQL and tests use in-memory
//! fakes. All isolation and read-your-writes guarantees are the backing
//! store's; the services add no locking of their own.

use crate::Result;
use async_trait::async_trait;
use outreach_models::{
    AssignedLocation, Campaign, LocationDetail, Organization, PlanDefinition, Practitioner,
};

/// Paging and ordering criteria for organization search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizationSearchFilter {
    /// Case-insensitive substring match on the organization name.
    pub name: Option<String>,
    /// 1-based page number.
    pub page_number: u32,
    pub page_size: u32,
    /// Column to order by; implementations must whitelist the value.
    pub order_by: Option<String>,
    pub descending: bool,
}

#[async_trait]
pub trait OrganizationStore: Send + Sync {
    async fn all(&self) -> Result<Vec<Organization>>;

    async fn by_identifier(&self, identifier: &str) -> Result<Option<Organization>>;

    /// Organizations assigned to the given location or to any of its
    /// ancestor jurisdictions.
    async fn encompassing_location(&self, location_id: &str) -> Result<Vec<Organization>>;

    async fn insert(&self, organization: &Organization) -> Result<()>;

    async fn update(&self, organization: &Organization) -> Result<()>;

    async fn search(&self, filter: &OrganizationSearchFilter) -> Result<Vec<Organization>>;

    /// Total match count for `filter`, ignoring paging.
    async fn count(&self, filter: &OrganizationSearchFilter) -> Result<i64>;
}

/// The Organization x Jurisdiction x Plan relation.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Insert or refresh an assignment. The upsert key is the full
    /// (organization, jurisdiction, plan) triple; a conflicting insert
    /// updates only the validity window. Assignments are never deleted.
    async fn upsert(&self, assignment: &AssignedLocation) -> Result<()>;

    /// All assignment records for any of the given organizations (union).
    async fn by_organizations(&self, organization_ids: &[String])
        -> Result<Vec<AssignedLocation>>;

    async fn by_plan(&self, plan_id: &str) -> Result<Vec<AssignedLocation>>;
}

#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn all(&self) -> Result<Vec<PlanDefinition>>;

    async fn by_identifiers(&self, identifiers: &[String]) -> Result<Vec<PlanDefinition>>;

    /// Persist a new plan. The store assigns `serverVersion` from a
    /// monotonic source and returns the stored record.
    async fn insert(&self, plan: &PlanDefinition) -> Result<PlanDefinition>;

    /// Replace an existing plan, bumping `serverVersion`.
    async fn update(&self, plan: &PlanDefinition) -> Result<PlanDefinition>;

    /// Plans with `serverVersion` strictly greater than the watermark,
    /// ordered ascending by `serverVersion` (collaborator contract; the
    /// sync resolver does not re-sort).
    async fn newer_than(&self, server_version: i64) -> Result<Vec<PlanDefinition>>;

    /// Paged variant of [`PlanStore::newer_than`] for bulk export.
    async fn page(&self, server_version: i64, limit: i64) -> Result<Vec<PlanDefinition>>;

    async fn identifiers(&self) -> Result<Vec<String>>;
}

#[async_trait]
pub trait CampaignStore: Send + Sync {
    async fn all(&self) -> Result<Vec<Campaign>>;

    async fn by_identifier(&self, identifier: &str) -> Result<Option<Campaign>>;

    async fn insert(&self, campaign: &Campaign) -> Result<Campaign>;

    async fn update(&self, campaign: &Campaign) -> Result<Campaign>;

    /// Campaigns with `serverVersion` strictly greater than the watermark,
    /// ascending.
    async fn newer_than(&self, server_version: i64) -> Result<Vec<Campaign>>;
}

/// Identity collaborator: maps users to practitioner records and
/// organization membership.
#[async_trait]
pub trait PractitionerStore: Send + Sync {
    async fn by_organization(&self, organization_identifier: &str)
        -> Result<Vec<Practitioner>>;

    /// The practitioner record linked to an IdP user id, together with the
    /// identifiers of the organizations the practitioner belongs to.
    async fn organizations_for_user(
        &self,
        user_id: &str,
    ) -> Result<Option<(Practitioner, Vec<String>)>>;
}

#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Name/identifier details for the locations a plan applies to.
    async fn details_by_plan(&self, plan_identifier: &str) -> Result<Vec<LocationDetail>>;
}
