//! Organization service
//!
//! Owns the assignment side of the Organization x Jurisdiction x Plan
//! relation: creating assignments, querying them by organization or plan,
//! and projecting a user's assignments into the deduplicated
//! [`UserAssignment`] shape.

use crate::db::traits::{
    AssignmentStore, OrganizationSearchFilter, OrganizationStore, PractitionerStore,
};
use crate::services::require;
use crate::{Error, Result};
use chrono::NaiveDate;
use outreach_models::{AssignedLocation, Organization, UserAssignment};
use std::sync::Arc;

pub struct OrganizationService {
    organizations: Arc<dyn OrganizationStore>,
    assignments: Arc<dyn AssignmentStore>,
    practitioners: Arc<dyn PractitionerStore>,
}

impl OrganizationService {
    pub fn new(
        organizations: Arc<dyn OrganizationStore>,
        assignments: Arc<dyn AssignmentStore>,
        practitioners: Arc<dyn PractitionerStore>,
    ) -> Self {
        Self {
            organizations,
            assignments,
            practitioners,
        }
    }

    pub async fn all(&self) -> Result<Vec<Organization>> {
        self.organizations.all().await
    }

    pub async fn get(&self, identifier: &str) -> Result<Option<Organization>> {
        require(identifier, "organization identifier")?;
        self.organizations.by_identifier(identifier).await
    }

    pub async fn encompassing(&self, location_id: &str) -> Result<Vec<Organization>> {
        require(location_id, "location id")?;
        self.organizations.encompassing_location(location_id).await
    }

    pub async fn add(&self, organization: &Organization) -> Result<()> {
        require(&organization.identifier, "organization identifier")?;
        self.organizations.insert(organization).await
    }

    pub async fn update(&self, organization: &Organization) -> Result<()> {
        require(&organization.identifier, "organization identifier")?;
        self.organizations.update(organization).await
    }

    pub async fn search(
        &self,
        filter: &OrganizationSearchFilter,
    ) -> Result<(Vec<Organization>, i64)> {
        let matches = self.organizations.search(filter).await?;
        let total = self.organizations.count(filter).await?;
        Ok((matches, total))
    }

    /// Upsert one assignment record. All three identifiers are required;
    /// the validity window is optional on both sides.
    pub async fn assign_location_and_plan(
        &self,
        organization: &str,
        jurisdiction: &str,
        plan: &str,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
    ) -> Result<()> {
        require(organization, "organization")?;
        require(jurisdiction, "jurisdiction")?;
        require(plan, "plan")?;

        let assignment = AssignedLocation {
            organization_id: organization.to_string(),
            jurisdiction_id: jurisdiction.to_string(),
            plan_id: plan.to_string(),
            from_date,
            to_date,
        };

        tracing::info!(
            organization = %organization,
            jurisdiction = %jurisdiction,
            plan = %plan,
            "Assigning location and plan"
        );
        self.assignments.upsert(&assignment).await
    }

    pub async fn find_assigned_locations_and_plans(
        &self,
        identifier: &str,
    ) -> Result<Vec<AssignedLocation>> {
        require(identifier, "organization identifier")?;
        self.find_assigned_locations_and_plans_for(&[identifier.to_string()])
            .await
    }

    /// Union of assignment records over a set of organizations.
    pub async fn find_assigned_locations_and_plans_for(
        &self,
        identifiers: &[String],
    ) -> Result<Vec<AssignedLocation>> {
        if identifiers.is_empty() {
            return Err(Error::InvalidArgument(
                "at least one organization identifier is required".to_string(),
            ));
        }
        self.assignments.by_organizations(identifiers).await
    }

    pub async fn find_assigned_locations_and_plans_by_plan(
        &self,
        plan_id: &str,
    ) -> Result<Vec<AssignedLocation>> {
        require(plan_id, "plan identifier")?;
        self.assignments.by_plan(plan_id).await
    }

    /// Resolve the authenticated user's assignment: look up the user's
    /// organizations through the identity collaborator, fetch their
    /// assignment records, and project into deduplicated parallel sets.
    pub async fn user_assignment(&self, user_id: &str) -> Result<UserAssignment> {
        require(user_id, "user id")?;

        let Some((_practitioner, organization_ids)) =
            self.practitioners.organizations_for_user(user_id).await?
        else {
            return Err(Error::NotFound(format!(
                "No practitioner linked to user {user_id}"
            )));
        };

        let mut assignment = UserAssignment {
            organization_ids: organization_ids.iter().cloned().collect(),
            ..Default::default()
        };

        if !organization_ids.is_empty() {
            for record in self
                .find_assigned_locations_and_plans_for(&organization_ids)
                .await?
            {
                assignment.jurisdictions.insert(record.jurisdiction_id);
                assignment.plans.insert(record.plan_id);
            }
        }

        Ok(assignment)
    }
}
