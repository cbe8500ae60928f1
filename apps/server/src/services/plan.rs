//! Plan service - the sync resolver
//!
//! Determines which plans a client must receive given a `serverVersion`
//! watermark and a scope (organizations or operational-area codes), and
//! implements the optional-fields projection used by identifier lookups.
//!
//! An empty sync scope is always a caller error: silently returning an
//! empty result would be indistinguishable from "caller is fully synced".

use crate::db::traits::{AssignmentStore, LocationStore, PlanStore};
use crate::services::require;
use crate::{Error, Result};
use chrono::Utc;
use outreach_models::{LocationDetail, PlanDefinition};
use std::collections::HashSet;
use std::sync::Arc;

pub struct PlanService {
    plans: Arc<dyn PlanStore>,
    assignments: Arc<dyn AssignmentStore>,
    locations: Arc<dyn LocationStore>,
}

impl PlanService {
    pub fn new(
        plans: Arc<dyn PlanStore>,
        assignments: Arc<dyn AssignmentStore>,
        locations: Arc<dyn LocationStore>,
    ) -> Self {
        Self {
            plans,
            assignments,
            locations,
        }
    }

    pub async fn all(&self) -> Result<Vec<PlanDefinition>> {
        self.plans.all().await
    }

    pub async fn add(&self, plan: &PlanDefinition) -> Result<PlanDefinition> {
        require(&plan.identifier, "plan identifier")?;
        self.plans.insert(plan).await
    }

    pub async fn update(&self, plan: &PlanDefinition) -> Result<PlanDefinition> {
        require(&plan.identifier, "plan identifier")?;
        self.plans.update(plan).await
    }

    /// Plans restricted to `identifiers`, with only the requested fields
    /// populated. An empty `fields` list means the full record.
    pub async fn by_identifiers_with_optional_fields(
        &self,
        identifiers: &[String],
        fields: &[String],
    ) -> Result<Vec<PlanDefinition>> {
        if identifiers.is_empty() {
            return Err(Error::InvalidArgument(
                "at least one plan identifier is required".to_string(),
            ));
        }

        let plans = self.plans.by_identifiers(identifiers).await?;
        if fields.is_empty() {
            return Ok(plans);
        }
        Ok(plans
            .into_iter()
            .map(|plan| project_fields(plan, fields))
            .collect())
    }

    /// Incremental sync scoped by organizations: resolve the in-force
    /// jurisdictions assigned to the organizations, then return plans past
    /// the watermark whose jurisdiction list intersects that scope.
    pub async fn sync_by_organizations(
        &self,
        server_version: i64,
        organization_ids: &[String],
    ) -> Result<Vec<PlanDefinition>> {
        if organization_ids.is_empty() {
            return Err(Error::InvalidArgument(
                "at least one organization is required for sync".to_string(),
            ));
        }

        let today = Utc::now().date_naive();
        let areas: HashSet<String> = self
            .assignments
            .by_organizations(organization_ids)
            .await?
            .into_iter()
            .filter(|assignment| assignment.in_force_at(today))
            .map(|assignment| assignment.jurisdiction_id)
            .collect();

        tracing::debug!(
            organizations = organization_ids.len(),
            operational_areas = areas.len(),
            server_version,
            "Resolved sync scope from organizations"
        );

        self.sync_filtered(server_version, &areas).await
    }

    /// Incremental sync with the jurisdiction scope supplied directly.
    pub async fn sync_by_operational_areas(
        &self,
        server_version: i64,
        area_codes: &[String],
    ) -> Result<Vec<PlanDefinition>> {
        if area_codes.is_empty() {
            return Err(Error::InvalidArgument(
                "at least one operational area is required for sync".to_string(),
            ));
        }
        let areas: HashSet<String> = area_codes.iter().cloned().collect();
        self.sync_filtered(server_version, &areas).await
    }

    async fn sync_filtered(
        &self,
        server_version: i64,
        areas: &HashSet<String>,
    ) -> Result<Vec<PlanDefinition>> {
        if areas.is_empty() {
            return Ok(Vec::new());
        }

        // The store already filters and orders by the watermark; the
        // re-check keeps the "never return serverVersion <= V" guarantee
        // independent of the collaborator.
        let candidates = self.plans.newer_than(server_version).await?;
        Ok(candidates
            .into_iter()
            .filter(|plan| {
                plan.server_version > server_version
                    && plan.applies_to_any(areas.iter().map(String::as_str))
            })
            .collect())
    }

    pub async fn page(&self, server_version: i64, limit: i64) -> Result<Vec<PlanDefinition>> {
        self.plans.page(server_version, limit.max(1)).await
    }

    pub async fn identifiers(&self) -> Result<Vec<String>> {
        self.plans.identifiers().await
    }

    pub async fn location_details(&self, plan_id: &str) -> Result<Vec<LocationDetail>> {
        require(plan_id, "plan identifier")?;
        self.locations.details_by_plan(plan_id).await
    }
}

/// Keep `identifier` plus the named fields; everything else becomes the
/// zero/empty value so omitted fields never leak stored values. Unknown
/// field names are ignored.
fn project_fields(plan: PlanDefinition, fields: &[String]) -> PlanDefinition {
    let mut projected = PlanDefinition {
        identifier: plan.identifier.clone(),
        ..Default::default()
    };

    for field in fields {
        match field.as_str() {
            "version" => projected.version = plan.version.clone(),
            "name" => projected.name = plan.name.clone(),
            "title" => projected.title = plan.title.clone(),
            "status" => projected.status = plan.status.clone(),
            "date" => projected.date = plan.date,
            "effectivePeriod" => projected.effective_period = plan.effective_period.clone(),
            "useContext" => projected.use_context = plan.use_context.clone(),
            "jurisdiction" => projected.jurisdiction = plan.jurisdiction.clone(),
            "goal" => projected.goal = plan.goal.clone(),
            "action" => projected.action = plan.action.clone(),
            "serverVersion" => projected.server_version = plan.server_version,
            _ => {}
        }
    }

    projected
}
