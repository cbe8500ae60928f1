//! In-memory store implementations backing router tests.

use async_trait::async_trait;
use outreach::db::traits::{
    AssignmentStore, CampaignStore, LocationStore, OrganizationSearchFilter, OrganizationStore,
    PlanStore, PractitionerStore,
};
use outreach::Result;
use outreach_models::{
    AssignedLocation, Campaign, LocationDetail, Organization, PlanDefinition, Practitioner,
};
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryOrganizations {
    pub records: Mutex<Vec<Organization>>,
}

impl InMemoryOrganizations {
    fn matching(&self, filter: &OrganizationSearchFilter) -> Vec<Organization> {
        let records = self.records.lock().unwrap();
        records
            .iter()
            .filter(|o| match &filter.name {
                Some(name) => o
                    .name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&name.to_lowercase())),
                None => true,
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl OrganizationStore for InMemoryOrganizations {
    async fn all(&self) -> Result<Vec<Organization>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn by_identifier(&self, identifier: &str) -> Result<Option<Organization>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.identifier == identifier)
            .cloned())
    }

    async fn encompassing_location(&self, _location_id: &str) -> Result<Vec<Organization>> {
        Ok(Vec::new())
    }

    async fn insert(&self, organization: &Organization) -> Result<()> {
        self.records.lock().unwrap().push(organization.clone());
        Ok(())
    }

    async fn update(&self, organization: &Organization) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        if let Some(existing) = records
            .iter_mut()
            .find(|o| o.identifier == organization.identifier)
        {
            *existing = organization.clone();
        }
        Ok(())
    }

    async fn search(&self, filter: &OrganizationSearchFilter) -> Result<Vec<Organization>> {
        let mut matches = self.matching(filter);
        matches.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        if filter.descending {
            matches.reverse();
        }
        let page = filter.page_number.max(1) as usize - 1;
        let size = filter.page_size.max(1) as usize;
        Ok(matches.into_iter().skip(page * size).take(size).collect())
    }

    async fn count(&self, filter: &OrganizationSearchFilter) -> Result<i64> {
        Ok(self.matching(filter).len() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryAssignments {
    pub records: Mutex<Vec<AssignedLocation>>,
}

#[async_trait]
impl AssignmentStore for InMemoryAssignments {
    async fn upsert(&self, assignment: &AssignedLocation) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        if let Some(existing) = records.iter_mut().find(|a| {
            a.organization_id == assignment.organization_id
                && a.jurisdiction_id == assignment.jurisdiction_id
                && a.plan_id == assignment.plan_id
        }) {
            existing.from_date = assignment.from_date;
            existing.to_date = assignment.to_date;
        } else {
            records.push(assignment.clone());
        }
        Ok(())
    }

    async fn by_organizations(
        &self,
        organization_ids: &[String],
    ) -> Result<Vec<AssignedLocation>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|a| organization_ids.contains(&a.organization_id))
            .cloned()
            .collect())
    }

    async fn by_plan(&self, plan_id: &str) -> Result<Vec<AssignedLocation>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.plan_id == plan_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryPlans {
    pub records: Mutex<Vec<PlanDefinition>>,
}

impl InMemoryPlans {
    fn next_server_version(records: &[PlanDefinition]) -> i64 {
        records.iter().map(|p| p.server_version).max().unwrap_or(0) + 1
    }
}

#[async_trait]
impl PlanStore for InMemoryPlans {
    async fn all(&self) -> Result<Vec<PlanDefinition>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn by_identifiers(&self, identifiers: &[String]) -> Result<Vec<PlanDefinition>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|p| identifiers.contains(&p.identifier))
            .cloned()
            .collect())
    }

    async fn insert(&self, plan: &PlanDefinition) -> Result<PlanDefinition> {
        let mut records = self.records.lock().unwrap();
        let mut stored = plan.clone();
        stored.server_version = Self::next_server_version(&records);
        records.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, plan: &PlanDefinition) -> Result<PlanDefinition> {
        let mut records = self.records.lock().unwrap();
        let next = Self::next_server_version(&records);
        let mut stored = plan.clone();
        stored.server_version = next;
        if let Some(existing) = records.iter_mut().find(|p| p.identifier == plan.identifier) {
            *existing = stored.clone();
        } else {
            records.push(stored.clone());
        }
        Ok(stored)
    }

    async fn newer_than(&self, server_version: i64) -> Result<Vec<PlanDefinition>> {
        let mut plans: Vec<PlanDefinition> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.server_version > server_version)
            .cloned()
            .collect();
        plans.sort_by_key(|p| p.server_version);
        Ok(plans)
    }

    async fn page(&self, server_version: i64, limit: i64) -> Result<Vec<PlanDefinition>> {
        let plans = self.newer_than(server_version).await?;
        Ok(plans.into_iter().take(limit.max(0) as usize).collect())
    }

    async fn identifiers(&self) -> Result<Vec<String>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.identifier.clone())
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryCampaigns {
    pub records: Mutex<Vec<Campaign>>,
}

#[async_trait]
impl CampaignStore for InMemoryCampaigns {
    async fn all(&self) -> Result<Vec<Campaign>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn by_identifier(&self, identifier: &str) -> Result<Option<Campaign>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.identifier == identifier)
            .cloned())
    }

    async fn insert(&self, campaign: &Campaign) -> Result<Campaign> {
        let mut records = self.records.lock().unwrap();
        let mut stored = campaign.clone();
        stored.server_version =
            records.iter().map(|c| c.server_version).max().unwrap_or(0) + 1;
        records.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, campaign: &Campaign) -> Result<Campaign> {
        let mut records = self.records.lock().unwrap();
        let next = records.iter().map(|c| c.server_version).max().unwrap_or(0) + 1;
        let mut stored = campaign.clone();
        stored.server_version = next;
        if let Some(existing) = records
            .iter_mut()
            .find(|c| c.identifier == campaign.identifier)
        {
            *existing = stored.clone();
        } else {
            records.push(stored.clone());
        }
        Ok(stored)
    }

    async fn newer_than(&self, server_version: i64) -> Result<Vec<Campaign>> {
        let mut campaigns: Vec<Campaign> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.server_version > server_version)
            .cloned()
            .collect();
        campaigns.sort_by_key(|c| c.server_version);
        Ok(campaigns)
    }
}

#[derive(Default)]
pub struct InMemoryPractitioners {
    pub records: Mutex<Vec<(Practitioner, Vec<String>)>>,
}

#[async_trait]
impl PractitionerStore for InMemoryPractitioners {
    async fn by_organization(
        &self,
        organization_identifier: &str,
    ) -> Result<Vec<Practitioner>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, orgs)| orgs.iter().any(|o| o == organization_identifier))
            .map(|(p, _)| p.clone())
            .collect())
    }

    async fn organizations_for_user(
        &self,
        user_id: &str,
    ) -> Result<Option<(Practitioner, Vec<String>)>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p.user_id.as_deref() == Some(user_id))
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryLocations {
    pub records: Mutex<Vec<(String, LocationDetail)>>,
}

#[async_trait]
impl LocationStore for InMemoryLocations {
    async fn details_by_plan(&self, plan_identifier: &str) -> Result<Vec<LocationDetail>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|(plan, _)| plan == plan_identifier)
            .map(|(_, detail)| detail.clone())
            .collect())
    }
}
