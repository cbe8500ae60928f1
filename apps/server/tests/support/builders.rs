//! Fixture builders shared by the router tests.

use chrono::NaiveDate;
use outreach_models::{
    AssignedLocation, Campaign, Jurisdiction, Organization, PlanDefinition, Practitioner,
};

pub fn organization(identifier: &str, name: &str) -> Organization {
    Organization {
        id: None,
        identifier: identifier.to_string(),
        active: true,
        name: Some(name.to_string()),
        part_of: None,
        organization_type: None,
        member_count: None,
    }
}

pub fn plan(identifier: &str, server_version: i64, areas: &[&str]) -> PlanDefinition {
    PlanDefinition {
        identifier: identifier.to_string(),
        version: Some("1".to_string()),
        name: Some(identifier.to_string()),
        title: Some(format!("Plan {identifier}")),
        status: Some("active".to_string()),
        date: None,
        effective_period: None,
        use_context: None,
        jurisdiction: areas
            .iter()
            .map(|code| Jurisdiction {
                code: code.to_string(),
            })
            .collect(),
        goal: None,
        action: None,
        server_version,
    }
}

pub fn assignment(organization: &str, jurisdiction: &str, plan: &str) -> AssignedLocation {
    AssignedLocation {
        organization_id: organization.to_string(),
        jurisdiction_id: jurisdiction.to_string(),
        plan_id: plan.to_string(),
        from_date: None,
        to_date: None,
    }
}

pub fn bounded_assignment(
    organization: &str,
    jurisdiction: &str,
    plan: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AssignedLocation {
    AssignedLocation {
        organization_id: organization.to_string(),
        jurisdiction_id: jurisdiction.to_string(),
        plan_id: plan.to_string(),
        from_date: Some(from),
        to_date: Some(to),
    }
}

pub fn practitioner(identifier: &str, user_id: &str) -> Practitioner {
    Practitioner {
        identifier: identifier.to_string(),
        active: true,
        name: Some(format!("Practitioner {identifier}")),
        user_id: Some(user_id.to_string()),
        username: None,
    }
}

pub fn campaign(identifier: &str, title: &str) -> Campaign {
    Campaign {
        identifier: identifier.to_string(),
        title: Some(title.to_string()),
        description: None,
        status: Some("In Progress".to_string()),
        execution_period: None,
        authored_on: None,
        last_modified: None,
        owner: Some("admin".to_string()),
        server_version: 0,
    }
}
