//! Organization resource handlers

use crate::auth::Principal;
use crate::db::OrganizationSearchFilter;
use crate::state::AppState;
use crate::{Error, Result};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::NaiveDate;
use outreach_models::Organization;
use serde::Deserialize;

/// Response header carrying the unpaged match count for searches.
pub static TOTAL_RECORDS_HEADER: HeaderName = HeaderName::from_static("total_records");

#[derive(Debug, Deserialize)]
pub struct OrganizationListQuery {
    pub location_id: Option<String>,
}

/// `GET /rest/organization` — all organizations, or the organizations
/// whose assignments encompass `location_id`.
pub async fn get_organizations(
    State(state): State<AppState>,
    Query(query): Query<OrganizationListQuery>,
) -> Result<Json<Vec<Organization>>> {
    let organizations = match query.location_id {
        Some(location_id) => state.organizations.encompassing(&location_id).await?,
        None => state.organizations.all().await?,
    };
    Ok(Json(organizations))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSearchQuery {
    pub name: Option<String>,
    #[serde(default = "default_page_number")]
    pub page_number: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub order_by_field_name: Option<String>,
    pub order_by_type: Option<String>,
}

fn default_page_number() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

/// `GET /rest/organization/search` — paged name search; the total match
/// count is exposed through the `total_records` response header.
pub async fn search_organizations(
    State(state): State<AppState>,
    Query(query): Query<OrganizationSearchQuery>,
) -> Result<Response> {
    let filter = OrganizationSearchFilter {
        name: query.name,
        page_number: query.page_number,
        page_size: query.page_size,
        order_by: query.order_by_field_name,
        descending: query
            .order_by_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("desc")),
    };

    let (organizations, total) = state.organizations.search(&filter).await?;

    let mut response = Json(organizations).into_response();
    if let Ok(value) = total.to_string().parse() {
        response
            .headers_mut()
            .insert(TOTAL_RECORDS_HEADER.clone(), value);
    }
    Ok(response)
}

/// `GET /rest/organization/:identifier`
pub async fn get_organization(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<Organization>> {
    match state.organizations.get(&identifier).await? {
        Some(organization) => Ok(Json(organization)),
        None => Err(Error::NotFound(format!("Organization {identifier}"))),
    }
}

/// `POST /rest/organization`
pub async fn create_organization(
    State(state): State<AppState>,
    Json(organization): Json<Organization>,
) -> Result<StatusCode> {
    state.organizations.add(&organization).await?;
    Ok(StatusCode::CREATED)
}

/// `PUT /rest/organization/:identifier` — the path identifier wins over
/// whatever the body carries.
pub async fn update_organization(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    Json(mut organization): Json<Organization>,
) -> Result<StatusCode> {
    organization.identifier = identifier;
    state.organizations.update(&organization).await?;
    Ok(StatusCode::CREATED)
}

/// One entry of an assignment batch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationAssignment {
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub jurisdiction: String,
    #[serde(default)]
    pub plan: String,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

/// `POST /rest/organization/assignLocationsAndPlans` — the batch is the
/// caller's explicit loop; the first failing entry aborts the rest.
pub async fn assign_locations_and_plans(
    State(state): State<AppState>,
    Json(assignments): Json<Vec<OrganizationAssignment>>,
) -> Result<StatusCode> {
    for assignment in &assignments {
        state
            .organizations
            .assign_location_and_plan(
                &assignment.organization,
                &assignment.jurisdiction,
                &assignment.plan,
                assignment.from_date,
                assignment.to_date,
            )
            .await?;
    }
    Ok(StatusCode::OK)
}

/// `GET /rest/organization/assignedLocationsAndPlans/:identifier`
pub async fn get_assigned_locations_and_plans(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Response> {
    let assigned = state
        .organizations
        .find_assigned_locations_and_plans(&identifier)
        .await?;
    Ok(Json(assigned).into_response())
}

#[derive(Debug, Deserialize)]
pub struct AssignedByPlanQuery {
    pub plan: Option<String>,
}

/// `GET /rest/organization/assignedLocationsAndPlans?plan=...`
pub async fn get_assigned_locations_and_plans_by_plan(
    State(state): State<AppState>,
    Query(query): Query<AssignedByPlanQuery>,
) -> Result<Response> {
    let plan = query
        .plan
        .ok_or_else(|| Error::InvalidArgument("plan query parameter is required".to_string()))?;
    let assigned = state
        .organizations
        .find_assigned_locations_and_plans_by_plan(&plan)
        .await?;
    Ok(Json(assigned).into_response())
}

/// `GET /rest/organization/practitioner/:identifier`
pub async fn get_practitioners(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Response> {
    let practitioners = state.practitioners.by_organization(&identifier).await?;
    Ok(Json(practitioners).into_response())
}

/// `GET /rest/organization/user-assignment` — the authenticated user's
/// organizations, jurisdictions, and plans as deduplicated sets.
pub async fn get_user_assignment(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
) -> Result<Response> {
    let Some(Extension(principal)) = principal else {
        return Ok(StatusCode::UNAUTHORIZED.into_response());
    };
    let assignment = state
        .organizations
        .user_assignment(&principal.subject)
        .await?;
    Ok(Json(assignment).into_response())
}
