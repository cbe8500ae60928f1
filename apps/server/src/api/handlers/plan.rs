//! Plan resource handlers

use crate::auth::Principal;
use crate::state::AppState;
use crate::{Error, Result};
use axum::{
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    Extension, Json,
};
use outreach_models::{LocationDetail, PlanDefinition};
use serde::{Deserialize, Deserializer};

/// `GET /rest/plans`
pub async fn get_plans(State(state): State<AppState>) -> Result<Json<Vec<PlanDefinition>>> {
    Ok(Json(state.plans.all().await?))
}

/// `POST /rest/plans`
pub async fn create_plan(
    State(state): State<AppState>,
    Json(plan): Json<PlanDefinition>,
) -> Result<StatusCode> {
    state.plans.add(&plan).await?;
    Ok(StatusCode::CREATED)
}

/// `PUT /rest/plans`
pub async fn update_plan(
    State(state): State<AppState>,
    Json(plan): Json<PlanDefinition>,
) -> Result<StatusCode> {
    state.plans.update(&plan).await?;
    Ok(StatusCode::CREATED)
}

/// Body of `POST /rest/plans/sync`. Clients have historically sent
/// `serverVersion` as either a JSON number or a quoted string, so both
/// are accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSyncRequest {
    #[serde(default)]
    pub operational_area_id: Vec<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub server_version: i64,
}

fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// `POST /rest/plans/sync` — incremental sync. The scope comes from the
/// request's organizations, or its operational areas, or (when both are
/// absent) the caller's own organization assignments.
pub async fn sync(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    Json(request): Json<PlanSyncRequest>,
) -> Result<Json<Vec<PlanDefinition>>> {
    let plans = if !request.organizations.is_empty() {
        state
            .plans
            .sync_by_organizations(request.server_version, &request.organizations)
            .await?
    } else if !request.operational_area_id.is_empty() {
        state
            .plans
            .sync_by_operational_areas(request.server_version, &request.operational_area_id)
            .await?
    } else if let Some(Extension(principal)) = principal {
        let assignment = state
            .organizations
            .user_assignment(&principal.subject)
            .await?;
        let organizations: Vec<String> = assignment.organization_ids.into_iter().collect();
        state
            .plans
            .sync_by_organizations(request.server_version, &organizations)
            .await?
    } else {
        return Err(Error::InvalidArgument(
            "sync requires organizations or operational areas".to_string(),
        ));
    };
    Ok(Json(plans))
}

/// `GET /rest/plans/sync?operational_area_id=a&operational_area_id=b&serverVersion=0`
///
/// The query carries a repeated key, which `Query<T>` cannot express, so
/// the raw string is walked instead.
pub async fn sync_by_operational_areas(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<PlanDefinition>>> {
    let query = query.unwrap_or_default();
    let mut areas = Vec::new();
    let mut server_version = 0i64;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "operational_area_id" => areas.push(value.into_owned()),
            "serverVersion" => {
                server_version = value.trim().parse().map_err(|_| {
                    Error::InvalidArgument(format!("invalid serverVersion: {value}"))
                })?;
            }
            _ => {}
        }
    }

    let plans = state
        .plans
        .sync_by_operational_areas(server_version, &areas)
        .await?;
    Ok(Json(plans))
}

#[derive(Debug, Deserialize)]
pub struct OptionalFieldsQuery {
    #[serde(default)]
    pub identifiers: String,
    #[serde(default)]
    pub fields: String,
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `GET /rest/plans/findByIdsWithOptionalFields?identifiers=a,b&fields=name,action`
pub async fn find_by_ids_with_optional_fields(
    State(state): State<AppState>,
    Query(query): Query<OptionalFieldsQuery>,
) -> Result<Json<Vec<PlanDefinition>>> {
    let identifiers = split_csv(&query.identifiers);
    let fields = split_csv(&query.fields);
    let plans = state
        .plans
        .by_identifiers_with_optional_fields(&identifiers, &fields)
        .await?;
    Ok(Json(plans))
}

/// `GET /rest/plans/findLocationNames/:identifier`
pub async fn find_location_names(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<Vec<LocationDetail>>> {
    Ok(Json(state.plans.location_details(&identifier).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedQuery {
    #[serde(default)]
    pub server_version: i64,
    #[serde(default = "default_page_limit")]
    pub limit: i64,
}

fn default_page_limit() -> i64 {
    25
}

/// `GET /rest/plans/getAll?serverVersion=0&limit=25` — watermark-ordered
/// page for bulk export.
pub async fn get_all_paged(
    State(state): State<AppState>,
    Query(query): Query<PagedQuery>,
) -> Result<Json<Vec<PlanDefinition>>> {
    Ok(Json(state.plans.page(query.server_version, query.limit).await?))
}

/// `GET /rest/plans/findIds`
pub async fn find_ids(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.plans.identifiers().await?))
}

/// `GET /rest/plans/:identifier` — a list of one, matching the shape
/// clients already consume for the batch lookups.
pub async fn get_plan(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<Vec<PlanDefinition>>> {
    let plans = state
        .plans
        .by_identifiers_with_optional_fields(&[identifier.clone()], &[])
        .await?;
    if plans.is_empty() {
        return Err(Error::NotFound(format!("Plan {identifier}")));
    }
    Ok(Json(plans))
}
