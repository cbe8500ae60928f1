//! Campaign resource handlers

use crate::state::AppState;
use crate::{Error, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use outreach_models::Campaign;
use serde::Deserialize;

/// `GET /rest/campaign`
pub async fn get_campaigns(State(state): State<AppState>) -> Result<Json<Vec<Campaign>>> {
    Ok(Json(state.campaigns.all().await?))
}

/// `GET /rest/campaign/:identifier`
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<Campaign>> {
    match state.campaigns.get(&identifier).await? {
        Some(campaign) => Ok(Json(campaign)),
        None => Err(Error::NotFound(format!("Campaign {identifier}"))),
    }
}

/// `POST /rest/campaign`
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(campaign): Json<Campaign>,
) -> Result<StatusCode> {
    state.campaigns.add(&campaign).await?;
    Ok(StatusCode::CREATED)
}

/// `PUT /rest/campaign`
pub async fn update_campaign(
    State(state): State<AppState>,
    Json(campaign): Json<Campaign>,
) -> Result<StatusCode> {
    state.campaigns.update(&campaign).await?;
    Ok(StatusCode::CREATED)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSyncQuery {
    #[serde(default)]
    pub server_version: i64,
}

/// `GET /rest/campaign/sync?serverVersion=0`
pub async fn sync_by_server_version(
    State(state): State<AppState>,
    Query(query): Query<CampaignSyncQuery>,
) -> Result<Json<Vec<Campaign>>> {
    Ok(Json(
        state
            .campaigns
            .sync_by_server_version(query.server_version)
            .await?,
    ))
}
