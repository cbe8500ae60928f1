//! Router test harness: an app wired against in-memory stores with auth
//! disabled, exercised through `tower::ServiceExt::oneshot`.

pub mod builders;
pub mod stores;

pub use builders::*;
pub use stores::*;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use outreach::{api::create_router, config::Config, state::AppState};
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    router: Router,
    pub organizations: Arc<InMemoryOrganizations>,
    pub assignments: Arc<InMemoryAssignments>,
    pub plans: Arc<InMemoryPlans>,
    pub campaigns: Arc<InMemoryCampaigns>,
    pub practitioners: Arc<InMemoryPractitioners>,
    pub locations: Arc<InMemoryLocations>,
}

impl TestApp {
    pub fn new() -> anyhow::Result<Self> {
        let organizations = Arc::new(InMemoryOrganizations::default());
        let assignments = Arc::new(InMemoryAssignments::default());
        let plans = Arc::new(InMemoryPlans::default());
        let campaigns = Arc::new(InMemoryCampaigns::default());
        let practitioners = Arc::new(InMemoryPractitioners::default());
        let locations = Arc::new(InMemoryLocations::default());

        // Defaults leave auth disabled, so the principal comes from the
        // x-user-id header.
        let state = AppState::from_stores(
            Config::default(),
            organizations.clone(),
            assignments.clone(),
            plans.clone(),
            campaigns.clone(),
            practitioners.clone(),
            locations.clone(),
        )?;

        Ok(Self {
            router: create_router(state),
            organizations,
            assignments,
            plans,
            campaigns,
            practitioners,
            locations,
        })
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Vec<u8>)> {
        self.send(method, path, body, None).await
    }

    /// Like [`TestApp::request`], acting as the given user.
    pub async fn request_as(
        &self,
        user_id: &str,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Vec<u8>)> {
        self.send(method, path, body, Some(user_id)).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        user_id: Option<&str>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Vec<u8>)> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(user_id) = user_id {
            builder = builder.header("x-user-id", user_id);
        }
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&value)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, headers, bytes.to_vec()))
    }
}

pub fn json_body(bytes: &[u8]) -> anyhow::Result<serde_json::Value> {
    Ok(serde_json::from_slice(bytes)?)
}
