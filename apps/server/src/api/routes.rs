//! REST API routes
//!
//! All resources live under `/rest`. Exact routes are registered before
//! parameterized ones; axum prefers static segments over captures, so
//! `/plans/sync` never collides with `/plans/:identifier`.

use crate::api::handlers::{campaign, organization, plan};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn rest_routes() -> Router<AppState> {
    Router::new()
        .nest("/organization", organization_routes())
        .nest("/plans", plan_routes())
        .nest("/campaign", campaign_routes())
}

fn organization_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(organization::get_organizations).post(organization::create_organization),
        )
        .route("/search", get(organization::search_organizations))
        .route("/search/", get(organization::search_organizations))
        .route(
            "/assignLocationsAndPlans",
            post(organization::assign_locations_and_plans),
        )
        .route(
            "/assignedLocationsAndPlans",
            get(organization::get_assigned_locations_and_plans_by_plan),
        )
        .route(
            "/assignedLocationsAndPlans/:identifier",
            get(organization::get_assigned_locations_and_plans),
        )
        .route(
            "/practitioner/:identifier",
            get(organization::get_practitioners),
        )
        .route("/user-assignment", get(organization::get_user_assignment))
        .route(
            "/:identifier",
            get(organization::get_organization).put(organization::update_organization),
        )
}

fn plan_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(plan::get_plans)
                .post(plan::create_plan)
                .put(plan::update_plan),
        )
        .route("/sync", get(plan::sync_by_operational_areas).post(plan::sync))
        .route(
            "/findByIdsWithOptionalFields",
            get(plan::find_by_ids_with_optional_fields),
        )
        .route("/findLocationNames/:identifier", get(plan::find_location_names))
        .route("/getAll", get(plan::get_all_paged))
        .route("/findIds", get(plan::find_ids))
        .route("/:identifier", get(plan::get_plan))
}

fn campaign_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(campaign::get_campaigns)
                .post(campaign::create_campaign)
                .put(campaign::update_campaign),
        )
        .route("/sync", get(campaign::sync_by_server_version))
        .route("/:identifier", get(campaign::get_campaign))
}
