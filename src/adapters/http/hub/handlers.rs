//! HTTP handlers for hub endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::params::{parse_hub_id, parse_user_id};
use crate::adapters::http::state::AppState;
use crate::application::handlers::hub::DEFAULT_WINDOW_HOURS;
use crate::application::handlers::{
    CreateHubCommand, GetHubQuery, JoinHubCommand, ListOpenHubsQuery, ListUpcomingHubsQuery,
};
use crate::domain::foundation::Timestamp;

use super::dto::{CreateHubRequest, CreateHubResponse, JoinHubRequest, JoinHubResponse, UpcomingQuery};

/// POST /bhub/create
pub async fn create_hub(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
    payload: Result<Json<CreateHubRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let cmd = CreateHubCommand {
        host_id: parse_user_id(req.host_id, "host_id")?,
        location: req.location,
        time_slot: Timestamp::from_datetime(req.time_slot),
        min_members: req.min_members,
        max_members: req.max_members,
        price_total: req.price_total,
    };

    let hub = state.create_hub_handler().handle(cmd).await?;
    let response = CreateHubResponse {
        bhub_id: hub.id,
        price_per_person: hub.price_per_person,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /bhub/list
pub async fn list_open_hubs(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let hubs = state
        .list_open_hubs_handler()
        .handle(ListOpenHubsQuery {
            now: Timestamp::now(),
        })
        .await?;
    Ok(Json(hubs))
}

/// GET /bhub/upcoming?within_hours=N
pub async fn list_upcoming_hubs(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
    params: Result<Query<UpcomingQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let query = ListUpcomingHubsQuery {
        now: Timestamp::now(),
        within_hours: params.within_hours.unwrap_or(DEFAULT_WINDOW_HOURS),
    };
    let hubs = state.list_upcoming_hubs_handler().handle(query).await?;
    Ok(Json(hubs))
}

/// GET /bhub/:id
pub async fn get_hub(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let hub_id = parse_hub_id(&id)?;
    let summary = state.get_hub_handler().handle(GetHubQuery { hub_id }).await?;
    Ok(Json(summary))
}

/// POST /bhub/:id/join
pub async fn join_hub(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
    Path(id): Path<String>,
    payload: Result<Json<JoinHubRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let hub_id = parse_hub_id(&id)?;
    let Json(req) = payload?;

    let cmd = JoinHubCommand {
        hub_id,
        user_id: parse_user_id(req.user_id, "user_id")?,
    };
    let result = state.join_hub_handler().handle(cmd).await?;
    Ok(Json(JoinHubResponse::from(result)))
}
