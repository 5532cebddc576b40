use alarmsync_api::models::*;
use alarmsync_api::routes;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::handles::*;
use crate::state::MockState;

#[derive(OpenApi)]
#[openapi(
    paths(login, validate_token, alarm_status, arm),
    components(schemas(
        Alarm,
        ArmState,
        LoginRequest,
        LoginResponse,
        ValidateTokenRequest,
        ValidateTokenResponse
    )),
    tags(
        (name = "auth", description = "Session token issue and validation"),
        (name = "alarms", description = "Per-device alarm status and commands")
    )
)]
pub struct ApiDoc;

pub fn create_app(state: MockState) -> Router {
    Router::new()
        .route(routes::LOGIN, post(login))
        .route(routes::VALIDATE_TOKEN, post(validate_token))
        .route(routes::ALARM_STATUS, get(alarm_status))
        .route(routes::ARM, post(arm))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
