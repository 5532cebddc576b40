use alarmsync_api::models::*;
use alarmsync_api::routes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::state::MockState;

#[utoipa::path(
    post,
    path = "/api/v1/loginMovil/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, return session token", body = LoginResponse),
        (status = 401, description = "Invalid email or password", body = LoginResponse)
    )
)]
pub async fn login(
    State(state): State<MockState>,
    Json(body): Json<LoginRequest>,
) -> (StatusCode, Json<LoginResponse>) {
    state.record_hit(routes::LOGIN).await;

    match state.login(&body.email, &body.password).await {
        Some(token) => {
            tracing::info!(email = %body.email, "issued session token");
            (
                StatusCode::OK,
                Json(LoginResponse {
                    token: Some(token),
                    status: Some(STATUS_OK.to_string()),
                }),
            )
        }
        None => {
            tracing::info!(email = %body.email, "rejected credentials");
            (
                StatusCode::UNAUTHORIZED,
                Json(LoginResponse {
                    token: None,
                    status: Some(STATUS_INVALID.to_string()),
                }),
            )
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/loginMovil/validarToken",
    tag = "auth",
    request_body = ValidateTokenRequest,
    responses(
        (status = 200, description = "Status `OK` for a live token, `INVALID` otherwise", body = ValidateTokenResponse)
    )
)]
pub async fn validate_token(
    State(state): State<MockState>,
    Json(body): Json<ValidateTokenRequest>,
) -> Json<ValidateTokenResponse> {
    state.record_hit(routes::VALIDATE_TOKEN).await;

    let status = if state.validate(&body.token).await {
        STATUS_OK
    } else {
        STATUS_INVALID
    };

    Json(ValidateTokenResponse {
        status: status.to_string(),
    })
}
