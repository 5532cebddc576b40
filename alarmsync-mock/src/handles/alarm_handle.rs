use alarmsync_api::models::*;
use alarmsync_api::routes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use serde_json::{Value, json};

use crate::state::{ArmResult, MockState};

type BearerHeader = Option<TypedHeader<Authorization<Bearer>>>;

async fn authorize(state: &MockState, bearer: BearerHeader) -> Result<(), StatusCode> {
    let Some(TypedHeader(header)) = bearer else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    if state.is_authorized(header.token()).await {
        Ok(())
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

#[utoipa::path(
    get,
    path = "/alarmtc/status",
    tag = "alarms",
    params(AlarmStatusQuery),
    responses(
        (status = 200, description = "Every alarm of the device, enabled or not", body = Vec<Alarm>),
        (status = 401, description = "Missing or unknown token")
    )
)]
pub async fn alarm_status(
    State(state): State<MockState>,
    bearer: BearerHeader,
    Query(query): Query<AlarmStatusQuery>,
) -> Result<Json<Vec<Alarm>>, StatusCode> {
    state.record_hit(routes::ALARM_STATUS).await;
    authorize(&state, bearer).await?;

    Ok(Json(state.device_alarms(&query.mac).await))
}

#[utoipa::path(
    post,
    path = "/arm",
    tag = "alarms",
    params(ArmQuery),
    responses(
        (status = 200, description = "Command applied"),
        (status = 400, description = "Status is neither 0 nor 1"),
        (status = 401, description = "Missing or unknown token"),
        (status = 404, description = "Unknown device or alarm"),
        (status = 500, description = "Command could not be applied")
    )
)]
pub async fn arm(
    State(state): State<MockState>,
    bearer: BearerHeader,
    Query(query): Query<ArmQuery>,
) -> Result<Json<Value>, StatusCode> {
    state.record_hit(routes::ARM).await;
    authorize(&state, bearer).await?;

    let arm_state = ArmState::from_code(query.status).ok_or(StatusCode::BAD_REQUEST)?;

    match state.arm(&query.mac, query.alarm, arm_state.is_armed()).await {
        ArmResult::Applied => {
            tracing::info!(mac = %query.mac, alarm = query.alarm, state = %arm_state, "alarm updated");
            Ok(Json(json!({ "status": STATUS_OK })))
        }
        ArmResult::NotFound => Err(StatusCode::NOT_FOUND),
        ArmResult::Failed => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
