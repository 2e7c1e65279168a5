use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use vigil_core::AlertContext;
use vigil_notify::DingTalkNotifier;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TestNotificationBody {
    /// Raw channel settings, validated before dispatch.
    pub settings: serde_json::Value,
    pub alert: AlertContext,
}

/// POST /api/notifications/test — render the given alert with the given
/// channel settings and dispatch it. Invalid settings are 400; dispatch
/// failures are 502.
pub async fn test_notification(
    State(app): State<AppState>,
    Json(body): Json<TestNotificationBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let notifier = DingTalkNotifier::from_settings(&body.settings, app.call_out_url.as_deref())
        .map_err(|source| AppError::bad_request(source.to_string()))?;

    notifier
        .notify(&body.alert)
        .await
        .map_err(|source| AppError::bad_gateway(source.to_string()))?;

    Ok(Json(serde_json::json!({ "message": "notification sent" })))
}
