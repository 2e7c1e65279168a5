use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;

use vigil_database::impls::experiment;
use vigil_database::model::experiment::{Experiment, ExperimentStatus};

use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: u32 = 100;

fn author_login(headers: &HeaderMap) -> String {
    headers
        .get("x-login")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_owned()
}

#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub start: Option<u32>,
}

/// GET /api/experiments — list experiments, newest-updated first.
pub async fn list_experiments(
    State(app): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Experiment>>, AppError> {
    let limit = match params.limit {
        Some(0) | None => DEFAULT_LIST_LIMIT,
        Some(limit) => limit,
    };

    let experiments =
        experiment::list_experiments(&app.db, limit, params.start.unwrap_or(0)).await?;
    Ok(Json(experiments))
}

#[derive(Deserialize)]
pub struct CreateExperimentBody {
    pub name: String,
    pub value: serde_json::Value,
}

/// POST /api/experiments — create an experiment with status `init`.
pub async fn create_experiment(
    State(app): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateExperimentBody>,
) -> Result<(StatusCode, Json<Experiment>), AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::bad_request("experiment name must not be empty"));
    }

    let author = author_login(&headers);
    let created = experiment::create_experiment(&app.db, &body.name, &body.value, &author).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Deserialize)]
pub struct UpdateExperimentBody {
    pub name: String,
    pub status: ExperimentStatus,
    pub value: serde_json::Value,
}

/// PUT /api/experiments/{id} — update name, payload, and status.
pub async fn update_experiment(
    State(app): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<UpdateExperimentBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let author = author_login(&headers);
    let updated = experiment::update_experiment(
        &app.db,
        id,
        &body.name,
        body.status,
        &body.value,
        &author,
    )
    .await?;

    if !updated {
        return Err(AppError::not_found(format!("experiment {id} not found")));
    }

    Ok(Json(serde_json::json!({ "message": "experiment updated" })))
}

/// DELETE /api/experiments/{id} — hard-delete an experiment.
pub async fn delete_experiment(
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = experiment::delete_experiment(&app.db, id).await?;

    if !deleted {
        return Err(AppError::not_found(format!("experiment {id} not found")));
    }

    Ok(Json(serde_json::json!({ "message": "experiment deleted" })))
}
