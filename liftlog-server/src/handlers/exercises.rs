use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use liftlog::db::models::Exercise;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::CurrentSession;
use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct ExerciseNameRequest {
    pub name: String,
}

/// GET /api/exercises
pub async fn list_exercises(
    CurrentSession(session): CurrentSession,
) -> AppResult<Json<DataResponse<Vec<Exercise>>>> {
    let exercises = session.list_exercises().await?;
    Ok(Json(DataResponse::new(exercises)))
}

/// POST /api/exercises
pub async fn create_exercise(
    CurrentSession(session): CurrentSession,
    Json(body): Json<ExerciseNameRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Exercise>>)> {
    let exercise = session.create_exercise(&body.name).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(exercise))))
}

/// PUT /api/exercises/{id}
pub async fn rename_exercise(
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
    Json(body): Json<ExerciseNameRequest>,
) -> AppResult<Json<DataResponse<Exercise>>> {
    let exercise = session.rename_exercise(id, &body.name).await?;
    Ok(Json(DataResponse::new(exercise)))
}

/// DELETE /api/exercises/{id}
pub async fn delete_exercise(
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    session.delete_exercise(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
