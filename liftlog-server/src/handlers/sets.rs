use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use liftlog::db::models::{NewWorkoutSet, UpdateWorkoutSet, WorkoutSet};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::CurrentSession;
use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct AddSetRequest {
    pub set_number: i64,
    pub weight: f64,
    pub reps: i64,
}

/// POST /api/workout-exercises/{id}/sets
pub async fn add_set(
    CurrentSession(session): CurrentSession,
    Path(workout_exercise_id): Path<i64>,
    Json(body): Json<AddSetRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<WorkoutSet>>)> {
    let set = session
        .add_set(&NewWorkoutSet {
            workout_exercise_id,
            set_number: body.set_number,
            weight: body.weight,
            reps: body.reps,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(set))))
}

/// PUT /api/sets/{id}
pub async fn update_set(
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
    Json(body): Json<UpdateWorkoutSet>,
) -> AppResult<Json<DataResponse<WorkoutSet>>> {
    let set = session.update_set(id, &body).await?;
    Ok(Json(DataResponse::new(set)))
}

/// DELETE /api/sets/{id}
pub async fn delete_set(
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    session.delete_set(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
