use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use liftlog::db::models::{NewWorkoutExercise, UpdateWorkoutExercise, WorkoutExercise};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::CurrentSession;
use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct AddExerciseRequest {
    pub exercise_id: i64,
    pub order: i64,
}

/// POST /api/workouts/{id}/exercises
pub async fn add_exercise_to_workout(
    CurrentSession(session): CurrentSession,
    Path(workout_id): Path<i64>,
    Json(body): Json<AddExerciseRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<WorkoutExercise>>)> {
    let entry = session
        .add_exercise_to_workout(&NewWorkoutExercise {
            workout_id,
            exercise_id: body.exercise_id,
            order: body.order,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(entry))))
}

/// PUT /api/workout-exercises/{id}
pub async fn update_workout_exercise(
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
    Json(body): Json<UpdateWorkoutExercise>,
) -> AppResult<Json<DataResponse<WorkoutExercise>>> {
    let entry = session.update_workout_exercise(id, &body).await?;
    Ok(Json(DataResponse::new(entry)))
}

/// DELETE /api/workout-exercises/{id}
pub async fn delete_workout_exercise(
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    session.delete_workout_exercise(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
