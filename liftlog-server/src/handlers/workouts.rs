use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use chrono::NaiveDate;
use liftlog::db::models::{UpdateWorkout, Workout, WorkoutDetail};
use liftlog::Error as CoreError;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::CurrentSession;
use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    pub date: NaiveDate,
}

/// GET /api/workouts?date=YYYY-MM-DD
pub async fn workouts_by_date(
    CurrentSession(session): CurrentSession,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<DataResponse<Vec<WorkoutDetail>>>> {
    let date = query
        .date
        .ok_or_else(|| AppError::BadRequest("date query parameter is required".into()))?;
    let view = session.workouts_by_date(date).await?;
    Ok(Json(DataResponse::new(view.as_ref().clone())))
}

/// POST /api/workouts
pub async fn create_workout(
    CurrentSession(session): CurrentSession,
    Json(body): Json<CreateWorkoutRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Workout>>)> {
    let workout = session.create_workout(body.date).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(workout))))
}

/// GET /api/workouts/{id}
pub async fn get_workout(
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
) -> AppResult<Json<DataResponse<WorkoutDetail>>> {
    let workout = session
        .get_workout(id)
        .await?
        .ok_or(CoreError::not_found("Workout", id))?;
    Ok(Json(DataResponse::new(workout)))
}

/// PUT /api/workouts/{id}
pub async fn update_workout(
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
    Json(body): Json<UpdateWorkout>,
) -> AppResult<Json<DataResponse<Workout>>> {
    let workout = session.update_workout(id, &body).await?;
    Ok(Json(DataResponse::new(workout)))
}

/// POST /api/workouts/{id}/complete
pub async fn complete_workout(
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
) -> AppResult<Json<DataResponse<Workout>>> {
    let workout = session.complete_workout(id).await?;
    Ok(Json(DataResponse::new(workout)))
}

/// DELETE /api/workouts/{id}
pub async fn delete_workout(
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    session.delete_workout(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
