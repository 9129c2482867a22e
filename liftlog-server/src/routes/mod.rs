pub mod health;

use axum::Router;
use axum::routing::{get, post, put};

use crate::handlers::{exercises, sets, workout_exercises, workouts};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /exercises                         list, create
/// /exercises/{id}                    rename, delete
/// /workouts?date=YYYY-MM-DD          workouts on a day, create
/// /workouts/{id}                     get, update, delete
/// /workouts/{id}/complete            complete (POST)
/// /workouts/{id}/exercises           add exercise (POST)
/// /workout-exercises/{id}            update, delete
/// /workout-exercises/{id}/sets       add set (POST)
/// /sets/{id}                         update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/exercises",
            get(exercises::list_exercises).post(exercises::create_exercise),
        )
        .route(
            "/exercises/{id}",
            put(exercises::rename_exercise).delete(exercises::delete_exercise),
        )
        .route(
            "/workouts",
            get(workouts::workouts_by_date).post(workouts::create_workout),
        )
        .route(
            "/workouts/{id}",
            get(workouts::get_workout)
                .put(workouts::update_workout)
                .delete(workouts::delete_workout),
        )
        .route("/workouts/{id}/complete", post(workouts::complete_workout))
        .route(
            "/workouts/{id}/exercises",
            post(workout_exercises::add_exercise_to_workout),
        )
        .route(
            "/workout-exercises/{id}",
            put(workout_exercises::update_workout_exercise)
                .delete(workout_exercises::delete_workout_exercise),
        )
        .route("/workout-exercises/{id}/sets", post(sets::add_set))
        .route("/sets/{id}", put(sets::update_set).delete(sets::delete_set))
}
