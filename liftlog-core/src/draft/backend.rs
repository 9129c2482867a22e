use async_trait::async_trait;
use chrono::NaiveDate;

use crate::db::models::{
    Exercise, NewWorkoutExercise, NewWorkoutSet, UpdateWorkoutSet, Workout, WorkoutExercise,
    WorkoutSet,
};
use crate::error::Result;
use crate::session::Session;

/// The mutations a workout form can flush. [`Session`] is the real implementation.
#[async_trait]
pub trait WorkoutBackend: Send + Sync {
    async fn create_workout(&self, date: NaiveDate) -> Result<Workout>;
    async fn complete_workout(&self, workout_id: i64) -> Result<Workout>;
    async fn delete_workout(&self, workout_id: i64) -> Result<()>;
    async fn create_exercise(&self, name: &str) -> Result<Exercise>;
    async fn add_exercise_to_workout(&self, new: &NewWorkoutExercise) -> Result<WorkoutExercise>;
    async fn delete_workout_exercise(&self, workout_exercise_id: i64) -> Result<()>;
    async fn add_set(&self, new: &NewWorkoutSet) -> Result<WorkoutSet>;
    async fn update_set(&self, set_id: i64, update: &UpdateWorkoutSet) -> Result<WorkoutSet>;
    async fn delete_set(&self, set_id: i64) -> Result<()>;
}

#[async_trait]
impl WorkoutBackend for Session {
    async fn create_workout(&self, date: NaiveDate) -> Result<Workout> {
        Session::create_workout(self, date).await
    }

    async fn complete_workout(&self, workout_id: i64) -> Result<Workout> {
        Session::complete_workout(self, workout_id).await
    }

    async fn delete_workout(&self, workout_id: i64) -> Result<()> {
        Session::delete_workout(self, workout_id).await
    }

    async fn create_exercise(&self, name: &str) -> Result<Exercise> {
        Session::create_exercise(self, name).await
    }

    async fn add_exercise_to_workout(&self, new: &NewWorkoutExercise) -> Result<WorkoutExercise> {
        Session::add_exercise_to_workout(self, new).await
    }

    async fn delete_workout_exercise(&self, workout_exercise_id: i64) -> Result<()> {
        Session::delete_workout_exercise(self, workout_exercise_id).await
    }

    async fn add_set(&self, new: &NewWorkoutSet) -> Result<WorkoutSet> {
        Session::add_set(self, new).await
    }

    async fn update_set(&self, set_id: i64, update: &UpdateWorkoutSet) -> Result<WorkoutSet> {
        Session::update_set(self, set_id, update).await
    }

    async fn delete_set(&self, set_id: i64) -> Result<()> {
        Session::delete_set(self, set_id).await
    }
}
