use log::{debug, info};
use validator::Validate;

use crate::db::models::{NewWorkoutExercise, UpdateWorkoutExercise, WorkoutExercise};
use crate::db::operations::{
    delete_workout_exercise_cascade, get_exercise, get_workout_exercise_owner,
    insert_workout_exercise, update_workout_exercise,
};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::session::session::require_positive_id;

impl Session {
    /// Append an exercise to a workout the caller owns.
    pub async fn add_exercise_to_workout(&self, new: &NewWorkoutExercise) -> Result<WorkoutExercise> {
        self.require_caller()?;
        new.validate()?;
        self.owned_workout(new.workout_id).await?;
        self.existing_exercise(new.exercise_id).await?;

        let entry =
            insert_workout_exercise(&self.db_pool, new.workout_id, new.exercise_id, new.order)
                .await?;
        debug!(
            "Added exercise {} to workout {} at position {}",
            new.exercise_id, new.workout_id, new.order
        );
        self.mutated().await;
        Ok(entry)
    }

    /// Swap the exercise or move it within its workout.
    pub async fn update_workout_exercise(
        &self,
        workout_exercise_id: i64,
        update: &UpdateWorkoutExercise,
    ) -> Result<WorkoutExercise> {
        self.require_caller()?;
        require_positive_id("workout exercise", workout_exercise_id)?;
        update.validate()?;
        self.authorize_workout_exercise(workout_exercise_id).await?;
        if let Some(exercise_id) = update.exercise_id {
            self.existing_exercise(exercise_id).await?;
        }

        let entry = update_workout_exercise(
            &self.db_pool,
            workout_exercise_id,
            update.exercise_id,
            update.order,
        )
        .await?;
        self.mutated().await;
        Ok(entry)
    }

    /// Remove an exercise from its workout along with all of its sets.
    pub async fn delete_workout_exercise(&self, workout_exercise_id: i64) -> Result<()> {
        self.require_caller()?;
        require_positive_id("workout exercise", workout_exercise_id)?;
        self.authorize_workout_exercise(workout_exercise_id).await?;

        delete_workout_exercise_cascade(&self.db_pool, workout_exercise_id).await?;
        info!("Deleted workout exercise {}", workout_exercise_id);
        self.mutated().await;
        Ok(())
    }

    pub(crate) async fn authorize_workout_exercise(&self, workout_exercise_id: i64) -> Result<()> {
        let caller = self.require_caller()?;
        let owner = get_workout_exercise_owner(&self.db_pool, workout_exercise_id).await?;
        self.check_owner(caller, owner, "Workout exercise", workout_exercise_id)
    }

    async fn existing_exercise(&self, exercise_id: i64) -> Result<()> {
        match get_exercise(&self.db_pool, exercise_id).await? {
            Some(_) => Ok(()),
            None => Err(Error::not_found("Exercise", exercise_id)),
        }
    }
}
