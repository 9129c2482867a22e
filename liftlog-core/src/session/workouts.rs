//! Workout lifecycle: create, reschedule, complete, delete.

use chrono::NaiveDate;
use log::{debug, info};

use crate::db::models::{UpdateWorkout, Workout};
use crate::db::operations::{
    delete_workout_cascade, get_owned_workout, get_workout, insert_workout,
    mark_workout_completed, unix_now, update_workout_date,
};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::session::session::require_positive_id;

impl Session {
    /// Start a workout for `date`, owned by the caller.
    pub async fn create_workout(&self, date: NaiveDate) -> Result<Workout> {
        let caller = self.require_caller()?;
        let workout = insert_workout(&self.db_pool, caller, date, Some(unix_now())).await?;
        info!("Created workout {} for {} on {}", workout.id, caller, date);
        self.mutated().await;
        Ok(workout)
    }

    /// Change a workout's date. The owner is fixed at creation and never changes here.
    pub async fn update_workout(&self, workout_id: i64, update: &UpdateWorkout) -> Result<Workout> {
        let caller = self.require_caller()?;
        require_positive_id("workout", workout_id)?;
        let workout = self.owned_workout(workout_id).await?;

        let Some(date) = update.date else {
            return Ok(workout);
        };
        let updated = update_workout_date(&self.db_pool, workout_id, date).await?;
        debug!("Workout {} moved to {} by {}", workout_id, date, caller);
        self.mutated().await;
        Ok(updated)
    }

    /// Mark the workout as saved.
    pub async fn complete_workout(&self, workout_id: i64) -> Result<Workout> {
        self.require_caller()?;
        require_positive_id("workout", workout_id)?;
        self.owned_workout(workout_id).await?;

        let workout = mark_workout_completed(&self.db_pool, workout_id, unix_now()).await?;
        info!("Completed workout {}", workout_id);
        self.mutated().await;
        Ok(workout)
    }

    /// Delete a workout with all of its workout exercises and sets.
    pub async fn delete_workout(&self, workout_id: i64) -> Result<()> {
        self.require_caller()?;
        require_positive_id("workout", workout_id)?;
        self.owned_workout(workout_id).await?;

        delete_workout_cascade(&self.db_pool, workout_id).await?;
        info!("Deleted workout {}", workout_id);
        self.mutated().await;
        Ok(())
    }

    /// Load a workout the caller owns, or fail with not-found.
    pub(crate) async fn owned_workout(&self, workout_id: i64) -> Result<Workout> {
        let caller = self.require_caller()?;
        if let Some(workout) = get_owned_workout(&self.db_pool, workout_id, caller).await? {
            return Ok(workout);
        }
        let owner = get_workout(&self.db_pool, workout_id)
            .await?
            .map(|w| w.owner_id);
        self.check_owner(caller, owner, "Workout", workout_id)?;
        Err(Error::not_found("Workout", workout_id))
    }
}
