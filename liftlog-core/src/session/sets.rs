use log::debug;
use validator::Validate;

use crate::db::models::{NewWorkoutSet, UpdateWorkoutSet, WorkoutSet};
use crate::db::operations::{delete_set, get_set_owner, insert_set, update_set};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::session::session::require_positive_id;

fn require_finite(weight: f64) -> Result<()> {
    if weight.is_finite() {
        Ok(())
    } else {
        Err(Error::validation("weight must be a finite number"))
    }
}

impl Session {
    /// Record a set under a workout exercise the caller owns.
    pub async fn add_set(&self, new: &NewWorkoutSet) -> Result<WorkoutSet> {
        self.require_caller()?;
        new.validate()?;
        require_finite(new.weight)?;
        self.authorize_workout_exercise(new.workout_exercise_id)
            .await?;

        let set = insert_set(
            &self.db_pool,
            new.workout_exercise_id,
            new.set_number,
            new.weight,
            new.reps,
        )
        .await?;
        debug!("Added {} to workout exercise {}", set, new.workout_exercise_id);
        self.mutated().await;
        Ok(set)
    }

    pub async fn update_set(&self, set_id: i64, update: &UpdateWorkoutSet) -> Result<WorkoutSet> {
        self.require_caller()?;
        require_positive_id("set", set_id)?;
        update.validate()?;
        require_finite(update.weight)?;
        self.authorize_set(set_id).await?;

        let set = update_set(&self.db_pool, set_id, update.weight, update.reps).await?;
        debug!("Updated set {}: {}", set_id, set);
        self.mutated().await;
        Ok(set)
    }

    pub async fn delete_set(&self, set_id: i64) -> Result<()> {
        self.require_caller()?;
        require_positive_id("set", set_id)?;
        self.authorize_set(set_id).await?;

        delete_set(&self.db_pool, set_id).await?;
        debug!("Deleted set {}", set_id);
        self.mutated().await;
        Ok(())
    }

    async fn authorize_set(&self, set_id: i64) -> Result<()> {
        let caller = self.require_caller()?;
        let owner = get_set_owner(&self.db_pool, set_id).await?;
        self.check_owner(caller, owner, "Set", set_id)
    }
}
