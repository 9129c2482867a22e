//! The exercise library is shared by every user. Changing it still needs a
//! signed-in caller, but there is no owner to check.

use log::info;
use validator::Validate;

use crate::db::models::{Exercise, NewExercise};
use crate::db::operations::{
    count_exercise_uses, delete_exercise, get_all_exercises, insert_exercise, rename_exercise,
};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::session::session::require_positive_id;

fn normalized(name: &str) -> Result<NewExercise> {
    let new = NewExercise {
        name: name.trim().to_string(),
    };
    new.validate()?;
    Ok(new)
}

impl Session {
    /// All exercises, sorted by name. Available without signing in.
    pub async fn list_exercises(&self) -> Result<Vec<Exercise>> {
        get_all_exercises(&self.db_pool).await
    }

    pub async fn create_exercise(&self, name: &str) -> Result<Exercise> {
        self.require_caller()?;
        let new = normalized(name)?;

        let exercise = insert_exercise(&self.db_pool, &new.name)
            .await
            .map_err(|e| match e {
                Error::Conflict(_) => {
                    Error::Conflict(format!("exercise '{}' already exists", new.name))
                }
                other => other,
            })?;
        info!("Created exercise {} ({})", exercise.name, exercise.id);
        self.mutated().await;
        Ok(exercise)
    }

    pub async fn rename_exercise(&self, exercise_id: i64, name: &str) -> Result<Exercise> {
        self.require_caller()?;
        require_positive_id("exercise", exercise_id)?;
        let new = normalized(name)?;

        let exercise = rename_exercise(&self.db_pool, exercise_id, &new.name)
            .await
            .map_err(|e| match e {
                Error::Conflict(_) => {
                    Error::Conflict(format!("exercise '{}' already exists", new.name))
                }
                other => other,
            })?
            .ok_or_else(|| Error::not_found("Exercise", exercise_id))?;
        self.mutated().await;
        Ok(exercise)
    }

    /// Delete an exercise no workout refers to.
    pub async fn delete_exercise(&self, exercise_id: i64) -> Result<()> {
        self.require_caller()?;
        require_positive_id("exercise", exercise_id)?;

        let uses = count_exercise_uses(&self.db_pool, exercise_id).await?;
        if uses > 0 {
            return Err(Error::Conflict(format!(
                "exercise {} is used by {} workout entries",
                exercise_id, uses
            )));
        }
        if delete_exercise(&self.db_pool, exercise_id).await? == 0 {
            return Err(Error::not_found("Exercise", exercise_id));
        }
        info!("Deleted exercise {}", exercise_id);
        self.mutated().await;
        Ok(())
    }
}
