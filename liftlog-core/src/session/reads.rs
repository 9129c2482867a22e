//! Read side. Anonymous callers and foreign rows produce empty results, not errors.

use chrono::NaiveDate;
use log::trace;
use std::sync::Arc;

use crate::db::models::WorkoutDetail;
use crate::db::operations::{get_owned_workout, get_workouts_on_date, load_workout_details};
use crate::error::Result;
use crate::session::Session;

impl Session {
    /// A single workout with its exercises and sets, if the caller owns it.
    pub async fn get_workout(&self, workout_id: i64) -> Result<Option<WorkoutDetail>> {
        let Some(caller) = self.caller() else {
            return Ok(None);
        };
        let Some(workout) = get_owned_workout(&self.db_pool, workout_id, caller).await? else {
            return Ok(None);
        };
        Ok(load_workout_details(&self.db_pool, vec![workout])
            .await?
            .into_iter()
            .next())
    }

    /// The caller's workouts on `date`, served from the dashboard cache when possible.
    pub async fn workouts_by_date(&self, date: NaiveDate) -> Result<Arc<Vec<WorkoutDetail>>> {
        let Some(caller) = self.caller() else {
            return Ok(Arc::new(Vec::new()));
        };

        let dashboard = self.dashboard();
        if let Some(view) = dashboard.get(caller, date).await {
            trace!("Dashboard cache hit for {} on {}", caller, date);
            return Ok(view);
        }

        let generation = dashboard.generation();
        let workouts = get_workouts_on_date(&self.db_pool, caller, date).await?;
        let view = Arc::new(load_workout_details(&self.db_pool, workouts).await?);
        dashboard
            .fill(generation, caller, date, Arc::clone(&view))
            .await;
        Ok(view)
    }
}
