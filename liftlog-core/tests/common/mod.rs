#![allow(dead_code)]

use chrono::NaiveDate;
use liftlog::cache::DashboardCache;
use liftlog::db;
use liftlog::db::models::{
    Exercise, NewWorkoutExercise, NewWorkoutSet, UserId, Workout, WorkoutExercise,
};
use liftlog::session::Session;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct TestStore {
    pub pool: SqlitePool,
    pub dashboard: Arc<DashboardCache>,
}

impl TestStore {
    pub async fn new() -> Self {
        Self {
            pool: db::memory_pool().await.expect("in-memory pool"),
            dashboard: Arc::new(DashboardCache::new()),
        }
    }

    /// Every session shares the one dashboard cache, as the server does.
    pub fn session(&self, user: &str) -> Session {
        Session::new(
            self.pool.clone(),
            Some(UserId::new(user)),
            Arc::clone(&self.dashboard),
        )
    }

    pub fn anonymous(&self) -> Session {
        Session::new(self.pool.clone(), None, Arc::clone(&self.dashboard))
    }
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, d).unwrap()
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

/// A workout on `date` holding one exercise with one 60 x 10 set.
pub async fn workout_with_set(
    session: &Session,
    exercise: &Exercise,
    date: NaiveDate,
) -> (Workout, WorkoutExercise, i64) {
    let workout = session.create_workout(date).await.unwrap();
    let entry = session
        .add_exercise_to_workout(&NewWorkoutExercise {
            workout_id: workout.id,
            exercise_id: exercise.id,
            order: 1,
        })
        .await
        .unwrap();
    let set = session
        .add_set(&NewWorkoutSet {
            workout_exercise_id: entry.id,
            set_number: 1,
            weight: 60.0,
            reps: 10,
        })
        .await
        .unwrap();
    (workout, entry, set.id)
}
