//! In-memory backend that records every call.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use super::WorkoutBackend;
use crate::db::models::{
    Exercise, NewWorkoutExercise, NewWorkoutSet, UpdateWorkoutSet, UserId, Workout, WorkoutDetail,
    WorkoutExercise, WorkoutExerciseDetail, WorkoutSet,
};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateWorkout { date: NaiveDate },
    CompleteWorkout { workout_id: i64 },
    DeleteWorkout { workout_id: i64 },
    CreateExercise { name: String },
    AddExercise { workout_id: i64, exercise_id: i64, order: i64 },
    DeleteWorkoutExercise { workout_exercise_id: i64 },
    AddSet { workout_exercise_id: i64, set_number: i64, weight: f64, reps: i64 },
    UpdateSet { set_id: i64, weight: f64, reps: i64 },
    DeleteSet { set_id: i64 },
}

pub struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    next_id: AtomicI64,
    fail_next: AtomicBool,
    stall_next: AtomicBool,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(100),
            fail_next: AtomicBool::new(false),
            stall_next: AtomicBool::new(false),
        }
    }
}

fn exercise(id: i64, name: &str) -> Exercise {
    Exercise {
        id,
        name: name.to_string(),
        created_at: 0,
        updated_at: 0,
    }
}

fn workout(id: i64, date: NaiveDate) -> Workout {
    Workout {
        id,
        owner_id: UserId::new("user_test"),
        date,
        started_at: Some(0),
        completed_at: None,
        created_at: 0,
    }
}

pub fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 16).unwrap()
}

/// Workout 1: Bench Press (workout exercise 5) with sets 11 (60 x 10) and 12 (80 x 8).
pub fn sample_detail() -> WorkoutDetail {
    let set = |id, set_number, weight, reps| WorkoutSet {
        id,
        workout_exercise_id: 5,
        set_number,
        weight,
        reps,
        created_at: 0,
    };
    WorkoutDetail {
        workout: workout(1, sample_date()),
        exercises: vec![WorkoutExerciseDetail {
            id: 5,
            order: 1,
            exercise: exercise(1, "Bench Press"),
            sets: vec![set(11, 1, 60.0, 10), set(12, 2, 80.0, 8)],
        }],
    }
}

impl FakeBackend {
    pub fn library(&self) -> Vec<Exercise> {
        vec![
            exercise(1, "Bench Press"),
            exercise(3, "Deadlift"),
            exercise(2, "Squat"),
        ]
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// The next `create_workout` never resolves.
    pub fn stall_next(&self) {
        self.stall_next.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: Call) -> Result<i64> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(Error::not_found("Fake", 0));
        }
        self.calls.lock().unwrap().push(call);
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl WorkoutBackend for FakeBackend {
    async fn create_workout(&self, date: NaiveDate) -> Result<Workout> {
        if self.stall_next.swap(false, Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        let id = self.record(Call::CreateWorkout { date })?;
        Ok(workout(id, date))
    }

    async fn complete_workout(&self, workout_id: i64) -> Result<Workout> {
        self.record(Call::CompleteWorkout { workout_id })?;
        let mut done = workout(workout_id, sample_date());
        done.completed_at = Some(1);
        Ok(done)
    }

    async fn delete_workout(&self, workout_id: i64) -> Result<()> {
        self.record(Call::DeleteWorkout { workout_id })?;
        Ok(())
    }

    async fn create_exercise(&self, name: &str) -> Result<Exercise> {
        let id = self.record(Call::CreateExercise {
            name: name.to_string(),
        })?;
        Ok(exercise(id, name))
    }

    async fn add_exercise_to_workout(&self, new: &NewWorkoutExercise) -> Result<WorkoutExercise> {
        let id = self.record(Call::AddExercise {
            workout_id: new.workout_id,
            exercise_id: new.exercise_id,
            order: new.order,
        })?;
        Ok(WorkoutExercise {
            id,
            workout_id: new.workout_id,
            exercise_id: new.exercise_id,
            order: new.order,
            created_at: 0,
        })
    }

    async fn delete_workout_exercise(&self, workout_exercise_id: i64) -> Result<()> {
        self.record(Call::DeleteWorkoutExercise {
            workout_exercise_id,
        })?;
        Ok(())
    }

    async fn add_set(&self, new: &NewWorkoutSet) -> Result<WorkoutSet> {
        let id = self.record(Call::AddSet {
            workout_exercise_id: new.workout_exercise_id,
            set_number: new.set_number,
            weight: new.weight,
            reps: new.reps,
        })?;
        Ok(WorkoutSet {
            id,
            workout_exercise_id: new.workout_exercise_id,
            set_number: new.set_number,
            weight: new.weight,
            reps: new.reps,
            created_at: 0,
        })
    }

    async fn update_set(&self, set_id: i64, update: &UpdateWorkoutSet) -> Result<WorkoutSet> {
        self.record(Call::UpdateSet {
            set_id,
            weight: update.weight,
            reps: update.reps,
        })?;
        Ok(WorkoutSet {
            id: set_id,
            workout_exercise_id: 5,
            set_number: 1,
            weight: update.weight,
            reps: update.reps,
            created_at: 0,
        })
    }

    async fn delete_set(&self, set_id: i64) -> Result<()> {
        self.record(Call::DeleteSet { set_id })?;
        Ok(())
    }
}
