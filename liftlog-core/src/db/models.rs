use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

/// Opaque subject issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Exercise models
#[derive(FromRow, Serialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct NewExercise {
    #[validate(length(min = 1, max = 100, message = "exercise name must be 1-100 characters"))]
    pub name: String,
}

// Workout models
#[derive(FromRow, Serialize, Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: i64,
    pub owner_id: UserId,
    pub date: NaiveDate,
    pub started_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub created_at: i64,
}

impl Workout {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Fields a caller may change on an existing workout. The owner is not one of them.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateWorkout {
    pub date: Option<NaiveDate>,
}

// Workout exercise models
#[derive(FromRow, Serialize, Debug, Clone, PartialEq)]
pub struct WorkoutExercise {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub order: i64,
    pub created_at: i64,
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct NewWorkoutExercise {
    #[validate(range(min = 1, message = "workout id must be positive"))]
    pub workout_id: i64,
    #[validate(range(min = 1, message = "exercise id must be positive"))]
    pub exercise_id: i64,
    #[validate(range(min = 1, message = "order must be positive"))]
    pub order: i64,
}

#[derive(Deserialize, Validate, Debug, Clone, Default)]
pub struct UpdateWorkoutExercise {
    #[validate(range(min = 1, message = "exercise id must be positive"))]
    pub exercise_id: Option<i64>,
    #[validate(range(min = 1, message = "order must be positive"))]
    pub order: Option<i64>,
}

// Set models
#[derive(FromRow, Serialize, Debug, Clone, PartialEq)]
pub struct WorkoutSet {
    pub id: i64,
    pub workout_exercise_id: i64,
    pub set_number: i64,
    pub weight: f64,
    pub reps: i64,
    pub created_at: i64,
}

impl fmt::Display for WorkoutSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Set {}: {:.1}kg x {} reps",
            self.set_number, self.weight, self.reps
        )
    }
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct NewWorkoutSet {
    #[validate(range(min = 1, message = "workout exercise id must be positive"))]
    pub workout_exercise_id: i64,
    #[validate(range(min = 1, message = "set number must be positive"))]
    pub set_number: i64,
    #[validate(range(min = 0.0, message = "weight must not be negative"))]
    pub weight: f64,
    #[validate(range(min = 1, message = "reps must be positive"))]
    pub reps: i64,
}

#[derive(Deserialize, Validate, Debug, Clone, Copy)]
pub struct UpdateWorkoutSet {
    #[validate(range(min = 0.0, message = "weight must not be negative"))]
    pub weight: f64,
    #[validate(range(min = 1, message = "reps must be positive"))]
    pub reps: i64,
}

// Nested read views

/// One exercise inside a workout, with its sets sorted by set number.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WorkoutExerciseDetail {
    pub id: i64,
    pub order: i64,
    pub exercise: Exercise,
    pub sets: Vec<WorkoutSet>,
}

/// A workout with its exercises sorted by `order`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WorkoutDetail {
    #[serde(flatten)]
    pub workout: Workout,
    pub exercises: Vec<WorkoutExerciseDetail>,
}

impl WorkoutDetail {
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

impl fmt::Display for WorkoutDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.workout.is_completed() {
            "completed"
        } else {
            "in progress"
        };
        writeln!(
            f,
            "Workout #{} on {} ({})",
            self.workout.id, self.workout.date, status
        )?;
        for entry in &self.exercises {
            writeln!(f, "  {}. {}", entry.order, entry.exercise.name)?;
            for set in &entry.sets {
                writeln!(f, "     {}", set)?;
            }
        }
        Ok(())
    }
}
