//! Demo data: a week and a half of completed training for one user.

use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;

use crate::db::models::UserId;
use crate::db::operations;
use crate::error::{Error, Result};

pub const EXERCISES: [&str; 10] = [
    "Bench Press",
    "Squat",
    "Deadlift",
    "Overhead Press",
    "Barbell Row",
    "Pull-up",
    "Leg Press",
    "Dumbbell Curl",
    "Tricep Pushdown",
    "Lat Pulldown",
];

struct SeedWorkout {
    date: &'static str,
    started: &'static str,
    completed: &'static str,
    exercises: &'static [(&'static str, &'static [(f64, i64)])],
}

const WORKOUTS: &[SeedWorkout] = &[
    SeedWorkout {
        date: "2025-12-16",
        started: "09:00",
        completed: "10:15",
        exercises: &[
            ("Bench Press", &[(60.0, 10), (80.0, 8), (85.0, 6)]),
            ("Overhead Press", &[(30.0, 10), (50.0, 8), (55.0, 6)]),
            ("Tricep Pushdown", &[(25.0, 12), (30.0, 10), (30.0, 10)]),
        ],
    },
    SeedWorkout {
        date: "2025-12-18",
        started: "08:30",
        completed: "09:45",
        exercises: &[
            ("Squat", &[(60.0, 10), (100.0, 8), (110.0, 6), (120.0, 4)]),
            ("Leg Press", &[(100.0, 12), (140.0, 10), (160.0, 8)]),
            ("Deadlift", &[(80.0, 8), (120.0, 5), (140.0, 3)]),
        ],
    },
    SeedWorkout {
        date: "2025-12-20",
        started: "07:00",
        completed: "08:30",
        exercises: &[
            ("Barbell Row", &[(50.0, 10), (70.0, 8), (75.0, 8)]),
            ("Pull-up", &[(0.0, 8), (0.0, 7), (0.0, 6)]),
            ("Lat Pulldown", &[(50.0, 12), (60.0, 10), (65.0, 8)]),
        ],
    },
    SeedWorkout {
        date: "2025-12-22",
        started: "10:00",
        completed: "11:15",
        exercises: &[
            ("Bench Press", &[(60.0, 10), (82.5, 8), (87.5, 5)]),
            ("Dumbbell Curl", &[(12.0, 12), (14.0, 10), (16.0, 8)]),
            ("Tricep Pushdown", &[(27.5, 12), (32.5, 10)]),
        ],
    },
    SeedWorkout {
        date: "2025-12-24",
        started: "09:30",
        completed: "10:45",
        exercises: &[
            ("Squat", &[(60.0, 10), (105.0, 8), (115.0, 5)]),
            ("Deadlift", &[(100.0, 6), (130.0, 4), (145.0, 2)]),
        ],
    },
    SeedWorkout {
        date: "2025-12-27",
        started: "08:00",
        completed: "09:30",
        exercises: &[
            ("Overhead Press", &[(35.0, 10), (52.5, 7), (57.5, 5)]),
            ("Lat Pulldown", &[(55.0, 12), (67.5, 8)]),
        ],
    },
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub exercises: usize,
    pub workouts: usize,
    pub workout_exercises: usize,
    pub sets: usize,
}

fn timestamp(date: NaiveDate, time: &str) -> Result<i64> {
    let text = format!("{date} {time}");
    NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M")
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|e| Error::SeedData(format!("time '{text}': {e}")))
}

/// Insert the demo library and workouts for `owner` in one transaction. Exercises
/// that already exist are reused; workouts are always added.
pub async fn seed(pool: &SqlitePool, owner: &UserId) -> Result<SeedSummary> {
    info!("Seeding database for {}", owner);
    let mut tx = pool.begin().await?;
    let summary = seed_history(&mut tx, owner, WORKOUTS).await?;
    tx.commit().await?;

    info!(
        "Seeded {} exercises, {} workouts, {} workout exercises, {} sets",
        summary.exercises, summary.workouts, summary.workout_exercises, summary.sets
    );
    Ok(summary)
}

async fn seed_history(
    conn: &mut SqliteConnection,
    owner: &UserId,
    workouts: &[SeedWorkout],
) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    let mut library = HashMap::new();
    for name in EXERCISES {
        let exercise = operations::get_or_create_exercise(conn, name).await?;
        library.insert(name, exercise.id);
        summary.exercises += 1;
    }

    for planned in workouts {
        let date = NaiveDate::parse_from_str(planned.date, "%Y-%m-%d")
            .map_err(|e| Error::SeedData(format!("date '{}': {e}", planned.date)))?;
        let started_at = timestamp(date, planned.started)?;
        let workout = operations::insert_workout(&mut *conn, owner, date, Some(started_at)).await?;
        summary.workouts += 1;

        for (index, (name, sets)) in planned.exercises.iter().enumerate() {
            let exercise_id = library
                .get(name)
                .copied()
                .ok_or_else(|| Error::SeedData(format!("exercise '{name}' is not in the library")))?;
            let entry = operations::insert_workout_exercise(
                &mut *conn,
                workout.id,
                exercise_id,
                index as i64 + 1,
            )
            .await?;
            summary.workout_exercises += 1;

            for (number, (weight, reps)) in sets.iter().enumerate() {
                operations::insert_set(&mut *conn, entry.id, number as i64 + 1, *weight, *reps)
                    .await?;
                summary.sets += 1;
            }
        }

        let completed_at = timestamp(date, planned.completed)?;
        operations::mark_workout_completed(&mut *conn, workout.id, completed_at).await?;
    }

    Ok(summary)
}
