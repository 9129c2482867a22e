//! Raw store access. Nothing here checks who is asking; callers go through
//! [`crate::session::Session`], which resolves ownership before calling in.

use chrono::NaiveDate;
use log::debug;
use sqlx::{FromRow, SqliteConnection, SqliteExecutor, SqlitePool};
use std::collections::HashMap;

use crate::db::models::{
    Exercise, UserId, Workout, WorkoutDetail, WorkoutExercise, WorkoutExerciseDetail, WorkoutSet,
};
use crate::error::Result;

const EXERCISE_COLUMNS: &str = "id, name, created_at, updated_at";
const WORKOUT_COLUMNS: &str = "id, owner_id, date, started_at, completed_at, created_at";
const WORKOUT_EXERCISE_COLUMNS: &str = "id, workout_id, exercise_id, \"order\", created_at";
const SET_COLUMNS: &str = "id, workout_exercise_id, set_number, weight, reps, created_at";

pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

// Exercises
pub async fn get_all_exercises(pool: &SqlitePool) -> Result<Vec<Exercise>> {
    let query = format!("SELECT {EXERCISE_COLUMNS} FROM exercises ORDER BY name ASC, id ASC");
    Ok(sqlx::query_as::<_, Exercise>(&query).fetch_all(pool).await?)
}

pub async fn get_exercise(pool: &SqlitePool, exercise_id: i64) -> Result<Option<Exercise>> {
    let query = format!("SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = ?1");
    Ok(sqlx::query_as::<_, Exercise>(&query)
        .bind(exercise_id)
        .fetch_optional(pool)
        .await?)
}

pub async fn insert_exercise<'e, E>(executor: E, name: &str) -> Result<Exercise>
where
    E: SqliteExecutor<'e>,
{
    let query = format!("INSERT INTO exercises (name) VALUES (?1) RETURNING {EXERCISE_COLUMNS}");
    Ok(sqlx::query_as::<_, Exercise>(&query)
        .bind(name)
        .fetch_one(executor)
        .await?)
}

pub async fn get_or_create_exercise(conn: &mut SqliteConnection, name: &str) -> Result<Exercise> {
    let query = format!("SELECT {EXERCISE_COLUMNS} FROM exercises WHERE name = ?1");
    if let Some(exercise) = sqlx::query_as::<_, Exercise>(&query)
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?
    {
        return Ok(exercise);
    }
    insert_exercise(&mut *conn, name).await
}

pub async fn rename_exercise(
    pool: &SqlitePool,
    exercise_id: i64,
    name: &str,
) -> Result<Option<Exercise>> {
    let query = format!(
        "UPDATE exercises SET name = ?1, updated_at = ?2 WHERE id = ?3 RETURNING {EXERCISE_COLUMNS}"
    );
    Ok(sqlx::query_as::<_, Exercise>(&query)
        .bind(name)
        .bind(unix_now())
        .bind(exercise_id)
        .fetch_optional(pool)
        .await?)
}

pub async fn count_exercise_uses(pool: &SqlitePool, exercise_id: i64) -> Result<i64> {
    Ok(sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM workout_exercises WHERE exercise_id = ?1",
    )
    .bind(exercise_id)
    .fetch_one(pool)
    .await?)
}

pub async fn delete_exercise(pool: &SqlitePool, exercise_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM exercises WHERE id = ?1")
        .bind(exercise_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

// Workouts
pub async fn insert_workout<'e, E>(
    executor: E,
    owner_id: &UserId,
    date: NaiveDate,
    started_at: Option<i64>,
) -> Result<Workout>
where
    E: SqliteExecutor<'e>,
{
    let query = format!(
        "INSERT INTO workouts (owner_id, date, started_at) VALUES (?1, ?2, ?3) RETURNING {WORKOUT_COLUMNS}"
    );
    Ok(sqlx::query_as::<_, Workout>(&query)
        .bind(owner_id)
        .bind(date)
        .bind(started_at)
        .fetch_one(executor)
        .await?)
}

pub async fn get_workout(pool: &SqlitePool, workout_id: i64) -> Result<Option<Workout>> {
    let query = format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = ?1");
    Ok(sqlx::query_as::<_, Workout>(&query)
        .bind(workout_id)
        .fetch_optional(pool)
        .await?)
}

pub async fn get_owned_workout(
    pool: &SqlitePool,
    workout_id: i64,
    owner_id: &UserId,
) -> Result<Option<Workout>> {
    let query = format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = ?1 AND owner_id = ?2");
    Ok(sqlx::query_as::<_, Workout>(&query)
        .bind(workout_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?)
}

pub async fn get_workouts_on_date(
    pool: &SqlitePool,
    owner_id: &UserId,
    date: NaiveDate,
) -> Result<Vec<Workout>> {
    let query = format!(
        "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE owner_id = ?1 AND date = ?2 ORDER BY id ASC"
    );
    Ok(sqlx::query_as::<_, Workout>(&query)
        .bind(owner_id)
        .bind(date)
        .fetch_all(pool)
        .await?)
}

pub async fn update_workout_date(
    pool: &SqlitePool,
    workout_id: i64,
    date: NaiveDate,
) -> Result<Workout> {
    let query = format!("UPDATE workouts SET date = ?1 WHERE id = ?2 RETURNING {WORKOUT_COLUMNS}");
    Ok(sqlx::query_as::<_, Workout>(&query)
        .bind(date)
        .bind(workout_id)
        .fetch_one(pool)
        .await?)
}

pub async fn mark_workout_completed<'e, E>(
    executor: E,
    workout_id: i64,
    completed_at: i64,
) -> Result<Workout>
where
    E: SqliteExecutor<'e>,
{
    let query =
        format!("UPDATE workouts SET completed_at = ?1 WHERE id = ?2 RETURNING {WORKOUT_COLUMNS}");
    Ok(sqlx::query_as::<_, Workout>(&query)
        .bind(completed_at)
        .bind(workout_id)
        .fetch_one(executor)
        .await?)
}

/// Delete a workout together with its workout exercises and their sets, children first.
pub async fn delete_workout_cascade(pool: &SqlitePool, workout_id: i64) -> Result<u64> {
    let mut tx = pool.begin().await?;

    let sets = sqlx::query(
        "DELETE FROM sets WHERE workout_exercise_id IN \
         (SELECT id FROM workout_exercises WHERE workout_id = ?1)",
    )
    .bind(workout_id)
    .execute(&mut *tx)
    .await?;
    let entries = sqlx::query("DELETE FROM workout_exercises WHERE workout_id = ?1")
        .bind(workout_id)
        .execute(&mut *tx)
        .await?;
    let workouts = sqlx::query("DELETE FROM workouts WHERE id = ?1")
        .bind(workout_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    debug!(
        "Deleted workout {} ({} workout exercises, {} sets)",
        workout_id,
        entries.rows_affected(),
        sets.rows_affected()
    );
    Ok(workouts.rows_affected())
}

// Ownership lookups
pub async fn get_workout_exercise_owner(
    pool: &SqlitePool,
    workout_exercise_id: i64,
) -> Result<Option<UserId>> {
    Ok(sqlx::query_scalar::<_, UserId>(
        "SELECT w.owner_id FROM workout_exercises we \
         JOIN workouts w ON w.id = we.workout_id \
         WHERE we.id = ?1",
    )
    .bind(workout_exercise_id)
    .fetch_optional(pool)
    .await?)
}

pub async fn get_set_owner(pool: &SqlitePool, set_id: i64) -> Result<Option<UserId>> {
    Ok(sqlx::query_scalar::<_, UserId>(
        "SELECT w.owner_id FROM sets s \
         JOIN workout_exercises we ON we.id = s.workout_exercise_id \
         JOIN workouts w ON w.id = we.workout_id \
         WHERE s.id = ?1",
    )
    .bind(set_id)
    .fetch_optional(pool)
    .await?)
}

// Workout exercises
pub async fn insert_workout_exercise<'e, E>(
    executor: E,
    workout_id: i64,
    exercise_id: i64,
    order: i64,
) -> Result<WorkoutExercise>
where
    E: SqliteExecutor<'e>,
{
    let query = format!(
        "INSERT INTO workout_exercises (workout_id, exercise_id, \"order\") VALUES (?1, ?2, ?3) \
         RETURNING {WORKOUT_EXERCISE_COLUMNS}"
    );
    Ok(sqlx::query_as::<_, WorkoutExercise>(&query)
        .bind(workout_id)
        .bind(exercise_id)
        .bind(order)
        .fetch_one(executor)
        .await?)
}

/// Only the provided fields change; missing ones keep their stored values.
pub async fn update_workout_exercise(
    pool: &SqlitePool,
    workout_exercise_id: i64,
    exercise_id: Option<i64>,
    order: Option<i64>,
) -> Result<WorkoutExercise> {
    let query = format!(
        "UPDATE workout_exercises SET \
             exercise_id = COALESCE(?1, exercise_id), \
             \"order\" = COALESCE(?2, \"order\") \
         WHERE id = ?3 RETURNING {WORKOUT_EXERCISE_COLUMNS}"
    );
    Ok(sqlx::query_as::<_, WorkoutExercise>(&query)
        .bind(exercise_id)
        .bind(order)
        .bind(workout_exercise_id)
        .fetch_one(pool)
        .await?)
}

pub async fn delete_workout_exercise_cascade(
    pool: &SqlitePool,
    workout_exercise_id: i64,
) -> Result<u64> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM sets WHERE workout_exercise_id = ?1")
        .bind(workout_exercise_id)
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM workout_exercises WHERE id = ?1")
        .bind(workout_exercise_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(result.rows_affected())
}

// Sets
pub async fn insert_set<'e, E>(
    executor: E,
    workout_exercise_id: i64,
    set_number: i64,
    weight: f64,
    reps: i64,
) -> Result<WorkoutSet>
where
    E: SqliteExecutor<'e>,
{
    let query = format!(
        "INSERT INTO sets (workout_exercise_id, set_number, weight, reps) VALUES (?1, ?2, ?3, ?4) \
         RETURNING {SET_COLUMNS}"
    );
    Ok(sqlx::query_as::<_, WorkoutSet>(&query)
        .bind(workout_exercise_id)
        .bind(set_number)
        .bind(weight)
        .bind(reps)
        .fetch_one(executor)
        .await?)
}

pub async fn update_set(
    pool: &SqlitePool,
    set_id: i64,
    weight: f64,
    reps: i64,
) -> Result<WorkoutSet> {
    let query =
        format!("UPDATE sets SET weight = ?1, reps = ?2 WHERE id = ?3 RETURNING {SET_COLUMNS}");
    Ok(sqlx::query_as::<_, WorkoutSet>(&query)
        .bind(weight)
        .bind(reps)
        .bind(set_id)
        .fetch_one(pool)
        .await?)
}

pub async fn delete_set(pool: &SqlitePool, set_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sets WHERE id = ?1")
        .bind(set_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

// Nested reads

#[derive(FromRow)]
struct ExerciseEntryRow {
    id: i64,
    workout_id: i64,
    order: i64,
    exercise_id: i64,
    exercise_name: String,
    exercise_created_at: i64,
    exercise_updated_at: i64,
}

/// Attach exercises (by `order`) and sets (by `set_number`) to each workout.
pub async fn load_workout_details(
    pool: &SqlitePool,
    workouts: Vec<Workout>,
) -> Result<Vec<WorkoutDetail>> {
    let mut details = Vec::with_capacity(workouts.len());

    for workout in workouts {
        let entries = sqlx::query_as::<_, ExerciseEntryRow>(
            "SELECT we.id, we.workout_id, we.\"order\", \
                    e.id AS exercise_id, e.name AS exercise_name, \
                    e.created_at AS exercise_created_at, e.updated_at AS exercise_updated_at \
             FROM workout_exercises we \
             JOIN exercises e ON e.id = we.exercise_id \
             WHERE we.workout_id = ?1 \
             ORDER BY we.\"order\" ASC, we.id ASC",
        )
        .bind(workout.id)
        .fetch_all(pool)
        .await?;

        let sets = sqlx::query_as::<_, WorkoutSet>(
            "SELECT s.id, s.workout_exercise_id, s.set_number, s.weight, s.reps, s.created_at \
             FROM sets s \
             JOIN workout_exercises we ON we.id = s.workout_exercise_id \
             WHERE we.workout_id = ?1 \
             ORDER BY s.set_number ASC, s.id ASC",
        )
        .bind(workout.id)
        .fetch_all(pool)
        .await?;

        let mut sets_by_entry: HashMap<i64, Vec<WorkoutSet>> = HashMap::new();
        for set in sets {
            sets_by_entry
                .entry(set.workout_exercise_id)
                .or_default()
                .push(set);
        }

        let exercises = entries
            .into_iter()
            .map(|row| {
                debug_assert_eq!(row.workout_id, workout.id);
                WorkoutExerciseDetail {
                    id: row.id,
                    order: row.order,
                    exercise: Exercise {
                        id: row.exercise_id,
                        name: row.exercise_name,
                        created_at: row.exercise_created_at,
                        updated_at: row.exercise_updated_at,
                    },
                    sets: sets_by_entry.remove(&row.id).unwrap_or_default(),
                }
            })
            .collect();

        details.push(WorkoutDetail { workout, exercises });
    }

    Ok(details)
}
