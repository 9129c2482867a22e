//! Thin handlers: extract, call the session, wrap the result.

pub mod exercises;
pub mod sets;
pub mod workout_exercises;
pub mod workouts;
