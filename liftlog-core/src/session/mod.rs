//! Session module: every operation a caller can perform on the workout log.
//!
//! A `Session` binds a database pool to the (optional) identity of the caller.
//! Mutations require an identity, validate their input, and then resolve the
//! owning workout through the foreign-key chain before touching any row.
//! Reads never fail for an anonymous caller; they just come back empty.

mod exercises;
mod reads;
mod session;
mod sets;
mod workout_exercises;
mod workouts;

pub use session::Session;
