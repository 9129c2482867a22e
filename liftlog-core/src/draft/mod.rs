//! Staged-edit state for workout forms.
//!
//! Rows are either persisted (they carry a server id) or new (client-only).
//! Weight and reps are kept as the raw text the user typed; they are parsed only
//! when a change is flushed to the backend. Every server-bound action runs behind
//! a pending flag that is cleared once the backend answers, success or not.

mod backend;
mod editor;
mod new_workout;

pub use backend::WorkoutBackend;
pub use editor::WorkoutEditor;
pub use new_workout::NewWorkoutDraft;

use thiserror::Error as ThisError;
use uuid::Uuid;

use crate::db::models::{Exercise, WorkoutExerciseDetail, WorkoutSet};

/// Client-side identity of a row, stable across its transition from new to persisted.
pub type LocalId = Uuid;

#[derive(Debug, ThisError)]
pub enum DraftError {
    #[error("another change is still in flight")]
    Busy,
    #[error("no exercise entry {0}")]
    UnknownEntry(LocalId),
    #[error("no set {0}")]
    UnknownSet(LocalId),
    #[error("exercise entry has not been saved yet")]
    NotPersisted,
    #[error("exercise entry is already saved")]
    AlreadyPersisted,
    #[error("an exercise must keep at least one set")]
    LastSet,
    #[error(transparent)]
    Backend(#[from] crate::error::Error),
}

pub type DraftResult<T> = std::result::Result<T, DraftError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Weight,
    Reps,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftSet {
    pub local_id: LocalId,
    pub id: Option<i64>,
    pub weight: String,
    pub reps: String,
}

impl DraftSet {
    fn blank() -> Self {
        Self {
            local_id: Uuid::new_v4(),
            id: None,
            weight: String::new(),
            reps: String::new(),
        }
    }

    fn persisted(set: &WorkoutSet) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            id: Some(set.id),
            weight: set.weight.to_string(),
            reps: set.reps.to_string(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Both fields parsed, or `None` if either is not a number.
    pub fn parsed(&self) -> Option<(f64, i64)> {
        let weight = self.weight.trim().parse::<f64>().ok()?;
        let reps = self.reps.trim().parse::<i64>().ok()?;
        Some((weight, reps))
    }

    fn set_field(&mut self, field: SetField, value: &str) {
        match field {
            SetField::Weight => self.weight = value.to_string(),
            SetField::Reps => self.reps = value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftEntry {
    pub local_id: LocalId,
    pub id: Option<i64>,
    pub exercise_id: Option<i64>,
    pub exercise_name: String,
    pub sets: Vec<DraftSet>,
}

impl DraftEntry {
    fn unselected(sets: Vec<DraftSet>) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            id: None,
            exercise_id: None,
            exercise_name: String::new(),
            sets,
        }
    }

    fn persisted(detail: &WorkoutExerciseDetail) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            id: Some(detail.id),
            exercise_id: Some(detail.exercise.id),
            exercise_name: detail.exercise.name.clone(),
            sets: detail.sets.iter().map(DraftSet::persisted).collect(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    fn set_mut(&mut self, set: LocalId) -> DraftResult<&mut DraftSet> {
        self.sets
            .iter_mut()
            .find(|s| s.local_id == set)
            .ok_or(DraftError::UnknownSet(set))
    }

    fn set(&self, set: LocalId) -> DraftResult<&DraftSet> {
        self.sets
            .iter()
            .find(|s| s.local_id == set)
            .ok_or(DraftError::UnknownSet(set))
    }
}

fn entry_mut(entries: &mut [DraftEntry], entry: LocalId) -> DraftResult<&mut DraftEntry> {
    entries
        .iter_mut()
        .find(|e| e.local_id == entry)
        .ok_or(DraftError::UnknownEntry(entry))
}

fn entry_ref(entries: &[DraftEntry], entry: LocalId) -> DraftResult<&DraftEntry> {
    entries
        .iter()
        .find(|e| e.local_id == entry)
        .ok_or(DraftError::UnknownEntry(entry))
}

fn exercise_name(library: &[Exercise], exercise_id: i64) -> String {
    library
        .iter()
        .find(|e| e.id == exercise_id)
        .map(|e| e.name.clone())
        .unwrap_or_default()
}

/// Keep the picker sorted the way users read it.
fn insert_sorted(library: &mut Vec<Exercise>, exercise: Exercise) {
    library.push(exercise);
    library.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Single in-flight action guard.
///
/// Server-bound actions take `&mut self`, so the borrow already keeps two actions
/// from overlapping on one form. The flag records an action that started and never
/// finished: if its future is dropped mid-call the form stays pending, and later
/// actions fail with [`DraftError::Busy`] instead of racing the lost request.
#[derive(Debug, Default)]
struct Pending(bool);

impl Pending {
    fn begin(&mut self) -> DraftResult<()> {
        if self.0 {
            return Err(DraftError::Busy);
        }
        self.0 = true;
        Ok(())
    }

    fn end(&mut self) {
        self.0 = false;
    }

    fn get(&self) -> bool {
        self.0
    }
}

#[cfg(test)]
pub(crate) mod testing;
