use chrono::NaiveDate;
use log::{debug, info};
use validator::Validate;

use super::{
    DraftEntry, DraftResult, DraftSet, LocalId, Pending, SetField, WorkoutBackend, entry_mut,
    exercise_name, insert_sorted,
};
use crate::db::models::{Exercise, NewWorkoutExercise, NewWorkoutSet, UpdateWorkoutSet, Workout};
use crate::error::{Error, Result};

/// A workout being logged for `date`. Everything stays local until [`NewWorkoutDraft::save`].
pub struct NewWorkoutDraft<B> {
    backend: B,
    date: NaiveDate,
    entries: Vec<DraftEntry>,
    exercises: Vec<Exercise>,
    pending: Pending,
}

impl<B: WorkoutBackend> NewWorkoutDraft<B> {
    pub fn new(backend: B, date: NaiveDate, exercises: Vec<Exercise>) -> Self {
        Self {
            backend,
            date,
            entries: Vec::new(),
            exercises,
            pending: Pending::default(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn entries(&self) -> &[DraftEntry] {
        &self.entries
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// New entry with one blank set.
    pub fn add_entry(&mut self) -> LocalId {
        let entry = DraftEntry::unselected(vec![DraftSet::blank()]);
        let local_id = entry.local_id;
        self.entries.push(entry);
        local_id
    }

    pub fn remove_entry(&mut self, entry: LocalId) -> DraftResult<()> {
        entry_mut(&mut self.entries, entry)?;
        self.entries.retain(|e| e.local_id != entry);
        Ok(())
    }

    pub fn select_exercise(&mut self, entry: LocalId, exercise_id: i64) -> DraftResult<()> {
        let name = exercise_name(&self.exercises, exercise_id);
        let current = entry_mut(&mut self.entries, entry)?;
        current.exercise_id = Some(exercise_id);
        current.exercise_name = name;
        Ok(())
    }

    pub fn add_set(&mut self, entry: LocalId) -> DraftResult<LocalId> {
        let set = DraftSet::blank();
        let local_id = set.local_id;
        entry_mut(&mut self.entries, entry)?.sets.push(set);
        Ok(local_id)
    }

    pub fn remove_set(&mut self, entry: LocalId, set: LocalId) -> DraftResult<()> {
        let current = entry_mut(&mut self.entries, entry)?;
        current.set(set)?;
        current.sets.retain(|s| s.local_id != set);
        Ok(())
    }

    pub fn edit_set(
        &mut self,
        entry: LocalId,
        set: LocalId,
        field: SetField,
        value: &str,
    ) -> DraftResult<()> {
        entry_mut(&mut self.entries, entry)?
            .set_mut(set)?
            .set_field(field, value);
        Ok(())
    }

    pub async fn create_exercise(&mut self, name: &str) -> DraftResult<Option<Exercise>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        self.pending.begin()?;
        let result = self.backend.create_exercise(name).await;
        self.pending.end();
        let exercise = result?;

        insert_sorted(&mut self.exercises, exercise.clone());
        Ok(Some(exercise))
    }

    /// Entries that would be saved, with their parsed sets: an exercise is picked,
    /// there is at least one set, and every set has numeric weight and reps.
    pub fn ready_entries(&self) -> Vec<(i64, Vec<(f64, i64)>)> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let exercise_id = entry.exercise_id?;
                if entry.sets.is_empty() {
                    return None;
                }
                let sets = entry
                    .sets
                    .iter()
                    .map(DraftSet::parsed)
                    .collect::<Option<Vec<_>>>()?;
                Some((exercise_id, sets))
            })
            .collect()
    }

    /// Persist the ready entries as one completed workout. Returns `None` without
    /// touching the backend when no entry is ready, and a validation error without
    /// touching it when any ready set has an out-of-range weight or rep count.
    pub async fn save(&mut self) -> DraftResult<Option<Workout>> {
        let ready = self.ready_entries();
        if ready.is_empty() {
            debug!("Nothing ready to save for {}", self.date);
            return Ok(None);
        }
        check_sets(&ready)?;

        self.pending.begin()?;
        let result = async {
            let workout = self.backend.create_workout(self.date).await?;
            for (i, (exercise_id, sets)) in ready.iter().enumerate() {
                let workout_exercise = self
                    .backend
                    .add_exercise_to_workout(&NewWorkoutExercise {
                        workout_id: workout.id,
                        exercise_id: *exercise_id,
                        order: i as i64 + 1,
                    })
                    .await?;
                for (j, (weight, reps)) in sets.iter().enumerate() {
                    self.backend
                        .add_set(&NewWorkoutSet {
                            workout_exercise_id: workout_exercise.id,
                            set_number: j as i64 + 1,
                            weight: *weight,
                            reps: *reps,
                        })
                        .await?;
                }
            }
            let completed = self.backend.complete_workout(workout.id).await?;
            Ok::<_, Error>(completed)
        }
        .await;
        self.pending.end();
        let workout = result?;

        info!(
            "Saved workout {} on {} with {} exercises",
            workout.id,
            self.date,
            ready.len()
        );
        self.entries.clear();
        Ok(Some(workout))
    }
}

/// The workout is created before its sets, so every set is checked up front.
fn check_sets(ready: &[(i64, Vec<(f64, i64)>)]) -> Result<()> {
    for (_, sets) in ready {
        for &(weight, reps) in sets {
            if !weight.is_finite() {
                return Err(Error::validation("weight must be a finite number"));
            }
            UpdateWorkoutSet { weight, reps }.validate()?;
        }
    }
    Ok(())
}
