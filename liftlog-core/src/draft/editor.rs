use chrono::NaiveDate;
use log::debug;
use uuid::Uuid;

use super::{
    DraftEntry, DraftError, DraftResult, DraftSet, LocalId, Pending, SetField, WorkoutBackend,
    entry_mut, entry_ref, exercise_name, insert_sorted,
};
use crate::db::models::{
    Exercise, NewWorkoutExercise, NewWorkoutSet, UpdateWorkoutSet, WorkoutDetail,
};

/// Edits an already saved workout. Changes reach the backend one action at a time;
/// local rows change only after the backend has accepted the action.
pub struct WorkoutEditor<B> {
    backend: B,
    workout_id: i64,
    date: NaiveDate,
    entries: Vec<DraftEntry>,
    exercises: Vec<Exercise>,
    pending: Pending,
}

impl<B: WorkoutBackend> WorkoutEditor<B> {
    pub fn new(backend: B, workout: &WorkoutDetail, exercises: Vec<Exercise>) -> Self {
        Self {
            backend,
            workout_id: workout.workout.id,
            date: workout.workout.date,
            entries: workout.exercises.iter().map(DraftEntry::persisted).collect(),
            exercises,
            pending: Pending::default(),
        }
    }

    pub fn workout_id(&self) -> i64 {
        self.workout_id
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

    /// Local keystroke; nothing is sent.
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

    /// Flush a set's weight and reps, as on blur. Returns `false` when there was
    /// nothing to send: the set is not saved yet or its text is not numeric.
    pub async fn commit_set(&mut self, entry: LocalId, set: LocalId) -> DraftResult<bool> {
        let draft = entry_ref(&self.entries, entry)?.set(set)?;
        let Some(set_id) = draft.id else {
            return Ok(false);
        };
        let Some((weight, reps)) = draft.parsed() else {
            debug!("Set {} has non-numeric input, not flushing", set_id);
            return Ok(false);
        };

        self.pending.begin()?;
        let result = self
            .backend
            .update_set(set_id, &UpdateWorkoutSet { weight, reps })
            .await;
        self.pending.end();
        result?;
        Ok(true)
    }

    /// Delete a saved set. The last set of an exercise cannot be deleted.
    pub async fn delete_set(&mut self, entry: LocalId, set: LocalId) -> DraftResult<()> {
        let current = entry_ref(&self.entries, entry)?;
        if current.sets.len() <= 1 {
            return Err(DraftError::LastSet);
        }
        let set_id = current.set(set)?.id.ok_or(DraftError::NotPersisted)?;

        self.pending.begin()?;
        let result = self.backend.delete_set(set_id).await;
        self.pending.end();
        result?;

        entry_mut(&mut self.entries, entry)?
            .sets
            .retain(|s| s.local_id != set);
        Ok(())
    }

    /// Append a set that copies the previous set's numbers (weight 0, reps 1 when
    /// there is nothing usable to copy).
    pub async fn add_set(&mut self, entry: LocalId) -> DraftResult<LocalId> {
        let current = entry_ref(&self.entries, entry)?;
        let workout_exercise_id = current.id.ok_or(DraftError::NotPersisted)?;

        let set_number = current.sets.len() as i64 + 1;
        let last = current.sets.last();
        let weight = last
            .and_then(|s| s.weight.trim().parse::<f64>().ok())
            .filter(|w| *w != 0.0 && w.is_finite())
            .unwrap_or(0.0);
        let reps = last
            .and_then(|s| s.reps.trim().parse::<i64>().ok())
            .filter(|r| *r != 0)
            .unwrap_or(1);

        self.pending.begin()?;
        let result = self
            .backend
            .add_set(&NewWorkoutSet {
                workout_exercise_id,
                set_number,
                weight,
                reps,
            })
            .await;
        self.pending.end();
        let created = result?;

        let local_id = Uuid::new_v4();
        entry_mut(&mut self.entries, entry)?.sets.push(DraftSet {
            local_id,
            id: Some(created.id),
            weight: weight.to_string(),
            reps: reps.to_string(),
        });
        Ok(local_id)
    }

    /// Start a blank exercise entry. Nothing is sent until an exercise is picked.
    pub fn add_entry(&mut self) -> LocalId {
        let entry = DraftEntry::unselected(Vec::new());
        let local_id = entry.local_id;
        self.entries.push(entry);
        local_id
    }

    /// Drop an entry that was never saved.
    pub fn remove_new_entry(&mut self, entry: LocalId) -> DraftResult<()> {
        if !entry_ref(&self.entries, entry)?.is_new() {
            return Err(DraftError::AlreadyPersisted);
        }
        self.entries.retain(|e| e.local_id != entry);
        Ok(())
    }

    /// Pick the exercise for a new entry: saves it at the end of the workout with a
    /// default first set of 0 x 1.
    pub async fn select_exercise(&mut self, entry: LocalId, exercise_id: i64) -> DraftResult<()> {
        if !entry_ref(&self.entries, entry)?.is_new() {
            return Err(DraftError::AlreadyPersisted);
        }
        let order = self.entries.len() as i64;

        self.pending.begin()?;
        let result = async {
            let workout_exercise = self
                .backend
                .add_exercise_to_workout(&NewWorkoutExercise {
                    workout_id: self.workout_id,
                    exercise_id,
                    order,
                })
                .await?;
            let first_set = self
                .backend
                .add_set(&NewWorkoutSet {
                    workout_exercise_id: workout_exercise.id,
                    set_number: 1,
                    weight: 0.0,
                    reps: 1,
                })
                .await?;
            Ok::<_, crate::error::Error>((workout_exercise, first_set))
        }
        .await;
        self.pending.end();
        let (workout_exercise, first_set) = result?;

        let name = exercise_name(&self.exercises, exercise_id);
        let current = entry_mut(&mut self.entries, entry)?;
        current.id = Some(workout_exercise.id);
        current.exercise_id = Some(exercise_id);
        current.exercise_name = name;
        current.sets = vec![DraftSet {
            local_id: Uuid::new_v4(),
            id: Some(first_set.id),
            weight: "0".to_string(),
            reps: "1".to_string(),
        }];
        Ok(())
    }

    /// Delete a saved entry and its sets.
    pub async fn delete_entry(&mut self, entry: LocalId) -> DraftResult<()> {
        let workout_exercise_id = entry_ref(&self.entries, entry)?
            .id
            .ok_or(DraftError::NotPersisted)?;

        self.pending.begin()?;
        let result = self
            .backend
            .delete_workout_exercise(workout_exercise_id)
            .await;
        self.pending.end();
        result?;

        self.entries.retain(|e| e.local_id != entry);
        Ok(())
    }

    /// Add an exercise to the shared library. Blank names are ignored.
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

    /// Delete the whole workout and hand back its date, where the form goes next.
    /// The editor is stale after success and should be dropped; on failure it is untouched.
    pub async fn delete_workout(&mut self) -> DraftResult<NaiveDate> {
        self.pending.begin()?;
        let result = self.backend.delete_workout(self.workout_id).await;
        self.pending.end();
        result?;
        Ok(self.date)
    }
}
