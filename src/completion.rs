use crate::view::{DaySection, ExerciseId};
use std::collections::HashSet;

/// Toggle state of a single exercise card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleState {
    #[default]
    Pending,
    Completed,
}

impl ToggleState {
    pub fn label(self) -> &'static str {
        match self {
            ToggleState::Pending => "Done",
            ToggleState::Completed => "✓ Done!",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ToggleState::Pending => ToggleState::Completed,
            ToggleState::Completed => ToggleState::Pending,
        }
    }

    pub fn is_completed(self) -> bool {
        self == ToggleState::Completed
    }
}

/// Which exercises of the current view are marked done.
///
/// Lives only as long as the rendered view; a reload starts from an empty
/// store.
#[derive(Debug, Clone, Default)]
pub struct CompletionStore {
    completed: HashSet<ExerciseId>,
}

impl CompletionStore {
    pub fn state(&self, id: &ExerciseId) -> ToggleState {
        if self.completed.contains(id) {
            ToggleState::Completed
        } else {
            ToggleState::Pending
        }
    }

    /// Flip the state of `id` and return the new state.
    pub fn toggle(&mut self, id: &ExerciseId) -> ToggleState {
        let next = self.state(id).toggled();
        match next {
            ToggleState::Completed => self.completed.insert(id.clone()),
            ToggleState::Pending => self.completed.remove(id),
        };
        next
    }

    pub fn clear(&mut self) {
        self.completed.clear();
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// `(done, total)` for one day section.
    pub fn progress(&self, day: &DaySection) -> (usize, usize) {
        let done = day
            .exercises
            .iter()
            .filter(|e| self.completed.contains(&e.id))
            .count();
        (done, day.exercises.len())
    }
}
