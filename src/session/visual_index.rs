//! Visual ordering of a project's tasks.
//!
//! Tasks are shown as two stable partitions: every pending task in its
//! original order, then (only when completed tasks are shown) every
//! completed task in its original order. A visual index addresses a
//! position in that concatenation.

use crate::model::Task;

/// A borrowed, partitioned view over a task list
#[derive(Debug, Clone)]
pub struct VisualTasks<'a> {
    pending: Vec<&'a Task>,
    completed: Vec<&'a Task>,
    show_completed: bool,
}

impl<'a> VisualTasks<'a> {
    pub fn new(tasks: &'a [Task], show_completed: bool) -> Self {
        let (completed, pending): (Vec<&Task>, Vec<&Task>) =
            tasks.iter().partition(|t| t.is_completed());
        VisualTasks {
            pending,
            completed,
            show_completed,
        }
    }

    pub fn pending(&self) -> &[&'a Task] {
        &self.pending
    }

    pub fn completed(&self) -> &[&'a Task] {
        &self.completed
    }

    pub fn show_completed(&self) -> bool {
        self.show_completed
    }

    /// Number of addressable positions
    pub fn len(&self) -> usize {
        if self.show_completed {
            self.pending.len() + self.completed.len()
        } else {
            self.pending.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest addressable index, or None when nothing is visible
    pub fn max_navigable_index(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    /// Task at a visual index, or None when the index is out of range
    pub fn task_at(&self, index: usize) -> Option<&'a Task> {
        if let Some(task) = self.pending.get(index) {
            return Some(*task);
        }
        if !self.show_completed {
            return None;
        }
        self.completed.get(index - self.pending.len()).copied()
    }

    /// Visual index of the task with the given id, if it is visible
    pub fn index_of(&self, task_id: i64) -> Option<usize> {
        if let Some(i) = self.pending.iter().position(|t| t.id == task_id) {
            return Some(i);
        }
        if !self.show_completed {
            return None;
        }
        self.completed
            .iter()
            .position(|t| t.id == task_id)
            .map(|i| self.pending.len() + i)
    }

    /// Iterate the visible tasks in visual order
    pub fn iter(&self) -> impl Iterator<Item = &'a Task> + '_ {
        let completed: &[&'a Task] = if self.show_completed {
            &self.completed
        } else {
            &[]
        };
        self.pending.iter().chain(completed.iter()).copied()
    }

    /// Bring a cursor back into range: 0 when nothing is visible
    pub fn clamp(&self, cursor: usize) -> usize {
        match self.max_navigable_index() {
            Some(max) => cursor.min(max),
            None => 0,
        }
    }
}

/// Cursor position after a task's completion was toggled and the list
/// reloaded.
///
/// `toggled_from` is the visual index the task occupied before the toggle.
/// When completing it made the task disappear (completed tasks hidden) and
/// it sat at or above the cursor, the cursor steps back one row if
/// `step_back` is set, so it stays on the neighbour the user was next to.
/// The result is always clamped to the new list.
pub fn cursor_after_toggle(
    view: &VisualTasks<'_>,
    cursor: usize,
    toggled_from: usize,
    became_completed: bool,
    step_back: bool,
) -> usize {
    let mut next = cursor;
    if step_back && became_completed && !view.show_completed() && toggled_from <= cursor {
        next = next.saturating_sub(1);
    }
    view.clamp(next)
}
