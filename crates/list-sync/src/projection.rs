//! Projection Engine
//!
//! Display order and filtering over a section's records. Projections never
//! touch the store; each call returns a fresh Vec.

use std::cmp::Ordering;
use std::str::FromStr;

use thiserror::Error;

use crate::model::{ListItem, Note, Todo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TodoSort {
    #[default]
    CreatedDesc,
    CreatedAsc,
    LabelAsc,
    LabelDesc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TodoFilter {
    #[default]
    All,
    Completed,
    NotCompleted,
}

impl TodoSort {
    pub const ALL: [TodoSort; 4] = [TodoSort::CreatedDesc, TodoSort::CreatedAsc, TodoSort::LabelAsc, TodoSort::LabelDesc];

    /// Select-box value.
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoSort::CreatedDesc => "created_desc",
            TodoSort::CreatedAsc => "created_asc",
            TodoSort::LabelAsc => "label_asc",
            TodoSort::LabelDesc => "label_desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TodoSort::CreatedDesc => "Created (newest)",
            TodoSort::CreatedAsc => "Created (oldest)",
            TodoSort::LabelAsc => "Label (A - Z)",
            TodoSort::LabelDesc => "Label (Z - A)",
        }
    }

    fn compare(&self, a: &Todo, b: &Todo) -> Ordering {
        let by_label = || a.label.cmp(&b.label);
        let by_id = || a.id.cmp(&b.id);
        match self {
            TodoSort::CreatedDesc => b.created_millis().cmp(&a.created_millis()).then_with(by_label),
            TodoSort::CreatedAsc => a.created_millis().cmp(&b.created_millis()).then_with(by_label),
            TodoSort::LabelAsc => by_label(),
            TodoSort::LabelDesc => b.label.cmp(&a.label),
        }
        .then_with(by_id)
    }
}

impl TodoFilter {
    pub const ALL: [TodoFilter; 3] = [TodoFilter::All, TodoFilter::Completed, TodoFilter::NotCompleted];

    pub fn as_str(&self) -> &'static str {
        match self {
            TodoFilter::All => "all",
            TodoFilter::Completed => "completed",
            TodoFilter::NotCompleted => "not_completed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TodoFilter::All => "All",
            TodoFilter::Completed => "Completed",
            TodoFilter::NotCompleted => "Not completed",
        }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Completed => todo.checked,
            TodoFilter::NotCompleted => !todo.checked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown option {0:?}")]
pub struct UnknownOption(pub String);

impl FromStr for TodoSort {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TodoSort::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

impl FromStr for TodoFilter {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TodoFilter::ALL
            .into_iter()
            .find(|filter| filter.as_str() == s)
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

/// Filtered, ordered view of the to-dos.
pub fn project_todos(todos: &[Todo], sort: TodoSort, filter: TodoFilter) -> Vec<Todo> {
    let mut view: Vec<Todo> = todos.iter().filter(|t| filter.matches(t)).cloned().collect();
    view.sort_by(|a, b| sort.compare(a, b));
    view
}

/// Notes newest first; equal or missing timestamps fall back to id order.
pub fn project_notes(notes: &[Note]) -> Vec<Note> {
    let mut view = notes.to_vec();
    view.sort_by(|a, b| b.created_millis().cmp(&a.created_millis()).then_with(|| a.id.cmp(&b.id)));
    view
}
