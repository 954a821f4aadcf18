//! Section State Stores
//!
//! Each mounted section owns one store: its records and its edit session.
//! Uses Leptos reactive_stores for fine-grained reactivity.

use list_sync::{EditSession, Mode, Note, RecordStore, Todo};
use reactive_stores::Store;

/// Notes section state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct NotesState {
    pub records: RecordStore<Note>,
    pub session: EditSession<Note>,
}

/// To-dos section state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct TodosState {
    pub records: RecordStore<Todo>,
    pub session: EditSession<Todo>,
    /// Text of the inline "New to-do" input
    pub new_label: String,
    /// Why the last inline add, toggle or delete did not go through
    pub notice: Option<String>,
}

pub type NotesStore = Store<NotesState>;
pub type TodosStore = Store<TodosState>;

/// Which modal layout to show. Changes far less often than the session
/// itself, so views keyed on it are not rebuilt on every keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKind {
    Closed,
    Viewing,
    Editing,
    Adding,
}

impl ModalKind {
    pub fn of<K>(mode: &Mode<K>) -> Self {
        match mode {
            Mode::Closed => ModalKind::Closed,
            Mode::Viewing(_) => ModalKind::Viewing,
            Mode::Editing { .. } => ModalKind::Editing,
            Mode::Adding { .. } => ModalKind::Adding,
        }
    }

    pub fn is_form(&self) -> bool {
        matches!(self, ModalKind::Editing | ModalKind::Adding)
    }
}

/// Locale string for a record timestamp; empty when absent.
pub fn created_label(created_millis: Option<i64>) -> String {
    match created_millis {
        Some(ms) => {
            let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(ms as f64));
            date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED).into()
        }
        None => String::new(),
    }
}
