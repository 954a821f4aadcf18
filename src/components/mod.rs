//! UI Components
//!
//! Leptos components for the Notes and To-dos sections.

mod delete_confirm_button;
mod list_controls;
mod note_modal;
mod notes_section;
mod scope_bar;
mod todo_modal;
mod todo_row;
mod todos_section;

pub use delete_confirm_button::DeleteConfirmButton;
pub use list_controls::ListControls;
pub use note_modal::NoteModal;
pub use notes_section::NotesSection;
pub use scope_bar::ScopeBar;
pub use todo_modal::TodoModal;
pub use todo_row::TodoRow;
pub use todos_section::TodosSection;
