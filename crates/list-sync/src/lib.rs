//! List Sync
//!
//! Client-side engine behind the Notes and To-dos sections:
//! - scope: which appliance or space a list belongs to
//! - model: canonical records and their wire forms
//! - store: per-section record store with last-request-wins loading
//! - enrich: source labels for to-dos
//! - projection: sort/filter views
//! - session: view/edit/add modal state machine
//! - section: async operations that produce typed outcomes for the store
//! - gateway: the remote collaborator

pub mod enrich;
pub mod error;
pub mod gateway;
pub mod model;
pub mod projection;
pub mod scope;
pub mod section;
pub mod session;
pub mod store;

#[cfg(test)]
mod fake;

pub use error::{GatewayError, SyncError, ValidationIssue};
pub use gateway::{ApplianceSummary, NewNote, NewTodo, NoteChanges, RemoteGateway, TodoChanges};
pub use model::{ApplianceId, ItemId, ListItem, Note, RawNote, RawTodo, Todo};
pub use projection::{project_notes, project_todos, TodoFilter, TodoSort};
pub use scope::Scope;
pub use section::{Confirm, ListKind, LoadOutcome, RemoveOutcome, ViewOutcome, WriteOutcome, Written};
pub use session::{Draft, EditSession, Mode, SaveRequest};
pub use store::{LoadApplied, LoadTicket, RecordStore, WriteApplied};
