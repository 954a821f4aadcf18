//! Section Operations
//!
//! Async steps behind a Notes or To-dos section. None of them touch the
//! record store: each returns a typed outcome that the owning section feeds
//! into `RecordStore::finish_load` or `RecordStore::apply_write`.

use async_trait::async_trait;

use crate::enrich::{enrich, enrich_one};
use crate::error::SyncError;
use crate::gateway::{NewNote, NewTodo, NoteChanges, RemoteGateway, TodoChanges};
use crate::model::{ItemId, ListItem, Note, RawNote, Todo};
use crate::scope::Scope;
use crate::session::{Draft, SaveRequest};
use crate::store::LoadTicket;

/// How a record kind is listed, written and edited.
#[async_trait(?Send)]
pub trait ListKind: ListItem + 'static {
    /// Used in log lines and prompts.
    const NOUN: &'static str;

    /// Name of the draft field that must not be blank.
    const REQUIRED_FIELD: &'static str;

    async fn list<G: RemoteGateway + ?Sized>(gateway: &G, scope: &Scope) -> Result<Vec<Self>, SyncError>;

    async fn create<G: RemoteGateway + ?Sized>(gateway: &G, scope: &Scope, draft: &Draft) -> Result<Self, SyncError>;

    async fn update<G: RemoteGateway + ?Sized>(gateway: &G, target: &Self, draft: &Draft) -> Result<Self, SyncError>;

    async fn delete<G: RemoteGateway + ?Sized>(gateway: &G, id: ItemId) -> Result<(), SyncError>;

    /// Full detail for the view modal. Kinds whose list entries are complete
    /// return the item unchanged.
    async fn fetch_detail<G: RemoteGateway + ?Sized>(_gateway: &G, item: &Self) -> Result<Self, SyncError> {
        Ok(item.clone())
    }

    /// Seed an edit draft (copy-in).
    fn to_draft(&self) -> Draft;
}

#[async_trait(?Send)]
impl ListKind for Note {
    const NOUN: &'static str = "note";
    const REQUIRED_FIELD: &'static str = "Title";

    async fn list<G: RemoteGateway + ?Sized>(gateway: &G, scope: &Scope) -> Result<Vec<Self>, SyncError> {
        let raw = gateway
            .list_notes(scope)
            .await
            .map_err(|source| SyncError::Load { what: "notes", source })?;
        Ok(raw.into_iter().map(RawNote::normalize).collect())
    }

    async fn create<G: RemoteGateway + ?Sized>(gateway: &G, scope: &Scope, draft: &Draft) -> Result<Self, SyncError> {
        let payload = NewNote::in_scope(scope, draft.title.clone(), draft.body.clone());
        let created = gateway.create_note(&payload).await.map_err(write_error("add note"))?;
        Ok(created.normalize())
    }

    async fn update<G: RemoteGateway + ?Sized>(gateway: &G, target: &Self, draft: &Draft) -> Result<Self, SyncError> {
        let changes = NoteChanges { title: draft.title.clone(), body: draft.body.clone() };
        let updated = gateway
            .update_note(target.id, &changes)
            .await
            .map_err(write_error("update note"))?;
        Ok(updated.normalize())
    }

    async fn delete<G: RemoteGateway + ?Sized>(gateway: &G, id: ItemId) -> Result<(), SyncError> {
        gateway.delete_note(id).await.map_err(write_error("delete note"))
    }

    async fn fetch_detail<G: RemoteGateway + ?Sized>(gateway: &G, item: &Self) -> Result<Self, SyncError> {
        let full = gateway
            .get_note(item.id)
            .await
            .map_err(|source| SyncError::Load { what: "note", source })?;
        Ok(full.normalize())
    }

    fn to_draft(&self) -> Draft {
        Draft::seeded(&self.title, &self.body)
    }
}

#[async_trait(?Send)]
impl ListKind for Todo {
    const NOUN: &'static str = "to-do";
    const REQUIRED_FIELD: &'static str = "Label";

    async fn list<G: RemoteGateway + ?Sized>(gateway: &G, scope: &Scope) -> Result<Vec<Self>, SyncError> {
        let raw = gateway
            .list_todos(scope)
            .await
            .map_err(|source| SyncError::Load { what: "to-dos", source })?;
        Ok(enrich(gateway, raw).await)
    }

    async fn create<G: RemoteGateway + ?Sized>(gateway: &G, scope: &Scope, draft: &Draft) -> Result<Self, SyncError> {
        let payload = NewTodo::in_scope(scope, draft.title.clone());
        let created = gateway.create_todo(&payload).await.map_err(write_error("add to-do"))?;
        Ok(enrich_one(gateway, created).await)
    }

    async fn update<G: RemoteGateway + ?Sized>(gateway: &G, target: &Self, draft: &Draft) -> Result<Self, SyncError> {
        let changes = TodoChanges { label: draft.title.clone(), checked: target.checked };
        write_todo(gateway, target.id, &changes, "update to-do").await
    }

    async fn delete<G: RemoteGateway + ?Sized>(gateway: &G, id: ItemId) -> Result<(), SyncError> {
        gateway.delete_todo(id).await.map_err(write_error("delete to-do"))
    }

    fn to_draft(&self) -> Draft {
        Draft::seeded(&self.label, "")
    }
}

fn write_error(op: &'static str) -> impl FnOnce(crate::error::GatewayError) -> SyncError {
    move |source| SyncError::Write { op: op.to_string(), source }
}

async fn write_todo<G>(gateway: &G, id: ItemId, changes: &TodoChanges, op: &'static str) -> Result<Todo, SyncError>
where
    G: RemoteGateway + ?Sized,
{
    let updated = gateway.update_todo(id, changes).await.map_err(write_error(op))?;
    Ok(enrich_one(gateway, updated).await)
}

/// Explicit user approval for destructive operations.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

// ========================
// Outcomes
// ========================

/// Result of a scoped list fetch, tagged with the request it answers.
#[derive(Debug)]
pub struct LoadOutcome<K> {
    pub ticket: LoadTicket,
    pub result: Result<Vec<K>, SyncError>,
}

/// A write the server confirmed.
#[derive(Debug, Clone, PartialEq)]
pub enum Written<K> {
    Created(K),
    Updated(K),
    Removed(ItemId),
}

/// Result of a write, tagged with the scope it was issued for.
#[derive(Debug)]
pub struct WriteOutcome<K> {
    pub scope: Scope,
    pub result: Result<Written<K>, SyncError>,
}

/// Detail for the view modal, tagged with the scope it was requested under.
#[derive(Debug)]
pub struct ViewOutcome<K> {
    pub scope: Scope,
    pub item: K,
}

#[derive(Debug)]
pub enum RemoveOutcome<K> {
    /// The user said no; nothing was sent.
    Declined,
    Sent(WriteOutcome<K>),
}

// ========================
// Operations
// ========================

pub async fn fetch<K, G>(gateway: &G, ticket: LoadTicket) -> LoadOutcome<K>
where
    K: ListKind,
    G: RemoteGateway + ?Sized,
{
    log::debug!("[Section] loading {}s for {} (#{})", K::NOUN, ticket.scope, ticket.generation);
    let result = K::list(gateway, &ticket.scope).await;
    LoadOutcome { ticket, result }
}

/// Send a validated save request.
pub async fn save<K, G>(gateway: &G, scope: &Scope, request: SaveRequest<K>) -> WriteOutcome<K>
where
    K: ListKind,
    G: RemoteGateway + ?Sized,
{
    let result = match &request {
        SaveRequest::Create { draft } => K::create(gateway, scope, draft).await.map(Written::Created),
        SaveRequest::Update { target, draft } => K::update(gateway, target, draft).await.map(Written::Updated),
    };
    WriteOutcome { scope: scope.clone(), result }
}

/// Delete after asking for confirmation. Declining sends nothing.
pub async fn remove<K, G, C>(gateway: &G, confirm: &C, scope: &Scope, item: &K) -> RemoveOutcome<K>
where
    K: ListKind,
    G: RemoteGateway + ?Sized,
    C: Confirm + ?Sized,
{
    if !confirm.confirm(&format!("Delete this {}?", K::NOUN)) {
        return RemoveOutcome::Declined;
    }
    let id = item.id();
    let result = K::delete(gateway, id).await.map(|()| Written::Removed(id));
    RemoveOutcome::Sent(WriteOutcome { scope: scope.clone(), result })
}

/// Fresh detail for the view modal, or the local summary if that fails.
pub async fn refresh<K, G>(gateway: &G, item: K) -> K
where
    K: ListKind,
    G: RemoteGateway + ?Sized,
{
    match K::fetch_detail(gateway, &item).await {
        Ok(full) => full,
        Err(e) => {
            log::warn!("[Section] {}, showing the cached summary", e);
            item
        }
    }
}

/// Refresh an item for the view modal. Hand the outcome to
/// `RecordStore::admit_view` before entering view mode.
pub async fn open_view<K, G>(gateway: &G, scope: &Scope, item: K) -> ViewOutcome<K>
where
    K: ListKind,
    G: RemoteGateway + ?Sized,
{
    let item = refresh(gateway, item).await;
    ViewOutcome { scope: scope.clone(), item }
}

/// Flip a to-do's checkbox on the server.
pub async fn toggle<G>(gateway: &G, scope: &Scope, todo: &Todo) -> WriteOutcome<Todo>
where
    G: RemoteGateway + ?Sized,
{
    let changes = TodoChanges { label: todo.label.clone(), checked: !todo.checked };
    let result = write_todo(gateway, todo.id, &changes, "update to-do").await.map(Written::Updated);
    WriteOutcome { scope: scope.clone(), result }
}

/// Quick-add a to-do from the inline input; blank labels never leave the client.
pub async fn quick_add<G>(gateway: &G, scope: &Scope, label: &str) -> WriteOutcome<Todo>
where
    G: RemoteGateway + ?Sized,
{
    let draft = Draft::seeded(label, "");
    let result = match draft.validate(Todo::REQUIRED_FIELD) {
        Ok(()) => Todo::create(gateway, scope, &draft).await.map(Written::Created),
        Err(e) => Err(e),
    };
    WriteOutcome { scope: scope.clone(), result }
}
