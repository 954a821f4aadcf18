//! In-memory gateway for tests.
//!
//! Behaves like the server: assigns ids and timestamps, trims text fields and
//! echoes full records. Every call is recorded by name.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use crate::error::GatewayError;
use crate::gateway::{ApplianceSummary, NewNote, NewTodo, NoteChanges, RemoteGateway, TodoChanges};
use crate::model::{ApplianceId, ItemId, RawNote, RawTodo, WireMeta};
use crate::scope::Scope;

#[derive(Default)]
pub struct FakeGateway {
    notes: RefCell<Vec<RawNote>>,
    todos: RefCell<Vec<RawTodo>>,
    appliances: HashMap<ApplianceId, String>,
    next_id: Cell<ItemId>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    calls: RefCell<Vec<String>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self { next_id: Cell::new(1), ..Default::default() }
    }

    pub fn with_appliance(mut self, id: ApplianceId, name: &str) -> Self {
        self.appliances.insert(id, name.to_string());
        self
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn calls_to(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.as_str() == name).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn seed_note(&self, scope: &Scope, title: &str, body: &str) -> ItemId {
        let id = self.assign_id();
        self.notes.borrow_mut().push(RawNote {
            id,
            title: title.to_string(),
            body: body.to_string(),
            meta: self.meta_for(id, scope),
        });
        id
    }

    pub fn seed_todo(&self, scope: &Scope, label: &str, checked: bool) -> ItemId {
        let id = self.assign_id();
        self.todos.borrow_mut().push(RawTodo {
            id,
            label: label.to_string(),
            checked,
            meta: self.meta_for(id, scope),
        });
        id
    }

    fn assign_id(&self) -> ItemId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn meta_for(&self, id: ItemId, scope: &Scope) -> WireMeta {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(id as i64);
        WireMeta::new(Some(&created.to_rfc3339()), scope.appliance_id(), scope.space_key())
    }

    fn record(&self, name: &str) {
        self.calls.borrow_mut().push(name.to_string());
    }

    fn read(&self, name: &str) -> Result<(), GatewayError> {
        self.record(name);
        if self.fail_reads.get() {
            return Err(GatewayError::Transport("connection refused".into()));
        }
        Ok(())
    }

    fn write(&self, name: &str) -> Result<(), GatewayError> {
        self.record(name);
        if self.fail_writes.get() {
            return Err(GatewayError::Status { status: 500, url: format!("/{}", name) });
        }
        Ok(())
    }

    fn in_scope(meta: &WireMeta, scope: &Scope) -> bool {
        match scope {
            Scope::General => true,
            other => &meta.owner() == other,
        }
    }

    fn missing(id: ItemId) -> GatewayError {
        GatewayError::Status { status: 404, url: format!("/{}", id) }
    }
}

#[async_trait(?Send)]
impl RemoteGateway for FakeGateway {
    async fn list_notes(&self, scope: &Scope) -> Result<Vec<RawNote>, GatewayError> {
        self.read("list_notes")?;
        Ok(self.notes.borrow().iter().filter(|n| Self::in_scope(&n.meta, scope)).cloned().collect())
    }

    async fn get_note(&self, id: ItemId) -> Result<RawNote, GatewayError> {
        self.read("get_note")?;
        self.notes.borrow().iter().find(|n| n.id == id).cloned().ok_or_else(|| Self::missing(id))
    }

    async fn create_note(&self, note: &NewNote) -> Result<RawNote, GatewayError> {
        self.write("create_note")?;
        let scope = Scope::resolve(note.appliance_id, note.space_type.as_deref());
        let id = self.seed_note(&scope, note.title.trim(), note.body.trim());
        self.get_stored_note(id)
    }

    async fn update_note(&self, id: ItemId, changes: &NoteChanges) -> Result<RawNote, GatewayError> {
        self.write("update_note")?;
        let mut notes = self.notes.borrow_mut();
        let note = notes.iter_mut().find(|n| n.id == id).ok_or_else(|| Self::missing(id))?;
        note.title = changes.title.trim().to_string();
        note.body = changes.body.trim().to_string();
        Ok(note.clone())
    }

    async fn delete_note(&self, id: ItemId) -> Result<(), GatewayError> {
        self.write("delete_note")?;
        self.notes.borrow_mut().retain(|n| n.id != id);
        Ok(())
    }

    async fn list_todos(&self, scope: &Scope) -> Result<Vec<RawTodo>, GatewayError> {
        self.read("list_todos")?;
        Ok(self.todos.borrow().iter().filter(|t| Self::in_scope(&t.meta, scope)).cloned().collect())
    }

    async fn create_todo(&self, todo: &NewTodo) -> Result<RawTodo, GatewayError> {
        self.write("create_todo")?;
        let scope = Scope::resolve(todo.appliance_id, todo.space_type.as_deref());
        let id = self.seed_todo(&scope, todo.label.trim(), todo.checked);
        self.todos.borrow().iter().find(|t| t.id == id).cloned().ok_or_else(|| Self::missing(id))
    }

    async fn update_todo(&self, id: ItemId, changes: &TodoChanges) -> Result<RawTodo, GatewayError> {
        self.write("update_todo")?;
        let mut todos = self.todos.borrow_mut();
        let todo = todos.iter_mut().find(|t| t.id == id).ok_or_else(|| Self::missing(id))?;
        todo.label = changes.label.trim().to_string();
        todo.checked = changes.checked;
        Ok(todo.clone())
    }

    async fn delete_todo(&self, id: ItemId) -> Result<(), GatewayError> {
        self.write("delete_todo")?;
        self.todos.borrow_mut().retain(|t| t.id != id);
        Ok(())
    }

    async fn get_appliance(&self, id: ApplianceId) -> Result<ApplianceSummary, GatewayError> {
        self.read("get_appliance")?;
        self.appliances
            .get(&id)
            .map(|name| ApplianceSummary { appliance_name: name.clone() })
            .ok_or_else(|| Self::missing(id))
    }
}

impl FakeGateway {
    fn get_stored_note(&self, id: ItemId) -> Result<RawNote, GatewayError> {
        self.notes.borrow().iter().find(|n| n.id == id).cloned().ok_or_else(|| Self::missing(id))
    }
}
