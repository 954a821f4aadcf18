//! Record Store
//!
//! Records of one section, scoped to a single owner. Only confirmed server
//! results are applied; a load answered after a newer load was dispatched is
//! dropped.

use crate::error::SyncError;
use crate::model::{ItemId, ListItem};
use crate::scope::Scope;
use crate::section::{LoadOutcome, RemoveOutcome, ViewOutcome, WriteOutcome, Written};

/// Identifies one dispatched load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub scope: Scope,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadApplied {
    /// Store now holds this many records.
    Replaced(usize),
    /// A newer load was dispatched; the result was dropped.
    Stale,
    /// The fetch failed; the store keeps what it had.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteApplied {
    Applied,
    /// Delete confirmation was declined.
    Declined,
    /// The section moved to another owner, or the record left the store,
    /// while the write was in flight.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore<K> {
    scope: Option<Scope>,
    items: Vec<K>,
    generation: u64,
    loaded: bool,
}

impl<K> Default for RecordStore<K> {
    fn default() -> Self {
        Self {
            scope: None,
            items: Vec::new(),
            generation: 0,
            loaded: false,
        }
    }
}

impl<K: ListItem> RecordStore<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    /// Records in arrival order; use a projection for display order.
    pub fn items(&self) -> &[K] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&K> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a load for the current scope has completed successfully.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Register a new load. Switching owners drops the previous owner's
    /// records right away.
    pub fn begin_load(&mut self, scope: Scope) -> LoadTicket {
        if self.scope.as_ref() != Some(&scope) {
            self.items.clear();
            self.loaded = false;
            self.scope = Some(scope.clone());
        }
        self.generation += 1;
        LoadTicket { scope, generation: self.generation }
    }

    pub fn finish_load(&mut self, outcome: LoadOutcome<K>) -> LoadApplied {
        let LoadOutcome { ticket, result } = outcome;
        if ticket.generation != self.generation {
            log::debug!("[Store] dropping stale load #{} for {}", ticket.generation, ticket.scope);
            return LoadApplied::Stale;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.loaded = true;
                LoadApplied::Replaced(self.items.len())
            }
            Err(e) => {
                log::warn!("[Store] {}", e);
                LoadApplied::Failed
            }
        }
    }

    /// Apply a confirmed write; failures leave the store untouched and are
    /// handed back to the caller.
    pub fn apply_write(&mut self, outcome: WriteOutcome<K>) -> Result<WriteApplied, SyncError> {
        let written = outcome.result?;
        if self.scope.as_ref() != Some(&outcome.scope) {
            log::debug!("[Store] dropping write for {}, section moved on", outcome.scope);
            return Ok(WriteApplied::Stale);
        }
        match written {
            Written::Created(item) => self.upsert(item),
            Written::Updated(item) => {
                let Some(existing) = self.items.iter_mut().find(|existing| existing.id() == item.id()) else {
                    log::debug!("[Store] dropping update for #{}, no longer listed", item.id());
                    return Ok(WriteApplied::Stale);
                };
                *existing = item;
            }
            Written::Removed(id) => self.items.retain(|item| item.id() != id),
        }
        Ok(WriteApplied::Applied)
    }

    /// The fetched detail, if its record is still listed for the scope it
    /// was requested under.
    pub fn admit_view(&self, outcome: ViewOutcome<K>) -> Option<K> {
        let ViewOutcome { scope, item } = outcome;
        if self.scope.as_ref() != Some(&scope) || self.get(item.id()).is_none() {
            log::debug!("[Store] dropping detail for #{} from {}", item.id(), scope);
            return None;
        }
        Some(item)
    }

    pub fn apply_remove(&mut self, outcome: RemoveOutcome<K>) -> Result<WriteApplied, SyncError> {
        match outcome {
            RemoveOutcome::Declined => Ok(WriteApplied::Declined),
            RemoveOutcome::Sent(write) => self.apply_write(write),
        }
    }

    fn upsert(&mut self, item: K) {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::model::Note;

    fn note(id: u32, title: &str) -> Note {
        Note {
            id,
            owner: Scope::General,
            created_at: None,
            title: title.to_string(),
            body: String::new(),
        }
    }

    fn loaded(ticket: LoadTicket, items: Vec<Note>) -> LoadOutcome<Note> {
        LoadOutcome { ticket, result: Ok(items) }
    }

    fn failed(ticket: LoadTicket) -> LoadOutcome<Note> {
        LoadOutcome {
            ticket,
            result: Err(SyncError::Load { what: "notes", source: GatewayError::Transport("offline".into()) }),
        }
    }

    #[test]
    fn test_stale_load_does_not_overwrite_newer_scope() {
        let mut store = RecordStore::new();
        let a = store.begin_load(Scope::Appliance(1));
        let b = store.begin_load(Scope::Appliance(2));

        assert_eq!(store.finish_load(loaded(b, vec![note(20, "b")])), LoadApplied::Replaced(1));
        assert_eq!(store.finish_load(loaded(a, vec![note(10, "a")])), LoadApplied::Stale);

        assert_eq!(store.scope(), Some(&Scope::Appliance(2)));
        assert_eq!(store.items(), &[note(20, "b")]);
    }

    #[test]
    fn test_stale_load_arriving_first_is_dropped_too() {
        let mut store = RecordStore::new();
        let a = store.begin_load(Scope::Space("Attic".into()));
        let b = store.begin_load(Scope::Space("Garage".into()));

        assert_eq!(store.finish_load(loaded(a, vec![note(1, "attic")])), LoadApplied::Stale);
        assert!(store.is_empty());
        assert!(!store.is_loaded());
        assert_eq!(store.finish_load(loaded(b, vec![note(2, "garage")])), LoadApplied::Replaced(1));
    }

    #[test]
    fn test_failed_load_keeps_last_good_state() {
        let mut store = RecordStore::new();
        let first = store.begin_load(Scope::General);
        store.finish_load(loaded(first, vec![note(1, "kept")]));

        let reload = store.begin_load(Scope::General);
        assert_eq!(store.finish_load(failed(reload)), LoadApplied::Failed);

        assert_eq!(store.items(), &[note(1, "kept")]);
        assert!(store.is_loaded());
    }

    #[test]
    fn test_owner_switch_never_merges() {
        let mut store = RecordStore::new();
        let first = store.begin_load(Scope::Appliance(1));
        store.finish_load(loaded(first, vec![note(1, "fridge")]));

        store.begin_load(Scope::Appliance(2));

        assert!(store.is_empty());
    }

    #[test]
    fn test_update_replaces_only_matching_entry() {
        let mut store = RecordStore::new();
        let ticket = store.begin_load(Scope::General);
        store.finish_load(loaded(ticket, vec![note(1, "one"), note(2, "two"), note(3, "three")]));

        let confirmed = Note { body: "server body".into(), ..note(2, "TWO") };
        let outcome = WriteOutcome { scope: Scope::General, result: Ok(Written::Updated(confirmed.clone())) };

        assert_eq!(store.apply_write(outcome), Ok(WriteApplied::Applied));
        assert_eq!(store.items(), &[note(1, "one"), confirmed, note(3, "three")]);
    }

    #[test]
    fn test_failed_write_leaves_store_unchanged() {
        let mut store = RecordStore::new();
        let ticket = store.begin_load(Scope::General);
        store.finish_load(loaded(ticket, vec![note(1, "one")]));
        let before = store.clone();

        let outcome: WriteOutcome<Note> = WriteOutcome {
            scope: Scope::General,
            result: Err(SyncError::Write { op: "add note".into(), source: GatewayError::Status { status: 500, url: "/notes/add".into() } }),
        };

        assert!(matches!(store.apply_write(outcome), Err(SyncError::Write { .. })));
        assert_eq!(store, before);
    }

    #[test]
    fn test_write_for_previous_owner_is_dropped() {
        let mut store = RecordStore::new();
        store.begin_load(Scope::Appliance(2));

        let outcome = WriteOutcome { scope: Scope::Appliance(1), result: Ok(Written::Created(note(5, "late"))) };

        assert_eq!(store.apply_write(outcome), Ok(WriteApplied::Stale));
        assert!(store.is_empty());
    }

    #[test]
    fn test_created_is_appended() {
        let mut store = RecordStore::new();
        let ticket = store.begin_load(Scope::General);
        store.finish_load(loaded(ticket, vec![note(1, "one")]));

        let outcome = WriteOutcome { scope: Scope::General, result: Ok(Written::Created(note(7, "new"))) };
        store.apply_write(outcome).unwrap();

        assert_eq!(store.items().iter().map(|n| n.id).collect::<Vec<_>>(), vec![1, 7]);
    }

    #[test]
    fn test_update_for_unlisted_record_is_not_appended() {
        let mut store = RecordStore::new();
        let a = store.begin_load(Scope::Appliance(1));
        store.finish_load(loaded(a, vec![Note { owner: Scope::Appliance(1), ..note(1, "fridge") }]));
        let b = store.begin_load(Scope::Appliance(2));
        store.finish_load(loaded(b, vec![Note { owner: Scope::Appliance(2), ..note(2, "oven") }]));

        let foreign = Note { owner: Scope::Appliance(1), ..note(1, "fridge edited") };
        let outcome = WriteOutcome { scope: Scope::Appliance(2), result: Ok(Written::Updated(foreign)) };

        assert_eq!(store.apply_write(outcome), Ok(WriteApplied::Stale));
        assert_eq!(store.items().iter().map(|n| n.id).collect::<Vec<_>>(), vec![2]);
        assert!(store.items().iter().all(|n| n.owner == Scope::Appliance(2)));
    }

    #[test]
    fn test_late_update_does_not_revive_removed_record() {
        let mut store = RecordStore::new();
        let ticket = store.begin_load(Scope::General);
        store.finish_load(loaded(ticket, vec![note(1, "one"), note(2, "two")]));

        let removed = WriteOutcome { scope: Scope::General, result: Ok(Written::Removed(1)) };
        assert_eq!(store.apply_write(removed), Ok(WriteApplied::Applied));

        let late = WriteOutcome { scope: Scope::General, result: Ok(Written::Updated(note(1, "one, toggled"))) };
        assert_eq!(store.apply_write(late), Ok(WriteApplied::Stale));
        assert_eq!(store.items().iter().map(|n| n.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_detail_admitted_only_for_current_listing() {
        let mut store = RecordStore::new();
        let ticket = store.begin_load(Scope::Appliance(1));
        store.finish_load(loaded(ticket, vec![note(1, "fridge")]));

        let current = ViewOutcome { scope: Scope::Appliance(1), item: note(1, "fridge") };
        assert_eq!(store.admit_view(current), Some(note(1, "fridge")));

        let unlisted = ViewOutcome { scope: Scope::Appliance(1), item: note(9, "gone") };
        assert_eq!(store.admit_view(unlisted), None);

        store.begin_load(Scope::Appliance(2));
        let previous_owner = ViewOutcome { scope: Scope::Appliance(1), item: note(1, "fridge") };
        assert_eq!(store.admit_view(previous_owner), None);
    }
}
