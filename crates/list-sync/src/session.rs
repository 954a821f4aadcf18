//! Edit Session
//!
//! State machine behind the note/to-do modal:
//!
//! ```text
//! Closed --open_add-----> Adding(empty draft)
//! Closed --enter_view---> Viewing(item)
//! Viewing --edit--------> Editing(item, draft from item)
//! Viewing --delete------> Closed            (after a confirmed delete)
//! Editing|Adding --save-> Closed            (after a confirmed write)
//! any --close-----------> Closed            (draft discarded)
//! ```
//!
//! The draft is a copy of the item's fields; it never aliases the stored record.

use crate::error::{SyncError, ValidationIssue};
use crate::section::ListKind;
use crate::store::WriteApplied;

/// Unsaved edit buffer. For to-dos `title` holds the label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub body: String,
    /// Show the body rendered next to the editor. Not persisted.
    pub preview_enabled: bool,
}

impl Draft {
    pub fn seeded(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            preview_enabled: false,
        }
    }

    /// Check the draft rules, one issue per violated rule.
    pub fn validate(&self, required_field: &'static str) -> Result<(), SyncError> {
        let mut issues = Vec::new();
        if self.title.trim().is_empty() {
            issues.push(ValidationIssue::Required(required_field));
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(SyncError::Validation(issues))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode<K> {
    Closed,
    Viewing(K),
    Editing { target: K, draft: Draft },
    Adding { draft: Draft },
}

/// What a validated save should send.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest<K> {
    Create { draft: Draft },
    Update { target: K, draft: Draft },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditSession<K> {
    mode: Mode<K>,
    messages: Vec<String>,
    in_flight: bool,
}

impl<K> Default for EditSession<K> {
    fn default() -> Self {
        Self {
            mode: Mode::Closed,
            messages: Vec::new(),
            in_flight: false,
        }
    }
}

impl<K: ListKind> EditSession<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &Mode<K> {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.mode, Mode::Closed)
    }

    /// In-place messages from the last failed step.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// A save or delete is awaiting the server.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.mode {
            Mode::Editing { draft, .. } | Mode::Adding { draft } => Some(draft),
            _ => None,
        }
    }

    /// The stored record this session is about, if any.
    pub fn target(&self) -> Option<&K> {
        match &self.mode {
            Mode::Viewing(item) | Mode::Editing { target: item, .. } => Some(item),
            _ => None,
        }
    }

    pub fn open_add(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.transition(Mode::Adding { draft: Draft::default() });
        true
    }

    /// Enter view mode with an item (already refreshed by the caller).
    pub fn enter_view(&mut self, item: K) -> bool {
        if self.is_open() {
            return false;
        }
        self.transition(Mode::Viewing(item));
        true
    }

    /// Open the editor directly from a list row, skipping the view step.
    pub fn open_edit(&mut self, item: K) -> bool {
        if self.is_open() {
            return false;
        }
        let draft = item.to_draft();
        self.transition(Mode::Editing { target: item, draft });
        true
    }

    pub fn edit(&mut self) -> bool {
        let Mode::Viewing(item) = &self.mode else {
            return false;
        };
        let item = item.clone();
        let draft = item.to_draft();
        self.transition(Mode::Editing { target: item, draft });
        true
    }

    /// Discard everything; never calls the server.
    pub fn close(&mut self) {
        self.transition(Mode::Closed);
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.title = title.into();
        }
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.body = body.into();
        }
    }

    pub fn toggle_preview(&mut self) {
        if let Some(draft) = self.draft_mut() {
            draft.preview_enabled = !draft.preview_enabled;
        }
    }

    /// Validate the draft and hand out what to send. On failure the session
    /// stays where it is and shows why.
    pub fn begin_save(&mut self) -> Result<SaveRequest<K>, SyncError> {
        if self.in_flight {
            return Err(SyncError::Busy);
        }
        let request = match &self.mode {
            Mode::Adding { draft } => SaveRequest::Create { draft: draft.clone() },
            Mode::Editing { target, draft } => SaveRequest::Update {
                target: target.clone(),
                draft: draft.clone(),
            },
            _ => return Err(SyncError::Idle("save")),
        };
        let draft = match &request {
            SaveRequest::Create { draft } | SaveRequest::Update { draft, .. } => draft,
        };
        if let Err(e) = draft.validate(K::REQUIRED_FIELD) {
            self.messages = e.messages();
            return Err(e);
        }
        self.messages.clear();
        self.in_flight = true;
        Ok(request)
    }

    /// Close on a confirmed save; otherwise stay put so the user can retry.
    pub fn finish_save(&mut self, applied: Result<WriteApplied, SyncError>) -> bool {
        self.in_flight = false;
        match applied {
            Ok(_) => {
                self.transition(Mode::Closed);
                true
            }
            Err(e) => {
                log::warn!("[Session] {}", e);
                self.messages = e.messages();
                false
            }
        }
    }

    /// The item to delete, when viewing one.
    pub fn begin_delete(&mut self) -> Result<K, SyncError> {
        if self.in_flight {
            return Err(SyncError::Busy);
        }
        match &self.mode {
            Mode::Viewing(item) => {
                self.in_flight = true;
                Ok(item.clone())
            }
            _ => Err(SyncError::Idle("delete")),
        }
    }

    /// Close after a confirmed delete; a declined prompt keeps the view open.
    pub fn finish_delete(&mut self, applied: Result<WriteApplied, SyncError>) -> bool {
        self.in_flight = false;
        match applied {
            Ok(WriteApplied::Declined) => false,
            Ok(_) => {
                self.transition(Mode::Closed);
                true
            }
            Err(e) => {
                log::warn!("[Session] {}", e);
                self.messages = e.messages();
                false
            }
        }
    }

    fn draft_mut(&mut self) -> Option<&mut Draft> {
        match &mut self.mode {
            Mode::Editing { draft, .. } | Mode::Adding { draft } => Some(draft),
            _ => None,
        }
    }

    fn transition(&mut self, mode: Mode<K>) {
        self.mode = mode;
        self.messages.clear();
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeGateway;
    use crate::model::{Note, Todo};
    use crate::scope::Scope;
    use crate::section;
    use crate::store::RecordStore;

    fn note(id: u32, title: &str, body: &str) -> Note {
        Note {
            id,
            owner: Scope::General,
            created_at: None,
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_add_flow_transitions() {
        let mut session = EditSession::<Note>::new();
        assert!(session.open_add());
        assert_eq!(session.draft(), Some(&Draft::default()));
        assert!(!session.open_add(), "already open");

        session.set_title("Furnace");
        session.set_body("Filter is **16x25**");
        let request = session.begin_save().expect("valid draft");
        assert_eq!(
            request,
            SaveRequest::Create { draft: Draft::seeded("Furnace", "Filter is **16x25**") }
        );
        assert!(session.is_busy());
        assert_eq!(session.begin_save(), Err(SyncError::Busy));

        assert!(session.finish_save(Ok(WriteApplied::Applied)));
        assert_eq!(session.mode(), &Mode::Closed);
    }

    #[test]
    fn test_view_then_edit_copies_the_item() {
        let mut session = EditSession::new();
        let original = note(1, "Dryer", "vent");
        assert!(session.enter_view(original.clone()));
        assert!(session.edit());

        session.set_title("Dryer vent");
        session.toggle_preview();

        assert_eq!(session.target(), Some(&original), "stored copy untouched");
        let draft = session.draft().unwrap();
        assert_eq!(draft.title, "Dryer vent");
        assert!(draft.preview_enabled);
    }

    #[test]
    fn test_blank_title_blocks_save() {
        let mut session = EditSession::<Note>::new();
        session.open_add();
        session.set_title("   ");

        let err = session.begin_save().unwrap_err();

        assert_eq!(err, SyncError::Validation(vec![ValidationIssue::Required("Title")]));
        assert_eq!(session.messages(), &["Title is required".to_string()]);
        assert!(matches!(session.mode(), Mode::Adding { .. }));
        assert!(!session.is_busy());
    }

    #[test]
    fn test_todo_requires_label() {
        let mut session = EditSession::<Todo>::new();
        session.open_add();
        assert_eq!(session.begin_save().unwrap_err().messages(), vec!["Label is required"]);
    }

    #[test]
    fn test_preview_does_not_affect_validation() {
        let mut session = EditSession::<Note>::new();
        session.open_add();
        session.toggle_preview();
        session.set_title("Gutters");
        assert!(session.begin_save().is_ok());
    }

    #[test]
    fn test_invalid_transitions_are_ignored() {
        let mut session = EditSession::<Note>::new();
        assert!(!session.edit());
        assert_eq!(session.begin_save(), Err(SyncError::Idle("save")));
        assert_eq!(session.begin_delete(), Err(SyncError::Idle("delete")));
        session.set_title("ignored");
        assert_eq!(session.mode(), &Mode::Closed);

        session.open_add();
        assert!(!session.edit(), "edit only from viewing");
        assert!(session.begin_delete().is_err(), "delete only from viewing");
    }

    #[test]
    fn test_close_discards_draft() {
        let mut session = EditSession::new();
        session.enter_view(note(2, "Roof", ""));
        session.edit();
        session.set_body("shingles");
        session.close();
        assert_eq!(session.mode(), &Mode::Closed);
        assert_eq!(session.draft(), None);
    }

    #[test]
    fn test_declined_delete_keeps_view() {
        let mut session = EditSession::new();
        session.enter_view(note(2, "Roof", ""));
        session.begin_delete().unwrap();
        assert!(!session.finish_delete(Ok(WriteApplied::Declined)));
        assert!(matches!(session.mode(), Mode::Viewing(_)));
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_empty_title_never_reaches_gateway() {
        let gateway = FakeGateway::new();
        let mut session = EditSession::<Note>::new();
        session.open_add();

        if let Ok(request) = session.begin_save() {
            section::save(&gateway, &Scope::General, request).await;
        }

        assert_eq!(gateway.calls_to("create_note"), 0);
        assert!(session.is_open());
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_save_replaces_store_entry_with_confirmed_record() {
        let gateway = FakeGateway::new();
        let scope = Scope::Appliance(8);
        let id = gateway.seed_note(&scope, "Warranty", "until 2026");
        let other = gateway.seed_note(&scope, "Manual", "drawer");
        let mut store = RecordStore::<Note>::new();
        let ticket = store.begin_load(scope.clone());
        store.finish_load(section::fetch(&gateway, ticket).await);
        let untouched = store.get(other).cloned();

        let mut session = EditSession::new();
        session.enter_view(store.get(id).cloned().unwrap());
        session.edit();
        session.set_body("  until 2027  ");
        let request = session.begin_save().unwrap();
        let outcome = section::save(&gateway, &scope, request).await;
        let closed = session.finish_save(store.apply_write(outcome));

        assert!(closed);
        let saved = store.get(id).unwrap();
        assert_eq!(saved.body, "until 2027", "server trims bodies");
        assert!(saved.created_at.is_some());
        assert_eq!(store.get(other).cloned(), untouched);
    }

    #[tokio::test]
    async fn test_write_failure_keeps_session_and_store() {
        let gateway = FakeGateway::new();
        let scope = Scope::General;
        let mut store = RecordStore::<Note>::new();
        let ticket = store.begin_load(scope.clone());
        store.finish_load(section::fetch(&gateway, ticket).await);
        gateway.fail_writes(true);

        let mut session = EditSession::new();
        session.open_add();
        session.set_title("Sprinklers");
        let request = session.begin_save().unwrap();
        let outcome = section::save(&gateway, &scope, request).await;

        assert!(!session.finish_save(store.apply_write(outcome)));
        assert!(matches!(session.mode(), Mode::Adding { draft } if draft.title == "Sprinklers"));
        assert_eq!(session.messages().len(), 1);
        assert!(store.is_empty());

        gateway.fail_writes(false);
        let retry = session.begin_save().unwrap();
        let outcome = section::save(&gateway, &scope, retry).await;
        assert!(session.finish_save(store.apply_write(outcome)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_view_delete_closes_after_confirmed_delete() {
        let gateway = FakeGateway::new();
        let scope = Scope::Space("Yard".into());
        let id = gateway.seed_note(&scope, "Hose", "");
        let mut store = RecordStore::<Note>::new();
        let ticket = store.begin_load(scope.clone());
        store.finish_load(section::fetch(&gateway, ticket).await);

        let mut session = EditSession::new();
        let shown = section::refresh(&gateway, store.get(id).cloned().unwrap()).await;
        session.enter_view(shown);
        let target = session.begin_delete().unwrap();
        let outcome = section::remove(&gateway, &|_: &str| true, &scope, &target).await;

        assert!(session.finish_delete(store.apply_remove(outcome)));
        assert!(store.is_empty());
        assert_eq!(gateway.calls_to("delete_note"), 1);
    }
}
