//! Remote Gateway
//!
//! The REST collaborator the engine reads from and writes to. Every write
//! must answer with the full canonical record.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::model::{ApplianceId, ItemId, RawNote, RawTodo};
use crate::scope::Scope;

/// Create payload for a note.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appliance_id: Option<ApplianceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteChanges {
    pub title: String,
    pub body: String,
}

/// Create payload for a to-do.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub label: String,
    pub checked: bool,
    #[serde(rename = "userid")]
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appliance_id: Option<ApplianceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoChanges {
    pub label: String,
    pub checked: bool,
}

/// The part of an appliance record used for display names.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceSummary {
    #[serde(default)]
    pub appliance_name: String,
}

impl NewNote {
    pub fn in_scope(scope: &Scope, title: String, body: String) -> Self {
        Self {
            title,
            body,
            appliance_id: scope.appliance_id(),
            space_type: scope.space_key().map(str::to_string),
        }
    }
}

impl NewTodo {
    /// Single-user deployments always file to-dos under user "1".
    pub const DEFAULT_USER: &'static str = "1";

    pub fn in_scope(scope: &Scope, label: String) -> Self {
        Self {
            label,
            checked: false,
            user_id: Self::DEFAULT_USER.to_string(),
            appliance_id: scope.appliance_id(),
            space_type: scope.space_key().map(str::to_string),
        }
    }
}

/// Network calls are awaited on the UI thread, so futures need not be `Send`.
#[async_trait(?Send)]
pub trait RemoteGateway {
    async fn list_notes(&self, scope: &Scope) -> Result<Vec<RawNote>, GatewayError>;

    async fn get_note(&self, id: ItemId) -> Result<RawNote, GatewayError>;

    async fn create_note(&self, note: &NewNote) -> Result<RawNote, GatewayError>;

    async fn update_note(&self, id: ItemId, changes: &NoteChanges) -> Result<RawNote, GatewayError>;

    async fn delete_note(&self, id: ItemId) -> Result<(), GatewayError>;

    async fn list_todos(&self, scope: &Scope) -> Result<Vec<RawTodo>, GatewayError>;

    async fn create_todo(&self, todo: &NewTodo) -> Result<RawTodo, GatewayError>;

    async fn update_todo(&self, id: ItemId, changes: &TodoChanges) -> Result<RawTodo, GatewayError>;

    async fn delete_todo(&self, id: ItemId) -> Result<(), GatewayError>;

    async fn get_appliance(&self, id: ApplianceId) -> Result<ApplianceSummary, GatewayError>;
}
