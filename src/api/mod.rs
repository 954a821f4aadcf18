//! REST Gateway
//!
//! Frontend bindings to the home-logger server, organized by endpoint.

mod http;

use async_trait::async_trait;
use reqwest::Method;

use list_sync::{
    ApplianceId, ApplianceSummary, GatewayError, ItemId, NewNote, NewTodo, NoteChanges, RawNote, RawTodo,
    RemoteGateway, Scope, TodoChanges,
};

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

// ========================
// Endpoints
// ========================

#[async_trait(?Send)]
impl RemoteGateway for HttpGateway {
    async fn list_notes(&self, scope: &Scope) -> Result<Vec<RawNote>, GatewayError> {
        self.get_list(&format!("/notes{}", scope.query_string())).await
    }

    async fn get_note(&self, id: ItemId) -> Result<RawNote, GatewayError> {
        self.get_json(&format!("/notes/{}", id)).await
    }

    async fn create_note(&self, note: &NewNote) -> Result<RawNote, GatewayError> {
        self.send_json(Method::POST, "/notes/add", note).await
    }

    async fn update_note(&self, id: ItemId, changes: &NoteChanges) -> Result<RawNote, GatewayError> {
        self.send_json(Method::PUT, &format!("/notes/update/{}", id), changes).await
    }

    async fn delete_note(&self, id: ItemId) -> Result<(), GatewayError> {
        self.delete(&format!("/notes/delete/{}", id)).await
    }

    async fn list_todos(&self, scope: &Scope) -> Result<Vec<RawTodo>, GatewayError> {
        self.get_list(&format!("/todo{}", scope.query_string())).await
    }

    async fn create_todo(&self, todo: &NewTodo) -> Result<RawTodo, GatewayError> {
        self.send_json(Method::POST, "/todo/add", todo).await
    }

    async fn update_todo(&self, id: ItemId, changes: &TodoChanges) -> Result<RawTodo, GatewayError> {
        self.send_json(Method::PUT, &format!("/todo/update/{}", id), changes).await
    }

    async fn delete_todo(&self, id: ItemId) -> Result<(), GatewayError> {
        self.delete(&format!("/todo/delete/{}", id)).await
    }

    async fn get_appliance(&self, id: ApplianceId) -> Result<ApplianceSummary, GatewayError> {
        self.get_json(&format!("/appliances/{}", id)).await
    }
}
