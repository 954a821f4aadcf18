//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use list_sync::Scope;

use crate::api::HttpGateway;
use crate::config::AppConfig;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Owner whose notes and to-dos are shown - read
    pub scope: ReadSignal<Scope>,
    /// Owner whose notes and to-dos are shown - write
    set_scope: WriteSignal<Scope>,
    server_url: StoredValue<String>,
}

impl AppContext {
    pub fn new(config: &AppConfig, scope: (ReadSignal<Scope>, WriteSignal<Scope>)) -> Self {
        Self {
            scope: scope.0,
            set_scope: scope.1,
            server_url: StoredValue::new(config.server_url.clone()),
        }
    }

    /// Switch owner; sections reload and drop the previous owner's records.
    pub fn set_scope(&self, scope: Scope) {
        if self.scope.get_untracked() != scope {
            log::info!("[APP] switching to {}", scope);
            self.set_scope.set(scope);
        }
    }

    pub fn gateway(&self) -> HttpGateway {
        HttpGateway::new(&self.server_url.get_value())
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
