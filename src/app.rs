//! Home Logger Frontend App
//!
//! Scope bar over the Notes and To-dos sections.

use leptos::prelude::*;
use list_sync::{ApplianceId, Scope};

use crate::components::{NotesSection, ScopeBar, TodosSection};
use crate::config::AppConfig;
use crate::context::AppContext;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let scope = signal(initial_scope());
    log::info!("[APP] server {} showing {}", config.server_url, scope.0.get_untracked());

    // Provide context to all children
    provide_context(AppContext::new(&config, scope));

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Home Logger"</h1>
                <ScopeBar />
            </header>
            <main class="main-content">
                <NotesSection />
                <TodosSection />
            </main>
        </div>
    }
}

/// Owner named in the page query (`?applianceId=` / `?spaceType=`).
fn initial_scope() -> Scope {
    let Some(search) = web_sys::window().and_then(|w| w.location().search().ok()) else {
        return Scope::General;
    };
    let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
        return Scope::General;
    };
    let appliance_id = params.get("applianceId").and_then(|id| parse_appliance_id(&id));
    let space_type = params.get("spaceType");
    Scope::resolve(appliance_id, space_type.as_deref())
}

fn parse_appliance_id(raw: &str) -> Option<ApplianceId> {
    match raw.trim().parse() {
        Ok(id) => Some(id),
        Err(_) => {
            log::warn!("[APP] ignoring applianceId {:?}", raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_appliance_id() {
        assert_eq!(parse_appliance_id(" 12 "), Some(12));
        assert_eq!(parse_appliance_id("fridge"), None);
        assert_eq!(parse_appliance_id(""), None);
    }
}
