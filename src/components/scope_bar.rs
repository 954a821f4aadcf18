//! Scope Bar Component
//!
//! Picks whose notes and to-dos are shown: an appliance by id, a space by
//! name, or neither for the general lists.

use leptos::prelude::*;
use list_sync::{ApplianceId, Scope};

use crate::context::use_app_context;

#[component]
pub fn ScopeBar() -> impl IntoView {
    let ctx = use_app_context();
    let initial = ctx.scope.get_untracked();
    let (appliance_input, set_appliance_input) =
        signal(initial.appliance_id().map(|id| id.to_string()).unwrap_or_default());
    let (space_input, set_space_input) = signal(initial.space_key().unwrap_or_default().to_string());
    let (invalid, set_invalid) = signal(false);

    let apply = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let appliance_text = appliance_input.get_untracked();
        let appliance_text = appliance_text.trim();
        let appliance_id = if appliance_text.is_empty() {
            None
        } else {
            match appliance_text.parse::<ApplianceId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    set_invalid.set(true);
                    return;
                }
            }
        };
        set_invalid.set(false);
        let space = space_input.get_untracked();
        ctx.set_scope(Scope::resolve(appliance_id, Some(space.trim())));
    };

    let clear = move |_: web_sys::MouseEvent| {
        set_appliance_input.set(String::new());
        set_space_input.set(String::new());
        set_invalid.set(false);
        ctx.set_scope(Scope::General);
    };

    view! {
        <form class="scope-bar" on:submit=apply>
            <span class="scope-current">{move || ctx.scope.get().to_string()}</span>
            <input
                type="text"
                inputmode="numeric"
                class="scope-appliance"
                placeholder="Appliance id"
                prop:value=move || appliance_input.get()
                on:input=move |ev| set_appliance_input.set(event_target_value(&ev))
            />
            <input
                type="text"
                class="scope-space"
                placeholder="Space"
                prop:value=move || space_input.get()
                on:input=move |ev| set_space_input.set(event_target_value(&ev))
            />
            <button type="submit">"Show"</button>
            <button type="button" on:click=clear>"All"</button>
            <Show when=move || invalid.get()>
                <span class="scope-error">"Appliance id must be a number"</span>
            </Show>
        </form>
    }
}
