//! List Controls Component
//!
//! Sort and filter selects above the to-do list.

use leptos::prelude::*;
use list_sync::{TodoFilter, TodoSort};

#[component]
pub fn ListControls(
    sort: ReadSignal<TodoSort>,
    set_sort: WriteSignal<TodoSort>,
    filter: ReadSignal<TodoFilter>,
    set_filter: WriteSignal<TodoFilter>,
) -> impl IntoView {
    view! {
        <div class="list-controls">
            <label class="list-control">
                "Sort by "
                <select
                    prop:value=move || sort.get().as_str()
                    on:change=move |ev| {
                        match event_target_value(&ev).parse::<TodoSort>() {
                            Ok(choice) => set_sort.set(choice),
                            Err(e) => log::warn!("[Todos] {}", e),
                        }
                    }
                >
                    {TodoSort::ALL.iter().map(|choice| view! {
                        <option value=choice.as_str()>{choice.display_name()}</option>
                    }).collect_view()}
                </select>
            </label>
            <label class="list-control">
                "Show "
                <select
                    prop:value=move || filter.get().as_str()
                    on:change=move |ev| {
                        match event_target_value(&ev).parse::<TodoFilter>() {
                            Ok(choice) => set_filter.set(choice),
                            Err(e) => log::warn!("[Todos] {}", e),
                        }
                    }
                >
                    {TodoFilter::ALL.iter().map(|choice| view! {
                        <option value=choice.as_str()>{choice.display_name()}</option>
                    }).collect_view()}
                </select>
            </label>
        </div>
    }
}
