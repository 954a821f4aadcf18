//! To-dos Section Component
//!
//! To-dos for the current owner with sort/filter controls, an inline quick
//! add, per-row toggle and delete, and the view/edit/add modal.

use leptos::prelude::*;
use leptos::task::spawn_local;
use list_sync::{project_todos, section, LoadApplied, ListItem, RemoveOutcome, Todo, TodoFilter, TodoSort, WriteOutcome};
use reactive_stores::Store;

use crate::components::{ListControls, TodoModal, TodoRow};
use crate::context::use_app_context;
use crate::dialog::BrowserConfirm;
use crate::store::{TodosState, TodosStateStoreFields, TodosStore};

#[component]
pub fn TodosSection() -> impl IntoView {
    let ctx = use_app_context();
    let state: TodosStore = Store::new(TodosState::default());
    let (sort, set_sort) = signal(TodoSort::default());
    let (filter, set_filter) = signal(TodoFilter::default());

    Effect::new(move |_| {
        let scope = ctx.scope.get();
        let ticket = state.records().write().begin_load(scope);
        state.session().write().close();
        *state.notice().write() = None;
        spawn_local(async move {
            let gateway = ctx.gateway();
            let outcome = section::fetch::<Todo, _>(&gateway, ticket).await;
            if let LoadApplied::Replaced(count) = state.records().write().finish_load(outcome) {
                log::debug!("[Todos] showing {} to-dos", count);
            }
        });
    });

    let todos = Memo::new(move |_| project_todos(state.records().read().items(), sort.get(), filter.get()));

    // Row writes report failures on the section notice line
    let apply_row_write = move |outcome: WriteOutcome<Todo>| -> bool {
        let applied = state.records().write().apply_write(outcome);
        match applied {
            Ok(_) => {
                *state.notice().write() = None;
                true
            }
            Err(e) => {
                log::warn!("[Todos] {}", e);
                *state.notice().write() = Some(e.to_string());
                false
            }
        }
    };

    let quick_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let label = state.new_label().get_untracked();
        let scope = ctx.scope.get_untracked();
        spawn_local(async move {
            let gateway = ctx.gateway();
            let outcome = section::quick_add(&gateway, &scope, &label).await;
            if apply_row_write(outcome) {
                state.new_label().write().clear();
            }
        });
    };

    let on_toggle = Callback::new(move |todo: Todo| {
        let scope = ctx.scope.get_untracked();
        spawn_local(async move {
            let gateway = ctx.gateway();
            let outcome = section::toggle(&gateway, &scope, &todo).await;
            apply_row_write(outcome);
        });
    });

    let on_view = Callback::new(move |todo: Todo| {
        state.session().write().enter_view(todo);
    });

    let on_edit = Callback::new(move |todo: Todo| {
        state.session().write().open_edit(todo);
    });

    // The row's own ✓/✗ already asked
    let on_delete_row = Callback::new(move |todo: Todo| {
        let scope = ctx.scope.get_untracked();
        spawn_local(async move {
            let gateway = ctx.gateway();
            let approved = |_: &str| true;
            match section::remove(&gateway, &approved, &scope, &todo).await {
                RemoveOutcome::Sent(outcome) => {
                    apply_row_write(outcome);
                }
                RemoveOutcome::Declined => {}
            }
        });
    });

    let on_save = Callback::new(move |_: ()| {
        let request = match state.session().write().begin_save() {
            Ok(request) => request,
            Err(e) => {
                log::debug!("[Todos] save not sent: {}", e);
                return;
            }
        };
        let scope = ctx.scope.get_untracked();
        spawn_local(async move {
            let gateway = ctx.gateway();
            let outcome = section::save::<Todo, _>(&gateway, &scope, request).await;
            let applied = state.records().write().apply_write(outcome);
            state.session().write().finish_save(applied);
        });
    });

    let on_delete = Callback::new(move |_: ()| {
        let todo = match state.session().write().begin_delete() {
            Ok(todo) => todo,
            Err(e) => {
                log::debug!("[Todos] delete not sent: {}", e);
                return;
            }
        };
        let scope = ctx.scope.get_untracked();
        spawn_local(async move {
            let gateway = ctx.gateway();
            let outcome = section::remove(&gateway, &BrowserConfirm, &scope, &todo).await;
            let applied = state.records().write().apply_remove(outcome);
            state.session().write().finish_delete(applied);
        });
    });

    view! {
        <section class="list-section todos-section">
            <div class="section-header">
                <h2>"To-dos"</h2>
                <button
                    class="add-btn"
                    on:click=move |_| {
                        state.session().write().open_add();
                    }
                >
                    "Add to-do"
                </button>
            </div>

            <ListControls sort=sort set_sort=set_sort filter=filter set_filter=set_filter />

            <form class="todo-quick-add" on:submit=quick_add>
                <input
                    type="text"
                    placeholder="New to-do"
                    prop:value=move || state.new_label().get()
                    on:input=move |ev| *state.new_label().write() = event_target_value(&ev)
                />
                <button type="submit">"+"</button>
            </form>
            {move || state.notice().get().map(|msg| view! { <p class="section-notice">{msg}</p> })}

            <Show
                when=move || !state.records().read().is_empty()
                fallback=|| view! { <p class="empty-message">"No to-dos"</p> }
            >
                <ul class="todo-list">
                    <For
                        each=move || todos.get()
                        key=|todo| (todo.id, todo.label.clone(), todo.checked, todo.source_label.clone(), todo.created_millis())
                        children=move |todo| view! {
                            <TodoRow
                                todo=todo
                                on_toggle=on_toggle
                                on_view=on_view
                                on_edit=on_edit
                                on_delete=on_delete_row
                            />
                        }
                    />
                </ul>
            </Show>

            <TodoModal state=state on_save=on_save on_delete=on_delete />
        </section>
    }
}
