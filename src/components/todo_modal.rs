//! To-do Modal Component

use leptos::prelude::*;
use list_sync::ListItem;

use crate::store::{created_label, ModalKind, TodosStateStoreFields, TodosStore};

/// View, edit or add a to-do. The draft title is the label.
#[component]
pub fn TodoModal(
    state: TodosStore,
    #[prop(into)] on_save: Callback<()>,
    #[prop(into)] on_delete: Callback<()>,
) -> impl IntoView {
    let kind = Memo::new(move |_| ModalKind::of(state.session().read().mode()));
    let busy = move || state.session().read().is_busy();
    let close = move |_: web_sys::MouseEvent| state.session().write().close();

    let messages = move || {
        state
            .session()
            .read()
            .messages()
            .iter()
            .map(|msg| view! { <p class="modal-message">{msg.clone()}</p> })
            .collect_view()
    };

    let viewing = move || {
        let todo = state.session().read_untracked().target().cloned();
        todo.map(|todo| {
            let created = created_label(todo.created_at().map(|t| t.timestamp_millis()));
            let status = if todo.checked { "Completed" } else { "Not completed" };
            view! {
                <div class="modal-header">
                    <h2 class="modal-title">{todo.label.clone()}</h2>
                    <span class="todo-created">{created}</span>
                </div>
                <p class="todo-status">{status}</p>
                {todo.source_label.clone().map(|label| view! { <p class="todo-source">{label}</p> })}
                {messages}
                <div class="modal-actions">
                    <button class="close-btn" on:click=close>"Close"</button>
                    <button
                        class="edit-btn"
                        on:click=move |_| {
                            state.session().write().edit();
                        }
                    >
                        "Edit"
                    </button>
                    <button class="delete-btn" disabled=busy on:click=move |_| on_delete.run(())>
                        "Delete"
                    </button>
                </div>
            }
        })
    };

    let form = move |heading: &'static str| {
        view! {
            <div class="modal-header">
                <h2 class="modal-title">{heading}</h2>
            </div>
            <form
                class="todo-form"
                on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    on_save.run(());
                }
            >
                <input
                    type="text"
                    class="todo-label-input"
                    placeholder="Label"
                    prop:value=move || state.session().read().draft().map(|d| d.title.clone()).unwrap_or_default()
                    on:input=move |ev| state.session().write().set_title(event_target_value(&ev))
                />
                {messages}
                <div class="modal-actions">
                    <button type="button" class="close-btn" on:click=close>"Cancel"</button>
                    <button type="submit" class="save-btn" disabled=busy>"Save"</button>
                </div>
            </form>
        }
    };

    view! {
        <Show when=move || kind.get() != ModalKind::Closed>
            <div class="modal-backdrop">
                <div class="modal todo-modal">
                    {move || match kind.get() {
                        ModalKind::Viewing => viewing().into_any(),
                        ModalKind::Editing => form("Edit to-do").into_any(),
                        ModalKind::Adding => form("Add to-do").into_any(),
                        ModalKind::Closed => ().into_any(),
                    }}
                </div>
            </div>
        </Show>
    }
}
