//! To-do Row Component

use leptos::prelude::*;
use list_sync::{ListItem, Todo};

use crate::components::DeleteConfirmButton;
use crate::store::created_label;

/// One to-do: checkbox, label, where it came from, and row actions.
#[component]
pub fn TodoRow(
    todo: Todo,
    #[prop(into)] on_toggle: Callback<Todo>,
    #[prop(into)] on_view: Callback<Todo>,
    #[prop(into)] on_edit: Callback<Todo>,
    #[prop(into)] on_delete: Callback<Todo>,
) -> impl IntoView {
    let created = created_label(todo.created_at().map(|t| t.timestamp_millis()));
    let row_class = if todo.checked { "todo-row done" } else { "todo-row" };
    let source = todo.source_label.clone();

    let toggled = todo.clone();
    let viewed = todo.clone();
    let deleted = todo.clone();

    view! {
        <li class=row_class>
            <input
                type="checkbox"
                class="todo-check"
                prop:checked=todo.checked
                on:change=move |_| on_toggle.run(toggled.clone())
            />
            <span class="todo-label" on:click=move |_| on_view.run(viewed.clone())>
                {todo.label.clone()}
            </span>
            {source.map(|label| view! { <span class="todo-source">{label}</span> })}
            <span class="todo-created">{created}</span>
            <button class="todo-edit-btn" title="Edit" on:click=move |_| on_edit.run(todo.clone())>"✎"</button>
            <DeleteConfirmButton
                button_class="todo-delete-btn"
                on_confirm=move |_| on_delete.run(deleted.clone())
            />
        </li>
    }
}
