//! Note Modal Component
//!
//! View, edit and add a note. Edit and add share one form: title input,
//! Markdown body with an optional rendered preview, and any messages from
//! the last failed step.

use leptos::prelude::*;
use list_sync::{Draft, ListItem};

use crate::markdown::render_markdown;
use crate::store::{created_label, ModalKind, NotesStateStoreFields, NotesStore};

#[component]
pub fn NoteModal(
    state: NotesStore,
    #[prop(into)] on_save: Callback<()>,
    #[prop(into)] on_delete: Callback<()>,
) -> impl IntoView {
    // Layout only changes with the mode, so form inputs survive typing.
    let kind = Memo::new(move |_| ModalKind::of(state.session().read().mode()));
    let busy = move || state.session().read().is_busy();
    let close = move |_: web_sys::MouseEvent| state.session().write().close();

    let draft_field = move |pick: fn(&Draft) -> String| {
        move || state.session().read().draft().map(pick).unwrap_or_default()
    };

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
        let note = state.session().read_untracked().target().cloned();
        note.map(|note| {
            let created = created_label(note.created_at().map(|t| t.timestamp_millis()));
            view! {
                <div class="modal-header">
                    <h2 class="modal-title">{note.title.clone()}</h2>
                    <span class="note-created">{created}</span>
                </div>
                <div class="note-body markdown" inner_html=render_markdown(&note.body)></div>
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
        let preview_enabled = move || state.session().read().draft().is_some_and(|d| d.preview_enabled);
        let rendered = move || {
            state
                .session()
                .read()
                .draft()
                .map(|d| render_markdown(&d.body))
                .unwrap_or_default()
        };

        view! {
            <div class="modal-header">
                <h2 class="modal-title">{heading}</h2>
            </div>
            <form
                class="note-form"
                on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    on_save.run(());
                }
            >
                <input
                    type="text"
                    class="note-title-input"
                    placeholder="Title"
                    prop:value=draft_field(|d| d.title.clone())
                    on:input=move |ev| state.session().write().set_title(event_target_value(&ev))
                />
                <textarea
                    class="note-body-input"
                    placeholder="Write in Markdown..."
                    prop:value=draft_field(|d| d.body.clone())
                    on:input=move |ev| state.session().write().set_body(event_target_value(&ev))
                ></textarea>
                <label class="preview-toggle">
                    <input
                        type="checkbox"
                        prop:checked=preview_enabled
                        on:change=move |_| state.session().write().toggle_preview()
                    />
                    " Preview"
                </label>
                <Show when=preview_enabled>
                    <div class="note-preview markdown" inner_html=rendered></div>
                </Show>
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
                <div class="modal note-modal">
                    {move || match kind.get() {
                        ModalKind::Viewing => viewing().into_any(),
                        ModalKind::Editing => form("Edit note").into_any(),
                        ModalKind::Adding => form("Add note").into_any(),
                        ModalKind::Closed => ().into_any(),
                    }}
                </div>
            </div>
        </Show>
    }
}
