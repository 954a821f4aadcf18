//! Notes Section Component
//!
//! Notes for the current owner, newest first, with the view/edit/add modal.
//! Reloads whenever the owner changes.

use leptos::prelude::*;
use leptos::task::spawn_local;
use list_sync::{project_notes, section, LoadApplied, ListItem, Note};
use reactive_stores::Store;

use crate::components::NoteModal;
use crate::context::use_app_context;
use crate::dialog::BrowserConfirm;
use crate::store::{created_label, NotesState, NotesStateStoreFields, NotesStore};

#[component]
pub fn NotesSection() -> impl IntoView {
    let ctx = use_app_context();
    let state: NotesStore = Store::new(NotesState::default());

    // Load on mount and on every owner switch
    Effect::new(move |_| {
        let scope = ctx.scope.get();
        let ticket = state.records().write().begin_load(scope);
        state.session().write().close();
        spawn_local(async move {
            let gateway = ctx.gateway();
            let outcome = section::fetch::<Note, _>(&gateway, ticket).await;
            if let LoadApplied::Replaced(count) = state.records().write().finish_load(outcome) {
                log::debug!("[Notes] showing {} notes", count);
            }
        });
    });

    let notes = Memo::new(move |_| project_notes(state.records().read().items()));

    let open_note = move |note: Note| {
        if state.session().read_untracked().is_open() {
            return;
        }
        let scope = ctx.scope.get_untracked();
        spawn_local(async move {
            let gateway = ctx.gateway();
            let outcome = section::open_view(&gateway, &scope, note).await;
            // Dropped if the owner changed or the note went away meanwhile
            let admitted = state.records().read_untracked().admit_view(outcome);
            if let Some(note) = admitted {
                state.session().write().enter_view(note);
            }
        });
    };

    let on_save = Callback::new(move |_: ()| {
        let request = match state.session().write().begin_save() {
            Ok(request) => request,
            Err(e) => {
                log::debug!("[Notes] save not sent: {}", e);
                return;
            }
        };
        let scope = ctx.scope.get_untracked();
        spawn_local(async move {
            let gateway = ctx.gateway();
            let outcome = section::save::<Note, _>(&gateway, &scope, request).await;
            let applied = state.records().write().apply_write(outcome);
            state.session().write().finish_save(applied);
        });
    });

    let on_delete = Callback::new(move |_: ()| {
        let note = match state.session().write().begin_delete() {
            Ok(note) => note,
            Err(e) => {
                log::debug!("[Notes] delete not sent: {}", e);
                return;
            }
        };
        let scope = ctx.scope.get_untracked();
        spawn_local(async move {
            let gateway = ctx.gateway();
            let outcome = section::remove(&gateway, &BrowserConfirm, &scope, &note).await;
            let applied = state.records().write().apply_remove(outcome);
            state.session().write().finish_delete(applied);
        });
    });

    view! {
        <section class="list-section notes-section">
            <div class="section-header">
                <h2>"Notes"</h2>
                <button
                    class="add-btn"
                    on:click=move |_| {
                        state.session().write().open_add();
                    }
                >
                    "Add note"
                </button>
            </div>

            <Show
                when=move || !state.records().read().is_empty()
                fallback=|| view! { <p class="empty-message">"No notes yet."</p> }
            >
                <ul class="note-list">
                    <For
                        each=move || notes.get()
                        key=|note| (note.id, note.title.clone(), note.created_millis())
                        children=move |note| {
                            let created = created_label(note.created_at().map(|t| t.timestamp_millis()));
                            let title = note.title.clone();
                            view! {
                                <li class="note-row" on:click=move |_| open_note(note.clone())>
                                    <span class="note-title">{title}</span>
                                    <span class="note-created">{created}</span>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>

            <NoteModal state=state on_save=on_save on_delete=on_delete />
        </section>
    }
}
