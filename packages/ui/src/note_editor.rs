use std::time::Duration;

use dioxus::prelude::*;
use store::{EditorState, NoteSession};

use crate::calculations::use_calculations;
use crate::components::{use_toast, ToastOptions};
use crate::config::ConfigSignal;
use crate::icons::{FaArrowsRotate, FaFloppyDisk};
use crate::timer::sleep;
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Editor for the consultant's note on one calculation.
///
/// The first save creates the note, every later save updates it. Key the
/// component by calculation id so switching calculations starts a fresh
/// session.
#[component]
pub fn NoteEditor(calculation_id: String) -> Element {
    let calculations = use_calculations();
    let toast_api = use_toast();
    let saved_notice_secs = try_use_context::<ConfigSignal>()
        .and_then(|config| config().map(|c| c.editor.saved_notice_secs))
        .unwrap_or(3);

    let mut session = use_signal(|| NoteSession::new(calculation_id.clone()));

    let load = move || {
        spawn(async move {
            let id = {
                let mut s = session.write();
                if !s.begin_load() {
                    return;
                }
                s.calculation_id().to_string()
            };
            let result = calculations.get_note(&id).await;
            if let Err(e) = &result {
                tracing::warn!("Failed to load note for {}: {}", id, e);
            }
            session.write().finish_load(&id, result);
        });
    };

    // Fetch once on mount; the task is dropped with the component.
    use_hook(load);

    let save = move |_| {
        spawn(async move {
            let (request, generation) = {
                let mut s = session.write();
                let Some(request) = s.begin_save() else {
                    return;
                };
                (request, s.save_generation())
            };
            let result = calculations.submit(&request).await;
            match &result {
                Ok(_) => {
                    toast_api.success("Note saved".to_string(), ToastOptions::new());
                }
                Err(e) => {
                    tracing::warn!("Failed to save note: {}", e);
                    toast_api.error(format!("Could not save note: {e}"), ToastOptions::new());
                }
            }
            let saved = result.is_ok();
            session.write().finish_save(result);

            if saved && saved_notice_secs > 0 {
                sleep(Duration::from_secs(u64::from(saved_notice_secs))).await;
                session.write().acknowledge(generation);
            }
        });
    };

    let s = session.read();
    let state = s.state().clone();
    let content = s.content().to_string();
    let input_enabled = s.input_enabled();
    let save_enabled = s.save_enabled();
    let dirty = s.is_dirty();
    drop(s);

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "editor-container",

            div {
                class: "editor-header",
                h2 { class: "view-section-title", "Consultation notes" }
                div {
                    class: "editor-status",
                    match &state {
                        EditorState::Saving => rsx! { span { class: "editor-saving", "Saving..." } },
                        EditorState::Saved => rsx! { span { class: "editor-saved", "Saved" } },
                        EditorState::SaveFailed(e) => rsx! {
                            span { class: "editor-error", "Could not save: {e}" }
                        },
                        _ if dirty => rsx! { span { class: "editor-unsaved", "Unsaved changes" } },
                        _ => rsx! {},
                    }
                }
            }

            match &state {
                EditorState::Idle | EditorState::Loading => rsx! {
                    div { class: "view-loading", "Loading note..." }
                },
                EditorState::LoadFailed(e) => rsx! {
                    div {
                        class: "editor-load-failed",
                        p { class: "editor-error", "Could not load the note: {e}" }
                        button {
                            class: "btn btn-secondary",
                            onclick: move |_| load(),
                            Icon { icon: FaArrowsRotate, width: 12, height: 12 }
                            " Retry"
                        }
                    }
                },
                _ => rsx! {
                    textarea {
                        class: "editor-textarea",
                        value: "{content}",
                        disabled: !input_enabled,
                        placeholder: if state == EditorState::LoadedEmpty { "No notes yet. Start writing..." } else { "" },
                        oninput: move |evt: FormEvent| session.write().edit(evt.value()),
                    }
                    div {
                        class: "editor-actions",
                        button {
                            class: "btn btn-primary",
                            disabled: !save_enabled,
                            onclick: save,
                            Icon { icon: FaFloppyDisk, width: 12, height: 12 }
                            if state == EditorState::Saving { " Saving..." } else { " Save" }
                        }
                    }
                },
            }
        }
    }
}
