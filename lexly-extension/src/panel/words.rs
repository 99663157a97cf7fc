use chrono::Local;
use dioxus::prelude::*;
use shared_types::SavedWord;

use crate::panel::commands::PanelCommand;
use crate::panel::format::{format_date, list_label};
use crate::panel::state::{DefinitionView, PanelState, WordsStatus};

/// Delay between consecutive card entrance animations
const CARD_STAGGER_MS: usize = 25;

/// Signed-in view: header, statistics, search and the word list.
#[component]
pub fn Dashboard() -> Element {
    let state = use_context::<Signal<PanelState>>();
    let dispatch = use_context::<Callback<PanelCommand>>();

    let (email, stats, query) = {
        let s = state.read();
        let email = s.session().map(|session| session.email.clone()).unwrap_or_default();
        (email, s.stats(&Local::now()), s.query().to_string())
    };

    rsx! {
        div { class: "dashboard",
            header { class: "header",
                div { class: "brand",
                    div { class: "brand-logo", "L" }
                    div {
                        div { class: "brand-name", "Lexly" }
                        div { class: "user-email", "{email}" }
                    }
                }
                button {
                    class: "btn-signout",
                    onclick: move |_| dispatch.call(PanelCommand::SignOut),
                    "Sign out"
                }
            }

            div { class: "stats",
                div { class: "stat",
                    span { class: "stat-value", "{stats.total}" }
                    span { class: "stat-label", "Words saved" }
                }
                div { class: "stat",
                    span { class: "stat-value", "{stats.today}" }
                    span { class: "stat-label", "Added today" }
                }
            }

            input {
                class: "search",
                r#type: "search",
                placeholder: "Search your words…",
                value: "{query}",
                oninput: move |e| dispatch.call(PanelCommand::Search(e.value())),
            }

            div { class: "list-header",
                span { "My Dictionary" }
                span { class: "list-count", {list_label(stats.total)} }
            }

            WordList {}
        }
    }
}

#[component]
fn WordList() -> Element {
    let state = use_context::<Signal<PanelState>>();
    let dispatch = use_context::<Callback<PanelCommand>>();

    let s = state.read();
    match s.status() {
        WordsStatus::Idle | WordsStatus::Loading => {
            return rsx! {
                div { class: "list-status",
                    div { class: "spinner" }
                    "Loading your words…"
                }
            };
        }
        WordsStatus::Failed(message) => {
            let message = message.clone();
            return rsx! {
                div { class: "list-status error",
                    "{message}"
                    button {
                        class: "btn-retry",
                        onclick: move |_| dispatch.call(PanelCommand::LoadWords),
                        "Retry"
                    }
                }
            };
        }
        WordsStatus::Ready => {}
    }

    if s.words().is_empty() {
        return rsx! {
            div { class: "empty",
                div { class: "empty-icon", "📖" }
                div { class: "empty-title", "Your dictionary is empty" }
                div { class: "empty-hint",
                    "Highlight any word on a web page and click "
                    strong { "Save" }
                    " to add it here."
                }
            }
        };
    }

    let visible: Vec<SavedWord> = s.visible_words().into_iter().cloned().collect();
    drop(s);

    if visible.is_empty() {
        return rsx! {
            div { class: "list-status", "No words match your search" }
        };
    }

    rsx! {
        div { class: "word-list",
            for (index, word) in visible.into_iter().enumerate() {
                WordCard { key: "{word.id}", word: word.clone(), index }
            }
        }
    }
}

#[component]
fn WordCard(word: SavedWord, index: usize) -> Element {
    let state = use_context::<Signal<PanelState>>();
    let dispatch = use_context::<Callback<PanelCommand>>();

    let s = state.read();
    let open = s.is_open(&word.id);
    let deleting = s.is_deleting(&word.id);
    let definition = match s.definition_view(&word) {
        DefinitionView::Text(text) => rsx! {
            p { class: "definition", "{text}" }
        },
        DefinitionView::Loading => rsx! {
            div { class: "definition loading",
                div { class: "spinner small" }
                "Asking AI…"
            }
        },
        DefinitionView::Failed(message) => rsx! {
            p { class: "definition error", "{message}" }
        },
        DefinitionView::Empty => rsx! {},
    };
    drop(s);

    let date = format_date(&word.created_at, &Local::now());
    let delay = index * CARD_STAGGER_MS;
    let toggle_id = word.id.clone();
    let delete_id = word.id.clone();

    rsx! {
        div {
            class: if open { "card open" } else { "card" },
            class: if deleting { "deleting" },
            style: "animation-delay: {delay}ms;",
            onclick: move |_| dispatch.call(PanelCommand::ToggleCard(toggle_id.clone())),

            div { class: "card-row",
                div {
                    div { class: "card-word", "{word.word}" }
                    div { class: "card-date", "{date}" }
                }
                div { class: "card-actions",
                    button {
                        class: "btn-delete",
                        title: "Remove word",
                        disabled: deleting,
                        onclick: move |e| {
                            e.stop_propagation();
                            dispatch.call(PanelCommand::DeleteWord(delete_id.clone()));
                        },
                        "✕"
                    }
                    span { class: "chevron", "›" }
                }
            }

            if open {
                div { class: "card-body", {definition} }
            }
        }
    }
}
