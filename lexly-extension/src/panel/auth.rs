use dioxus::prelude::*;

use crate::panel::commands::PanelCommand;
use crate::panel::state::{AuthTab, PanelState};

/// Login / sign-up forms shown while no session exists.
#[component]
pub fn AuthScreen() -> Element {
    let state = use_context::<Signal<PanelState>>();
    let dispatch = use_context::<Callback<PanelCommand>>();

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);

    let form = state.read().auth.clone();
    let tab = form.tab;
    let busy = form.busy;

    let submit = move || {
        let command = match tab {
            AuthTab::Login => PanelCommand::Login {
                email: email(),
                password: password(),
            },
            AuthTab::Signup => PanelCommand::Signup {
                name: name(),
                email: email(),
                password: password(),
            },
        };
        dispatch.call(command);
    };

    rsx! {
        div { class: "auth",
            div { class: "brand",
                div { class: "brand-logo", "L" }
                span { class: "brand-name", "Lexly" }
            }

            h1 { class: "auth-title", {tab.title()} }
            p { class: "auth-subtitle", {tab.subtitle()} }

            div { class: "tabs",
                for candidate in [AuthTab::Login, AuthTab::Signup] {
                    button {
                        key: "{candidate:?}",
                        class: if candidate == tab { "tab active" } else { "tab" },
                        onclick: move |_| dispatch.call(PanelCommand::SwitchTab(candidate)),
                        {candidate.label()}
                    }
                }
            }

            div { class: "form",
                if tab == AuthTab::Signup {
                    input {
                        class: "field",
                        r#type: "text",
                        placeholder: "Your name",
                        autocomplete: "name",
                        value: "{name}",
                        oninput: move |e| name.set(e.value()),
                    }
                }
                input {
                    class: "field",
                    r#type: "email",
                    placeholder: "Email address",
                    autocomplete: "email",
                    value: "{email}",
                    oninput: move |e| email.set(e.value()),
                }
                input {
                    class: "field",
                    r#type: "password",
                    placeholder: if tab == AuthTab::Signup { "Password (min. 8 characters)" } else { "Password" },
                    autocomplete: if tab == AuthTab::Signup { "new-password" } else { "current-password" },
                    value: "{password}",
                    oninput: move |e| password.set(e.value()),
                    onkeydown: move |e: KeyboardEvent| {
                        if e.key() == Key::Enter && !busy {
                            submit();
                        }
                    },
                }

                if let Some(message) = form.message.as_deref() {
                    div { class: "form-error", "{message}" }
                }

                button {
                    class: "btn-primary",
                    disabled: busy,
                    onclick: move |_| submit(),
                    {tab.submit_label(busy)}
                }
            }
        }
    }
}
