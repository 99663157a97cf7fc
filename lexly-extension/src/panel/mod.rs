//! Side panel: auth forms and the saved-word dictionary.

pub mod auth;
pub mod commands;
pub mod format;
pub mod state;
pub mod styles;
pub mod words;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::api::HttpApi;
use crate::storage::HostSessionStore;

pub use commands::{Dispatcher, PanelCommand};
pub use state::{AuthTab, PanelState, StateHandle};

use auth::AuthScreen;
use styles::PANEL_STYLES;
use words::Dashboard;

pub type PanelDispatcher = Dispatcher<Signal<PanelState>, HttpApi, HostSessionStore>;

impl StateHandle for Signal<PanelState> {
    fn update<R>(&self, f: impl FnOnce(&mut PanelState) -> R) -> R {
        let mut signal = *self;
        let mut state = signal.write();
        f(&mut state)
    }
}

/// Root of the side panel.
///
/// Provides `Signal<PanelState>` and a `Callback<PanelCommand>` as context;
/// children read the former and send commands through the latter.
#[component]
pub fn DictionaryPanel() -> Element {
    let state = use_context_provider(|| Signal::new(PanelState::default()));
    let dispatcher = use_hook(|| {
        PanelDispatcher::new(state, HttpApi::default(), HostSessionStore::detect())
    });
    let mut restored = use_signal(|| false);

    let sender = dispatcher.clone();
    let dispatch = use_callback(move |command: PanelCommand| {
        let dispatcher = sender.clone();
        // Commands outlive the component that sent them (login unmounts the form).
        spawn_forever(async move {
            dispatcher.dispatch(command).await;
        });
    });
    use_context_provider(|| dispatch);

    use_effect(move || {
        let dispatcher = dispatcher.clone();
        spawn(async move {
            dispatcher.dispatch(PanelCommand::Restore).await;
            restored.set(true);
        });
    });

    let signed_in = state.read().session().is_some();

    rsx! {
        style { {PANEL_STYLES} }
        div { class: "lexly-panel",
            if signed_in {
                Dashboard {}
            } else if restored() {
                AuthScreen {}
            }
        }
    }
}
