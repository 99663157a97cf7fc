//! Panel commands and the dispatcher that runs them.
//!
//! Every user interaction in the side panel becomes a [`PanelCommand`]. The
//! [`Dispatcher`] applies it to the [`PanelState`](super::state::PanelState),
//! performing backend and storage calls in between. State is never borrowed
//! across an await; after each await the dispatcher re-checks that the session
//! that started the work is still the active one.

use std::rc::Rc;

use dioxus_logger::tracing::{debug, info, warn};
use shared_types::{LoginRequest, Session, SignupRequest};

use crate::api::LexlyApi;
use crate::error::{ApiError, ValidationError};
use crate::panel::state::{AuthTab, StateHandle};
use crate::storage::SessionStore;

pub const MIN_PASSWORD_CHARS: usize = 8;

pub const LOAD_FAILED: &str = "Could not load words. Try again.";
pub const LOAD_OFFLINE: &str = "Cannot reach server.";
pub const AUTH_OFFLINE: &str = "Cannot reach Lexly server";
pub const DEFINITION_FAILED: &str = "Could not fetch definition.";
pub const DEFINITION_OFFLINE: &str = "Error fetching definition.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    /// Restore a persisted session when the panel opens
    Restore,
    SwitchTab(AuthTab),
    Login {
        email: String,
        password: String,
    },
    Signup {
        name: String,
        email: String,
        password: String,
    },
    SignOut,
    LoadWords,
    ToggleCard(String),
    DeleteWord(String),
    Search(String),
}

// ============================================================================
// Validation
// ============================================================================

pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, ValidationError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

pub fn validate_signup(
    name: &str,
    email: &str,
    password: &str,
) -> Result<SignupRequest, ValidationError> {
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_CHARS,
        });
    }
    Ok(SignupRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Form message for a failed login or sign-up
fn auth_error_message(tab: AuthTab, error: &ApiError) -> String {
    if error.is_network() {
        return AUTH_OFFLINE.to_string();
    }
    error
        .backend_message()
        .unwrap_or(tab.fallback_error())
        .to_string()
}

// ============================================================================
// Dispatcher
// ============================================================================

pub struct Dispatcher<H, A, S> {
    state: H,
    api: Rc<A>,
    store: Rc<S>,
}

impl<H: Clone, A, S> Clone for Dispatcher<H, A, S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            api: Rc::clone(&self.api),
            store: Rc::clone(&self.store),
        }
    }
}

impl<H, A, S> Dispatcher<H, A, S>
where
    H: StateHandle,
    A: LexlyApi + 'static,
    S: SessionStore + 'static,
{
    pub fn new(state: H, api: A, store: S) -> Self {
        Self {
            state,
            api: Rc::new(api),
            store: Rc::new(store),
        }
    }

    pub fn state(&self) -> &H {
        &self.state
    }

    pub async fn dispatch(&self, command: PanelCommand) {
        match command {
            PanelCommand::Restore => self.restore().await,
            PanelCommand::SwitchTab(tab) => self.state.update(|s| s.switch_tab(tab)),
            PanelCommand::Login { email, password } => self.login(&email, &password).await,
            PanelCommand::Signup {
                name,
                email,
                password,
            } => self.signup(&name, &email, &password).await,
            PanelCommand::SignOut => self.sign_out().await,
            PanelCommand::LoadWords => self.load_words().await,
            PanelCommand::ToggleCard(id) => self.toggle_card(&id).await,
            PanelCommand::DeleteWord(id) => self.delete_word(&id).await,
            PanelCommand::Search(query) => self.state.update(|s| s.set_query(query)),
        }
    }

    async fn restore(&self) {
        match self.store.load().await {
            Ok(Some(session)) => {
                info!("Restored session for {}", session.email);
                self.state.update(|s| s.sign_in(session));
                self.load_words().await;
            }
            Ok(None) => debug!("No stored session"),
            Err(e) => warn!("Failed to read stored session: {e}"),
        }
    }

    async fn login(&self, email: &str, password: &str) {
        let request = match validate_login(email, password) {
            Ok(request) => request,
            Err(e) => return self.state.update(|s| s.set_auth_message(e.to_string())),
        };
        if !self.begin_submit() {
            return;
        }

        let result = self.api.login(&request).await;
        let session = result.map(|response| {
            let name = response.user_name().unwrap_or_default().to_string();
            Session::new(response.token, request.email, name)
        });
        self.finish_submit(AuthTab::Login, session).await;
    }

    async fn signup(&self, name: &str, email: &str, password: &str) {
        let request = match validate_signup(name, email, password) {
            Ok(request) => request,
            Err(e) => return self.state.update(|s| s.set_auth_message(e.to_string())),
        };
        if !self.begin_submit() {
            return;
        }

        let result = self.api.signup(&request).await;
        let session = result.map(|response| {
            Session::new(response.token, request.email, request.name)
        });
        self.finish_submit(AuthTab::Signup, session).await;
    }

    /// Mark the form busy. False when a submission is already in flight.
    fn begin_submit(&self) -> bool {
        self.state.update(|s| {
            if s.auth.busy {
                return false;
            }
            s.auth.busy = true;
            s.auth.message = None;
            true
        })
    }

    async fn finish_submit(&self, tab: AuthTab, result: Result<Session, ApiError>) {
        let session = match result {
            Ok(session) => session,
            Err(e) => {
                warn!("Authentication failed: {e}");
                let message = auth_error_message(tab, &e);
                self.state.update(|s| {
                    s.auth.busy = false;
                    s.set_auth_message(message);
                });
                return;
            }
        };

        if let Err(e) = self.store.save(&session).await {
            warn!("Failed to persist session: {e}");
        }
        info!("Signed in as {}", session.email);
        self.state.update(|s| s.sign_in(session));
        self.load_words().await;
    }

    async fn sign_out(&self) {
        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear stored session: {e}");
        }
        self.state.update(|s| s.sign_out());
    }

    async fn load_words(&self) {
        let Some(token) = self.state.update(|s| {
            let token = s.token()?;
            s.begin_load();
            Some(token)
        }) else {
            return;
        };

        let result = self.api.list_words(&token).await;

        self.state.update(|s| {
            if !s.is_current(&token) {
                debug!("Discarding word list for a stale session");
                return;
            }
            match result {
                Ok(words) => {
                    debug!("Loaded {} words", words.len());
                    s.replace_words(words);
                }
                Err(e) => {
                    warn!("Failed to load words: {e}");
                    s.fail_load(if e.is_network() { LOAD_OFFLINE } else { LOAD_FAILED });
                }
            }
        });
    }

    async fn toggle_card(&self, id: &str) {
        let Some(token) = self.state.update(|s| {
            let token = s.token()?;
            s.toggle_card(id).then_some(token)
        }) else {
            return;
        };

        let result = self.api.fetch_meaning(&token, id).await;

        self.state.update(|s| {
            if !s.is_current(&token) {
                debug!("Discarding definition for a stale session");
                return;
            }
            let result = result.map_err(|e| {
                warn!("Failed to fetch definition: {e}");
                if e.is_network() {
                    DEFINITION_OFFLINE.to_string()
                } else {
                    DEFINITION_FAILED.to_string()
                }
            });
            s.finish_definition(id, result);
        });
    }

    async fn delete_word(&self, id: &str) {
        let Some(token) = self.state.update(|s| {
            let token = s.token()?;
            s.begin_delete(id).then_some(token)
        }) else {
            return;
        };

        let result = self.api.delete_word(&token, id).await;

        self.state.update(|s| {
            if !s.is_current(&token) {
                return;
            }
            match result {
                Ok(()) => s.finish_delete(id),
                Err(e) => {
                    warn!("Failed to delete word {id}: {e}");
                    s.cancel_delete(id);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        assert_eq!(
            validate_login("  ", "secret").unwrap_err(),
            ValidationError::MissingFields
        );
        assert_eq!(
            validate_login("a@b.c", "").unwrap_err(),
            ValidationError::MissingFields
        );
        assert_eq!(validate_login(" a@b.c ", "x").unwrap().email, "a@b.c");
    }

    #[test]
    fn signup_checks_password_length_after_presence() {
        assert_eq!(
            validate_signup("", "a@b.c", "short").unwrap_err(),
            ValidationError::MissingFields
        );
        assert_eq!(
            validate_signup("Ana", "a@b.c", "1234567").unwrap_err(),
            ValidationError::PasswordTooShort { min: 8 }
        );
        let request = validate_signup(" Ana ", "a@b.c", "12345678").unwrap();
        assert_eq!(request.name, "Ana");
    }

    #[test]
    fn auth_errors_prefer_backend_message() {
        let rejected = ApiError::Status {
            status: 401,
            message: Some("Invalid credentials".to_string()),
        };
        assert_eq!(
            auth_error_message(AuthTab::Login, &rejected),
            "Invalid credentials"
        );

        let bare = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(auth_error_message(AuthTab::Signup, &bare), "Signup failed");

        let offline = ApiError::Network("failed to fetch".to_string());
        assert_eq!(
            auth_error_message(AuthTab::Login, &offline),
            "Cannot reach Lexly server"
        );
    }
}
