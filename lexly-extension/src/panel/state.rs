//! Side panel application state.
//!
//! One [`PanelState`] owns everything the panel knows: the session, the word
//! list, the session-lifetime definition cache and the UI flags derived from
//! them. All mutation goes through the methods below.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use chrono::{DateTime, TimeZone};
use shared_types::{SavedWord, Session};

use crate::panel::format::count_today;

// ============================================================================
// Auth form
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthTab {
    #[default]
    Login,
    Signup,
}

impl AuthTab {
    pub fn label(self) -> &'static str {
        match self {
            AuthTab::Login => "Sign In",
            AuthTab::Signup => "Sign Up",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AuthTab::Login => "Welcome back",
            AuthTab::Signup => "Create your account",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            AuthTab::Login => "Sign in to access your saved words and definitions.",
            AuthTab::Signup => "Start building your personal dictionary today.",
        }
    }

    pub fn submit_label(self, busy: bool) -> &'static str {
        match (self, busy) {
            (AuthTab::Login, false) => "Sign In",
            (AuthTab::Login, true) => "Signing in…",
            (AuthTab::Signup, false) => "Create Account",
            (AuthTab::Signup, true) => "Creating account…",
        }
    }

    /// Shown when the backend rejects the form without a message
    pub fn fallback_error(self) -> &'static str {
        match self {
            AuthTab::Login => "Login failed",
            AuthTab::Signup => "Signup failed",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub tab: AuthTab,
    /// Error for the form on `tab`
    pub message: Option<String>,
    /// A submission is in flight
    pub busy: bool,
}

// ============================================================================
// Word list
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WordsStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// What an open card's definition area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionView<'a> {
    Text(&'a str),
    Loading,
    Failed(&'a str),
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordStats {
    pub total: usize,
    pub today: usize,
}

// ============================================================================
// Panel state
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelState {
    session: Option<Session>,
    pub auth: AuthForm,
    words: Vec<SavedWord>,
    status: WordsStatus,
    /// Definitions fetched this session, by word id
    definitions: HashMap<String, String>,
    definition_errors: HashMap<String, String>,
    fetching: HashSet<String>,
    open_card: Option<String>,
    deleting: HashSet<String>,
    query: String,
}

impl PanelState {
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.token.clone())
    }

    /// True while `token` still identifies the active session
    pub fn is_current(&self, token: &str) -> bool {
        self.session.as_ref().is_some_and(|s| s.token == token)
    }

    pub fn sign_in(&mut self, session: Session) {
        self.clear_words();
        self.session = Some(session);
        self.auth = AuthForm::default();
    }

    pub fn sign_out(&mut self) {
        self.clear_words();
        self.session = None;
        self.auth = AuthForm::default();
    }

    fn clear_words(&mut self) {
        self.words.clear();
        self.status = WordsStatus::Idle;
        self.definitions.clear();
        self.definition_errors.clear();
        self.fetching.clear();
        self.open_card = None;
        self.deleting.clear();
        self.query.clear();
    }

    // ------------------------------------------------------------------------
    // Auth form
    // ------------------------------------------------------------------------

    pub fn switch_tab(&mut self, tab: AuthTab) {
        self.auth.tab = tab;
        self.auth.message = None;
    }

    pub fn set_auth_message(&mut self, message: impl Into<String>) {
        self.auth.message = Some(message.into());
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    pub fn status(&self) -> &WordsStatus {
        &self.status
    }

    pub fn begin_load(&mut self) {
        self.status = WordsStatus::Loading;
    }

    /// Replace the in-memory list with a fresh copy from the backend
    pub fn replace_words(&mut self, words: Vec<SavedWord>) {
        let ids: HashSet<&str> = words.iter().map(|w| w.id.as_str()).collect();
        self.definitions.retain(|id, _| ids.contains(id.as_str()));
        self.definition_errors.retain(|id, _| ids.contains(id.as_str()));
        self.deleting.retain(|id| ids.contains(id.as_str()));
        if self
            .open_card
            .as_deref()
            .is_some_and(|id| !ids.contains(id))
        {
            self.open_card = None;
        }
        self.words = words;
        self.status = WordsStatus::Ready;
    }

    pub fn fail_load(&mut self, message: impl Into<String>) {
        self.status = WordsStatus::Failed(message.into());
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn words(&self) -> &[SavedWord] {
        &self.words
    }

    pub fn word(&self, id: &str) -> Option<&SavedWord> {
        self.words.iter().find(|w| w.id == id)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Words matching the search box, in backend order
    pub fn visible_words(&self) -> Vec<&SavedWord> {
        filter_words(&self.words, &self.query)
    }

    pub fn stats<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> WordStats {
        WordStats {
            total: self.words.len(),
            today: count_today(&self.words, now),
        }
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open_card.as_deref() == Some(id)
    }

    pub fn open_card(&self) -> Option<&str> {
        self.open_card.as_deref()
    }

    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting.contains(id)
    }

    pub fn cached_definition(&self, id: &str) -> Option<&str> {
        self.definitions.get(id).map(String::as_str)
    }

    pub fn definition_view<'a>(&'a self, word: &'a SavedWord) -> DefinitionView<'a> {
        if let Some(text) = self.cached_definition(&word.id) {
            return DefinitionView::Text(text);
        }
        if let Some(text) = word.inline_meaning() {
            return DefinitionView::Text(text);
        }
        if self.fetching.contains(&word.id) {
            return DefinitionView::Loading;
        }
        match self.definition_errors.get(&word.id) {
            Some(message) => DefinitionView::Failed(message),
            None => DefinitionView::Empty,
        }
    }

    // ------------------------------------------------------------------------
    // Cards
    // ------------------------------------------------------------------------

    /// Open `id` (closing any other card) or close it if it is open.
    ///
    /// Returns true when the caller must fetch the definition; the word is
    /// then marked as fetching so a second expand does not fetch again.
    pub fn toggle_card(&mut self, id: &str) -> bool {
        let was_open = self.is_open(id);
        self.open_card = None;
        if was_open {
            return false;
        }

        let Some(word) = self.word(id) else {
            return false;
        };
        let needs_fetch = self.cached_definition(id).is_none()
            && word.inline_meaning().is_none()
            && !self.fetching.contains(id);

        self.open_card = Some(id.to_string());
        if needs_fetch {
            self.fetching.insert(id.to_string());
            self.definition_errors.remove(id);
        }
        needs_fetch
    }

    pub fn finish_definition(&mut self, id: &str, result: Result<String, String>) {
        self.fetching.remove(id);
        if self.word(id).is_none() {
            return;
        }
        match result {
            Ok(meaning) => {
                self.definitions.insert(id.to_string(), meaning);
            }
            Err(message) => {
                self.definition_errors.insert(id.to_string(), message);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Deletion
    // ------------------------------------------------------------------------

    /// Dim the card. False if the word is unknown or already being deleted.
    pub fn begin_delete(&mut self, id: &str) -> bool {
        if self.word(id).is_none() {
            return false;
        }
        self.deleting.insert(id.to_string())
    }

    pub fn finish_delete(&mut self, id: &str) {
        self.deleting.remove(id);
        self.words.retain(|w| w.id != id);
        self.definitions.remove(id);
        self.definition_errors.remove(id);
        self.fetching.remove(id);
        if self.is_open(id) {
            self.open_card = None;
        }
    }

    pub fn cancel_delete(&mut self, id: &str) {
        self.deleting.remove(id);
    }
}

/// Case-insensitive substring match of the trimmed query on word text
pub fn filter_words<'a>(words: &'a [SavedWord], query: &str) -> Vec<&'a SavedWord> {
    let needle = query.trim().to_lowercase();
    words
        .iter()
        .filter(|w| needle.is_empty() || w.word.to_lowercase().contains(&needle))
        .collect()
}

// ============================================================================
// State access
// ============================================================================

/// Shared, interior-mutable access to the panel state.
///
/// The dispatcher only talks to this trait; the panel backs it with a Dioxus
/// signal, tests with `Rc<RefCell<_>>`.
pub trait StateHandle: Clone + 'static {
    fn update<R>(&self, f: impl FnOnce(&mut PanelState) -> R) -> R;
}

impl StateHandle for Rc<RefCell<PanelState>> {
    fn update<R>(&self, f: impl FnOnce(&mut PanelState) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn word(id: &str, text: &str, meaning: Option<&str>) -> SavedWord {
        SavedWord {
            id: id.to_string(),
            word: text.to_string(),
            meaning: meaning.map(str::to_string),
            created_at: "2024-03-05T10:00:00Z".to_string(),
        }
    }

    fn signed_in(words: Vec<SavedWord>) -> PanelState {
        let mut state = PanelState::default();
        state.sign_in(Session::new("tok", "a@b.c", ""));
        state.replace_words(words);
        state
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut state = signed_in(vec![word("1", "ubiquitous", None), word("2", "cat", None)]);

        state.set_query("UBI ");
        let visible: Vec<_> = state.visible_words().iter().map(|w| w.word.as_str()).collect();
        assert_eq!(visible, vec!["ubiquitous"]);

        state.set_query("  ");
        assert_eq!(state.visible_words().len(), 2);

        state.set_query("dog");
        assert!(state.visible_words().is_empty());
    }

    #[test]
    fn opening_a_card_closes_the_other() {
        let mut state = signed_in(vec![word("a", "alpha", Some("first")), word("b", "beta", Some("second"))]);

        assert!(!state.toggle_card("a"));
        assert!(state.is_open("a"));

        assert!(!state.toggle_card("b"));
        assert!(state.is_open("b"));
        assert!(!state.is_open("a"));

        assert!(!state.toggle_card("b"));
        assert_eq!(state.open_card(), None);
    }

    #[test]
    fn definition_is_fetched_once_then_cached() {
        let mut state = signed_in(vec![word("a", "alpha", None)]);

        assert!(state.toggle_card("a"));
        assert_eq!(
            state.definition_view(state.word("a").unwrap()),
            DefinitionView::Loading
        );

        // collapse and re-open while the request is still in flight
        state.toggle_card("a");
        assert!(!state.toggle_card("a"));

        state.finish_definition("a", Ok("The first letter.".to_string()));
        state.toggle_card("a");
        assert!(!state.toggle_card("a"));
        assert_eq!(
            state.definition_view(state.word("a").unwrap()),
            DefinitionView::Text("The first letter.")
        );
    }

    #[test]
    fn failed_definition_is_retried() {
        let mut state = signed_in(vec![word("a", "alpha", None)]);
        assert!(state.toggle_card("a"));
        state.finish_definition("a", Err("Could not fetch definition.".to_string()));
        assert_eq!(
            state.definition_view(state.word("a").unwrap()),
            DefinitionView::Failed("Could not fetch definition.")
        );

        state.toggle_card("a");
        assert!(state.toggle_card("a"));
        assert_eq!(
            state.definition_view(state.word("a").unwrap()),
            DefinitionView::Loading
        );
    }

    #[test]
    fn inline_meaning_needs_no_fetch() {
        let mut state = signed_in(vec![word("a", "alpha", Some("Already here."))]);
        assert!(!state.toggle_card("a"));
        assert_eq!(
            state.definition_view(state.word("a").unwrap()),
            DefinitionView::Text("Already here.")
        );
    }

    #[test]
    fn definition_view_borrows_from_a_detached_word() {
        let state = signed_in(vec![word("a", "alpha", None)]);
        let rendered = word("b", "beta", Some("Second letter."));
        let view = state.definition_view(&rendered);
        assert_eq!(view, DefinitionView::Text("Second letter."));
    }

    #[test]
    fn delete_removes_word_cache_and_open_state() {
        let mut state = signed_in(vec![word("a", "alpha", None), word("b", "beta", None)]);
        state.toggle_card("a");
        state.finish_definition("a", Ok("def".to_string()));

        assert!(state.begin_delete("a"));
        assert!(!state.begin_delete("a"));
        assert!(state.is_deleting("a"));

        state.finish_delete("a");
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        assert_eq!(state.stats(&now), WordStats { total: 1, today: 1 });
        assert_eq!(state.cached_definition("a"), None);
        assert_eq!(state.open_card(), None);
        assert!(!state.is_deleting("a"));
    }

    #[test]
    fn cancelled_delete_keeps_word() {
        let mut state = signed_in(vec![word("a", "alpha", None)]);
        state.begin_delete("a");
        state.cancel_delete("a");
        assert!(!state.is_deleting("a"));
        assert_eq!(state.words().len(), 1);
    }

    #[test]
    fn sign_out_forgets_everything() {
        let mut state = signed_in(vec![word("a", "alpha", None)]);
        state.toggle_card("a");
        state.finish_definition("a", Ok("def".to_string()));
        state.set_query("al");
        state.switch_tab(AuthTab::Signup);

        state.sign_out();

        assert_eq!(state, PanelState::default());
        assert!(!state.is_current("tok"));
    }

    #[test]
    fn switching_tabs_clears_message() {
        let mut state = PanelState::default();
        state.set_auth_message("Login failed");
        state.switch_tab(AuthTab::Signup);
        assert_eq!(state.auth.message, None);
        assert_eq!(state.auth.tab.title(), "Create your account");
    }

    #[test]
    fn reload_drops_cache_for_vanished_words() {
        let mut state = signed_in(vec![word("a", "alpha", None), word("b", "beta", None)]);
        state.toggle_card("a");
        state.finish_definition("a", Ok("def".to_string()));

        state.replace_words(vec![word("b", "beta", None)]);

        assert_eq!(state.cached_definition("a"), None);
        assert_eq!(state.open_card(), None);
        assert_eq!(state.status(), &WordsStatus::Ready);
    }
}
