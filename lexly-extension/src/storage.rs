//! Session persistence.
//!
//! Inside the extension the session lives in `chrome.storage.local`, which
//! the content script and the side panel share. When the panel is served as a
//! plain page during development there is no `chrome` global, so the page's
//! `localStorage` stands in.

use async_trait::async_trait;
use shared_types::{
    Session, SESSION_STORAGE_KEYS, STORAGE_KEY_EMAIL, STORAGE_KEY_NAME, STORAGE_KEY_TOKEN,
};

use crate::chrome;
use crate::error::{js_error_text, StorageError};

/// Durable key-value home of the single active session.
#[async_trait(?Send)]
pub trait SessionStore {
    /// The stored session, or `None` when no token is stored
    async fn load(&self) -> Result<Option<Session>, StorageError>;

    async fn save(&self, session: &Session) -> Result<(), StorageError>;

    async fn clear(&self) -> Result<(), StorageError>;

    async fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.load().await?.map(|session| session.token))
    }
}

/// Assemble a session from raw stored values
pub fn session_from_values(
    token: Option<String>,
    email: Option<String>,
    name: Option<String>,
) -> Option<Session> {
    let token = token.filter(|t| !t.is_empty())?;
    Some(Session::new(
        token,
        email.unwrap_or_default(),
        name.unwrap_or_default(),
    ))
}

/// `chrome.storage.local`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChromeSessionStore;

#[async_trait(?Send)]
impl SessionStore for ChromeSessionStore {
    async fn load(&self) -> Result<Option<Session>, StorageError> {
        let mut values = chrome::storage_get(&SESSION_STORAGE_KEYS)
            .await
            .map_err(|e| StorageError::Js(js_error_text(&e)))?
            .into_iter();

        let token = values.next().flatten();
        let email = values.next().flatten();
        let name = values.next().flatten();
        Ok(session_from_values(token, email, name))
    }

    async fn save(&self, session: &Session) -> Result<(), StorageError> {
        chrome::storage_set(&[
            (STORAGE_KEY_TOKEN, session.token.as_str()),
            (STORAGE_KEY_EMAIL, session.email.as_str()),
            (STORAGE_KEY_NAME, session.name.as_str()),
        ])
        .await
        .map_err(|e| StorageError::Js(js_error_text(&e)))
    }

    async fn clear(&self) -> Result<(), StorageError> {
        chrome::storage_remove(&SESSION_STORAGE_KEYS)
            .await
            .map_err(|e| StorageError::Js(js_error_text(&e)))
    }
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalSessionStore;

impl LocalSessionStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

#[async_trait(?Send)]
impl SessionStore for LocalSessionStore {
    async fn load(&self) -> Result<Option<Session>, StorageError> {
        let storage = Self::storage()?;
        let read = |key: &str| storage.get_item(key).ok().flatten();
        Ok(session_from_values(
            read(STORAGE_KEY_TOKEN),
            read(STORAGE_KEY_EMAIL),
            read(STORAGE_KEY_NAME),
        ))
    }

    async fn save(&self, session: &Session) -> Result<(), StorageError> {
        let storage = Self::storage()?;
        for (key, value) in [
            (STORAGE_KEY_TOKEN, &session.token),
            (STORAGE_KEY_EMAIL, &session.email),
            (STORAGE_KEY_NAME, &session.name),
        ] {
            storage
                .set_item(key, value)
                .map_err(|e| StorageError::Js(js_error_text(&e)))?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let storage = Self::storage()?;
        for key in SESSION_STORAGE_KEYS {
            storage
                .remove_item(key)
                .map_err(|e| StorageError::Js(js_error_text(&e)))?;
        }
        Ok(())
    }
}

/// Whichever store the current host provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSessionStore {
    Chrome(ChromeSessionStore),
    Local(LocalSessionStore),
}

impl HostSessionStore {
    pub fn detect() -> Self {
        if chrome::has_api(&["storage", "local"]) {
            HostSessionStore::Chrome(ChromeSessionStore)
        } else {
            log::warn!("chrome.storage unavailable, keeping the session in localStorage");
            HostSessionStore::Local(LocalSessionStore)
        }
    }
}

#[async_trait(?Send)]
impl SessionStore for HostSessionStore {
    async fn load(&self) -> Result<Option<Session>, StorageError> {
        match self {
            HostSessionStore::Chrome(store) => store.load().await,
            HostSessionStore::Local(store) => store.load().await,
        }
    }

    async fn save(&self, session: &Session) -> Result<(), StorageError> {
        match self {
            HostSessionStore::Chrome(store) => store.save(session).await,
            HostSessionStore::Local(store) => store.save(session).await,
        }
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match self {
            HostSessionStore::Chrome(store) => store.clear().await,
            HostSessionStore::Local(store) => store.clear().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_required_for_a_session() {
        assert_eq!(session_from_values(None, Some("a@b.c".into()), None), None);
        assert_eq!(session_from_values(Some(String::new()), None, None), None);

        let session = session_from_values(Some("tok".into()), None, Some("Ada".into())).unwrap();
        assert_eq!(session, Session::new("tok", "", "Ada"));
    }
}
