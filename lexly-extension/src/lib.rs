pub mod api;
pub mod background;
pub mod bubble;
pub mod chrome;
pub mod config;
pub mod content;
pub mod error;
pub mod panel;
pub mod selection;
pub mod storage;
pub mod timer;

pub use api::{HttpApi, LexlyApi, SaveOutcome};
pub use background::start_background;
pub use config::{api_base, config, ExtensionConfig};
pub use content::start_content_script;
pub use error::{ApiError, StorageError, ValidationError};
pub use panel::DictionaryPanel;
pub use storage::{HostSessionStore, SessionStore};
