//! Session Store - persisted login state
//!
//! Holds the authenticated identity across application restarts. The store
//! is an explicit injected value: screens receive a reference, there is no
//! ambient singleton. A session is all-or-nothing; anything unreadable on
//! disk is purged and treated as logged out.

use serde::{Deserialize, Serialize};
use shared::client::UserInfo;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;

const SESSION_FILE: &str = "session.json";
const REMEMBERED_FILE: &str = "remembered_user";

/// Persisted session: backend token plus the user profile it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserInfo,
}

/// Session lifecycle notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A login completed and the persisted session changed
    LoggedIn,
    /// The session was cleared
    LoggedOut,
}

/// File-backed session store
#[derive(Debug)]
pub struct SessionStore {
    session_path: PathBuf,
    remembered_path: PathBuf,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Create a store rooted at `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        let (events, _) = broadcast::channel(16);
        Self {
            session_path: dir.join(SESSION_FILE),
            remembered_path: dir.join(REMEMBERED_FILE),
            events,
        }
    }

    /// Subscribe to session lifecycle events.
    ///
    /// The navigator watches this to re-`load()` after an external login.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Read the persisted session.
    ///
    /// Any failure to read or parse degrades to "logged out": the corrupt
    /// file is purged and `None` is returned. No error reaches the caller.
    pub fn load(&self) -> Option<Session> {
        if !self.session_path.exists() {
            return None;
        }
        let content = match fs::read_to_string(&self.session_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Unreadable session file, purging: {}", e);
                self.purge();
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Corrupt session file, purging: {}", e);
                self.purge();
                None
            }
        }
    }

    /// Persist a session atomically: a concurrent `load()` sees either the
    /// previous session or the new one, never a partial write.
    pub fn save(&self, session: &Session) -> std::io::Result<()> {
        if let Some(parent) = self.session_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        let tmp = self.session_path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.session_path)?;

        let _ = self.events.send(SessionEvent::LoggedIn);
        Ok(())
    }

    /// Remove the session and every convenience value alongside it
    pub fn clear(&self) {
        self.purge();
        let _ = fs::remove_file(&self.remembered_path);
        let _ = self.events.send(SessionEvent::LoggedOut);
    }

    /// Store the remembered username for the login form
    pub fn remember_username(&self, username: &str) -> std::io::Result<()> {
        if let Some(parent) = self.remembered_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.remembered_path, username)
    }

    /// Read the remembered username, if any
    pub fn remembered_username(&self) -> Option<String> {
        let value = fs::read_to_string(&self.remembered_path).ok()?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn purge(&self) {
        let _ = fs::remove_file(&self.session_path);
    }
}
