// 🔐 Session Provider
// Injected capability for the signed-in user's session, with an explicit
// lifecycle: restore at startup, save on login, clear on logout.
//
// The actual user lookup (registration code → user row in the hosted table)
// is an external collaborator; callers resolve a UserSession themselves and
// hand it to `login`. This module only owns where the session lives between
// launches.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

// ============================================================================
// USER SESSION
// ============================================================================

/// The signed-in user's profile as resolved by the external directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    /// Stable identity from the backing store
    pub id: String,

    /// Registration code the user signs in with
    pub registration: String,

    /// Display name
    pub name: String,

    /// Optional contact email
    pub email: Option<String>,

    /// Contact phone
    pub phone: String,

    /// Account balance snapshot taken at login
    pub balance: f64,

    /// Plan tier (e.g., "free", "premium")
    pub plan_type: String,

    /// Subscription state (e.g., "active", "inactive")
    pub subscription_status: String,
}

// ============================================================================
// SESSION STORE
// ============================================================================

/// Where a session is persisted between launches.
///
/// Implementations must be safe to share across threads; the manager takes
/// the store as an injected capability, never a module-level singleton.
pub trait SessionStore: Send + Sync {
    /// Load the saved session, if any.
    fn load(&self) -> Result<Option<UserSession>>;

    /// Persist the session.
    fn save(&self, session: &UserSession) -> Result<()>;

    /// Remove any saved session.
    fn clear(&self) -> Result<()>;
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// In-process store for tests and embedded use.
#[derive(Default)]
pub struct MemorySessionStore {
    slot: RwLock<Option<UserSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<UserSession>> {
        Ok(self.slot.read().expect("session slot poisoned").clone())
    }

    fn save(&self, session: &UserSession) -> Result<()> {
        *self.slot.write().expect("session slot poisoned") = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.write().expect("session slot poisoned") = None;
        Ok(())
    }
}

// ============================================================================
// JSON FILE STORE
// ============================================================================

/// One JSON document at a caller-chosen path.
pub struct JsonFileSessionStore {
    path: PathBuf,
}

impl JsonFileSessionStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonFileSessionStore {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SessionStore for JsonFileSessionStore {
    fn load(&self) -> Result<Option<UserSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file: {:?}", self.path))?;
        let session: UserSession = serde_json::from_str(&content)
            .context("Failed to parse session JSON")?;
        Ok(Some(session))
    }

    fn save(&self, session: &UserSession) -> Result<()> {
        let content = serde_json::to_string_pretty(session)
            .context("Failed to serialize session")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session file: {:?}", self.path))?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove session file: {:?}", self.path))?;
        }
        Ok(())
    }
}

// ============================================================================
// SESSION MANAGER
// ============================================================================

/// Owns the session lifecycle over an injected store.
pub struct SessionManager {
    store: Box<dyn SessionStore>,
    current: Option<UserSession>,
}

impl SessionManager {
    /// Restore any saved session at startup.
    pub fn init(store: Box<dyn SessionStore>) -> Result<Self> {
        let current = store.load()?;
        match &current {
            Some(session) => info!(user = %session.registration, "restored saved session"),
            None => debug!("no saved session found"),
        }
        Ok(SessionManager { store, current })
    }

    /// The signed-in user, if any.
    pub fn current(&self) -> Option<&UserSession> {
        self.current.as_ref()
    }

    /// Persist a freshly resolved session (the lookup itself is external).
    pub fn login(&mut self, session: UserSession) -> Result<()> {
        self.store.save(&session)?;
        info!(user = %session.registration, "session saved");
        self.current = Some(session);
        Ok(())
    }

    /// Drop the current session and remove it from the store.
    pub fn logout(&mut self) -> Result<()> {
        self.store.clear()?;
        if let Some(session) = self.current.take() {
            info!(user = %session.registration, "session cleared");
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
