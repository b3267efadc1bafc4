use std::path::Path;

use log::info;

use super::identity::{IdentityError, IdentityProvider, StoredIdentity, User};
use super::lock::{DirLock, LockError};
use super::store::{self, JsonFileStore, KeyValueStore, StoreError};
use crate::model::config::AppConfig;
use crate::model::list::TodoList;
use crate::ops::outline::Outline;

/// Store key for the dark-mode flag
pub const DARK_MODE_KEY: &str = "darkMode";
/// Store key for the sidebar-open flag
pub const SIDEBAR_OPEN_KEY: &str = "sidebarOpen";
/// Store key for the full list collection
pub const LISTS_KEY: &str = "todoLists";
/// Store key for the active list id
pub const ACTIVE_LIST_KEY: &str = "activeListId";

/// Error type for session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("not signed in (run `tk login <name>` first)")]
    SignedOut,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Lock(#[from] LockError),
}

/// Chrome preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
    pub sidebar_open: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            dark_mode: false,
            sidebar_open: true,
        }
    }
}

/// Everything that is persisted: the outline and the chrome preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub outline: Outline,
    pub prefs: Preferences,
}

impl AppState {
    /// Read all four slots, each falling back to its own default.
    pub fn load(store: &dyn KeyValueStore, config: &AppConfig) -> Result<Self, StoreError> {
        let defaults = Preferences::default();
        let prefs = Preferences {
            dark_mode: store::load(store, DARK_MODE_KEY, defaults.dark_mode)?,
            sidebar_open: store::load(store, SIDEBAR_OPEN_KEY, defaults.sidebar_open)?,
        };
        let lists: Vec<TodoList> = store::load(store, LISTS_KEY, Vec::new())?;
        let active: Option<String> = store::load(store, ACTIVE_LIST_KEY, None)?;
        let outline =
            Outline::new(lists, active).with_default_name(config.lists.default_name.clone());
        Ok(AppState { outline, prefs })
    }
}

/// The single owner of application state.
///
/// Loads on open, refuses outline operations while nobody is signed in, and
/// writes the list collection and active-list id through to the store after
/// every outline operation.
pub struct Session {
    store: Box<dyn KeyValueStore>,
    identity: Box<dyn IdentityProvider>,
    state: AppState,
}

impl Session {
    pub fn open(
        store: Box<dyn KeyValueStore>,
        identity: Box<dyn IdentityProvider>,
        config: &AppConfig,
    ) -> Result<Self, SessionError> {
        let state = AppState::load(store.as_ref(), config)?;
        info!(
            "event=session_open lists={} signed_in={}",
            state.outline.lists().len(),
            identity.current_user().is_some()
        );
        Ok(Session {
            store,
            identity,
            state,
        })
    }

    /// Open a session backed by JSON files in `data_dir`.
    pub fn open_dir(data_dir: &Path, config: &AppConfig) -> Result<Self, SessionError> {
        let store = JsonFileStore::open(data_dir)?;
        let identity = StoredIdentity::load(store.clone())?;
        Self::open(Box::new(store), Box::new(identity), config)
    }

    /// Take the data-directory write lock, then open a session. The state is
    /// read only once the lock is held.
    pub fn open_dir_locked(
        data_dir: &Path,
        config: &AppConfig,
    ) -> Result<(Self, DirLock), SessionError> {
        let store = JsonFileStore::open(data_dir)?;
        let lock = DirLock::acquire_default(data_dir)?;
        let identity = StoredIdentity::load(store.clone())?;
        let session = Self::open(Box::new(store), Box::new(identity), config)?;
        Ok((session, lock))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn outline(&self) -> &Outline {
        &self.state.outline
    }

    pub fn prefs(&self) -> Preferences {
        self.state.prefs
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    // -----------------------------------------------------------------------
    // Identity
    // -----------------------------------------------------------------------

    pub fn user(&self) -> Option<&User> {
        self.identity.current_user()
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.current_user().is_some()
    }

    pub fn sign_in(&mut self, name: &str) -> Result<User, SessionError> {
        let user = self.identity.sign_in(name)?;
        info!("event=sign_in status=ok");
        Ok(user)
    }

    pub fn sign_out(&mut self) -> Result<(), SessionError> {
        self.identity.sign_out()?;
        info!("event=sign_out status=ok");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Run an outline operation, then write the outline through to the store.
    pub fn apply<R>(&mut self, op: impl FnOnce(&mut Outline) -> R) -> Result<R, SessionError> {
        if !self.is_signed_in() {
            return Err(SessionError::SignedOut);
        }
        let result = op(&mut self.state.outline);
        self.persist_outline()?;
        Ok(result)
    }

    fn persist_outline(&mut self) -> Result<(), SessionError> {
        let outline = &self.state.outline;
        store::save(self.store.as_mut(), LISTS_KEY, outline.lists())?;
        store::save(self.store.as_mut(), ACTIVE_LIST_KEY, &outline.active_list_id())?;
        Ok(())
    }

    /// Flip dark mode and persist it. Returns the new value.
    pub fn toggle_dark_mode(&mut self) -> Result<bool, SessionError> {
        self.state.prefs.dark_mode = !self.state.prefs.dark_mode;
        store::save(
            self.store.as_mut(),
            DARK_MODE_KEY,
            &self.state.prefs.dark_mode,
        )?;
        Ok(self.state.prefs.dark_mode)
    }

    /// Flip sidebar visibility and persist it. Returns the new value.
    pub fn toggle_sidebar(&mut self) -> Result<bool, SessionError> {
        self.state.prefs.sidebar_open = !self.state.prefs.sidebar_open;
        store::save(
            self.store.as_mut(),
            SIDEBAR_OPEN_KEY,
            &self.state.prefs.sidebar_open,
        )?;
        Ok(self.state.prefs.sidebar_open)
    }
}
