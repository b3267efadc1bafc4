use serde::{Deserialize, Serialize};

use super::store::{self, KeyValueStore, StoreError};

/// Store key holding the signed-in user
pub const USER_KEY: &str = "user";

/// The signed-in user, as shown in the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

/// Error type for identity operations
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("user name cannot be empty")]
    EmptyName,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Supplies the signed-in user. Everything outside this trait only asks
/// "who, if anyone, is signed in".
pub trait IdentityProvider {
    fn current_user(&self) -> Option<&User>;
    fn sign_in(&mut self, name: &str) -> Result<User, IdentityError>;
    fn sign_out(&mut self) -> Result<(), IdentityError>;
}

/// Identity persisted in a key-value store under [`USER_KEY`].
pub struct StoredIdentity<S: KeyValueStore> {
    store: S,
    user: Option<User>,
}

impl<S: KeyValueStore> StoredIdentity<S> {
    pub fn load(store: S) -> Result<Self, StoreError> {
        let user: Option<User> = store::load(&store, USER_KEY, None)?;
        Ok(StoredIdentity { store, user })
    }
}

impl<S: KeyValueStore> IdentityProvider for StoredIdentity<S> {
    fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn sign_in(&mut self, name: &str) -> Result<User, IdentityError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(IdentityError::EmptyName);
        }
        let user = User {
            name: name.to_string(),
        };
        store::save(&mut self.store, USER_KEY, &Some(&user))?;
        self.user = Some(user.clone());
        Ok(user)
    }

    fn sign_out(&mut self) -> Result<(), IdentityError> {
        store::save(&mut self.store, USER_KEY, &None::<User>)?;
        self.user = None;
        Ok(())
    }
}

/// A fixed identity that never persists. Used by tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user: Option<User>,
}

impl StaticIdentity {
    pub fn signed_in(name: &str) -> Self {
        StaticIdentity {
            user: Some(User {
                name: name.to_string(),
            }),
        }
    }

    pub fn signed_out() -> Self {
        StaticIdentity { user: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn sign_in(&mut self, name: &str) -> Result<User, IdentityError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(IdentityError::EmptyName);
        }
        let user = User {
            name: name.to_string(),
        };
        self.user = Some(user.clone());
        Ok(user)
    }

    fn sign_out(&mut self) -> Result<(), IdentityError> {
        self.user = None;
        Ok(())
    }
}
