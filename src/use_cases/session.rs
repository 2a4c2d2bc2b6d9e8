use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::auth::User;
use crate::domain::errors::ApiError;
use crate::domain::ports::SessionStore;

pub const TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "userData";

// Which of the two stores currently holds the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    Durable,
    Ephemeral,
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
    persistence: Option<Persistence>,
}

/// In-memory session mirrored into exactly one of two persisted stores.
///
/// The manager is the only writer of both stores. `remember_me` at write time
/// decides which store receives the session and the other one is cleared, so
/// the two never hold a session at the same time.
pub struct SessionManager {
    durable: Arc<dyn SessionStore>,
    ephemeral: Arc<dyn SessionStore>,
    state: RwLock<SessionState>,
}

impl SessionManager {
    /// Builds the manager from whatever the stores hold. Never fails: unreadable
    /// or corrupted entries are logged, the corrupted key is dropped from its
    /// store, and the session starts unauthenticated.
    pub fn hydrate(durable: Arc<dyn SessionStore>, ephemeral: Arc<dyn SessionStore>) -> Self {
        let mut state = SessionState::default();

        if let Some(token) = read_key(durable.as_ref(), TOKEN_KEY) {
            state.token = Some(token);
            state.persistence = Some(Persistence::Durable);
        } else if let Some(token) = read_key(ephemeral.as_ref(), TOKEN_KEY) {
            state.token = Some(token);
            state.persistence = Some(Persistence::Ephemeral);
        }

        let raw_user = read_key(durable.as_ref(), USER_KEY)
            .map(|raw| (raw, durable.as_ref()))
            .or_else(|| read_key(ephemeral.as_ref(), USER_KEY).map(|raw| (raw, ephemeral.as_ref())));

        if let Some((raw, origin)) = raw_user {
            match serde_json::from_str::<User>(&raw) {
                Ok(user) => state.user = Some(user),
                Err(error) => {
                    tracing::error!(%error, "failed to parse persisted user; discarding it");
                    if let Err(error) = origin.remove(USER_KEY) {
                        tracing::warn!(%error, "failed to remove corrupted user entry");
                    }
                }
            }
        }

        tracing::debug!(
            authenticated = state.token.is_some() && state.user.is_some(),
            persistence = ?state.persistence,
            "session hydrated"
        );

        Self {
            durable,
            ephemeral,
            state: RwLock::new(state),
        }
    }

    pub fn set_auth_data(
        &self,
        token: impl Into<String>,
        user: User,
        remember_me: bool,
    ) -> Result<(), ApiError> {
        let token = token.into();
        let persistence = if remember_me {
            Persistence::Durable
        } else {
            Persistence::Ephemeral
        };
        let serialized =
            serde_json::to_string(&user).map_err(|e| ApiError::Storage(e.to_string()))?;

        {
            let mut state = self.write();
            state.token = Some(token.clone());
            state.user = Some(user);
            state.persistence = Some(persistence);
        }

        // The other store is emptied before the target is written, so a failed
        // removal never leaves a session in both.
        let (target, other) = self.stores_for(persistence);
        let mut stale = None;
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(error) = other.remove(key) {
                tracing::warn!(%error, key, "failed to clear previous session entry");
                stale = stale.or(Some(error));
            }
        }
        if let Some(error) = stale {
            return Err(ApiError::Storage(error));
        }

        target.set(TOKEN_KEY, &token).map_err(ApiError::Storage)?;
        target.set(USER_KEY, &serialized).map_err(ApiError::Storage)?;
        Ok(())
    }

    // Idempotent. Memory is always cleared even when a store refuses the removal.
    pub fn clear_auth_data(&self) {
        *self.write() = SessionState::default();

        for store in [&self.durable, &self.ephemeral] {
            for key in [TOKEN_KEY, USER_KEY] {
                if let Err(error) = store.remove(key) {
                    tracing::warn!(%error, key, "failed to clear persisted session entry");
                }
            }
        }
    }

    // Pure predicate over memory; never touches the stores.
    pub fn is_authenticated(&self) -> bool {
        let state = self.read();
        state.token.is_some() && state.user.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn persistence(&self) -> Option<Persistence> {
        self.read().persistence
    }

    /// Replaces the cached user after a profile refresh, persisting it to the
    /// store that already holds the session (if any).
    pub fn replace_user(&self, user: User) -> Result<(), ApiError> {
        let serialized =
            serde_json::to_string(&user).map_err(|e| ApiError::Storage(e.to_string()))?;
        let persistence = {
            let mut state = self.write();
            state.user = Some(user);
            state.persistence
        };

        if let Some(persistence) = persistence {
            let (target, _) = self.stores_for(persistence);
            target.set(USER_KEY, &serialized).map_err(ApiError::Storage)?;
        }
        Ok(())
    }

    fn stores_for(&self, persistence: Persistence) -> (&dyn SessionStore, &dyn SessionStore) {
        match persistence {
            Persistence::Durable => (self.durable.as_ref(), self.ephemeral.as_ref()),
            Persistence::Ephemeral => (self.ephemeral.as_ref(), self.durable.as_ref()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn read_key(store: &dyn SessionStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(%error, key, "failed to read persisted session entry");
            None
        }
    }
}
