use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::settings::{Api, ApiMode};
use crate::storage::{EMAIL_KEY, LocalStorage, PASSWORD_KEY, TOKEN_KEY};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub email: String,
}

/// Proof that a session update started at a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTicket {
    generation: u64,
}

impl SessionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Shared state every session and alarm call runs against: the persisted
/// store, the selected backend and the session generation.
pub struct SessionContext {
    storage: Arc<dyn LocalStorage>,
    api: Api,
    mode: RwLock<ApiMode>,
    generation: Mutex<u64>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn LocalStorage>, api: Api) -> Self {
        let mode = RwLock::new(api.mode);

        Self {
            storage,
            api,
            mode,
            generation: Mutex::new(0),
        }
    }

    pub fn storage(&self) -> &Arc<dyn LocalStorage> {
        &self.storage
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn mode(&self) -> ApiMode {
        *self.mode.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_mode(&self, mode: ApiMode) {
        *self.mode.write().unwrap_or_else(|e| e.into_inner()) = mode;
        tracing::info!(%mode, url = self.api.url(mode), "api mode changed");
    }

    /// Flips between development and production, returning the new mode.
    pub fn toggle_mode(&self) -> ApiMode {
        let mode = self.mode().toggled();
        self.set_mode(mode);
        mode
    }

    pub fn base_url(&self) -> &str {
        self.api.url(self.mode())
    }

    pub async fn token(&self) -> Result<Option<String>> {
        let token = self.storage.get_item(TOKEN_KEY).await?;
        Ok(token.filter(|t| !t.is_empty()))
    }

    pub async fn credentials(&self) -> Result<Option<Credentials>> {
        let email = self.storage.get_item(EMAIL_KEY).await?;
        let password = self.storage.get_item(PASSWORD_KEY).await?;

        Ok(email.map(|email| Credentials {
            email,
            password: password.unwrap_or_default(),
        }))
    }

    pub async fn generation(&self) -> u64 {
        *self.generation.lock().await
    }

    /// Starts a session update. The ticket is invalidated by any session
    /// committed or cleared after this point; rejected attempts leave it alone.
    pub async fn begin_update(&self) -> SessionTicket {
        SessionTicket {
            generation: *self.generation.lock().await,
        }
    }

    /// Stores the session if no other session was committed or cleared since
    /// `ticket` was taken. Token and credentials are written in one batch.
    pub async fn replace_session(
        &self,
        ticket: SessionTicket,
        session: &Session,
        credentials: Option<&Credentials>,
    ) -> Result<()> {
        let mut generation = self.generation.lock().await;
        if *generation != ticket.generation {
            tracing::warn!(
                ticket = ticket.generation,
                current = *generation,
                "discarding superseded session"
            );
            return Err(Error::SessionSuperseded);
        }

        let mut items = vec![(TOKEN_KEY, session.token.as_str())];
        if let Some(credentials) = credentials {
            items.push((EMAIL_KEY, credentials.email.as_str()));
            items.push((PASSWORD_KEY, credentials.password.as_str()));
        }

        self.storage.set_items(&items).await?;
        *generation += 1;

        Ok(())
    }

    /// Drops the stored token and supersedes any update still in flight.
    pub async fn clear_session(&self) -> Result<()> {
        let mut generation = self.generation.lock().await;

        self.storage.remove_item(TOKEN_KEY).await?;
        *generation += 1;

        Ok(())
    }
}
