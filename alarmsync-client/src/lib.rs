use std::sync::Arc;

use crate::storage::{FileStorage, LocalStorage};

pub mod alarm;
pub mod context;
pub mod error;
pub mod http;
pub mod request;
pub mod screens;
pub mod session;
pub mod settings;
pub mod storage;

pub use alarm::{AlarmList, AlarmService, ArmAck};
pub use context::{Credentials, Session, SessionContext};
pub use error::{Error, Result, TransportError};
pub use http::HttpClient;
pub use request::{RequestHandle, ScreenScope};
pub use session::SessionManager;
pub use settings::{ApiMode, Settings};

/// Session manager and alarm service wired to one shared context.
#[derive(Clone)]
pub struct AlarmClient {
    pub session: SessionManager,
    pub alarms: AlarmService,
}

impl AlarmClient {
    pub fn new(settings: &Settings, storage: Arc<dyn LocalStorage>) -> Result<Self> {
        let context = Arc::new(SessionContext::new(storage, settings.api.clone()));
        let http = HttpClient::new(context)?;

        Ok(Self {
            session: SessionManager::new(http.clone(), settings.storage.remember_credentials),
            alarms: AlarmService::new(http),
        })
    }

    /// Builds a client backed by the file store named in `settings`.
    pub async fn open(settings: &Settings) -> Result<Self> {
        let storage = FileStorage::open(&settings.storage.path).await?;

        Self::new(settings, Arc::new(storage))
    }

    pub fn context(&self) -> &Arc<SessionContext> {
        self.session.context()
    }
}
