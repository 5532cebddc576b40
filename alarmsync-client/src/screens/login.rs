use super::Notice;
use crate::error::Result;
use crate::session::SessionManager;
use crate::settings::ApiMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated,
    Rejected,
    Failed,
}

pub struct LoginScreen {
    session: SessionManager,
    pub email: String,
    pub password: String,
    pub show_password: bool,
    loading: bool,
    notice: Option<Notice>,
}

impl LoginScreen {
    /// Opens the form prefilled with the last remembered credentials.
    pub async fn open(session: SessionManager) -> Result<Self> {
        let credentials = session.cached_credentials().await?.unwrap_or_default();

        Ok(Self {
            session,
            email: credentials.email,
            password: credentials.password,
            show_password: false,
            loading: false,
            notice: None,
        })
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub async fn submit(&mut self) -> LoginOutcome {
        self.loading = true;
        self.notice = None;

        let outcome = match self.session.login(&self.email, &self.password).await {
            Ok(true) => LoginOutcome::Authenticated,
            Ok(false) => {
                self.notice = Some(Notice::InvalidCredentials);
                LoginOutcome::Rejected
            }
            Err(e) => {
                tracing::error!(error = %e, "login failed");
                self.notice = Some(Notice::LoginFailed);
                LoginOutcome::Failed
            }
        };

        self.loading = false;
        outcome
    }

    pub fn mode(&self) -> ApiMode {
        self.session.context().mode()
    }

    pub fn toggle_mode(&self) -> ApiMode {
        self.session.context().toggle_mode()
    }

    /// Banner shown while the development backend is selected.
    pub fn mode_label(&self) -> Option<&'static str> {
        match self.mode() {
            ApiMode::Development => Some("Modo desarrollo"),
            ApiMode::Production => None,
        }
    }
}
