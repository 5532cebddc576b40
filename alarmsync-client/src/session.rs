use std::sync::Arc;

use alarmsync_api::models::{LoginRequest, LoginResponse, ValidateTokenRequest, ValidateTokenResponse};
use alarmsync_api::routes;
use reqwest::Method;

use crate::context::{Credentials, Session, SessionContext};
use crate::error::{Error, Result, TransportError};
use crate::http::HttpClient;

/// Establishes, persists and validates the user session.
#[derive(Clone)]
pub struct SessionManager {
    http: HttpClient,
    remember_credentials: bool,
}

impl SessionManager {
    pub fn new(http: HttpClient, remember_credentials: bool) -> Self {
        Self {
            http,
            remember_credentials,
        }
    }

    pub fn context(&self) -> &Arc<SessionContext> {
        self.http.context()
    }

    /// Returns `false` for rejected credentials; transport failures are errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<bool> {
        match self.authenticate(email, password).await {
            Ok(_) => Ok(true),
            Err(Error::InvalidCredentials) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Exchanges credentials for a token and persists it, replacing any
    /// previous session.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Session> {
        let ticket = self.context().begin_update().await;

        let request = self
            .http
            .public_request(Method::POST, routes::LOGIN)
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            });

        let response: LoginResponse = match self.http.send_json(request).await {
            Ok(response) => response,
            Err(TransportError::Status {
                status: 401 | 403, ..
            }) => {
                tracing::info!(email, "login rejected by backend");
                return Err(Error::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(email, error = %e, "login request failed");
                return Err(e.into());
            }
        };

        let Some(token) = response.accepted_token() else {
            tracing::info!(email, status = ?response.status, "login rejected by backend");
            return Err(Error::InvalidCredentials);
        };

        let session = Session {
            token: token.to_string(),
            email: email.to_string(),
        };
        let credentials = self.remember_credentials.then(|| Credentials {
            email: email.to_string(),
            password: password.to_string(),
        });

        self.context()
            .replace_session(ticket, &session, credentials.as_ref())
            .await?;

        tracing::info!(email, "session established");

        Ok(session)
    }

    pub async fn logout(&self) -> Result<()> {
        self.context().clear_session().await?;
        tracing::info!("session cleared");
        Ok(())
    }

    /// Point-in-time validity check. Never errors: every failure is logged
    /// and reported as `false`.
    pub async fn is_session_valid(&self) -> bool {
        match self.check_session().await {
            Ok(()) => {
                tracing::debug!("session token is valid");
                true
            }
            Err(Error::NoTokenStored) => {
                tracing::debug!("no session token stored");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "session validation failed");
                false
            }
        }
    }

    /// Validates the stored token against the backend.
    pub async fn check_session(&self) -> Result<()> {
        let token = self.context().token().await?.ok_or(Error::NoTokenStored)?;

        let request = self
            .http
            .public_request(Method::POST, routes::VALIDATE_TOKEN)
            .json(&ValidateTokenRequest { token });

        let response: ValidateTokenResponse = self.http.send_json(request).await?;

        if response.is_ok() {
            Ok(())
        } else {
            Err(Error::BackendRejected {
                status: response.status,
            })
        }
    }

    pub async fn token(&self) -> Result<Option<String>> {
        self.context().token().await
    }

    /// Email and password of the last successful login, for form prefill.
    pub async fn cached_credentials(&self) -> Result<Option<Credentials>> {
        self.context().credentials().await
    }
}
