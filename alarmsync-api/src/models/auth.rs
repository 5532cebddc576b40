use serde::{Deserialize, Serialize};

use super::STATUS_OK;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email, forwarded as typed
    pub email: String,
    /// Account password, forwarded as typed
    pub password: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Session token, absent when the credentials were rejected
    #[serde(default)]
    pub token: Option<String>,
    /// Business status, `OK` on success
    #[serde(default)]
    pub status: Option<String>,
}

impl LoginResponse {
    /// The issued token, if the backend accepted the credentials.
    pub fn accepted_token(&self) -> Option<&str> {
        let status_ok = self.status.as_deref().is_none_or(|status| status == STATUS_OK);

        self.token
            .as_deref()
            .filter(|token| status_ok && !token.is_empty())
    }
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateTokenRequest {
    /// Token to check
    pub token: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateTokenResponse {
    /// `OK` when the token is still valid, anything else otherwise
    #[serde(default)]
    pub status: String,
}

impl ValidateTokenResponse {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}
