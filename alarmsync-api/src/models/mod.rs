mod alarm;
mod auth;

pub use alarm::*;
pub use auth::*;

pub type Id = i32;

/// Business status the backend reports on success.
pub const STATUS_OK: &str = "OK";

/// Business status the mock backend reports on a rejected token or credential.
pub const STATUS_INVALID: &str = "INVALID";
