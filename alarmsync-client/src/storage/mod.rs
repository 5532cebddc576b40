mod file;
mod memory;

pub use file::*;
pub use memory::*;

use async_trait::async_trait;

use crate::error::Result;

/// Key under which the session token is persisted.
pub const TOKEN_KEY: &str = "token";
pub const EMAIL_KEY: &str = "email";
pub const PASSWORD_KEY: &str = "password";

/// String key-value storage that survives process restarts.
#[async_trait]
pub trait LocalStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Writes every pair or none of them.
    async fn set_items(&self, items: &[(&str, &str)]) -> Result<()>;

    async fn remove_item(&self, key: &str) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}
