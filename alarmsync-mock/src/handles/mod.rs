mod alarm_handle;
mod auth_handle;

pub use alarm_handle::*;
pub use auth_handle::*;
