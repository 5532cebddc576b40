//! Backend paths, relative to the configured base URL.

/// Credential exchange, answers with a session token.
pub const LOGIN: &str = "/api/v1/loginMovil/login";

/// Point-in-time check of a stored session token.
pub const VALIDATE_TOKEN: &str = "/api/v1/loginMovil/validarToken";

/// Full alarm list of one device, queried with `?mac=`.
pub const ALARM_STATUS: &str = "/alarmtc/status";

/// Arm/disarm command, queried with `?mac=&alarm=&status=`.
pub const ARM: &str = "/arm";

/// Joins a base URL and a route without doubling or dropping the slash.
pub fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
