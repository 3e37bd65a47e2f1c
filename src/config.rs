use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";
pub const BASE_URL_ENV: &str = "FIPE_API_URL";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on simultaneously configured vehicle slots.
pub const MAX_SLOTS: usize = 3;

/// Label the catalog uses for the first (current) row of a price history.
pub const CURRENT_VALUE_LABEL: &str = "Valor Atual";

pub fn default_base_url() -> String {
    match std::env::var(BASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
        _ => DEFAULT_BASE_URL.to_string(),
    }
}
