//! Centralized configuration (environment variables + defaults).
//!
//! Call [`load_dotenv`] once at process start so a local `.env` file can
//! supply any of these.

pub const DEFAULT_DATABASE_URL: &str = "sqlite://restaurants.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

/// Loads `.env` if present. Missing files are not an error.
pub fn load_dotenv() {
    dotenv::dotenv().ok();
}

/// Database URL. Defaults to a SQLite file in the working directory.
pub fn database_url() -> String {
    non_empty_var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Pool size for the storage gateway (minimum 1).
pub fn max_connections() -> u32 {
    match non_empty_var("DATABASE_MAX_CONNECTIONS") {
        Some(raw) => match raw.parse::<u32>() {
            Ok(n) => n.max(1),
            Err(_) => {
                tracing::warn!(
                    value = %raw,
                    default = DEFAULT_MAX_CONNECTIONS,
                    "DATABASE_MAX_CONNECTIONS is not a valid u32, using default"
                );
                DEFAULT_MAX_CONNECTIONS
            }
        },
        None => DEFAULT_MAX_CONNECTIONS,
    }
}

/// Socket address the API server binds to.
pub fn bind_addr() -> String {
    non_empty_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
}

/// Origins allowed by the CORS layer, comma separated in the environment.
pub fn cors_allowed_origins() -> Vec<String> {
    let raw = non_empty_var("CORS_ALLOWED_ORIGINS")
        .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGINS.to_string());
    split_origins(&raw)
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_origins_trims_and_drops_empty_entries() {
        let origins = split_origins(" http://a.test , ,http://b.test,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn default_origins_cover_local_frontend() {
        let origins = split_origins(DEFAULT_CORS_ALLOWED_ORIGINS);
        assert_eq!(origins.len(), 2);
        assert!(origins.iter().all(|o| o.ends_with(":5173")));
    }
}
