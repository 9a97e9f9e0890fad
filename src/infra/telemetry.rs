//! Tracing bootstrap for the binaries.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "restaurant_list_api=info,api_server=info,preflight=info,tower_http=info";

/// Installs a fmt subscriber filtered by `RUST_LOG`.
///
/// Falls back to `info` for this crate and `tower_http` when `RUST_LOG` is
/// unset or unparseable. Calling it twice is harmless; the second install is
/// ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
