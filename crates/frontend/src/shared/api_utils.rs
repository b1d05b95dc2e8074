//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use super::config::{active_api, ApiConfig};
use leptos::prelude::*;

/// Get the base URL for API requests
///
/// Uses the current window location with the configured port and prefix,
/// e.g. "http://localhost:9000/admin". Empty string if window is not available.
///
/// # Example
/// ```rust,ignore
/// let url = format!("{}/orders/{}", api_base(), id);
/// ```
pub fn api_base() -> String {
    let api = use_context::<ApiConfig>().unwrap_or_else(active_api);
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    base_url(&protocol, &hostname, &api)
}

fn base_url(protocol: &str, hostname: &str, api: &ApiConfig) -> String {
    format!("{}//{}:{}{}", protocol, hostname, api.port, api.prefix)
}

/// Build a full API URL from a path starting with "/"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_joins_port_and_prefix() {
        let api = ApiConfig {
            port: 9000,
            prefix: "/admin".to_string(),
        };
        assert_eq!(
            base_url("https:", "shop.local", &api),
            "https://shop.local:9000/admin"
        );
    }
}
