//! Runtime Configuration
//!
//! The API base URL comes from `<meta name="api-base" content="...">` in
//! index.html so one build can be pointed at any backend. The bearer token
//! is written to localStorage by the login flow; this app only reads it.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const DEFAULT_API_BASE: &str = "/api";
pub const API_BASE_META: &str = "api-base";
pub const TOKEN_STORAGE_KEY: &str = "auth_token";

/// Characters left as-is in query values
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub auth_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            auth_token: None,
        }
    }
}

impl AppConfig {
    /// Read config from the page; missing pieces fall back to defaults
    pub fn load() -> Self {
        let api_base = read_meta(API_BASE_META)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let auth_token = local_storage()
            .and_then(|storage| storage.get_item(TOKEN_STORAGE_KEY).ok().flatten())
            .filter(|t| !t.is_empty());
        Self { api_base, auth_token }
    }

    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.api_base, path)
    }
}

fn read_meta(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let selector = format!("meta[name=\"{}\"]", name);
    let element = document.query_selector(&selector).ok()??;
    element.get_attribute("content")
}

pub fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Join base and path with exactly one slash between them
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, path)
}

/// Append `?k=v&...`, percent-encoding values; empty values are skipped
pub fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    let query: Vec<String> = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, QUERY_VALUE)))
        .collect();
    if query.is_empty() {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, separator, query.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("/api", "customers"), "/api/customers");
        assert_eq!(join_url("/api/", "/customers"), "/api/customers");
        assert_eq!(join_url("https://ops.example.com/v2//", "sites/4"), "https://ops.example.com/v2/sites/4");
        assert_eq!(join_url("/api", ""), "/api");
    }

    #[test]
    fn test_with_query_encodes_values() {
        assert_eq!(with_query("messages", &[("folder", "inbox")]), "messages?folder=inbox");
        assert_eq!(
            with_query("messages?page=2", &[("q", "snow & ice"), ("skip", "")]),
            "messages?page=2&q=snow%20%26%20ice"
        );
        assert_eq!(with_query("messages", &[("folder", "")]), "messages");
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.endpoint("users"), "/api/users");
        assert!(config.auth_token.is_none());
    }
}
