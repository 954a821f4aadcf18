//! Frontend Configuration
//!
//! Resolved once at startup: build-time environment first, then a
//! `<meta name="homelogger-server-url">` tag in the page can override the
//! server address without a rebuild.

use log::LevelFilter;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8083";
const SERVER_URL_META: &str = "homelogger-server-url";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the REST server, without a trailing slash.
    pub server_url: String,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

impl AppConfig {
    pub fn load() -> Self {
        let mut config = Self::from_values(option_env!("HOMELOGGER_SERVER_URL"), option_env!("HOMELOGGER_LOG_LEVEL"));
        if let Some(url) = meta_content(SERVER_URL_META).filter(|u| !u.trim().is_empty()) {
            config.server_url = normalize_url(&url);
        }
        config
    }

    pub fn from_values(server_url: Option<&str>, log_level: Option<&str>) -> Self {
        let server_url = server_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(normalize_url)
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let log_level = log_level
            .and_then(|level| level.trim().parse().ok())
            .unwrap_or(LevelFilter::Info);
        Self { server_url, log_level }
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document
        .query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()??;
    meta.get_attribute("content")
}
