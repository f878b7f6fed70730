use std::{collections::HashMap, fs};

use tracing::warn;
use url::Url;

#[derive(Debug)]
pub struct Settings {
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: client_core::DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

/// Layered settings: built-in defaults, then `dashboard.toml` in the
/// working directory, then environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("dashboard.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_url") {
                settings.api_url = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("DASHBOARD_API_URL") {
        settings.api_url = v;
    }
    if let Ok(v) = std::env::var("APP__API_URL") {
        settings.api_url = v;
    }

    settings.api_url = normalize_api_url(&settings.api_url);
    settings
}

pub fn normalize_api_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() || Url::parse(trimmed).is_err() {
        warn!("invalid api url '{raw}'; falling back to the default");
        return Settings::default().api_url;
    }
    trimmed.to_string()
}
