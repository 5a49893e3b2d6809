use log::Level;
use serde::Deserialize;
use web_sys::Document;

use crate::error::StoreError;

/// Id of the optional `<script type="application/json">` block a template
/// can use to override any of the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "storefront-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Local builds get the mount/skip chatter
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub theme_storage_key: String,
    pub loading_delay_ms: u32,
    pub loading_fade_ms: u32,
    pub alert_fade_ms: u32,
    pub music_volume: f64,
    pub scroll_top_threshold: f64,
    pub count_up_duration_ms: f64,
    pub testimonial_interval_ms: u32,
    pub filter_fade_delay_ms: u32,
    pub live_chat_url: String,
    pub tracking_path_prefix: String,
    pub service_worker_path: String,
    pub dev_hosts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_storage_key: "theme".to_string(),
            loading_delay_ms: 1500,
            loading_fade_ms: 500,
            alert_fade_ms: 300,
            music_volume: 0.3,
            scroll_top_threshold: 300.0,
            count_up_duration_ms: 2000.0,
            testimonial_interval_ms: 5000,
            filter_fade_delay_ms: 10,
            live_chat_url: "https://wa.me/263718456744".to_string(),
            tracking_path_prefix: "/track/".to_string(),
            service_worker_path: "/sw.js".to_string(),
            dev_hosts: vec!["localhost".to_string()],
        }
    }
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the override block from the page, falling back to defaults
    /// when it is absent or malformed.
    pub fn from_document(document: &Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => {
                log::debug!("Loaded storefront config overrides");
                config
            }
            Err(err) => {
                log::warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, err);
                Self::default()
            }
        }
    }

    pub fn is_dev_host(&self, hostname: &str) -> bool {
        self.dev_hosts.iter().any(|host| host == hostname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config =
            Config::from_json(r#"{"testimonialIntervalMs": 8000, "devHosts": ["127.0.0.1"]}"#)
                .unwrap();
        assert_eq!(config.testimonial_interval_ms, 8000);
        assert_eq!(config.dev_hosts, vec!["127.0.0.1".to_string()]);
        assert_eq!(config.theme_storage_key, "theme");
        assert_eq!(config.loading_delay_ms, 1500);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(Config::from_json("{\"musicVolume\":"), Err(StoreError::Config(_))));
    }

    #[test]
    fn dev_host_matches_exactly() {
        let config = Config::default();
        assert!(config.is_dev_host("localhost"));
        assert!(!config.is_dev_host("localhost.shop.example"));
        assert!(!config.is_dev_host("ntandostore.com"));
    }
}
