use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::SortCriterion;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub places: PlacesSettings,
    pub geolocation: GeolocationSettings,
    pub inference: InferenceSettings,
    pub cache: CacheSettings,
    pub search: SearchSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacesSettings {
    #[serde(default = "default_places_base_url")]
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: Option<u64>,
}

fn default_places_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeolocationSettings {
    #[serde(default = "default_geolocation_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

fn default_geolocation_base_url() -> String {
    "https://ipinfo.io".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceSettings {
    #[serde(default = "default_inference_base_url")]
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

fn default_inference_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub capacity: Option<u64>,
    pub ttl_secs: Option<u64>,
}

/// Defaults for the nearby-shops search
///
/// `default_sort` is the typed criterion, so a typo in the config file fails
/// at load time instead of being silently coerced.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_sort")]
    pub default_sort: SortCriterion,
    #[serde(default = "default_radius_m")]
    pub radius_m: u32,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            radius_m: default_radius_m(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_sort() -> SortCriterion { SortCriterion::Rating }
fn default_radius_m() -> u32 { 5000 }
fn default_limit() -> usize { 20 }
fn default_max_limit() -> usize { 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with SHOPRADAR_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with SHOPRADAR_)
            // e.g., SHOPRADAR__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SHOPRADAR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Substitute bare-env secrets (PLACES_API_KEY, IPINFO_TOKEN)
        let settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SHOPRADAR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Honor the conventional bare environment variables for secrets
///
/// `PLACES_API_KEY` and `IPINFO_TOKEN` are checked before the prefixed forms
/// so deployments can reuse the same variables the frontend used.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let places_api_key = env::var("PLACES_API_KEY")
        .or_else(|_| env::var("SHOPRADAR__PLACES__API_KEY"))
        .ok();

    let ipinfo_token = env::var("IPINFO_TOKEN")
        .or_else(|_| env::var("SHOPRADAR__GEOLOCATION__TOKEN"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = places_api_key {
        builder = builder.set_override("places.api_key", api_key)?;
    }
    if let Some(token) = ipinfo_token {
        builder = builder.set_override("geolocation.token", token)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_search_settings() {
        let search = SearchSettings::default();
        assert_eq!(search.default_sort, SortCriterion::Rating);
        assert_eq!(search.radius_m, 5000);
        assert_eq!(search.default_limit, 20);
        assert_eq!(search.max_limit, 60);
    }

    #[test]
    fn test_default_logging() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_log_format(), "json");
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join("shopradar-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 8081

[places]
api_key = "test-key"

[geolocation]
[inference]
[cache]
capacity = 64
ttl_secs = 120

[search]
default_sort = "distance"

[logging]
format = "pretty"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.places.api_key, "test-key");
        assert_eq!(settings.places.base_url, default_places_base_url());
        assert_eq!(settings.search.default_sort, SortCriterion::Distance);
        assert_eq!(settings.cache.capacity, Some(64));
        // [logging] values must survive deserialization; main feeds them to
        // the subscriber unless LOG_LEVEL / LOG_FORMAT override them
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_rejects_unknown_sort() {
        let dir = std::env::temp_dir().join("shopradar-config-bad-sort");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 8081

[places]
api_key = "test-key"

[geolocation]
[inference]
[cache]

[search]
default_sort = "distanse"

[logging]
"#,
        )
        .unwrap();

        assert!(Settings::load_from(&path).is_err());
    }
}
