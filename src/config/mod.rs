use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_HOME_PATH: &str = "/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub routes: RouteConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base address prefixed to every relative request target
    pub base_url: String,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    pub login_path: String,
    pub home_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub config_dir: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("CRM_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    /// Configuration pointing at an explicit API base, otherwise development defaults
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.api.base_url = normalize_base_url(&base_url.into());
        config
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("CRM_API_URL") {
            if !v.trim().is_empty() {
                self.api.base_url = normalize_base_url(&v);
            }
        }
        if let Ok(v) = env::var("CRM_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        if let Ok(v) = env::var("CRM_LOGIN_PATH") {
            if !v.is_empty() {
                self.routes.login_path = v;
            }
        }
        if let Ok(v) = env::var("CRM_HOME_PATH") {
            if !v.is_empty() {
                self.routes.home_path = v;
            }
        }

        if let Ok(v) = env::var("CRM_CONFIG_DIR") {
            if !v.is_empty() {
                self.storage.config_dir = PathBuf::from(v);
            }
        }

        self
    }

    /// Location of the persisted session file
    pub fn session_file(&self) -> PathBuf {
        self.storage.config_dir.join("session.json")
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                enable_request_logging: true,
            },
            routes: RouteConfig::default(),
            storage: StorageConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                enable_request_logging: false,
            },
            routes: RouteConfig::default(),
            storage: StorageConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                enable_request_logging: false,
            },
            routes: RouteConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            home_path: DEFAULT_HOME_PATH.to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let config_dir = match env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(".config").join("education-crm"),
            Err(_) => PathBuf::from(".education-crm"),
        };
        Self { config_dir }
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<ClientConfig> = Lazy::new(ClientConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static ClientConfig {
    &CONFIG
}
