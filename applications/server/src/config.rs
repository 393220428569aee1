/// Server configuration
use crate::error::{Result, ServerError};
use identity_client::BackendConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Shared secret accepted when nothing else is configured. Local development only.
pub const DEFAULT_API_TOKEN: &str = "secret-token";

/// Legacy environment variables and the config keys they override.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("KEYCLOAK_URL", "keycloak.url"),
    ("KEYCLOAK_REALM", "keycloak.realm"),
    ("KEYCLOAK_USERNAME", "keycloak.username"),
    ("KEYCLOAK_PASSWORD", "keycloak.password"),
    ("API_TOKEN", "auth.api_token"),
];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_keycloak")]
    pub keycloak: KeycloakSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeycloakSettings {
    #[serde(default = "default_keycloak_url")]
    pub url: String,

    #[serde(default = "default_realm")]
    pub realm: String,

    /// Realm holding the admin account, when it differs from `realm`
    #[serde(default)]
    pub token_realm: Option<String>,

    #[serde(default = "default_admin")]
    pub username: String,

    #[serde(default = "default_admin")]
    pub password: String,

    #[serde(default = "default_client_id")]
    pub client_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    /// Static bearer token clients must present
    #[serde(default = "default_api_token")]
    pub api_token: String,
}

impl ServerConfig {
    /// Load configuration from an explicit file (or `config.toml`) and environment.
    ///
    /// Precedence, lowest first: defaults, file, `MS_USER_*` variables
    /// (`__` separates sections, e.g. `MS_USER_SERVER__PORT`), then the
    /// legacy `KEYCLOAK_*` / `API_TOKEN` variables.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from("config.toml"), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(ServerError::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MS_USER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        for (var, key) in LEGACY_ENV {
            settings = settings
                .set_override_option(*key, std::env::var(var).ok())
                .map_err(|e| ServerError::Config(e.to_string()))?;
        }

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.api_token.is_empty() {
            return Err(ServerError::Config(
                "API token is required (set API_TOKEN or MS_USER_AUTH__API_TOKEN)".to_string(),
            ));
        }

        if self.keycloak.realm.is_empty() {
            return Err(ServerError::Config("Keycloak realm is required".to_string()));
        }

        let url = &self.keycloak.url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerError::Config(format!(
                "Keycloak URL must start with http:// or https:// (got {url:?})"
            )));
        }

        Ok(())
    }

    /// Whether the built-in development token is still in use.
    pub fn uses_default_api_token(&self) -> bool {
        self.auth.api_token == DEFAULT_API_TOKEN
    }

    /// Identity backend settings in the client's shape.
    pub fn backend_config(&self) -> BackendConfig {
        let k = &self.keycloak;
        let mut backend = BackendConfig::new(&k.url, &k.realm, &k.username, &k.password);
        backend.client_id.clone_from(&k.client_id);
        backend.token_realm.clone_from(&k.token_realm);
        backend
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    18080
}

fn default_keycloak() -> KeycloakSettings {
    KeycloakSettings {
        url: default_keycloak_url(),
        realm: default_realm(),
        token_realm: None,
        username: default_admin(),
        password: default_admin(),
        client_id: default_client_id(),
    }
}

fn default_keycloak_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_realm() -> String {
    "master".to_string()
}

fn default_admin() -> String {
    "admin".to_string()
}

fn default_client_id() -> String {
    identity_client::DEFAULT_CLIENT_ID.to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        api_token: default_api_token(),
    }
}

fn default_api_token() -> String {
    DEFAULT_API_TOKEN.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            keycloak: default_keycloak(),
            auth: default_auth(),
        }
    }
}
