use once_cell::sync::OnceCell;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FrontendConfig {
    pub api: ApiConfig,
    pub notifications: NotificationsConfig,
    pub returns: ReturnsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub port: u16,
    /// Path prepended to every endpoint, e.g. "/admin".
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct NotificationsConfig {
    pub timeout_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ReturnsConfig {
    /// Reason screens accept images and the return table tracks them.
    pub images_on_returns: bool,
}

/// Default configuration compiled into the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 9000
prefix = "/admin"

[notifications]
timeout_ms = 5000

[returns]
images_on_returns = false
"#;

/// localStorage key holding an operator override in the same TOML shape
const OVERRIDE_KEY: &str = "dashboard.config";

/// API settings for requests polled outside the component tree
static ACTIVE_API: OnceCell<ApiConfig> = OnceCell::new();

pub fn set_active_api(api: ApiConfig) {
    if ACTIVE_API.set(api).is_err() {
        log::debug!("active api config already set");
    }
}

pub fn active_api() -> ApiConfig {
    ACTIVE_API
        .get()
        .cloned()
        .unwrap_or_else(|| default_config().api)
}

pub fn parse_config(contents: &str) -> anyhow::Result<FrontendConfig> {
    Ok(toml::from_str(contents)?)
}

pub fn default_config() -> FrontendConfig {
    // DEFAULT_CONFIG is covered by test_default_config_loads.
    parse_config(DEFAULT_CONFIG).unwrap_or(FrontendConfig {
        api: ApiConfig {
            port: 9000,
            prefix: "/admin".to_string(),
        },
        notifications: NotificationsConfig { timeout_ms: 5000 },
        returns: ReturnsConfig {
            images_on_returns: false,
        },
    })
}

/// Load configuration
///
/// Search order:
/// 1. `dashboard.config` in localStorage
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<FrontendConfig> {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(OVERRIDE_KEY).ok().flatten());

    if let Some(contents) = stored {
        log::info!("Loading config from localStorage '{}'", OVERRIDE_KEY);
        return parse_config(&contents);
    }

    log::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}
