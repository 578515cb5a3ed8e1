use serde::Deserialize;
use types::WidgetConfig;

pub const ENV_PREFIX: &str = "WIDGET_HOST_";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Base URL of the status API, e.g. `https://example.com/api`.
    pub api_base_url: String,

    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
}

fn default_bind_address() -> String {
    "127.0.0.1:3030".to_string()
}
