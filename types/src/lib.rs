use serde::{Deserialize, Serialize};

mod utils;

pub use utils::{
    DEFAULT_ACCENT_COLOR, DEFAULT_BORDER_RADIUS, DEFAULT_BORDER_STYLE,
    DEFAULT_FONT_FAMILY, DEFAULT_REFRESH_INTERVAL_SECONDS,
    DEFAULT_SHADOW_INTENSITY,
};

/// Display and connection parameters for one widget instance.
///
/// Supplied once by whatever authored the configuration and read-only for
/// the lifetime of the poll loop that renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub config_id: String,

    pub server_ip: String,

    pub server_port: u16,

    #[serde(default)]
    pub theme: ThemeKind,

    #[serde(default = "utils::default_accent_color")]
    pub accent_color: String,

    #[serde(default = "utils::default_dark_mode")]
    pub dark_mode: bool,

    /// Container background. Unset follows the `dark_mode` palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    /// Container text color. Unset follows the `dark_mode` palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,

    /// Container corner radius in pixels.
    #[serde(default = "utils::default_border_radius")]
    pub border_radius: u32,

    /// CSS border style keyword, e.g. `solid` or `dashed`.
    #[serde(default = "utils::default_border_style")]
    pub border_style: String,

    /// Glow strength; the shadow blur grows by 1px per 5 points.
    #[serde(default = "utils::default_shadow_intensity")]
    pub shadow_intensity: u32,

    #[serde(default = "utils::default_font_family")]
    pub font_family: String,

    /// Seconds between polls. Signed so that zero and negative values can be
    /// represented and rejected when a loop is started.
    #[serde(default = "utils::default_refresh_interval_seconds")]
    pub refresh_interval_seconds: i64,
}

/// Named visual preset. Unknown names fall back to `Default`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ThemeKind {
    Neon,

    Classic,

    Minimal,

    Terminal,

    Retro,

    Glassmorphism,

    Military,

    Cyberpunk,

    #[default]
    #[serde(other)]
    Default,
}

/// Live status of a game server, produced per successful poll.
///
/// Every field is optional: absence means the field is not applicable or
/// was not reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_players: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_players: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,

    /// Round-trip latency in milliseconds, as reported by the status API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ping: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_protected: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vac_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_list: Option<Vec<PlayerEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,

    /// Seconds connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

/// Outcome of one poll. Each tick's result fully replaces the previous one.
#[derive(Debug, Clone, PartialEq)]
pub enum PollResult {
    Success(ServerStatus),
    Failure(PollFailure),
}

/// Why a poll did not produce a status. Only meant for diagnostics; the
/// rendered offline state never depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollFailure {
    pub kind: FailureKind,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Unreachable endpoint or timeout.
    Network,

    /// Non-2xx status or a body that is not the expected JSON shape.
    Protocol,

    /// The status API answered `success: false`.
    Application,
}
