use crate::{
    FailureKind, PollFailure, PollResult, ServerStatus, ThemeKind, WidgetConfig,
};
use std::fmt;

pub const DEFAULT_ACCENT_COLOR: &str = "#00ff88";
pub const DEFAULT_FONT_FAMILY: &str = "'Space Grotesk', sans-serif";
pub const DEFAULT_REFRESH_INTERVAL_SECONDS: i64 = 30;
pub const DEFAULT_BORDER_RADIUS: u32 = 16;
pub const DEFAULT_BORDER_STYLE: &str = "solid";
pub const DEFAULT_SHADOW_INTENSITY: u32 = 50;

pub(crate) fn default_accent_color() -> String {
    DEFAULT_ACCENT_COLOR.to_string()
}

pub(crate) const fn default_dark_mode() -> bool {
    true
}

pub(crate) fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

pub(crate) const fn default_refresh_interval_seconds() -> i64 {
    DEFAULT_REFRESH_INTERVAL_SECONDS
}

pub(crate) const fn default_border_radius() -> u32 {
    DEFAULT_BORDER_RADIUS
}

pub(crate) fn default_border_style() -> String {
    DEFAULT_BORDER_STYLE.to_string()
}

pub(crate) const fn default_shadow_intensity() -> u32 {
    DEFAULT_SHADOW_INTENSITY
}

impl WidgetConfig {
    /// Config for the given server with every styling field at its default.
    #[must_use]
    pub fn new(
        config_id: impl Into<String>,
        server_ip: impl Into<String>,
        server_port: u16,
    ) -> Self {
        Self {
            config_id: config_id.into(),
            server_ip: server_ip.into(),
            server_port,
            theme: ThemeKind::default(),
            accent_color: default_accent_color(),
            dark_mode: default_dark_mode(),
            background_color: None,
            text_color: None,
            border_radius: default_border_radius(),
            border_style: default_border_style(),
            shadow_intensity: default_shadow_intensity(),
            font_family: default_font_family(),
            refresh_interval_seconds: default_refresh_interval_seconds(),
        }
    }

    /// `ip:port` of the game server this widget watches.
    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_ip, self.server_port)
    }
}

impl ThemeKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Neon => "neon",
            Self::Classic => "classic",
            Self::Minimal => "minimal",
            Self::Terminal => "terminal",
            Self::Retro => "retro",
            Self::Glassmorphism => "glassmorphism",
            Self::Military => "military",
            Self::Cyberpunk => "cyberpunk",
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Protocol => "protocol",
            Self::Application => "application",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PollFailure {
    pub fn new(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PollFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.reason)
    }
}

impl PollResult {
    pub fn failure(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self::Failure(PollFailure::new(kind, reason))
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl From<ServerStatus> for PollResult {
    fn from(status: ServerStatus) -> Self {
        Self::Success(status)
    }
}

impl From<PollFailure> for PollResult {
    fn from(failure: PollFailure) -> Self {
        Self::Failure(failure)
    }
}
