use thiserror::Error;

/// Errors that prevent a widget from being built or started.
///
/// Failures inside a running loop never show up here; they are folded into
/// [`types::PollResult::Failure`] and rendered as the offline state.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("refresh interval must be at least 1 second, got {0}")]
    InvalidRefreshInterval(i64),

    #[error("widget config id is empty")]
    MissingConfigId,

    #[error("server port must be between 1 and 65535")]
    InvalidPort,

    #[error("{field} {value:?} is not a plain CSS value")]
    InvalidStyleValue { field: &'static str, value: String },

    #[error("invalid status endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("poll loop has been stopped and cannot be restarted")]
    LoopStopped,

    #[error("poll loop must be started from within a tokio runtime")]
    NoRuntime,
}

impl WidgetError {
    /// True for errors caused by the supplied `WidgetConfig` or API base URL.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::LoopStopped | Self::NoRuntime)
    }
}
