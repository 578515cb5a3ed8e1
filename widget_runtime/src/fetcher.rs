use std::{sync::Arc, time::Duration};

use reqwest::Url;
use types::{FailureKind, PollResult, WidgetConfig};

use crate::{WidgetError, validate};

/// Upper bound on a single status request, including reading the body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Something that can produce the current server status.
///
/// Implementations never fail across this boundary: every error path is
/// converted into [`PollResult::Failure`].
pub trait StatusSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = PollResult> + Send;
}

impl<T: StatusSource> StatusSource for Arc<T> {
    fn fetch(&self) -> impl Future<Output = PollResult> + Send {
        (**self).fetch()
    }
}

/// Fetches `{base_api_url}/server-status/{config_id}` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStatusFetcher {
    client: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpStatusFetcher {
    /// # Errors
    /// If `config.config_id` is empty or the endpoint is not a valid URL.
    pub fn new(
        base_api_url: &str,
        config: &WidgetConfig,
    ) -> Result<Self, WidgetError> {
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: status_endpoint(base_api_url, &config.config_id)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn get(&self) -> PollResult {
        let response = match self
            .client
            .get(self.endpoint.clone())
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return transport_failure(&e),
        };

        let status = response.status();
        if !status.is_success() {
            return PollResult::failure(
                FailureKind::Protocol,
                format!("http-{}", status.as_u16()),
            );
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return transport_failure(&e),
        };

        match serde_json::from_slice(&body) {
            Ok(raw) => validate(&raw),
            Err(e) => PollResult::failure(
                FailureKind::Protocol,
                format!("decode error: {e}"),
            ),
        }
    }
}

impl StatusSource for HttpStatusFetcher {
    fn fetch(&self) -> impl Future<Output = PollResult> + Send {
        self.get()
    }
}

fn transport_failure(e: &reqwest::Error) -> PollResult {
    if e.is_timeout() {
        PollResult::failure(FailureKind::Network, "timeout")
    } else {
        PollResult::failure(
            FailureKind::Network,
            format!("network error: {e}"),
        )
    }
}

fn status_endpoint(
    base_api_url: &str,
    config_id: &str,
) -> Result<Url, WidgetError> {
    if config_id.trim().is_empty() {
        return Err(WidgetError::MissingConfigId);
    }

    let invalid = |reason: &str| WidgetError::InvalidEndpoint {
        url: base_api_url.to_string(),
        reason: reason.to_string(),
    };

    let mut url =
        Url::parse(base_api_url).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }

    url.path_segments_mut()
        .map_err(|()| invalid("URL cannot be a base"))?
        .pop_if_empty()
        .push("server-status")
        .push(config_id);

    Ok(url)
}
