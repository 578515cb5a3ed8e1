use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use types::{PollResult, WidgetConfig};

use crate::{OutputSurface, StatusSource, WidgetError, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Drives one widget: fetch, render and write on a fixed interval.
///
/// Lifecycle is `Idle -> Running -> Stopped`. A stopped loop cannot be
/// restarted; build a new one instead. Ticks run one after another on a
/// single task, so at most one fetch is in flight and a slow response can
/// never overwrite a newer render. Timer ticks missed while a fetch is in
/// flight are skipped.
pub struct PollLoop<S, O> {
    config: Arc<WidgetConfig>,
    source: Arc<S>,
    surface: Arc<O>,
    state: LoopState,
    cancel: CancellationToken,
    gate: Arc<WriteGate>,
    task: Option<JoinHandle<()>>,
}

impl<S, O> PollLoop<S, O>
where
    S: StatusSource,
    O: OutputSurface,
{
    pub fn new(config: WidgetConfig, source: S, surface: O) -> Self {
        Self {
            config: Arc::new(config),
            source: Arc::new(source),
            surface: Arc::new(surface),
            state: LoopState::Idle,
            cancel: CancellationToken::new(),
            gate: Arc::new(WriteGate::default()),
            task: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> LoopState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Poll once immediately, then every `refresh_interval_seconds`.
    ///
    /// Calling `start` on a running loop does nothing.
    ///
    /// # Errors
    /// A configuration error, or calling from outside a tokio runtime
    /// ([`WidgetError::NoRuntime`]), leaves the loop `Idle`. A stopped loop
    /// returns [`WidgetError::LoopStopped`].
    pub fn start(&mut self) -> Result<(), WidgetError> {
        match self.state {
            LoopState::Running => {
                debug!(
                    config_id = %self.config.config_id,
                    "poll loop already running"
                );
                return Ok(());
            }
            LoopState::Stopped => return Err(WidgetError::LoopStopped),
            LoopState::Idle => {}
        }

        let period = validate_config(&self.config)?;
        let runtime =
            Handle::try_current().map_err(|_| WidgetError::NoRuntime)?;

        let worker = Worker {
            config: Arc::clone(&self.config),
            source: Arc::clone(&self.source),
            surface: Arc::clone(&self.surface),
            cancel: self.cancel.clone(),
            gate: Arc::clone(&self.gate),
        };
        self.task = Some(runtime.spawn(worker.run(period)));
        self.state = LoopState::Running;

        info!(
            config_id = %self.config.config_id,
            refresh_interval_seconds = self.config.refresh_interval_seconds,
            "poll loop started"
        );

        Ok(())
    }

    /// Stop polling. Any fetch still in flight is abandoned and its result
    /// is never written. Safe to call in any state.
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }

        self.gate.close();
        self.cancel.cancel();
        self.state = LoopState::Stopped;

        info!(config_id = %self.config.config_id, "poll loop stopped");
    }

    /// Wait for the background task to exit. Returns immediately if the loop
    /// was never started; otherwise only completes after [`Self::stop`].
    pub async fn wait(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(
                    config_id = %self.config.config_id,
                    "poll loop task failed: {}", e
                );
            }
        }
    }
}

impl<S, O> Drop for PollLoop<S, O> {
    fn drop(&mut self) {
        self.gate.close();
        self.cancel.cancel();
    }
}

/// Check the parts of `config` a loop depends on and return the tick period.
///
/// # Errors
/// If the refresh interval is below one second, the config id is empty, the
/// server port is zero, or a styling string could break out of its CSS
/// declaration.
pub fn validate_config(
    config: &WidgetConfig,
) -> Result<Duration, WidgetError> {
    let seconds = u64::try_from(config.refresh_interval_seconds)
        .ok()
        .filter(|seconds| *seconds >= 1)
        .ok_or(WidgetError::InvalidRefreshInterval(
            config.refresh_interval_seconds,
        ))?;

    if config.config_id.trim().is_empty() {
        return Err(WidgetError::MissingConfigId);
    }

    if config.server_port == 0 {
        return Err(WidgetError::InvalidPort);
    }

    let styles = [
        ("accent_color", Some(&config.accent_color)),
        ("font_family", Some(&config.font_family)),
        ("border_style", Some(&config.border_style)),
        ("background_color", config.background_color.as_ref()),
        ("text_color", config.text_color.as_ref()),
    ];
    for (field, value) in styles {
        if let Some(value) = value.filter(|v| !is_plain_css_value(v)) {
            return Err(WidgetError::InvalidStyleValue {
                field,
                value: value.clone(),
            });
        }
    }

    Ok(Duration::from_secs(seconds))
}

/// Style values are interpolated into a single `style` attribute; anything
/// that ends a declaration or opens a block is refused.
fn is_plain_css_value(value: &str) -> bool {
    !value.contains([';', '{', '}'])
}

/// Closed once by `stop`; writes only land while it is open. Checking and
/// writing happen under the same lock, so nothing is written after `stop`
/// returns.
#[derive(Debug)]
struct WriteGate {
    open: Mutex<bool>,
}

impl Default for WriteGate {
    fn default() -> Self {
        Self {
            open: Mutex::new(true),
        }
    }
}

impl WriteGate {
    fn close(&self) {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }

    fn write<O: OutputSurface>(&self, surface: &O, markup: String) -> bool {
        let open = self.open.lock().unwrap_or_else(PoisonError::into_inner);
        if *open {
            surface.write(markup);
        }
        *open
    }
}

struct Worker<S, O> {
    config: Arc<WidgetConfig>,
    source: Arc<S>,
    surface: Arc<O>,
    cancel: CancellationToken,
    gate: Arc<WriteGate>,
}

impl<S, O> Worker<S, O>
where
    S: StatusSource,
    O: OutputSurface,
{
    async fn run(self, period: Duration) {
        let config_id = self.config.config_id.as_str();
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut failure_streak: u32 = 0;

        loop {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let result = tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                result = self.source.fetch() => result,
            };

            match &result {
                PollResult::Success(_) => {
                    if failure_streak > 0 {
                        info!(
                            config_id,
                            failure_streak, "server status recovered"
                        );
                    }
                    failure_streak = 0;
                    debug!(config_id, "server status updated");
                }
                PollResult::Failure(failure) => {
                    failure_streak = failure_streak.saturating_add(1);
                    warn!(
                        config_id,
                        kind = %failure.kind,
                        reason = %failure.reason,
                        failure_streak,
                        "server status poll failed"
                    );
                }
            }

            let markup = render(&result, &self.config);
            if !self.gate.write(self.surface.as_ref(), markup) {
                break;
            }
        }

        debug!(config_id, "poll loop exited");
    }
}
