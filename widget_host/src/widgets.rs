use std::{collections::HashMap, sync::Arc};

use tracing::{error, warn};
use types::WidgetConfig;
use widget_runtime::{
    HttpStatusFetcher, PollLoop, WatchSurface, WidgetError, render_loading,
    validate_config,
};

pub type WidgetLoop = PollLoop<HttpStatusFetcher, Arc<WatchSurface>>;

/// Read side of a running widget, shared with the HTTP handlers.
#[derive(Debug, Clone)]
pub struct WidgetView {
    pub config: WidgetConfig,
    pub surface: Arc<WatchSurface>,
}

/// All widgets served by this host, each driven by its own poll loop.
pub struct Widgets {
    views: Arc<HashMap<String, WidgetView>>,
    loops: Vec<WidgetLoop>,
}

impl Widgets {
    /// Start a poll loop for every config. Invalid or duplicate configs are
    /// logged and skipped; the rest still run.
    pub fn launch(api_base_url: &str, configs: Vec<WidgetConfig>) -> Self {
        let mut views = HashMap::new();
        let mut loops = Vec::new();

        for config in configs {
            let config_id = config.config_id.clone();

            if views.contains_key(&config_id) {
                warn!(config_id, "Duplicate widget config id, skipping");
                continue;
            }

            match launch_widget(api_base_url, config) {
                Ok((view, poll_loop)) => {
                    views.insert(config_id, view);
                    loops.push(poll_loop);
                }
                Err(e) => {
                    error!(config_id, "Failed to start widget: {}", e);
                }
            }
        }

        Self {
            views: Arc::new(views),
            loops,
        }
    }

    #[must_use]
    pub fn views(&self) -> Arc<HashMap<String, WidgetView>> {
        Arc::clone(&self.views)
    }

    pub fn stop_all(&mut self) {
        for poll_loop in &mut self.loops {
            poll_loop.stop();
        }
    }
}

fn launch_widget(
    api_base_url: &str,
    config: WidgetConfig,
) -> Result<(WidgetView, WidgetLoop), WidgetError> {
    validate_config(&config)?;

    let fetcher = HttpStatusFetcher::new(api_base_url, &config)?;
    let surface = Arc::new(WatchSurface::new(render_loading(&config)));

    let mut poll_loop =
        PollLoop::new(config.clone(), fetcher, Arc::clone(&surface));
    poll_loop.start()?;

    Ok((WidgetView { config, surface }, poll_loop))
}
