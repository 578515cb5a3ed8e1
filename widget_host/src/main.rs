use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

mod config;
mod widgets;

use config::{Config, ENV_PREFIX};
use widgets::{WidgetView, Widgets};

struct AppContext {
    config: Config,
    widgets: Widgets,
}

impl sw_app::ContextProvider<Config> for AppContext {
    async fn new(config: Config) -> Self {
        let widgets =
            Widgets::launch(&config.api_base_url, config.widgets.clone());

        Self { config, widgets }
    }
}

#[derive(Clone)]
struct AppState {
    widgets: Arc<HashMap<String, WidgetView>>,
}

#[derive(Debug, Error)]
enum ApiError {
    #[error("Widget configuration not found")]
    WidgetNotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Self::WidgetNotFound => StatusCode::NOT_FOUND,
        };

        (status, Json(serde_json::json!({ "error": self.to_string() })))
            .into_response()
    }
}

impl AppState {
    fn widget(&self, config_id: &str) -> Result<&WidgetView, ApiError> {
        self.widgets.get(config_id).ok_or(ApiError::WidgetNotFound)
    }
}

async fn handle_health() -> &'static str {
    "ok"
}

/// Latest markup wrapped in a standalone document, for iframe embeds.
async fn handle_get_widget_page(
    State(state): State<AppState>,
    Path(config_id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let widget = state.widget(&config_id)?;

    Ok(Html(widget_page(
        &widget.surface.current(),
        widget.config.refresh_interval_seconds,
    )))
}

async fn handle_get_widget_markup(
    State(state): State<AppState>,
    Path(config_id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let widget = state.widget(&config_id)?;

    Ok(Html(widget.surface.current()))
}

fn widget_page(markup: &str, refresh_interval_seconds: i64) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" \
         content=\"width=device-width, initial-scale=1.0\">\n\
         <meta http-equiv=\"refresh\" content=\"{refresh_interval_seconds}\">\n\
         <title>Server Status</title>\n\
         </head>\n\
         <body style=\"margin: 0; background: transparent;\">\n\
         <div id=\"widget\">{markup}</div>\n\
         </body>\n\
         </html>\n"
    )
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/widget/{config_id}", get(handle_get_widget_page))
        .route("/widget/{config_id}/markup", get(handle_get_widget_markup))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the application context (which also initializes tracing)
    let mut context =
        sw_app::create_app_context::<AppContext, Config>(ENV_PREFIX).await?;

    let app = router(AppState {
        widgets: context.widgets.views(),
    });

    let listener =
        tokio::net::TcpListener::bind(&context.config.bind_address).await?;
    info!(
        "Serving {} widgets on http://{}",
        context.widgets.views().len(),
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    context.widgets.stop_all();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use types::WidgetConfig;
    use widget_runtime::{OutputSurface, WatchSurface};

    fn state() -> (AppState, Arc<WatchSurface>) {
        let config = WidgetConfig {
            refresh_interval_seconds: 15,
            ..WidgetConfig::new("arena", "192.0.2.10", 27015)
        };
        let surface =
            Arc::new(WatchSurface::new("<div>loading</div>".to_string()));
        let view = WidgetView {
            config,
            surface: Arc::clone(&surface),
        };

        (
            AppState {
                widgets: Arc::new(HashMap::from([("arena".to_string(), view)])),
            },
            surface,
        )
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = state();
        assert_eq!(
            get(router(state), "/health").await,
            (StatusCode::OK, "ok".to_string())
        );
    }

    #[tokio::test]
    async fn test_markup_follows_surface() {
        let (state, surface) = state();

        let (status, body) =
            get(router(state.clone()), "/widget/arena/markup").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<div>loading</div>");

        surface.write("<div>Arena</div>".to_string());

        let (_, body) = get(router(state), "/widget/arena/markup").await;
        assert_eq!(body, "<div>Arena</div>");
    }

    #[tokio::test]
    async fn test_widget_page() {
        let (state, _) = state();

        let (status, body) = get(router(state), "/widget/arena").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("<meta http-equiv=\"refresh\" content=\"15\">"));
        assert!(body.contains("<div id=\"widget\"><div>loading</div></div>"));
    }

    #[tokio::test]
    async fn test_unknown_widget() {
        let (state, _) = state();

        for uri in ["/widget/missing", "/widget/missing/markup"] {
            let (status, body) = get(router(state.clone()), uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, r#"{"error":"Widget configuration not found"}"#);
        }
    }
}
