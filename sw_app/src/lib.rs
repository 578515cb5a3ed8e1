use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::de::DeserializeOwned;

pub trait ContextProvider<Config> {
    fn new(config: Config) -> impl Future<Output = Self>;
}

/// Initialize the application context with configuration from a TOML file
/// and environment variables.
/// The configuration is extracted using figment.
///
/// # Arguments
/// * `env_prefix` - Prefix of the environment variables belonging to this
///   binary, e.g. `WIDGET_HOST_`.
///
/// # Returns
/// The application context with the configuration as specified by the trait.
///
/// # Errors
/// If the configuration cannot be extracted from the file or the
/// environment variables.
///
pub async fn create_app_context<A, Config>(
    env_prefix: &str,
) -> Result<A, figment::Error>
where
    A: ContextProvider<Config>,
    Config: DeserializeOwned,
{
    init_tracing();

    let config: Config = load_config(env_prefix)?;

    let context = A::new(config).await;

    Ok(context)
}

/// Install the global tracing subscriber. Safe to call more than once; only
/// the first call has an effect.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        // allow log level to be overridden by RUST_LOG env var
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        // remove the name of the module from every log entry
        .with_target(false)
        .try_init();
}

/// Extract `Config` from `<prefix>CONFIG` (a TOML file path, defaulting to
/// the lowercased prefix plus `.toml`) merged with `<prefix>*` environment
/// variables. Environment variables win; `__` separates nested keys.
///
/// # Errors
/// If a required key is missing or a value has the wrong type.
pub fn load_config<Config: DeserializeOwned>(
    env_prefix: &str,
) -> Result<Config, figment::Error> {
    let config_file = std::env::var(format!("{env_prefix}CONFIG"))
        .unwrap_or_else(|_| default_config_file(env_prefix));

    tracing::debug!(
        "Loading configuration from {config_file} and {env_prefix}* env"
    );

    Figment::new()
        .merge(Toml::file(config_file))
        .merge(Env::prefixed(env_prefix).split("__"))
        .extract()
}

fn default_config_file(env_prefix: &str) -> String {
    format!("{}.toml", env_prefix.trim_end_matches('_').to_lowercase())
}
