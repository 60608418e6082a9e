//! Log output for USPy front-ends.
//!
//! Front-ends call [`init_tracing`] once at startup; library code only emits
//! events. Everything is written to stderr so logs never mix with the page
//! printed on stdout.

use tracing_subscriber::{
    EnvFilter,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use crate::config::Environment;

/// Directives used when `RUST_LOG` is not set
pub fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Development => "debug,hyper=info,hyper_util=info,reqwest=info",
        Environment::Production => "info,reqwest=warn,hyper=warn,hyper_util=warn",
    }
}

/// Install the global subscriber.
///
/// Development: pretty, with file and line. Production: one JSON object per
/// event, with the current `api_request` span (operation, request id)
/// flattened in. `RUST_LOG` overrides the default directives.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(env: &Environment) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let pretty = env.is_development().then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .pretty()
    });

    let json = (!env.is_development()).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_span_list(false)
            .flatten_event(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .try_init()?;

    tracing::debug!(?env, "logging ready");
    Ok(())
}
