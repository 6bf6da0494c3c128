use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::Environment;

/// Initialize tracing for the given environment.
///
/// - Production: flattened JSON lines, `warn` by default.
/// - Development: pretty output, `debug` by default.
///
/// `RUST_LOG` overrides the default filter. Calling this more than once is a
/// no-op after the first successful call, which keeps tests happy.
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new("warn,catalog_server=info")
        } else {
            EnvFilter::new("debug,hyper=info,reqwest=info")
        }
    });

    let result = if is_production {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!("Tracing initialized. Environment: {:?}", environment),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}
