use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::errors::{HookscopeError, Result};

/// Level used when neither `RUST_LOG` nor the caller picks one.
pub const DEFAULT_LEVEL: &str = "info";

/// Filter directives for `level`: hookscope crates at `level`, HTTP plumbing at `warn`.
pub fn default_directives(level: Option<&str>) -> String {
    let level = level.unwrap_or(DEFAULT_LEVEL);
    format!("{level},hyper=warn,reqwest=warn,tower_http={level}")
}

/// Installs the fmt subscriber used by the service and the CLI.
///
/// Events go to stderr so that `hookscope --json` output stays clean on
/// stdout. `RUST_LOG` overrides the default directives.
pub fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init()
        .map_err(|err| HookscopeError::GeneralError(err.to_string()))?;

    Ok(())
}
