//! Tracing subscriber setup for the command-line entry point.

use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
  if verbose {
    "html_select_assets=debug"
  } else {
    "warn"
  }
}

/// Install a compact stderr subscriber. `RUST_LOG` takes precedence over `verbose`.
///
/// Installing twice is a no-op.
pub fn init_tracing(verbose: bool) {
  let env_filter = EnvFilter::try_from_default_env()
    .or_else(|_| EnvFilter::try_new(default_directive(verbose)))
    .unwrap_or_else(|_| EnvFilter::new("warn"));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .compact()
    .try_init();
}
