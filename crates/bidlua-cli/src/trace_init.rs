use std::io;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the stderr subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let default = if verbose { "bidlua_core=debug" } else { "warn" };
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_target(true)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
            )
            .init();
    });
}
