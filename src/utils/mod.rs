pub mod build_info;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber. `RUST_LOG` adds further directives.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("kakeibo_core=info".parse().unwrap());

        // stdout belongs to command output
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}
