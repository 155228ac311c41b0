//! Logging utilities and structured logging support

use std::sync::Once;

pub use log::{debug, error, info, trace, warn};

static INIT: Once = Once::new();

/// Initialize the logging system from `RUST_LOG`.
///
/// Subsequent calls are ignored, as are loggers installed by someone else.
pub fn init() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_default_env().try_init();
    });
}

/// Initialize the logging system with an explicit `env_logger` filter
/// (e.g. `"editor_render=debug"`), ignoring `RUST_LOG`.
pub fn init_with_filter(filter: &str) {
    INIT.call_once(|| {
        let _ = env_logger::Builder::new().parse_filters(filter).try_init();
    });
}
