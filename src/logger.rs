//! Logger setup shared by the binaries

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Initialize the global logger once
///
/// `Info` for this crate and `Warn` for dependencies; `RUST_LOG` overrides both.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("slotbucket", LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        // Tests may have installed a logger already
        let _ = builder.try_init();
    });
}

#[cfg(test)]
mod tests {
    use log::{Level, debug, info, log_enabled};

    use super::*;

    #[test]
    fn test_logger_initializes_twice() {
        initialize_logger();
        initialize_logger();
        debug!("Debug message in test");
        info!("Info message in test");
    }

    #[test]
    fn test_crate_logs_at_info_by_default() {
        initialize_logger();
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(log_enabled!(Level::Info));
            assert!(!log_enabled!(Level::Debug));
        }
    }
}
