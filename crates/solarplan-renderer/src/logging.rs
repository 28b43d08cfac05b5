use std::sync::Once;

static INIT: Once = Once::new();

/// Install an `env_logger` for host binaries. Idempotent.
///
/// `filter` follows the `env_logger` syntax (e.g. `"solarplan_renderer=debug"`);
/// without one, `RUST_LOG` is honoured, defaulting to `info`.
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        if let Some(filter) = filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }
        // Another logger may already be installed by the host.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
