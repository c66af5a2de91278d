//! `env_logger` setup for the clock binary.

use std::sync::Once;

/// Used when neither the config file nor `RUST_LOG` names a filter. The
/// wgpu backend behind `pixels` is chatty at info.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives, e.g. `"clockface=debug"`.
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Picks the filter directives: config first, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`]. Blank values count as unset.
fn filter_directives(configured: Option<&str>, env: Option<String>) -> String {
    configured
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_owned)
        .or_else(|| env.filter(|f| !f.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned())
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has any effect, and a
/// logger installed by someone else is left in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = filter_directives(
            config.env_filter.as_deref(),
            std::env::var("RUST_LOG").ok(),
        );

        let installed = env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .format_timestamp_millis()
            .try_init()
            .is_ok();

        if installed {
            log::debug!("logger installed with filter {filter:?}");
        }
    });
}
