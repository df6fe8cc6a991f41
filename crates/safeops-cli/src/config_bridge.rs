//! Bridge from `safeops_config::Config` to telemetry types.

use safeops_config::Config;
use safeops_telemetry::{LogConfig, LogFormat};

/// Build the logging configuration from the `[logging]` section.
pub(crate) fn to_log_config(cfg: &Config) -> LogConfig {
    let mut log_config =
        LogConfig::new(&cfg.logging.level).with_format(LogFormat::from_name(&cfg.logging.format));

    for directive in &cfg.logging.directives {
        log_config = log_config.with_directive(directive);
    }
    if !cfg.logging.timestamps {
        log_config = log_config.without_timestamps();
    }
    if cfg.logging.file_info {
        log_config = log_config.with_file_info();
    }
    if cfg.logging.span_events {
        log_config = log_config.with_span_events();
    }

    log_config
}
