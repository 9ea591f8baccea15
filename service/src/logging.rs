use crate::config::Config;
use log::LevelFilter;
use simplelog::{self, CombinedLogger, ConfigBuilder, SharedLogger};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Modules to filter out from logging when not in Trace mode.
/// These are typically verbose dependencies that clutter normal log output.
const FILTERED_MODULES: &[&str] = &["sqlx", "sea_orm", "tower", "tracing", "hyper", "axum"];

pub struct Logger {}

impl Logger {
    /// Initializes the global logger with configuration based on the provided Config.
    ///
    /// When the log level is set to Trace, all logs including dependency logs are shown.
    /// For all other log levels, verbose dependency logs are filtered out.
    ///
    /// With `log_file_enabled`, ERROR records are additionally appended to `log_file_path`.
    pub fn init_logger(config: &Config) {
        let log_level_filter = Self::convert_level_filter(config.log_level_filter);
        let apply_filters = Self::should_filter_dependencies(config.log_level_filter);

        let mut loggers: Vec<Box<dyn SharedLogger>> = vec![simplelog::TermLogger::new(
            log_level_filter,
            Self::build_log_config(apply_filters),
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        )];

        if config.log_file_enabled {
            match Self::open_log_file(&config.log_file_path) {
                Ok(file) => loggers.push(simplelog::WriteLogger::new(
                    simplelog::LevelFilter::Error,
                    Self::build_log_config(true),
                    file,
                )),
                // The terminal logger is not installed yet, so stderr is the only outlet.
                Err(e) => eprintln!(
                    "Unable to open log file {}: {e}",
                    config.log_file_path.display()
                ),
            }
        }

        CombinedLogger::init(loggers).expect("Failed to start simplelog");

        log::info!(
            "Logging: level={}, file_logging={}",
            config.log_level_filter,
            config.log_file_enabled
        );
    }

    /// Opens the error log file for appending, creating parent directories as needed.
    fn open_log_file(path: &Path) -> io::Result<File> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    }

    /// Converts log::LevelFilter to simplelog::LevelFilter.
    fn convert_level_filter(level: LevelFilter) -> simplelog::LevelFilter {
        match level {
            LevelFilter::Off => simplelog::LevelFilter::Off,
            LevelFilter::Error => simplelog::LevelFilter::Error,
            LevelFilter::Warn => simplelog::LevelFilter::Warn,
            LevelFilter::Info => simplelog::LevelFilter::Info,
            LevelFilter::Debug => simplelog::LevelFilter::Debug,
            LevelFilter::Trace => simplelog::LevelFilter::Trace,
        }
    }

    /// Determines whether dependency logging should be filtered.
    ///
    /// Returns `false` for Trace level (show all logs), `true` for all other levels.
    fn should_filter_dependencies(level: LevelFilter) -> bool {
        level != LevelFilter::Trace
    }

    /// Builds a simplelog Config with optional module filtering.
    fn build_log_config(apply_filters: bool) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        if apply_filters {
            for module in FILTERED_MODULES {
                builder.add_filter_ignore_str(module);
            }
        }

        builder.build()
    }
}
