//! # Logging
//!
//! Tracing setup for the harvester: a level filter from configuration with
//! `RUST_LOG` override support, noisy dependency targets held down, console
//! output in plain or JSON lines form, and an optional daily-rolled log
//! file.

use std::sync::Mutex;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub use super::config::LoggingConfig;

/// Dependency targets that flood lower levels; suppressed unless the
/// configured level is `trace` or `RUST_LOG` says otherwise.
const NOISY_TARGETS: [&str; 5] = [
    "reqwest=info",
    "hyper=warn",
    "h2=warn",
    "html5ever=warn",
    "selectors=warn",
];

// Keeps the non-blocking file writer alive for the process lifetime.
static LOG_GUARDS: Lazy<Mutex<Vec<WorkerGuard>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Initializes the global tracing subscriber from the logging settings.
///
/// `RUST_LOG` overrides the configured level and suppressions entirely,
/// e.g. `RUST_LOG="debug,reqwest=debug"` to watch request traffic.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = EnvFilter::new(&config.level);
        if !config.level.eq_ignore_ascii_case("trace") {
            for directive in NOISY_TARGETS {
                filter = filter.add_directive(directive.parse().expect("directive is valid"));
            }
        }
        filter
    });

    let registry = Registry::default().with(env_filter);

    if config.file_output {
        std::fs::create_dir_all(&config.log_dir).with_context(|| {
            format!("failed to create log directory {:?}", config.log_dir)
        })?;
        let file_appender = rolling::daily(&config.log_dir, "wons-harvester.log");
        let (file_writer, guard) = non_blocking(file_appender);
        if let Ok(mut guards) = LOG_GUARDS.lock() {
            guards.push(guard);
        }

        if config.json_format {
            let console_layer = fmt::Layer::new()
                .with_writer(std::io::stdout)
                .with_target(false);
            let file_layer = fmt::Layer::new()
                .json()
                .with_writer(file_writer)
                .with_ansi(false);
            registry.with(file_layer).with(console_layer).try_init()?;
        } else {
            let console_layer = fmt::Layer::new()
                .with_writer(std::io::stdout)
                .with_target(false);
            let file_layer = fmt::Layer::new()
                .with_writer(file_writer)
                .with_target(false)
                .with_ansi(false);
            registry.with(file_layer).with(console_layer).try_init()?;
        }
    } else if config.json_format {
        let console_layer = fmt::Layer::new()
            .json()
            .with_writer(std::io::stdout)
            .with_ansi(false);
        registry.with(console_layer).try_init()?;
    } else {
        let console_layer = fmt::Layer::new()
            .with_writer(std::io::stdout)
            .with_target(false);
        registry.with(console_layer).try_init()?;
    }

    info!(
        "Logging initialized: level={}, json={}, file={}",
        config.level, config.json_format, config.file_output
    );
    Ok(())
}
