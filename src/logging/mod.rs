use crate::logging::consts::DEFAULT_LOG_DIRECTIVE;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub mod consts;

/// Logs go to stderr; stdout carries the surface commands.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(
            DEFAULT_LOG_DIRECTIVE
                .parse()
                .expect("Default log directive is malformed."),
        )
    });
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
