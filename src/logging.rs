use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

pub const LOG_ENV: &str = "SITECFG_LOG";

/// Installs the stderr subscriber, filtered by `SITECFG_LOG` (defaults to `info`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt::SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE)
        .compact()
        .init();
}
