use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr subscriber. Stdout is reserved for command output, so
/// only warnings are shown unless `RUST_LOG` asks for more.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
