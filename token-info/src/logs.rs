use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};

/// Installs a stderr logger. Stdout is reserved for the command output.
/// The level is read from `RUST_LOG` and defaults to `WARN`.
pub fn init_logs() -> Result<(), anyhow::Error> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        );

    tracing_subscriber::registry().with(stderr_layer).try_init()?;

    Ok(())
}
