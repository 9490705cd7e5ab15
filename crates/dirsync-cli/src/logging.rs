use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the stderr tracing subscriber.
///
/// An explicit `level` wins; otherwise `RUST_LOG` is used, falling back to
/// `warn`.
pub fn init(level: Option<&str>) -> anyhow::Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
