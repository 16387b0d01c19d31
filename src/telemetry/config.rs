pub fn logs_are_json() -> bool {
    matches!(std::env::var("FEEDGEN_LOG_FORMAT").as_deref(), Ok("json"))
}

/// Initialize tracing/logging according to RUST_LOG and FEEDGEN_LOG_FORMAT.
/// - Defaults to `info` if `RUST_LOG` is unset
/// - Supports `FEEDGEN_LOG_FORMAT=json` for JSON logs (stderr)
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    use tracing_subscriber::prelude::*; // for .with()

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout is reserved for the confirmation line / JSON envelope
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let builder = tracing_subscriber::registry().with(filter);

    if logs_are_json() {
        let _ = builder.with(fmt_layer.json().flatten_event(true)).try_init();
    } else {
        let _ = builder.with(fmt_layer.compact()).try_init();
    }
}
