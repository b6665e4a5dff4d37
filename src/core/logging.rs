//! Logger setup for the binary.

/// Install the global logger. `RUST_LOG` wins; otherwise `warn`, or `debug`
/// when `verbose` is set. A second call is a no-op.
pub fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{}] {} [{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
}
