use tracing_subscriber::EnvFilter;

// installs the global subscriber, RUST_LOG overrides the default info level
pub fn setup_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        // disable printing the name of the module in every log line.
        .with_target(false);
    if json {
        // json lines are read by log shippers, ansi color codes would end up in the payload.
        builder.with_ansi(false).json().init();
    } else {
        builder.init();
    }
}
