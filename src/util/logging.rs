// LetterLedger - util/logging.rs
//
// Structured logging with runtime-selectable debug mode.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - Caller flag: debug=true (embedding application's choice)
//
// Output: stderr. Never logs record contents beyond reference codes;
// subjects and counterparty names stay out of the logs.

use tracing_subscriber::EnvFilter;

/// Initialise the logging subsystem.
///
/// `debug` is true when the embedding application requests verbose
/// output. Priority: RUST_LOG env var > debug flag > default "info".
/// Call once at startup; repeated calls are ignored.
pub fn init(debug: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(super::constants::DEFAULT_LOG_LEVEL)
    };

    // try_init so embedders (and the test harness) can call through this
    // path more than once without panicking.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init();

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging initialised"
    );
}
