//! Logging to the javascript console.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_web::MakeWebConsoleWriter;

static INIT: Once = Once::new();

/// Initialize logging. Safe to call more than once; only the first call
/// installs the subscriber.
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::new("error,widget=debug,payloads=debug");

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_line_number(true)
            .with_ansi(false) // Only partially supported across browsers
            .without_time() // std::time is not available in browsers
            .with_writer(MakeWebConsoleWriter::new().with_pretty_level())
            .with_level(false);

        // The host page may already have installed a subscriber
        if tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .is_ok()
        {
            tracing::info!("Initialized logs");
        }
    });
}
