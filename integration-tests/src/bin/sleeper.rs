use std::process::ExitCode;

use integration_tests::{SleeperApp, label};
use servitor::ServiceEntry;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    ServiceEntry::new(label(), SleeperApp::new)
        .with_display_name("Sleeper Example")
        .with_description("Does nothing but sleeps and waits for the service stop signal.")
        .run()
}
