use std::sync::{Arc, OnceLock};

use servitor_core::{Handler, Label, ServiceControl, ServiceExitCode, ServiceStatus};
use tracing::{debug, info};

use crate::{ControlHandler, DispatchError, RegistrationError, StatusBackend, Supervisor};

/// Backend for running outside a service manager: status reports go to the
/// log and stop requests come from process signals instead of the SCM.
#[derive(Default)]
pub struct ForegroundBackend {
    handler: OnceLock<ControlHandler>,
}

impl ForegroundBackend {
    /// Feeds one control code to the supervisor, if one is registered.
    pub fn deliver(&self, control: ServiceControl) {
        if let Some(handler) = self.handler.get() {
            handler(control);
        }
    }
}

impl StatusBackend for ForegroundBackend {
    fn register(
        &self,
        service_name: &str,
        handler: ControlHandler,
    ) -> Result<(), RegistrationError> {
        debug!(service_name, "registering foreground control handler");
        if self.handler.set(handler).is_err() {
            return Err(RegistrationError(
                "control handler already registered".into(),
            ));
        }
        Ok(())
    }

    fn report(&self, status: &ServiceStatus) {
        info!(
            state = %status.current_state,
            exit_code = ?status.exit_code,
            "service status"
        );
    }
}

/// Runs the service in the foreground on the current thread. On Unix,
/// SIGINT and SIGTERM are translated into stop requests; on Windows a
/// foreground run ends only when the application stops on its own.
/// Returns the terminal exit code.
pub fn run_in_foreground<A: Handler>(
    label: &Label,
    make_app: impl FnOnce() -> A,
) -> Result<ServiceExitCode, DispatchError> {
    let backend = Arc::new(ForegroundBackend::default());

    #[cfg(unix)]
    let (signals_handle, watcher) = {
        use signal_hook::consts::signal::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(DispatchError::Signals)?;
        let handle = signals.handle();
        let signal_backend = backend.clone();
        let watcher = std::thread::spawn(move || {
            for signal in signals.forever() {
                info!(signal, "stop signal received");
                signal_backend.deliver(ServiceControl::Stop);
            }
        });
        (handle, watcher)
    };

    let code = Supervisor::new(backend).launch(&label.application, make_app);

    #[cfg(unix)]
    {
        signals_handle.close();
        let _ = watcher.join();
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneShotApp {
        exit_code: u32,
    }

    impl Handler for OneShotApp {
        fn state(&self) -> u32 {
            0
        }

        fn run(&self) -> u32 {
            self.exit_code
        }

        fn stop(&self) {}
    }

    #[test]
    fn foreground_run_returns_the_app_exit_code() {
        let label: Label = "com.example.oneshot".parse().unwrap();
        let code = run_in_foreground(&label, || OneShotApp { exit_code: 0 }).unwrap();
        assert_eq!(code, ServiceExitCode::NO_ERROR);

        let code = run_in_foreground(&label, || OneShotApp { exit_code: 9 }).unwrap();
        assert_eq!(code, ServiceExitCode::ServiceSpecific(9));
    }

    #[test]
    fn deliveries_before_registration_are_dropped() {
        let backend = ForegroundBackend::default();
        backend.deliver(ServiceControl::Stop);
    }
}
