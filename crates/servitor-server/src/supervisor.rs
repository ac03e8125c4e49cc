use std::sync::{Arc, Mutex};
use std::time::Duration;

use arc_swap::ArcSwapOption;
use enumflags2::BitFlags;
use servitor_core::{
    ControlAccept, Handler, ServiceControl, ServiceExitCode, ServiceState, ServiceStatus,
};
use tracing::{debug, error, info, warn};

use crate::RegistrationError;

/// Wait hint declared while start is pending. The service manager may mark
/// the service unresponsive if startup exceeds it.
const START_WAIT_HINT: Duration = Duration::from_secs(3);

/// Callback a [`StatusBackend`] invokes when the service manager delivers a
/// control code. Holds a weak reference to the supervisor internals, so
/// deliveries arriving after teardown are dropped instead of dereferencing
/// freed state.
pub type ControlHandler = Box<dyn Fn(ServiceControl) + Send + Sync>;

/// The OS boundary of the supervisor: control handler registration and
/// status report delivery.
///
/// `report` is infallible at this level. A service has no channel to the
/// operator other than the status pipe itself, so backends log delivery
/// failures rather than propagating them.
pub trait StatusBackend: Send + Sync + 'static {
    fn register(
        &self,
        service_name: &str,
        handler: ControlHandler,
    ) -> Result<(), RegistrationError>;

    fn report(&self, status: &ServiceStatus);
}

impl<B: StatusBackend> StatusBackend for Arc<B> {
    fn register(
        &self,
        service_name: &str,
        handler: ControlHandler,
    ) -> Result<(), RegistrationError> {
        (**self).register(service_name, handler)
    }

    fn report(&self, status: &ServiceStatus) {
        (**self).report(status)
    }
}

/// Mediates between the service manager's control protocol and a hosted
/// application's run/stop/state lifecycle.
///
/// Two threads touch this state: the control thread that called
/// [`Supervisor::launch`] and blocks inside [`Handler::run`], and whatever
/// thread the backend delivers control codes on.
pub struct Supervisor<A: Handler, B: StatusBackend> {
    shared: Arc<Shared<A, B>>,
}

struct Shared<A, B> {
    backend: B,
    /// Hosted application handle. Published just before the Running report
    /// so a stop request can never be accepted while it is absent; cleared
    /// once `run` returns. The control thread reads it lock-free.
    app: ArcSwapOption<A>,
    /// Guards the checkpoint/state read-modify-write shared by both threads
    /// and serializes reports to the backend.
    progress: Mutex<Progress>,
}

struct Progress {
    state: ServiceState,
    checkpoint: u32,
}

impl<A: Handler, B: StatusBackend> Shared<A, B> {
    fn set_status(&self, state: ServiceState, exit_code: ServiceExitCode, wait_hint: Duration) {
        let mut progress = self.progress.lock().unwrap();
        self.report_locked(&mut progress, state, exit_code, wait_hint);
    }

    fn report_locked(
        &self,
        progress: &mut Progress,
        state: ServiceState,
        exit_code: ServiceExitCode,
        wait_hint: Duration,
    ) {
        progress.state = state;
        let checkpoint = if state.is_pending() {
            let current = progress.checkpoint;
            progress.checkpoint += 1;
            current
        } else {
            0
        };
        let controls_accepted = if state == ServiceState::StartPending {
            // The service manager must not be able to stop a service that
            // has not finished initializing.
            BitFlags::empty()
        } else {
            ControlAccept::Stop.into()
        };
        let status = ServiceStatus {
            current_state: state,
            controls_accepted,
            exit_code,
            checkpoint,
            wait_hint,
        };
        info!(state = %state, ?exit_code, checkpoint, "reporting service status");
        self.backend.report(&status);
    }

    fn control(&self, control: ServiceControl) {
        match control {
            ServiceControl::Stop => self.request_stop(),
            // Liveness poll; the only obligation is to return promptly.
            ServiceControl::Interrogate => {}
            ServiceControl::Other(code) => {
                debug!(code, "ignoring unsupported control code");
            }
        }
    }

    /// Runs on the control-delivery thread, never on the thread blocked in
    /// `run`. Must not wait on anything.
    fn request_stop(&self) {
        {
            let mut progress = self.progress.lock().unwrap();
            match progress.state {
                ServiceState::Running | ServiceState::StopPending => {
                    self.report_locked(
                        &mut progress,
                        ServiceState::StopPending,
                        ServiceExitCode::NO_ERROR,
                        Duration::ZERO,
                    );
                }
                state => {
                    warn!(state = %state, "stop requested while not running, ignoring");
                    return;
                }
            }
        }

        if let Some(app) = self.app.load_full() {
            app.stop();
        }

        // Acknowledgment pulse: re-report the current state unchanged. The
        // transition to Stopped happens on the launch thread once `run`
        // returns; if it already has, the terminal report stands.
        let mut progress = self.progress.lock().unwrap();
        if progress.state == ServiceState::StopPending {
            self.report_locked(
                &mut progress,
                ServiceState::StopPending,
                ServiceExitCode::NO_ERROR,
                Duration::ZERO,
            );
        }
    }
}

impl<A: Handler, B: StatusBackend> Supervisor<A, B> {
    pub fn new(backend: B) -> Self {
        Self {
            shared: Arc::new(Shared {
                backend,
                app: ArcSwapOption::empty(),
                progress: Mutex::new(Progress {
                    state: ServiceState::StartPending,
                    checkpoint: 1,
                }),
            }),
        }
    }

    /// Runs the service to completion, blocking inside the application's
    /// `run` until it returns. Control codes arrive concurrently through
    /// the backend. Returns the terminal exit code reported to the service
    /// manager.
    pub fn launch(self, service_name: &str, make_app: impl FnOnce() -> A) -> ServiceExitCode {
        let weak = Arc::downgrade(&self.shared);
        let handler: ControlHandler = Box::new(move |control| {
            if let Some(shared) = weak.upgrade() {
                shared.control(control);
            }
        });

        info!(service_name, "registering service control handler");
        if let Err(e) = self.shared.backend.register(service_name, handler) {
            error!("{e}");
            let code = ServiceExitCode::CONTROLLER_CONNECT_FAILURE;
            self.shared
                .set_status(ServiceState::Stopped, code, Duration::ZERO);
            return code;
        }

        self.shared.set_status(
            ServiceState::StartPending,
            ServiceExitCode::NO_ERROR,
            START_WAIT_HINT,
        );

        let app = Arc::new(make_app());
        let probe = app.state();
        if probe != 0 {
            error!(code = probe, "application readiness probe failed");
            let code = ServiceExitCode::APP_INIT_FAILURE;
            self.shared
                .set_status(ServiceState::Stopped, code, Duration::ZERO);
            return code;
        }

        self.shared.app.store(Some(app.clone()));
        self.shared.set_status(
            ServiceState::Running,
            ServiceExitCode::NO_ERROR,
            Duration::ZERO,
        );

        let exit = app.run();
        self.shared.app.store(None);
        drop(app);

        let code = if exit == 0 {
            info!("application stopped cleanly");
            ServiceExitCode::NO_ERROR
        } else {
            error!(code = exit, "application stopped with an error");
            ServiceExitCode::ServiceSpecific(exit)
        };
        self.shared
            .set_status(ServiceState::Stopped, code, Duration::ZERO);
        code
    }
}
