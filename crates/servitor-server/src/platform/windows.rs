use std::ffi::OsString;
use std::sync::mpsc;
use std::sync::{Mutex, OnceLock};

use servitor_core::{
    ControlAccept, Handler, Label, ServiceControl, ServiceExitCode, ServiceState, ServiceStatus,
};
use tracing::error;
use windows_service::service::{
    ServiceControl as WinServiceControl, ServiceControlAccept,
    ServiceExitCode as WinServiceExitCode, ServiceState as WinServiceState,
    ServiceStatus as WinServiceStatus, ServiceType,
};
use windows_service::service_control_handler::{
    self, ServiceControlHandlerResult, ServiceStatusHandle,
};
use windows_service::{define_windows_service, service_dispatcher};

use crate::{ControlHandler, DispatchError, RegistrationError, StatusBackend, Supervisor};

const ERROR_FAILED_SERVICE_CONTROLLER_CONNECT: i32 = 1063;

/// Status backend backed by the Windows service control manager.
#[derive(Default)]
pub struct ScmBackend {
    handle: Mutex<Option<ServiceStatusHandle>>,
}

impl StatusBackend for ScmBackend {
    fn register(
        &self,
        service_name: &str,
        handler: ControlHandler,
    ) -> Result<(), RegistrationError> {
        let scm_handler = move |control: WinServiceControl| -> ServiceControlHandlerResult {
            match control {
                WinServiceControl::Stop => {
                    handler(ServiceControl::Stop);
                    ServiceControlHandlerResult::NoError
                }
                // Always NoError: the service manager only needs the
                // callback to return promptly.
                WinServiceControl::Interrogate => {
                    handler(ServiceControl::Interrogate);
                    ServiceControlHandlerResult::NoError
                }
                _ => ServiceControlHandlerResult::NotImplemented,
            }
        };

        let handle = service_control_handler::register(service_name, scm_handler)
            .map_err(|e| RegistrationError(Box::new(e)))?;
        *self.handle.lock().unwrap() = Some(handle);
        Ok(())
    }

    fn report(&self, status: &ServiceStatus) {
        let handle = self.handle.lock().unwrap();
        let Some(handle) = handle.as_ref() else {
            error!("status report dropped: no registered status handle");
            return;
        };
        if let Err(e) = handle.set_service_status(to_win_status(status)) {
            error!("failed to report service status: {e}");
        }
    }
}

fn to_win_status(status: &ServiceStatus) -> WinServiceStatus {
    WinServiceStatus {
        service_type: ServiceType::OWN_PROCESS,
        current_state: match status.current_state {
            ServiceState::StartPending => WinServiceState::StartPending,
            ServiceState::Running => WinServiceState::Running,
            ServiceState::StopPending => WinServiceState::StopPending,
            ServiceState::Stopped => WinServiceState::Stopped,
        },
        controls_accepted: if status.controls_accepted.contains(ControlAccept::Stop) {
            ServiceControlAccept::STOP
        } else {
            ServiceControlAccept::empty()
        },
        exit_code: match status.exit_code {
            ServiceExitCode::Win32(code) => WinServiceExitCode::Win32(code),
            ServiceExitCode::ServiceSpecific(code) => WinServiceExitCode::ServiceSpecific(code),
        },
        checkpoint: status.checkpoint,
        wait_hint: status.wait_hint,
        process_id: None,
    }
}

type ServiceEntryFn = Box<dyn FnOnce(Vec<OsString>) + Send>;

// The dispatcher's C ABI requires a static entry point; the configured
// entry closure is parked here until the service manager invokes it.
static SERVICE_ENTRY: OnceLock<Mutex<Option<ServiceEntryFn>>> = OnceLock::new();

define_windows_service!(ffi_service_main, service_main);

fn service_main(arguments: Vec<OsString>) {
    let entry = SERVICE_ENTRY
        .get()
        .and_then(|slot| slot.lock().unwrap().take());
    match entry {
        Some(entry) => entry(arguments),
        None => error!("service main invoked without a registered entry"),
    }
}

/// Registers the service with the OS dispatcher and blocks until the
/// service manager tears the service down. [`DispatchError::NotLaunchedAsService`]
/// means the process was started from a console; callers should fall back
/// to [`super::run_in_foreground`].
pub fn run_as_service<A: Handler>(
    label: &Label,
    make_app: impl FnOnce() -> A + Send + 'static,
) -> Result<ServiceExitCode, DispatchError> {
    let service_name = label.application.clone();
    let configured_name = service_name.clone();
    let (tx, rx) = mpsc::channel();

    let entry: ServiceEntryFn = Box::new(move |arguments| {
        // The service manager passes the assigned service name as the first
        // argument; fall back to the configured one.
        let name = arguments
            .first()
            .map(|a| a.to_string_lossy().into_owned())
            .unwrap_or(configured_name);
        let code = Supervisor::new(ScmBackend::default()).launch(&name, make_app);
        let _ = tx.send(code);
    });
    SERVICE_ENTRY
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap()
        .replace(entry);

    service_dispatcher::start(&service_name, ffi_service_main).map_err(|e| match e {
        windows_service::Error::Winapi(ref io)
            if io.raw_os_error() == Some(ERROR_FAILED_SERVICE_CONTROLLER_CONNECT) =>
        {
            DispatchError::NotLaunchedAsService
        }
        other => DispatchError::Dispatcher(Box::new(other)),
    })?;

    // The dispatcher returns once the service has stopped; the terminal
    // exit code was sent from the entry closure.
    Ok(rx.recv().unwrap_or(ServiceExitCode::NO_ERROR))
}
