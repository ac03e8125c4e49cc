use std::time::Duration;

use enumflags2::{BitFlags, bitflags};

/// Lifecycle states reported to the service manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ServiceState {
    StartPending,
    Running,
    StopPending,
    Stopped,
}

impl ServiceState {
    /// Pending states are the only ones that advance the progress
    /// checkpoint.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::StartPending | Self::StopPending)
    }
}

/// Control codes the service manager can deliver to a running service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceControl {
    Stop,
    Interrogate,
    /// Any control code the supervisor does not handle.
    Other(u32),
}

/// Control signals a service declares it will accept.
#[bitflags]
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAccept {
    Stop = 0b1,
}

/// Exit code in the service manager's wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceExitCode {
    Win32(u32),
    ServiceSpecific(u32),
}

impl ServiceExitCode {
    /// Clean exit.
    pub const NO_ERROR: Self = Self::Win32(0);
    /// ERROR_APP_INIT_FAILURE: the application's readiness probe failed.
    pub const APP_INIT_FAILURE: Self = Self::Win32(575);
    /// ERROR_FAILED_SERVICE_CONTROLLER_CONNECT: the control handler could
    /// not be registered with the service manager.
    pub const CONTROLLER_CONNECT_FAILURE: Self = Self::Win32(1063);
}

/// One status record as reported to the service manager. Fixed fields the
/// OS also requires (service type, process id) are filled in at the
/// platform boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    pub current_state: ServiceState,
    pub controls_accepted: BitFlags<ControlAccept>,
    pub exit_code: ServiceExitCode,
    /// Progress counter; nonzero only while a transition is pending.
    pub checkpoint: u32,
    /// Advisory upper bound for completing the pending transition.
    pub wait_hint: Duration,
}
