mod error;
pub use error::*;

mod supervisor;
pub use supervisor::*;

pub mod platform;

pub use servitor_core::{
    Handler, Label, ServiceControl, ServiceExitCode, ServiceState, ServiceStatus,
};
#[cfg(windows)]
pub use windows_service;
