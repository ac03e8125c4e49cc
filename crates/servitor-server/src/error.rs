use servitor_core::BoxedError;

/// Failure registering the service control handler with the OS.
#[derive(thiserror::Error, Debug)]
#[error("failed to register the service control handler: {0}")]
pub struct RegistrationError(#[source] pub BoxedError);

/// Failure running the OS service dispatcher.
#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    /// The process was not launched by the service manager. This is the
    /// normal result of invoking the executable from a console and callers
    /// should fall back to a foreground run rather than report it.
    #[error("process was not launched by the service manager")]
    NotLaunchedAsService,
    #[error("service dispatcher failed: {0}")]
    Dispatcher(#[source] BoxedError),
    #[error("failed to install signal handlers: {0}")]
    Signals(#[source] std::io::Error),
}
