use std::io;

use tracing::warn;

/// One-shot administrative operations against the OS service registry.
///
/// Stateless between invocations. Nothing here interacts with the runtime
/// supervisor; these are the same operations an operator could perform with
/// the OS's own service tooling.
pub trait Manager {
    /// Registers the service with the OS.
    fn create(&self) -> io::Result<()>;

    /// Removes the service registration.
    fn delete(&self) -> io::Result<()>;

    fn start(&self) -> io::Result<()>;

    fn stop(&self) -> io::Result<()>;

    /// Registers and immediately starts the service.
    fn install(&self) -> io::Result<()> {
        self.create()?;
        self.start()
    }

    /// Stops the service, then removes its registration. A failed stop
    /// (the service may simply not be running) does not abort the delete.
    fn uninstall(&self) -> io::Result<()> {
        if let Err(e) = self.stop() {
            warn!("stopping service before delete failed: {e}");
        }
        self.delete()
    }
}
