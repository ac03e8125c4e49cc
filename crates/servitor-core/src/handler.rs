/// Capability contract for an application hosted as an OS service.
///
/// Any type exposing these three operations can be supervised. The
/// supervisor is generic over the implementation, so dispatch is static.
///
/// `run` and `stop` are called from different threads: the supervisor's
/// control thread blocks inside `run` for the application's entire lifetime
/// while the service manager delivers stop requests on a thread of its own.
/// Both take `&self`; implementations synchronize internally, typically with
/// a mutex and condvar guarding a "keep running" flag.
pub trait Handler: Send + Sync + 'static {
    /// Readiness probe, invoked once after construction and before
    /// [`Handler::run`]. Returns 0 when the application is ready; any other
    /// value aborts startup and is surfaced to the service manager as an
    /// initialization failure. Must be side-effect free.
    fn state(&self) -> u32;

    /// Performs the application's entire lifetime of work, returning only
    /// once it has fully stopped. 0 is a clean shutdown; any other value is
    /// reported as an application-specific exit code.
    fn run(&self) -> u32;

    /// Requests that a concurrent [`Handler::run`] return as soon as
    /// practical. Non-blocking and idempotent.
    fn stop(&self);
}
