mod foreground;
pub use foreground::*;
#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::*;
