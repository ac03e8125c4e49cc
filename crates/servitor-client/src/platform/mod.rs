#[cfg(windows)]
mod windows;
#[cfg(windows)]
use windows::WindowsServiceManager;
#[cfg(not(windows))]
mod unsupported;
#[cfg(not(windows))]
use unsupported::UnsupportedServiceManager;

use std::io;

use crate::{Builder, Manager};

/// Builds the service manager for the current platform.
pub fn get_manager(builder: Builder) -> io::Result<Box<dyn Manager>> {
    #[cfg(windows)]
    return Ok(Box::new(WindowsServiceManager::from_builder(builder)?));
    #[cfg(not(windows))]
    return Ok(Box::new(UnsupportedServiceManager::from_builder(builder)?));
}
