use std::io;

use crate::{Builder, Manager};

/// Stub for hosts without a compatible service registry. Every verb fails
/// with a clear message so the operator knows the platform, not the
/// invocation, is the problem.
#[derive(Clone)]
pub struct UnsupportedServiceManager {
    config: Builder,
}

impl UnsupportedServiceManager {
    pub(crate) fn from_builder(config: Builder) -> io::Result<Self> {
        Ok(Self { config })
    }

    fn unsupported(&self, verb: &str) -> io::Error {
        io::Error::new(
            io::ErrorKind::Unsupported,
            format!(
                "cannot {verb} service {}: no service registry on this platform",
                self.config.name()
            ),
        )
    }
}

impl Manager for UnsupportedServiceManager {
    fn create(&self) -> io::Result<()> {
        Err(self.unsupported("create"))
    }

    fn delete(&self) -> io::Result<()> {
        Err(self.unsupported("delete"))
    }

    fn start(&self) -> io::Result<()> {
        Err(self.unsupported("start"))
    }

    fn stop(&self) -> io::Result<()> {
        Err(self.unsupported("stop"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_verb_reports_the_platform() {
        let builder = Builder::new("com.example.sleeper".parse().unwrap(), "/usr/bin/sleeper");
        let manager = UnsupportedServiceManager::from_builder(builder).unwrap();
        let err = manager.start().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
        assert!(err.to_string().contains("sleeper"));

        // The compounds surface the underlying verb's failure.
        assert!(manager.install().is_err());
        assert!(manager.uninstall().is_err());
    }
}
