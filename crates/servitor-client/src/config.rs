use std::env::consts::EXE_EXTENSION;
use std::path::PathBuf;

use servitor_core::Label;

/// Describes the service to register: its identity plus the command line
/// the service manager should launch.
#[derive(Clone, Debug)]
pub struct Builder {
    pub(crate) label: Label,
    pub(crate) display_name: Option<String>,
    pub(crate) description: String,
    pub(crate) program: PathBuf,
    pub(crate) arguments: Vec<String>,
    pub(crate) autostart: bool,
}

impl Builder {
    pub fn new(label: Label, program: impl Into<PathBuf>) -> Self {
        Self {
            label,
            display_name: None,
            description: String::new(),
            program: program.into().with_extension(EXE_EXTENSION),
            arguments: vec![],
            autostart: true,
        }
    }

    /// Name shown by the OS service list; defaults to the service name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_arguments(mut self, arguments: impl IntoIterator<Item = String>) -> Self {
        self.arguments = arguments.into_iter().collect();
        self
    }

    pub fn with_autostart(mut self, autostart: bool) -> Self {
        self.autostart = autostart;
        self
    }

    pub fn name(&self) -> &str {
        &self.label.application
    }

    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or(&self.label.application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label() -> Label {
        "com.example.sleeper".parse().unwrap()
    }

    #[test]
    fn registration_settings_reach_the_builder() {
        let builder = Builder::new(label(), "/usr/bin/sleeper")
            .with_arguments(["--quiet".to_owned()])
            .with_autostart(false);
        assert_eq!(builder.arguments, ["--quiet"]);
        assert!(!builder.autostart);

        // The original registers services to start with the OS.
        assert!(Builder::new(label(), "/usr/bin/sleeper").autostart);
    }

    #[test]
    fn display_name_falls_back_to_the_service_name() {
        let builder = Builder::new(label(), "/usr/bin/sleeper");
        assert_eq!(builder.display_name(), "sleeper");

        let builder = builder.with_display_name("Sleeper Example");
        assert_eq!(builder.display_name(), "Sleeper Example");
        assert_eq!(builder.name(), "sleeper");
    }
}
