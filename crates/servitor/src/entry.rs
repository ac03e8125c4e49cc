use std::env;
use std::process::ExitCode;
use std::str::FromStr;

use servitor_client::{Builder, Command};
use servitor_core::{Handler, Label, ServiceExitCode};

/// Process-level entry for a hostable application: one record describing
/// the service, plus the routing between "run under the service manager"
/// and the administrative verbs. All an ordinary `main` needs to become a
/// full service is to build one of these and call [`ServiceEntry::run`].
pub struct ServiceEntry<F> {
    label: Label,
    display_name: Option<String>,
    description: String,
    arguments: Vec<String>,
    autostart: bool,
    make_app: F,
}

impl<F> ServiceEntry<F> {
    pub fn new(label: Label, make_app: F) -> Self {
        Self {
            label,
            display_name: None,
            description: String::new(),
            arguments: vec![],
            autostart: true,
            make_app,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Extra arguments the service manager passes when launching the
    /// registered service.
    pub fn with_arguments(mut self, arguments: impl IntoIterator<Item = String>) -> Self {
        self.arguments = arguments.into_iter().collect();
        self
    }

    /// Whether the registered service starts with the OS; defaults to true.
    pub fn with_autostart(mut self, autostart: bool) -> Self {
        self.autostart = autostart;
        self
    }

    /// Routes the process. With no arguments the service registers with the
    /// OS service manager, falling back to a foreground run when it was not
    /// launched by one. A recognized administrative verb performs the
    /// corresponding registry operation. Anything else prints usage and
    /// exits successfully.
    pub fn run<A>(self) -> ExitCode
    where
        A: Handler,
        F: FnOnce() -> A + Send + 'static,
    {
        match env::args().nth(1) {
            None => self.run_service(),
            Some(arg) => match Command::from_str(&arg) {
                Ok(command) => self.run_command(command),
                Err(_) => {
                    println!("{}", Command::usage(&self.label.application));
                    ExitCode::SUCCESS
                }
            },
        }
    }

    #[cfg(windows)]
    fn run_service<A>(self) -> ExitCode
    where
        A: Handler,
        F: FnOnce() -> A + Send + 'static,
    {
        use std::sync::{Arc, Mutex};

        use servitor_server::DispatchError;
        use tracing::info;

        // Only one of the two paths below runs the factory; the slot lets
        // the dispatch attempt and the foreground fallback share it.
        let slot = Arc::new(Mutex::new(Some(self.make_app)));
        let dispatch_slot = slot.clone();
        let make_app = move || {
            let factory = dispatch_slot
                .lock()
                .unwrap()
                .take()
                .expect("app factory already consumed");
            factory()
        };

        match servitor_server::platform::run_as_service(&self.label, make_app) {
            Ok(code) => exit_code_for(code),
            Err(DispatchError::NotLaunchedAsService) => {
                // Normal when started from a console.
                info!("not launched by the service manager, running in the foreground");
                let make_app = move || {
                    let factory = slot
                        .lock()
                        .unwrap()
                        .take()
                        .expect("app factory already consumed");
                    factory()
                };
                match servitor_server::platform::run_in_foreground(&self.label, make_app) {
                    Ok(code) => exit_code_for(code),
                    Err(e) => {
                        eprintln!("{e}");
                        ExitCode::FAILURE
                    }
                }
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        }
    }

    #[cfg(not(windows))]
    fn run_service<A>(self) -> ExitCode
    where
        A: Handler,
        F: FnOnce() -> A + Send + 'static,
    {
        match servitor_server::platform::run_in_foreground(&self.label, self.make_app) {
            Ok(code) => exit_code_for(code),
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        }
    }

    fn run_command(self, command: Command) -> ExitCode {
        let program = match env::current_exe() {
            Ok(path) => path,
            Err(e) => {
                eprintln!("cannot determine the executable path: {e}");
                return ExitCode::FAILURE;
            }
        };

        let mut builder = Builder::new(self.label, program)
            .with_description(self.description)
            .with_arguments(self.arguments)
            .with_autostart(self.autostart);
        if let Some(display_name) = self.display_name {
            builder = builder.with_display_name(display_name);
        }

        let manager = match servitor_client::get_manager(builder) {
            Ok(manager) => manager,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        };
        match command.execute(manager.as_ref()) {
            Ok(()) => {
                println!("{command}: ok");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{command} failed: {e}");
                ExitCode::FAILURE
            }
        }
    }
}

fn exit_code_for(code: ServiceExitCode) -> ExitCode {
    match code {
        ServiceExitCode::Win32(0) => ExitCode::SUCCESS,
        ServiceExitCode::Win32(code) | ServiceExitCode::ServiceSpecific(code) => {
            ExitCode::from(code.min(255) as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverApp;

    impl Handler for NeverApp {
        fn state(&self) -> u32 {
            0
        }

        fn run(&self) -> u32 {
            0
        }

        fn stop(&self) {}
    }

    #[test]
    fn entry_carries_registration_settings() {
        let entry = ServiceEntry::new("com.example.sleeper".parse().unwrap(), || NeverApp)
            .with_display_name("Sleeper Example")
            .with_description("sleeps")
            .with_arguments(["--quiet".to_owned()])
            .with_autostart(false);

        assert_eq!(entry.display_name.as_deref(), Some("Sleeper Example"));
        assert_eq!(entry.description, "sleeps");
        assert_eq!(entry.arguments, ["--quiet"]);
        assert!(!entry.autostart);
    }

    #[test]
    fn entry_defaults_to_autostart_with_no_arguments() {
        let entry = ServiceEntry::new("com.example.sleeper".parse().unwrap(), || NeverApp);
        assert!(entry.autostart);
        assert!(entry.arguments.is_empty());
        assert!(entry.display_name.is_none());
    }
}
