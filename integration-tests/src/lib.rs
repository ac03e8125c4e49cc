use std::sync::{Condvar, Mutex};

use servitor::core::{Handler, Label};
use tracing::info;

pub fn label() -> Label {
    "com.example.sleeper".parse().expect("label is well formed")
}

/// Does nothing but sleep until the service delivers a stop signal. Usable
/// as a template for real applications: the mutex/condvar pair is the
/// rendezvous between `run` blocking on one thread and `stop` arriving on
/// another.
pub struct SleeperApp {
    running: Mutex<bool>,
    sleeper: Condvar,
}

impl SleeperApp {
    pub fn new() -> Self {
        Self {
            running: Mutex::new(true),
            sleeper: Condvar::new(),
        }
    }
}

impl Default for SleeperApp {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for SleeperApp {
    fn state(&self) -> u32 {
        0
    }

    fn run(&self) -> u32 {
        info!("sleeping until a stop signal arrives");
        let mut running = self.running.lock().unwrap();
        while *running {
            running = self.sleeper.wait(running).unwrap();
        }
        info!("stop signal received, shutting down");
        self.state()
    }

    fn stop(&self) {
        let mut running = self.running.lock().unwrap();
        *running = false;
        self.sleeper.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn stop_unblocks_a_concurrent_run() {
        let app = Arc::new(SleeperApp::new());
        let runner = {
            let app = app.clone();
            thread::spawn(move || app.run())
        };

        thread::sleep(Duration::from_millis(50));
        app.stop();
        // Idempotent: a second stop before run returns is harmless.
        app.stop();

        assert_eq!(runner.join().unwrap(), 0);
    }
}
