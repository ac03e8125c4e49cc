use assert_cmd::Command;

#[test]
fn unknown_verb_prints_usage_and_succeeds() {
    let output = Command::cargo_bin("sleeper")
        .unwrap()
        .arg("frobnicate")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("usage:"), "unexpected stdout: {stdout}");
    assert!(stdout.contains("sleeper"));
}

#[cfg(unix)]
#[test]
fn administrative_verbs_fail_without_a_service_registry() {
    let output = Command::cargo_bin("sleeper")
        .unwrap()
        .arg("start")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no service registry"),
        "unexpected stderr: {stderr}"
    );
}

#[cfg(unix)]
#[test]
fn foreground_run_stops_cleanly_on_sigterm() {
    use std::process::{Command as StdCommand, Stdio};
    use std::thread;
    use std::time::Duration;

    let bin = assert_cmd::cargo::cargo_bin("sleeper");
    let mut child = StdCommand::new(bin)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    // Give the supervisor time to reach Running and install its signal
    // handlers before stopping it.
    thread::sleep(Duration::from_millis(500));
    let kill = StdCommand::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(kill.success());

    for _ in 0..100 {
        if let Some(status) = child.try_wait().unwrap() {
            assert!(status.success(), "sleeper exited with {status}");
            return;
        }
        thread::sleep(Duration::from_millis(50));
    }
    child.kill().unwrap();
    panic!("sleeper did not exit after SIGTERM");
}
