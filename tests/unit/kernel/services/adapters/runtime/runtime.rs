use super::*;
use crate::kernel::services::ports::{CommandStatus, RequestId};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

fn request(id: u64, argv: &[&str]) -> CommandRequest {
    CommandRequest {
        id: RequestId(id),
        argv: argv.iter().map(|s| s.to_string()).collect(),
        working_dir: None,
        fallback_encoding: "windows-1252".to_string(),
    }
}

fn finished(rx: &Receiver<AppMessage>) -> (RequestId, CommandStatus) {
    match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
        AppMessage::CommandFinished { id, output } => (id, output.status),
    }
}

#[test]
fn multi_thread_runtime_delivers_results() {
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx).unwrap();
    runtime.run_command(request(3, &["gotodoc-definitely-not-installed-xyz"]));

    assert_eq!(finished(&rx), (RequestId(3), CommandStatus::SpawnFailed));
}

#[test]
fn current_thread_runtime_still_makes_progress() {
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::current_thread(tx).unwrap();
    runtime.run_command(request(7, &["gotodoc-definitely-not-installed-xyz"]));

    assert_eq!(finished(&rx), (RequestId(7), CommandStatus::SpawnFailed));
}

#[cfg(unix)]
#[test]
fn current_thread_runtime_runs_real_processes() {
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::current_thread(tx).unwrap();
    runtime.run_command(request(1, &["sh", "-c", "echo hi"]));

    match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
        AppMessage::CommandFinished { id, output } => {
            assert_eq!(id, RequestId(1));
            assert_eq!(output.text, "hi\n");
            assert!(output.success());
        }
    }
}

#[test]
fn dropping_current_thread_runtime_stops_its_driver() {
    let (tx, _rx) = mpsc::channel();
    let runtime = AsyncRuntime::current_thread(tx).unwrap();
    drop(runtime);
}
