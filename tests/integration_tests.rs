//! Integration tests for expect-script
//!
//! Every test drives a real child process through `sh`, so the suite only
//! runs on Unix.

#![cfg(unix)]

use expect_script::{
    ConsoleLogger, EnvConfig, ExpectError, Outcome, Script, ScriptConfig, Step,
};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[test]
fn test_password_prompt_receives_secret() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let report = Script::spawn_in(
        r#"sh -c 'printf "Password: "; read pw; printf "%s\n" "$pw" > received.txt'"#,
        dir.path(),
    )
    .expect("Password: *")
    .send("secret")
    .run()
    .expect("Script failed");

    assert!(report.is_completed());
    assert_eq!(report.steps_executed, 2);
    assert_eq!(report.exit_code(), Some(0));

    let received = std::fs::read_to_string(dir.path().join("received.txt"))
        .expect("Child did not write its input");
    assert_eq!(received, "secret\n");
}

/// The child exits at once, but a background reader keeps its stdin open and
/// records the first line it receives in `sent.txt`.
const EXIT_WITH_STDIN_RECORDER: &str =
    r#"sh -c 'exec 3<&0; (read line <&3 && printf "%s" "$line" > sent.txt) & exit 0'"#;

fn wait_for_file(path: &std::path::Path, within: Duration) -> bool {
    let deadline = Instant::now() + within;
    while Instant::now() < deadline {
        if path.exists() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    path.exists()
}

#[test]
fn test_immediate_exit_stops_the_script() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let report = Script::spawn_in(EXIT_WITH_STDIN_RECORDER, dir.path())
        .expect("ready")
        .send("touch")
        .run()
        .expect("Script failed");

    assert_eq!(
        report.outcome,
        Outcome::ProcessDied {
            step: 0,
            pattern: "ready".to_string(),
            last_response: String::new(),
        }
    );
    assert_eq!(report.steps_executed, 0);

    // stdin is closed by now, so the recorder sees EOF and writes nothing
    assert!(!wait_for_file(&dir.path().join("sent.txt"), Duration::from_millis(500)));
}

#[test]
fn test_send_reaches_background_recorder() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let report = Script::spawn_in(EXIT_WITH_STDIN_RECORDER, dir.path())
        .send("touch")
        .run()
        .expect("Script failed");

    assert!(report.is_completed());
    let sent = dir.path().join("sent.txt");
    assert!(wait_for_file(&sent, Duration::from_secs(5)));
    assert_eq!(
        std::fs::read_to_string(&sent).expect("Failed to read sent.txt"),
        "touch"
    );
}

#[test]
fn test_background_writer_does_not_hold_up_a_dead_process() {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let result = Script::spawn("sh -c 'yes & exit 0'").expect("ready").run();
        let _ = tx.send(result);
    });

    let report = rx
        .recv_timeout(Duration::from_secs(10))
        .expect("run() did not return after the process exited")
        .expect("Script failed");

    match report.outcome {
        Outcome::ProcessDied { step, pattern, .. } => {
            assert_eq!(step, 0);
            assert_eq!(pattern, "ready");
        }
        other => panic!("Expected ProcessDied, got {other:?}"),
    }
}

#[test]
fn test_died_run_into_result() {
    let report = Script::spawn("sh -c 'printf booting; exit 2'")
        .expect("ready")
        .run()
        .expect("Script failed");

    assert_eq!(report.exit_code(), Some(2));
    match report.into_result() {
        Err(ExpectError::ProcessDied {
            step,
            pattern,
            response,
        }) => {
            assert_eq!(step, 0);
            assert_eq!(pattern, "ready");
            assert_eq!(response, "booting");
        }
        other => panic!("Expected ProcessDied, got {other:?}"),
    }
}

#[test]
fn test_split_writes_are_accumulated() {
    let report = Script::spawn(r#"sh -c 'printf he; sleep 0.2; printf "llo\n"'"#)
        .expect("hello")
        .run()
        .expect("Script failed");

    assert!(report.is_completed());
}

#[test]
fn test_output_just_before_exit_still_matches() {
    let report = Script::spawn("sh -c 'printf done'")
        .expect("done")
        .run()
        .expect("Script failed");

    assert!(report.is_completed());
    assert_eq!(report.steps_executed, 1);
}

#[test]
fn test_zero_steps() {
    let report = Script::spawn("cat").run().expect("Script failed");

    assert_eq!(report.outcome, Outcome::Completed);
    assert_eq!(report.steps_executed, 0);
    assert!(report.exit_status.success());
}

#[test]
fn test_invalid_command() {
    let result = Script::spawn("definitely_not_a_real_command_12345")
        .expect("*")
        .send("never sent")
        .run();

    match result {
        Err(ExpectError::ProcessCreation { command, .. }) => {
            assert_eq!(command, "definitely_not_a_real_command_12345");
        }
        other => panic!("Expected ProcessCreation, got {other:?}"),
    }
}

#[test]
fn test_empty_command() {
    let result = Script::spawn("   ").run();
    assert!(matches!(result, Err(ExpectError::ProcessCreation { .. })));
}

#[test]
fn test_conversation_with_cat() {
    let report = Script::spawn("cat")
        .send("hello")
        .expect("hello")
        .send("world")
        .expect("world")
        .run()
        .expect("Script failed");

    assert!(report.is_completed());
    assert_eq!(report.steps_executed, 4);
}

#[test]
fn test_unread_output_carries_to_next_step() {
    let report = Script::spawn(r#"sh -c 'printf "one\n"; sleep 0.2; printf "two\n"'"#)
        .expect("one")
        .expect("two")
        .run()
        .expect("Script failed");

    assert!(report.is_completed());
}

#[test]
fn test_glob_must_cover_whole_output() {
    let report = Script::spawn("sh -c 'printf \"Enter Password: \"'")
        .expect("Password: *")
        .run()
        .expect("Script failed");

    assert!(matches!(report.outcome, Outcome::ProcessDied { .. }));

    let report = Script::spawn("sh -c 'printf \"Enter Password: \"'")
        .expect("*Password: *")
        .run()
        .expect("Script failed");

    assert!(report.is_completed());
}

#[test]
fn test_exit_status_is_reported() {
    let report = Script::spawn("sh -c 'read answer; exit 7'")
        .send("go")
        .run()
        .expect("Script failed");

    assert!(report.is_completed());
    assert_eq!(report.exit_code(), Some(7));
}

#[test]
fn test_send_to_exited_process_fails() {
    let result = Script::spawn("sh -c 'exit 0'")
        .send("x".repeat(1 << 20))
        .run();

    assert!(matches!(result, Err(ExpectError::SendFailed { .. })));
}

#[test]
fn test_timeout_kills_silent_process() {
    let started = Instant::now();
    let result = Script::spawn("sleep 30")
        .expect_within("never", Duration::from_millis(200))
        .run();

    match result {
        Err(ExpectError::Timeout { pattern, duration }) => {
            assert_eq!(pattern, "never");
            assert_eq!(duration, Duration::from_millis(200));
        }
        other => panic!("Expected Timeout, got {other:?}"),
    }
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn test_global_timeout_applies_to_every_expect() {
    let result = Script::spawn("sleep 30")
        .timeout(Duration::from_millis(100))
        .expect("never")
        .run();

    assert!(matches!(result, Err(ExpectError::Timeout { .. })));
}

#[test]
fn test_shell_mode() {
    let report = Script::spawn("echo $((6 * 7))")
        .shell(true)
        .expect("42")
        .run()
        .expect("Script failed");

    assert!(report.is_completed());
}

#[test]
fn test_strip_ansi_before_matching() {
    let report = Script::spawn(r#"sh -c 'printf "\033[32mready\033[0m"'"#)
        .strip_ansi(true)
        .expect("ready")
        .run()
        .expect("Script failed");

    assert!(report.is_completed());
}

#[test]
fn test_stderr_does_not_block() {
    let chatty = r#"sh -c 'i=0; while [ $i -lt 20000 ]; do echo noise >&2; i=$((i+1)); done; echo ready'"#;
    let report = Script::spawn(chatty)
        .expect("ready")
        .run()
        .expect("Script failed");

    assert!(report.is_completed());
}

#[test]
fn test_env_config_overlay() {
    std::env::set_var("ITEST_EXPECT_TIMEOUT_MS", "250");
    std::env::set_var("ITEST_EXPECT_SHELL", "yes");

    let config = EnvConfig::new("ITEST_EXPECT").apply(ScriptConfig::default());
    assert_eq!(config.timeout, Some(Duration::from_millis(250)));
    assert!(config.shell);

    let result = Script::with_config("sleep 30", config).expect("never").run();
    assert!(matches!(result, Err(ExpectError::Timeout { .. })));
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_console_logger_transcript() {
    let buf = SharedBuf::default();

    Script::spawn("cat")
        .logger(ConsoleLogger::new(buf.clone()))
        .send("ping")
        .expect("ping")
        .run()
        .expect("Script failed");

    let transcript = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    assert!(transcript.contains("* spawning 'cat'\n"));
    assert!(transcript.contains("* sending 'ping⏎'\n"));
    assert!(transcript.contains("* expected 'ping', got 'ping'\n"));
    assert!(transcript.contains("* process exited with"));
}

#[test]
fn test_steps_are_inspectable() {
    let script = Script::spawn("cat").expect("a").send("b");
    assert_eq!(script.steps(), [Step::expect("a"), Step::send("b")]);
}

#[tokio::test]
async fn test_run_async() {
    let report = Script::spawn("cat")
        .send("async")
        .expect("async")
        .run_async()
        .await
        .expect("Script failed");

    assert!(report.is_completed());
    assert_eq!(report.steps_executed, 2);
}
