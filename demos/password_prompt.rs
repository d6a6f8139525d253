//! Answer a password prompt from a child process.
//!
//! Run with `EXPECT_SCRIPT_LOG=debug cargo run --example password_prompt` to
//! watch the conversation.

use anyhow::{bail, Context, Result};
use expect_script::logging::init_tracing;
use expect_script::{Outcome, Script, TracingLogger};
use std::time::Duration;

fn main() -> Result<()> {
    init_tracing().map_err(|e| anyhow::anyhow!(e))?;

    let dir = tempfile::tempdir().context("creating scratch directory")?;

    let report = Script::spawn_in(
        r#"sh -c 'printf "Password: "; read pw; printf "%s\n" "$pw" > received.txt; echo stored'"#,
        dir.path(),
    )
    .logger(TracingLogger)
    .timeout(Duration::from_secs(10))
    .expect("Password: *")
    .send("secret")
    .expect("stored")
    .run()
    .context("running password script")?;

    if let Outcome::ProcessDied { step, pattern, .. } = &report.outcome {
        bail!("process exited at step {step} while waiting for '{pattern}'");
    }

    let received = std::fs::read_to_string(dir.path().join("received.txt"))?;
    println!(
        "child received {:?} and exited with {}",
        received, report.exit_status
    );
    Ok(())
}
