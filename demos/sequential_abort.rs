//! # Example: Sequential Abort
//!
//! With `limit = 1` tasks run one after another. A raised failure aborts the
//! cycle: later tasks never start, and the executor is ready for the next batch.
//!
//! ```text
//! RUST_LOG=debug cargo run --example sequential_abort
//! ```

use std::time::Duration;

use taskpool::{EventKind, Executor, ExecutorError, RunOptions, TaskError, Work};
use tracing_subscriber::EnvFilter;

fn step(name: &'static str, fail: bool) -> Work<&'static str> {
    Work::invocable(move || async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        if fail {
            Err(TaskError::fail(format!("{name} broke")))
        } else {
            Ok(name)
        }
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let exec: Executor<&'static str> = Executor::new(1);
    exec.on_fn(EventKind::TaskStart, |ev| {
        println!("[{}] start", ev.task.map(|t| t.to_string()).unwrap_or_default());
    });
    exec.extend([step("fetch", false), step("build", true), step("deploy", false)])?;

    match exec.run(RunOptions::new()).await {
        Err(ExecutorError::TaskFailed {
            task,
            source,
            done,
            abandoned,
        }) => {
            println!("aborted at {task}: {source}");
            for res in done {
                println!("  kept {} -> {:?}", res.id, res.outcome.value());
            }
            println!("  never started: {abandoned:?}");
        }
        Err(e) => return Err(e.into()),
        Ok(report) => println!("unexpected success: {} done", report.done.len()),
    }

    // Reusable after the abort; this time failures are captured.
    exec.extend([step("fetch", false), step("build", true), step("deploy", false)])?;
    let report = exec.run(RunOptions::new().return_exceptions(true)).await?;
    for res in report.done {
        println!("{} -> {}", res.id, res.outcome.as_label());
    }
    Ok(())
}
