//! # Example: Throttled Batch
//!
//! Ten downloads, at most three in flight, one of them failing.
//! Failures are captured as outcomes and events go through the built-in `LogWriter`.
//!
//! ```text
//! RUST_LOG=info cargo run --example throttled_batch --features logging
//! ```

use std::{sync::Arc, time::Duration};

use taskpool::{
    Config, EventKind, Executor, LogWriter, Outcome, RunOptions, Subscribe, TaskError, Work,
};
use tracing_subscriber::EnvFilter;

/// Fake download: sleeps proportionally to `size`, fails on `size == 0`.
async fn download(size: u64) -> Result<u64, TaskError> {
    tokio::time::sleep(Duration::from_millis(20 * size)).await;
    if size == 0 {
        return Err(TaskError::fail("empty payload"));
    }
    Ok(size * 1024)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let exec = Executor::builder(Config {
        return_exceptions: true,
        ..Config::with_limit(3)
    })
    .with_subscribers(vec![Arc::new(LogWriter::new()) as Arc<dyn Subscribe<u64>>])
    .with_tasks([5, 3, 0, 8, 1, 2, 6, 4, 7, 3].map(|size| Work::with_args(download, size)))
    .build()?;

    exec.on_fn(EventKind::Finish, |ev| {
        if let Some(info) = ev.executor {
            println!("cycle {} done, {} left queued", ev.cycle, info.queued);
        }
    });

    let report = exec.run(RunOptions::new()).await?;
    let mut total = 0;
    for res in report.into_ordered() {
        match res.outcome {
            Outcome::Value(bytes) => total += bytes,
            other => println!("{} -> {}", res.id, other.as_label()),
        }
    }
    println!("downloaded {total} bytes");
    Ok(())
}
