//! Bounded execution of slow operations
//!
//! With a timeout the job runs on its own thread and the caller waits on a
//! channel. When the timeout fires the caller gives up and the job's result
//! is dropped whenever it arrives; the job itself must not publish anything.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::error::{Operation, SummonError, SummonResult};

/// Run `job`, giving up after `timeout`. A panicking job is reported as abandoned.
pub fn run_bounded<T, F>(operation: Operation, timeout: Option<Duration>, job: F) -> SummonResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let Some(timeout) = timeout else {
        return panic::catch_unwind(AssertUnwindSafe(job))
            .map_err(|_| SummonError::Abandoned { operation });
    };

    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name(format!("summon-{operation}"))
        .spawn(move || {
            let _ = tx.send(job());
        })
        .map_err(|_| SummonError::Abandoned { operation })?;

    match rx.recv_timeout(timeout) {
        Ok(value) => Ok(value),
        Err(RecvTimeoutError::Timeout) => Err(SummonError::TimedOut { operation, timeout }),
        Err(RecvTimeoutError::Disconnected) => Err(SummonError::Abandoned { operation }),
    }
}
