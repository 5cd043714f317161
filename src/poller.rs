// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Veridian

//! Bounded polling for eventually-available resources.
//!
//! Attempts are strictly sequential: run the task, sleep one interval,
//! run it again. The first successful resolution wins. Every failure,
//! not just not-found, counts as transient until the elapsed budget
//! reaches the timeout; callers that want kind-sensitive retry behavior
//! filter inside their task closure. Timeout expiry is the only
//! cancellation mechanism.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::Error;

/// Interval between attempts used by the client's polling operations.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Repeatedly invoke `task` until it succeeds or `timeout` elapses.
///
/// Returns the first successful value, or [`Error::Timeout`] once the
/// cumulative elapsed time reaches `timeout` without a success. An
/// in-flight attempt is never aborted; its own duration counts against
/// the budget.
pub async fn poll<T, F, Fut>(mut task: F, interval: Duration, timeout: Duration) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    let start = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        match task().await {
            Ok(value) => {
                debug!(attempts, "poll resolved");
                return Ok(value);
            }
            Err(error) => {
                debug!(attempts, %error, "poll attempt failed; retrying until timeout");
            }
        }

        tokio::time::sleep(interval).await;

        if start.elapsed() >= timeout {
            debug!(attempts, ?timeout, "poll budget exhausted");
            return Err(Error::Timeout(timeout));
        }
    }
}
