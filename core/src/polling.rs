//! Periodic re-fetching.
//!
//! A poll loop belongs to the screen that started it. It stops when the fetch
//! reports [`PollControl::Stop`] (for example a task reached a terminal
//! state) or when its [`CancellationToken`] is cancelled on teardown. The sleep function
//! is injected so the same loop runs on browser timers and in tests.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Sources (snapshots) list refresh.
pub const SOURCES_INTERVAL: Duration = Duration::from_secs(3);
/// Task list refresh.
pub const TASKS_INTERVAL: Duration = Duration::from_secs(3);
/// Single task status refresh, until the task is terminal.
pub const TASK_INTERVAL: Duration = Duration::from_millis(500);
/// Task log refresh.
pub const LOGS_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollControl {
    Continue,
    Stop,
}

/// Runs `tick` immediately and then every `interval` until it returns
/// [`PollControl::Stop`] or `cancel` is cancelled. Returns the number of ticks run.
pub async fn poll_until<F, Fut, S, SFut>(interval: Duration, cancel: &CancellationToken, mut tick: F, mut sleep: S) -> usize
where
    F: FnMut() -> Fut,
    Fut: Future<Output = PollControl>,
    S: FnMut(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    let mut ticks = 0;
    loop {
        if cancel.is_cancelled() {
            break;
        }
        let control = tick().await;
        ticks += 1;
        if control == PollControl::Stop || cancel.is_cancelled() {
            break;
        }
        sleep(interval).await;
    }
    tracing::debug!(ticks, "poll loop finished");
    ticks
}
