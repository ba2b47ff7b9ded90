//! Interval poller for the cached read endpoints.
//!
//! Clients that cannot hold a live connection to the backend re-fetch a
//! read endpoint on an interval. The poller owns that loop: one fetch in
//! flight at a time, the latest value published through a `watch` channel,
//! an explicit cancellation signal, and an on-demand refresh independent of
//! any UI framework's lifecycle.

use confab_core::ConfabResult;
use std::future::Future;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{debug, warn};

/// Poller configuration.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Time between automatic re-fetches.
    pub interval: Duration,
    /// How long `shutdown` waits for the loop to finish.
    pub shutdown_timeout: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

/// Handle to a running poller task.
pub struct PollerHandle<T> {
    latest: watch::Receiver<Option<T>>,
    poke_tx: mpsc::Sender<()>,
    shutdown_tx: broadcast::Sender<()>,
    shutdown_timeout: Duration,
    task: JoinHandle<()>,
}

impl<T: Clone> PollerHandle<T> {
    /// Returns the most recently fetched value, if any fetch has succeeded.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.latest.borrow().clone()
    }

    /// Returns a receiver that observes every successful fetch.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.latest.clone()
    }

    /// Requests an immediate re-fetch ahead of the next interval tick.
    ///
    /// A poke while a fetch is already queued is coalesced.
    pub fn poke(&self) {
        let _ = self.poke_tx.try_send(());
    }

    /// Signals the loop to stop and waits for it, up to the configured
    /// shutdown timeout.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if timeout(self.shutdown_timeout, self.task).await.is_err() {
            warn!("poller did not stop within shutdown timeout");
        }
    }
}

/// Spawns a poller task that calls `fetch` once immediately and then on
/// every interval tick or poke. Fetch errors are logged and the loop keeps
/// running; the previous value stays published.
pub fn spawn<T, F, Fut>(config: PollerConfig, fetch: F) -> PollerHandle<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ConfabResult<T>> + Send,
{
    let (latest_tx, latest_rx) = watch::channel(None);
    let (poke_tx, mut poke_rx) = mpsc::channel::<()>(1);
    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
    let shutdown_timeout = config.shutdown_timeout;

    let task = tokio::spawn(async move {
        let mut ticker = interval(config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            // The first tick fires immediately, giving an eager initial fetch.
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    debug!("poller shutting down");
                    break;
                }
                _ = ticker.tick() => {}
                Some(()) = poke_rx.recv() => {
                    ticker.reset();
                }
            }

            match fetch().await {
                Ok(value) => {
                    let _ = latest_tx.send(Some(value));
                }
                Err(e) => {
                    warn!(error = %e, "poll fetch failed, keeping previous value");
                }
            }
        }
    });

    PollerHandle {
        latest: latest_rx,
        poke_tx,
        shutdown_tx,
        shutdown_timeout,
        task,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_core::ConfabError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn config(interval: Duration) -> PollerConfig {
        PollerConfig {
            interval,
            shutdown_timeout: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn test_initial_fetch_and_shutdown() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let handle = spawn(config(Duration::from_secs(3600)), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(42u64)
            }
        });

        let mut rx = handle.subscribe();
        rx.wait_for(|v| v.is_some()).await.unwrap();
        assert_eq!(handle.latest(), Some(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        handle.shutdown().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_poke_triggers_refetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let handle = spawn(config(Duration::from_secs(3600)), move || {
            let counter = counter.clone();
            async move { Ok(counter.fetch_add(1, Ordering::SeqCst)) }
        });

        let mut rx = handle.subscribe();
        rx.wait_for(|v| v.is_some()).await.unwrap();

        handle.poke();
        rx.wait_for(|v| *v == Some(1)).await.unwrap();
        assert_eq!(handle.latest(), Some(1));

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_fetch_error_keeps_previous_value() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let handle = spawn(config(Duration::from_millis(20)), move || {
            let counter = counter.clone();
            async move {
                match counter.fetch_add(1, Ordering::SeqCst) {
                    0 => Ok("first".to_string()),
                    _ => Err(ConfabError::backend("flaky")),
                }
            }
        });

        let mut rx = handle.subscribe();
        rx.wait_for(|v| v.is_some()).await.unwrap();

        // Let a few failing ticks pass; the published value must survive.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(handle.latest(), Some("first".to_string()));
        assert!(calls.load(Ordering::SeqCst) > 1);

        handle.shutdown().await;
    }
}
