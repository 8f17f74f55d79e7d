use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Periodic task on the background runtime.
///
/// The callback runs while holding the cancellation lock, so once [`Ticker::stop`]
/// returns no firing is in flight and none will start. The callback must not
/// stop its own ticker.
pub struct Ticker {
    stopped: Arc<Mutex<bool>>,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    /// First firing happens one `period` after spawning. A zero `period`
    /// yields a ticker that is already stopped.
    pub fn spawn<F>(handle: &Handle, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        if period.is_zero() {
            log::error!("Refusing to spawn a ticker with a zero period");
            return Self {
                stopped: Arc::new(Mutex::new(true)),
                task: None,
            };
        }

        let stopped = Arc::new(Mutex::new(false));
        let flag = stopped.clone();

        let task = handle.spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let stopped = flag.lock();
                if *stopped {
                    break;
                }
                on_tick();
            }
        });

        Self {
            stopped,
            task: Some(task),
        }
    }

    pub fn stop(&mut self) {
        *self.stopped.lock() = true;
        if let Some(task) = self.task.take() {
            task.abort();
            log::debug!("Ticker stopped");
        }
    }

    pub fn is_stopped(&self) -> bool {
        *self.stopped.lock()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_ticker(period: Duration) -> (Ticker, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let ticker = Ticker::spawn(&Handle::current(), period, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (ticker, count)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_each_period() {
        let (_ticker, count) = counting_ticker(Duration::from_millis(100));

        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(260)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_firing_after_stop() {
        let (mut ticker, count) = counting_ticker(Duration::from_millis(100));

        time::sleep(Duration::from_millis(150)).await;
        ticker.stop();
        let seen = count.load(Ordering::SeqCst);

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
        assert!(ticker.is_stopped());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_never_fires() {
        let (mut ticker, count) = counting_ticker(Duration::ZERO);
        assert!(ticker.is_stopped());
        assert!(ticker.task.is_none());

        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        ticker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent() {
        let (mut ticker, count) = counting_ticker(Duration::from_millis(10));
        ticker.stop();
        ticker.stop();
        drop(ticker);

        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
