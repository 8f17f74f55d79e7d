use super::model::{RingGeometry, RingState, TechnologyItem};
use crate::sys::ticker::Ticker;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingPhase {
    Uninitialized,
    /// Seeded and rotating.
    Active,
    /// Seeded with no items; nothing to rotate.
    Empty,
    Stopped,
}

struct Shared {
    state: RingState,
    ticks: u64,
    phase: RingPhase,
}

/// Owns the ring of badges and rotates it by one step per period.
pub struct RotationDriver {
    items: Arc<[Arc<TechnologyItem>]>,
    geometry: RingGeometry,
    shared: Arc<Mutex<Shared>>,
    ticker: Option<Ticker>,
}

impl RotationDriver {
    pub fn new(items: impl IntoIterator<Item = TechnologyItem>, geometry: RingGeometry) -> Self {
        Self {
            items: items.into_iter().map(Arc::new).collect(),
            geometry,
            shared: Arc::new(Mutex::new(Shared {
                state: RingState::default(),
                ticks: 0,
                phase: RingPhase::Uninitialized,
            })),
            ticker: None,
        }
    }

    /// Seeds the ring at phase zero and, when there is anything to rotate,
    /// schedules a rotation every `period`.
    ///
    /// `on_tick` runs with the freshly replaced state while the ring is locked,
    /// so it must not call back into the driver.
    pub fn start<F>(&mut self, handle: &Handle, period: Duration, mut on_tick: F)
    where
        F: FnMut(&RingState) + Send + 'static,
    {
        {
            let mut shared = self.shared.lock();
            if shared.phase != RingPhase::Uninitialized {
                log::warn!("Rotation driver already started ({:?})", shared.phase);
                return;
            }
            shared.state = RingState::seed(&self.items, self.geometry.radius);
            if self.items.is_empty() {
                shared.phase = RingPhase::Empty;
                log::debug!("No technologies configured, ring stays empty");
                return;
            }
            if period.is_zero() {
                shared.phase = RingPhase::Stopped;
                log::error!("Rotation period must be non-zero, ring will not rotate");
                return;
            }
            shared.phase = RingPhase::Active;
        }

        let items = self.items.clone();
        let geometry = self.geometry;
        let shared = self.shared.clone();

        self.ticker = Some(Ticker::spawn(handle, period, move || {
            let mut shared = shared.lock();
            if shared.phase != RingPhase::Active {
                return;
            }
            shared.ticks += 1;
            let phase = geometry.phase_after(shared.ticks);
            shared.state = RingState::at_phase(&items, geometry.radius, phase);
            log::trace!("Ring tick {} (phase {:.3})", shared.ticks, phase);
            on_tick(&shared.state);
        }));

        log::debug!(
            "Rotation driver started: {} badges every {:?}",
            self.items.len(),
            period
        );
    }

    pub fn stop(&mut self) {
        {
            let mut shared = self.shared.lock();
            if matches!(shared.phase, RingPhase::Active | RingPhase::Uninitialized) {
                shared.phase = RingPhase::Stopped;
            }
        }
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
        }
    }

    pub fn snapshot(&self) -> RingState {
        self.shared.lock().state.clone()
    }

    pub fn phase(&self) -> RingPhase {
        self.shared.lock().phase
    }

    pub fn ticks(&self) -> u64 {
        self.shared.lock().ticks
    }

    pub fn geometry(&self) -> RingGeometry {
        self.geometry
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Drop for RotationDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::layout;
    use std::f64::consts::{PI, TAU};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time;

    const PERIOD: Duration = Duration::from_millis(3000);
    const EPS: f64 = 1e-9;

    fn techs(n: usize) -> Vec<TechnologyItem> {
        (0..n)
            .map(|i| TechnologyItem::new(format!("tech-{i}"), None))
            .collect()
    }

    fn started(n: usize) -> (RotationDriver, Arc<AtomicUsize>) {
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = notified.clone();
        let mut driver = RotationDriver::new(techs(n), RingGeometry::new(180.0, 16));
        driver.start(&Handle::current(), PERIOD, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (driver, notified)
    }

    fn assert_consistent(state: &RingState, radius: f64) {
        let n = state.len();
        for (i, badge) in state.badges.iter().enumerate() {
            let expected = layout::position(i, n, radius, state.phase);
            assert!(badge.position.distance_to(expected) < EPS);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_seeded_synchronously_at_phase_zero() {
        let (driver, _) = started(5);

        assert_eq!(driver.phase(), RingPhase::Active);
        let state = driver.snapshot();
        assert_eq!(state.phase, 0.0);
        assert_eq!(state.len(), 5);
        assert_consistent(&state, 180.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_phase_advances_per_tick() {
        let (driver, notified) = started(6);

        time::sleep(PERIOD * 3 + Duration::from_millis(10)).await;

        assert_eq!(driver.ticks(), 3);
        assert_eq!(notified.load(Ordering::SeqCst), 3);
        let state = driver.snapshot();
        assert!((state.phase - 3.0 * PI / 8.0).abs() < EPS);
        assert_consistent(&state, 180.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_turn_after_sixteen_ticks() {
        let (driver, _) = started(4);
        let initial = driver.snapshot();

        time::sleep(PERIOD * 16 + Duration::from_millis(10)).await;

        let state = driver.snapshot();
        assert_eq!(driver.ticks(), 16);
        assert!((state.phase - TAU).abs() < EPS);
        for (before, after) in initial.badges.iter().zip(&state.badges) {
            assert_eq!(before.item, after.item);
            assert!(before.position.distance_to(after.position) < EPS);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_ring_never_rotates() {
        let (driver, notified) = started(0);

        assert_eq!(driver.phase(), RingPhase::Empty);
        assert!(driver.snapshot().is_empty());

        time::sleep(PERIOD * 4).await;
        assert_eq!(driver.ticks(), 0);
        assert_eq!(notified.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_does_not_activate() {
        let mut driver = RotationDriver::new(techs(3), RingGeometry::default());
        driver.start(&Handle::current(), Duration::ZERO, |_| {});

        assert_eq!(driver.phase(), RingPhase::Stopped);
        assert_eq!(driver.snapshot().len(), 3);

        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(driver.ticks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_updates_after_stop() {
        let (mut driver, notified) = started(3);

        time::sleep(PERIOD + Duration::from_millis(10)).await;
        driver.stop();
        let frozen = driver.snapshot();

        time::sleep(PERIOD * 10).await;
        assert_eq!(driver.phase(), RingPhase::Stopped);
        assert_eq!(driver.ticks(), 1);
        assert_eq!(notified.load(Ordering::SeqCst), 1);
        assert_eq!(driver.snapshot(), frozen);

        driver.stop();
        assert_eq!(driver.phase(), RingPhase::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_is_ignored() {
        let (mut driver, _) = started(3);
        driver.start(&Handle::current(), Duration::from_millis(1), |_| {});

        time::sleep(PERIOD - Duration::from_millis(10)).await;
        assert_eq!(driver.ticks(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_snapshots_never_mix_phases() {
        let mut driver = RotationDriver::new(techs(12), RingGeometry::new(100.0, 16));
        driver.start(&Handle::current(), Duration::from_millis(1), |_| {});

        for _ in 0..500 {
            let state = driver.snapshot();
            assert_eq!(state.len(), 12);
            assert_consistent(&state, 100.0);
            tokio::task::yield_now().await;
        }
        driver.stop();
    }
}
