use crate::ring::Position;
use std::time::Duration;

pub fn normalized_progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Cubic ease-out.
    EaseOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

pub trait Lerp: Copy {
    fn lerp(&self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Position {
    fn lerp(&self, to: Self, t: f64) -> Self {
        Position::lerp(self, to, t)
    }
}

/// Interpolation from one target value to another. The renderer samples it;
/// nothing here drives pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub duration: Duration,
    pub easing: Easing,
    pub delay: Duration,
}

pub fn animate<T: Lerp>(from: T, to: T, duration: Duration, easing: Easing) -> Tween<T> {
    Tween {
        from,
        to,
        duration,
        easing,
        delay: Duration::ZERO,
    }
}

impl<T: Lerp> Tween<T> {
    /// A tween that already sits at `value`.
    pub fn settled(value: T) -> Self {
        animate(value, value, Duration::ZERO, Easing::Linear)
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn sample(&self, elapsed: Duration) -> T {
        let elapsed = elapsed.saturating_sub(self.delay);
        let t = self.easing.apply(normalized_progress(elapsed, self.duration));
        self.from.lerp(self.to, t)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay + self.duration
    }
}

pub const ENTRANCE_DURATION: Duration = Duration::from_millis(300);
pub const ENTRANCE_SHIFT: f64 = 20.0;

/// Fade-and-slide used when a block first appears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entrance {
    pub direction: Direction,
    pub opacity: Tween<f64>,
    pub shift: Tween<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    FromLeft,
    FromRight,
}

impl Entrance {
    pub fn new(direction: Direction, delay: Duration) -> Self {
        let start = match direction {
            Direction::Up | Direction::FromRight => ENTRANCE_SHIFT,
            Direction::FromLeft => -ENTRANCE_SHIFT,
        };
        Self {
            direction,
            opacity: animate(0.0, 1.0, ENTRANCE_DURATION, Easing::EaseOut).delayed(delay),
            shift: animate(start, 0.0, ENTRANCE_DURATION, Easing::EaseOut).delayed(delay),
        }
    }

    /// Staggered entrance for the `index`-th item of a list.
    pub fn staggered(direction: Direction, index: usize, step: Duration) -> Self {
        Self::new(direction, step * index as u32)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.opacity.is_finished(elapsed) && self.shift.is_finished(elapsed)
    }

    /// Widget margins at `elapsed`.
    ///
    /// Sideways entrances keep a constant `ENTRANCE_SHIFT` of horizontal margin
    /// and move it from one side to the other, so the widget slides at a fixed
    /// width and rests centred between equal margins.
    pub fn margins(&self, elapsed: Duration) -> Margins {
        let offset = self.shift.sample(elapsed);
        match self.direction {
            Direction::Up => Margins {
                top: offset.round() as i32,
                ..Margins::default()
            },
            Direction::FromLeft | Direction::FromRight => {
                let total = ENTRANCE_SHIFT.round() as i32;
                let start = ((ENTRANCE_SHIFT + offset) / 2.0).round() as i32;
                Margins {
                    top: 0,
                    start,
                    end: total - start,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Margins {
    pub top: i32,
    pub start: i32,
    pub end: i32,
}

/// Per-badge position tweens for the rotating ring.
///
/// Each retarget starts from wherever the badges are drawn at that moment, so
/// a tick that lands mid-animation never makes a badge jump.
#[derive(Debug, Clone, PartialEq)]
pub struct RingMotion {
    tweens: Vec<Tween<Position>>,
    /// Time of the last retarget, relative to the same clock as `sample`.
    epoch: Duration,
    duration: Duration,
}

impl RingMotion {
    pub fn new(positions: impl IntoIterator<Item = Position>, duration: Duration) -> Self {
        Self {
            tweens: positions.into_iter().map(Tween::settled).collect(),
            epoch: Duration::ZERO,
            duration,
        }
    }

    pub fn retarget(&mut self, targets: &[Position], at: Duration) {
        if targets.len() != self.tweens.len() {
            *self = Self::new(targets.iter().copied(), self.duration);
            self.epoch = at;
            return;
        }
        let current = self.sample(at);
        self.tweens = current
            .into_iter()
            .zip(targets)
            .map(|(from, &to)| animate(from, to, self.duration, Easing::Linear))
            .collect();
        self.epoch = at;
    }

    pub fn sample(&self, at: Duration) -> Vec<Position> {
        let elapsed = at.saturating_sub(self.epoch);
        self.tweens.iter().map(|t| t.sample(elapsed)).collect()
    }

    pub fn is_settled(&self, at: Duration) -> bool {
        let elapsed = at.saturating_sub(self.epoch);
        self.tweens.iter().all(|t| t.is_finished(elapsed))
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamps() {
        let d = Duration::from_secs(2);
        assert_eq!(normalized_progress(Duration::ZERO, d), 0.0);
        assert_eq!(normalized_progress(Duration::from_secs(1), d), 0.5);
        assert_eq!(normalized_progress(Duration::from_secs(5), d), 1.0);
        assert_eq!(normalized_progress(Duration::from_secs(5), Duration::ZERO), 1.0);
    }

    #[test]
    fn test_linear_position_tween() {
        let tween = animate(
            Position::new(0.0, 0.0),
            Position::new(80.0, -40.0),
            Duration::from_secs(8),
            Easing::Linear,
        );
        assert_eq!(tween.sample(Duration::from_secs(2)), Position::new(20.0, -10.0));
        assert_eq!(tween.sample(Duration::from_secs(30)), Position::new(80.0, -40.0));
        assert!(!tween.is_finished(Duration::from_secs(7)));
        assert!(tween.is_finished(Duration::from_secs(8)));
    }

    #[test]
    fn test_ease_out_front_loads() {
        assert_eq!(Easing::EaseOut.apply(0.0), 0.0);
        assert_eq!(Easing::EaseOut.apply(1.0), 1.0);
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
    }

    #[test]
    fn test_delay_holds_start_value() {
        let tween = animate(0.0, 1.0, Duration::from_millis(100), Easing::Linear)
            .delayed(Duration::from_millis(200));
        assert_eq!(tween.sample(Duration::from_millis(150)), 0.0);
        assert_eq!(tween.sample(Duration::from_millis(250)), 0.5);
        assert!(tween.is_finished(Duration::from_millis(300)));
    }

    #[test]
    fn test_settled_tween() {
        let tween = Tween::settled(Position::new(3.0, 4.0));
        assert_eq!(tween.sample(Duration::ZERO), Position::new(3.0, 4.0));
        assert!(tween.is_finished(Duration::ZERO));
    }

    #[test]
    fn test_staggered_entrance() {
        let entrance = Entrance::staggered(Direction::FromLeft, 2, Duration::from_millis(200));
        assert_eq!(entrance.opacity.delay, Duration::from_millis(400));
        assert_eq!(entrance.shift.from, -ENTRANCE_SHIFT);
        assert_eq!(entrance.opacity.sample(Duration::ZERO), 0.0);
        assert!(entrance.is_finished(Duration::from_millis(700)));
    }

    #[test]
    fn test_sideways_entrances_keep_width() {
        let done = ENTRANCE_DURATION;
        let left = Entrance::new(Direction::FromLeft, Duration::ZERO);
        let right = Entrance::new(Direction::FromRight, Duration::ZERO);

        assert_eq!(left.margins(Duration::ZERO), Margins { top: 0, start: 0, end: 20 });
        assert_eq!(right.margins(Duration::ZERO), Margins { top: 0, start: 20, end: 0 });
        assert_eq!(left.margins(done), right.margins(done));
        assert_eq!(left.margins(done), Margins { top: 0, start: 10, end: 10 });

        for ms in [50, 120, 250] {
            let m = left.margins(Duration::from_millis(ms));
            assert_eq!(m.start + m.end, 20);
        }
    }

    #[test]
    fn test_upward_entrance_margins() {
        let up = Entrance::new(Direction::Up, Duration::ZERO);
        assert_eq!(up.margins(Duration::ZERO), Margins { top: 20, ..Margins::default() });
        assert_eq!(up.margins(ENTRANCE_DURATION), Margins::default());
    }

    #[test]
    fn test_ring_motion_retargets_from_current() {
        let secs = Duration::from_secs;
        let mut motion = RingMotion::new([Position::new(0.0, 0.0)], secs(8));
        assert!(motion.is_settled(Duration::ZERO));

        motion.retarget(&[Position::new(80.0, 0.0)], secs(1));
        assert_eq!(motion.sample(secs(3)), vec![Position::new(20.0, 0.0)]);

        // next tick arrives mid-flight
        motion.retarget(&[Position::new(20.0, 80.0)], secs(3));
        assert_eq!(motion.sample(secs(3)), vec![Position::new(20.0, 0.0)]);
        assert_eq!(motion.sample(secs(7)), vec![Position::new(20.0, 40.0)]);
        assert!(!motion.is_settled(secs(10)));
        assert!(motion.is_settled(secs(11)));
    }

    #[test]
    fn test_ring_motion_resets_on_new_item_count() {
        let mut motion = RingMotion::new([Position::ORIGIN], Duration::from_secs(8));
        motion.retarget(
            &[Position::new(1.0, 0.0), Position::new(-1.0, 0.0)],
            Duration::from_secs(2),
        );
        assert_eq!(motion.len(), 2);
        assert_eq!(
            motion.sample(Duration::from_secs(2)),
            vec![Position::new(1.0, 0.0), Position::new(-1.0, 0.0)]
        );
    }
}
