use std::f64::consts::TAU;

/// Offset from the ring center, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Angle of this offset measured from the positive x axis.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn lerp(&self, other: Position, t: f64) -> Position {
        Position::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// Angle of the `index`-th of `total` evenly spaced items, rotated by `offset`.
pub fn angle(index: usize, total: usize, offset: f64) -> f64 {
    (index as f64 / total as f64) * TAU + offset
}

/// Places item `index` of `total` on a circle of `radius` around the origin.
///
/// An empty ring has no geometry, so `total == 0` collapses to the center.
pub fn position(index: usize, total: usize, radius: f64, offset: f64) -> Position {
    if total == 0 {
        return Position::ORIGIN;
    }
    let angle = angle(index, total, offset);
    Position::new(radius * angle.cos(), radius * angle.sin())
}

pub fn positions(total: usize, radius: f64, offset: f64) -> Vec<Position> {
    (0..total)
        .map(|index| position(index, total, radius, offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn angle_between(a: Position, b: Position) -> f64 {
        (b.angle() - a.angle()).rem_euclid(TAU)
    }

    #[test]
    fn test_positions_share_radius() {
        for total in 1..=12 {
            for pos in positions(total, 180.0, 0.3) {
                assert!((pos.distance_to(Position::ORIGIN) - 180.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_positions_evenly_spaced() {
        for total in 2..=12 {
            let ring = positions(total, 50.0, PI / 8.0);
            let expected = TAU / total as f64;
            for pair in ring.windows(2) {
                assert!((angle_between(pair[0], pair[1]) - expected).abs() < EPS);
            }
            let wrap = angle_between(ring[total - 1], ring[0]);
            assert!((wrap - expected).abs() < EPS);
        }
    }

    #[test]
    fn test_first_item_sits_on_offset() {
        let pos = position(0, 6, 10.0, 0.0);
        assert!((pos.x - 10.0).abs() < EPS);
        assert!(pos.y.abs() < EPS);

        let pos = position(0, 6, 10.0, PI / 2.0);
        assert!(pos.x.abs() < EPS);
        assert!((pos.y - 10.0).abs() < EPS);
    }

    #[test]
    fn test_position_is_pure() {
        assert_eq!(position(3, 7, 42.0, 1.25), position(3, 7, 42.0, 1.25));
        assert_eq!(positions(7, 42.0, 1.25), positions(7, 42.0, 1.25));
    }

    #[test]
    fn test_empty_ring() {
        assert_eq!(position(0, 0, 180.0, 0.0), Position::ORIGIN);
        assert!(positions(0, 180.0, 0.0).is_empty());
    }

    #[test]
    fn test_lerp_midpoint() {
        let a = Position::new(0.0, 10.0);
        let b = Position::new(10.0, -10.0);
        assert_eq!(a.lerp(b, 0.5), Position::new(5.0, 0.0));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }
}
