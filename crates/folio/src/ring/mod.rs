use std::f64::consts::TAU;
use std::time::Duration;

pub mod driver;
pub mod layout;
pub mod model;

pub use driver::{RingPhase, RotationDriver};
pub use layout::{Position, position, positions};
pub use model::{Badge, IconName, RingGeometry, RingState, TechName, TechnologyItem};

pub const DEFAULT_RADIUS: f64 = 180.0; // badge orbit
pub const DEFAULT_STEPS_PER_TURN: u32 = 16;
pub const DEFAULT_STEP: f64 = TAU / DEFAULT_STEPS_PER_TURN as f64;
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(3000);
pub const BADGE_ANIMATION: Duration = Duration::from_secs(8);
pub const BADGE_RADIUS: f64 = 24.0;
pub const BADGE_ICON_SIZE: i32 = 24;
pub const PORTRAIT_RADIUS: f64 = 192.0;
