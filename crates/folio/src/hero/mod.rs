use std::time::Duration;

pub mod typewriter;

pub use typewriter::{Stage, Typewriter};

pub const TYPE_DELAY: Duration = Duration::from_millis(30);
pub const HOLD: Duration = Duration::from_millis(1500);
