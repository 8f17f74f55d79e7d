use super::layout::{self, Position};
use super::{DEFAULT_RADIUS, DEFAULT_STEP};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct TechName(String);

crate::impl_string_newtype!(TechName);

/// Icon theme name (e.g. `"rust"`) or an absolute path to an image.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconName(String);

crate::impl_string_newtype!(IconName);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TechnologyItem {
    pub name: TechName,
    #[serde(default)]
    pub icon: Option<IconName>,
}

impl TechnologyItem {
    pub fn new(name: impl Into<String>, icon: Option<&str>) -> Self {
        Self {
            name: TechName::new(name),
            icon: icon.map(IconName::new),
        }
    }

    /// Short text painted when no icon can be loaded.
    pub fn initials(&self) -> String {
        self.name.chars().filter(|c| c.is_alphanumeric()).take(2).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub item: Arc<TechnologyItem>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub radius: f64,
    /// Phase advance per tick, in radians.
    pub step: f64,
}

impl RingGeometry {
    pub fn new(radius: f64, steps_per_turn: u32) -> Self {
        Self {
            radius,
            step: std::f64::consts::TAU / steps_per_turn.max(1) as f64,
        }
    }

    pub fn phase_after(&self, ticks: u64) -> f64 {
        ticks as f64 * self.step
    }
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            step: DEFAULT_STEP,
        }
    }
}

/// Every badge of the ring at one common phase. Always rebuilt whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RingState {
    pub phase: f64,
    pub badges: Vec<Badge>,
}

impl RingState {
    pub fn seed(items: &[Arc<TechnologyItem>], radius: f64) -> Self {
        Self::at_phase(items, radius, 0.0)
    }

    pub fn at_phase(items: &[Arc<TechnologyItem>], radius: f64, phase: f64) -> Self {
        let badges = items
            .iter()
            .cloned()
            .zip(layout::positions(items.len(), radius, phase))
            .map(|(item, position)| Badge { item, position })
            .collect();
        Self { phase, badges }
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.badges.iter().map(|b| b.position)
    }
}
