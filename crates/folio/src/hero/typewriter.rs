#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Typing,
    /// Fully typed; counts down before deleting.
    Holding(u32),
    Deleting,
}

/// Types each phrase out one character per step, holds it, deletes it and
/// moves on to the next, looping forever.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    current: usize,
    visible: usize,
    stage: Stage,
    hold_steps: u32,
}

impl Typewriter {
    pub fn new<I, S>(phrases: I, hold_steps: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().chars().collect())
                .collect(),
            current: 0,
            visible: 0,
            stage: Stage::Typing,
            hold_steps,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn phrase_index(&self) -> usize {
        self.current
    }

    pub fn text(&self) -> String {
        self.phrases
            .get(self.current)
            .map(|p| p[..self.visible].iter().collect())
            .unwrap_or_default()
    }

    /// Moves one step and returns the visible text.
    pub fn advance(&mut self) -> String {
        let Some(len) = self.phrases.get(self.current).map(Vec::len) else {
            return String::new();
        };

        self.stage = match self.stage {
            Stage::Typing => {
                self.visible = (self.visible + 1).min(len);
                if self.visible == len {
                    Stage::Holding(self.hold_steps)
                } else {
                    Stage::Typing
                }
            }
            Stage::Holding(0) => Stage::Deleting,
            Stage::Holding(n) => Stage::Holding(n - 1),
            Stage::Deleting => {
                self.visible = self.visible.saturating_sub(1);
                if self.visible == 0 {
                    self.current = (self.current + 1) % self.phrases.len();
                    Stage::Typing
                } else {
                    Stage::Deleting
                }
            }
        };

        self.text()
    }
}
