//! Configuration types shared across estimators.

/// Budget for a single walk.
#[derive(Copy, Clone, Debug)]
pub struct WalkBudget {
    /// Distance to boundary below which the walk terminates. Must be > 0.
    pub epsilon: f32,
    /// Hard cap on the number of steps. Must be ≥ 1.
    pub max_steps: u32,
}

impl WalkBudget {
    pub const fn new(epsilon: f32, max_steps: u32) -> Self {
        Self { epsilon, max_steps }
    }
}
