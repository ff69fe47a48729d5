/// Simulated network conditions for the in-memory hub
#[derive(Clone, Debug)]
pub struct LinkConditionerConfig {
    /// Probability in `0.0..=1.0` that a message is dropped for a recipient
    pub loss: f32,
    /// Deliver pending messages in random order instead of send order
    pub reorder: bool,
    /// Seed of the hub's random generator, for reproducible runs
    pub seed: u64,
}

impl LinkConditionerConfig {
    pub fn new(loss: f32, reorder: bool, seed: u64) -> Self {
        Self {
            loss: loss.clamp(0.0, 1.0),
            reorder,
            seed,
        }
    }

    /// In-order delivery without loss
    pub fn perfect() -> Self {
        Self::new(0.0, false, 0)
    }

    /// No loss, arbitrary delivery order
    pub fn unordered(seed: u64) -> Self {
        Self::new(0.0, true, seed)
    }

    /// Arbitrary delivery order with some loss
    pub fn lossy(loss: f32, seed: u64) -> Self {
        Self::new(loss, true, seed)
    }
}

impl Default for LinkConditionerConfig {
    fn default() -> Self {
        Self::perfect()
    }
}
