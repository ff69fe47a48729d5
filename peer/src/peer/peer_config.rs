use std::{default::Default, time::Duration};

use bodysync_shared::{BodyPartCatalog, ModelName};

/// Contains Config properties which will be used by a Peer
#[derive(Clone)]
pub struct PeerConfig {
    /// Model displayed when the session starts
    pub initial_model: ModelName,
    /// Delay between a correct answer and the next question
    pub question_delay: Duration,
    /// How long the "someone painted" popup stays visible
    pub paint_notice_duration: Duration,
    /// Time spent on each part during the tour walk
    pub tour_step_interval: Duration,
    /// Parts of every model, in quiz and tour order
    pub catalog: BodyPartCatalog,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            initial_model: ModelName::Body,
            question_delay: Duration::from_secs(2),
            paint_notice_duration: Duration::from_secs(3),
            tour_step_interval: Duration::from_secs(4),
            catalog: BodyPartCatalog::default(),
        }
    }
}
