use serde::{Deserialize, Serialize};

use crate::types::Identity;

/// A peer taking part in the session, as shown on the leaderboard
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub identity: Identity,
    pub display_name: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub is_host: bool,
}

impl Participant {
    pub fn new(identity: Identity, display_name: impl Into<String>) -> Self {
        Self {
            identity,
            display_name: display_name.into(),
            score: 0,
            is_host: false,
        }
    }

    pub fn host(identity: Identity, display_name: impl Into<String>) -> Self {
        Self {
            is_host: true,
            ..Self::new(identity, display_name)
        }
    }
}
