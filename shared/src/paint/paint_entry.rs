use std::{cmp::Ordering, collections::BTreeMap};

use serde::{Deserialize, Serialize};

use crate::{color::PaintColor, types::Identity, types::ModelName};

/// Lamport stamp of a paint action. Ties on the clock are broken by the
/// painter's identity so every peer picks the same winner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaintStamp {
    pub clock: u64,
    pub painter: Identity,
}

impl PaintStamp {
    pub fn new(clock: u64, painter: Identity) -> Self {
        Self { clock, painter }
    }

    /// Entries sent without a stamp carry the zero stamp and rank below
    /// every stamped entry.
    pub fn is_unstamped(&self) -> bool {
        self.clock == 0
    }
}

impl PartialOrd for PaintStamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PaintStamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.clock
            .cmp(&other.clock)
            .then_with(|| self.painter.cmp(&other.painter))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintEntry {
    pub part_id: String,
    pub color: PaintColor,
    #[serde(default)]
    pub stamp: PaintStamp,
}

impl PaintEntry {
    pub fn new(part_id: impl Into<String>, color: PaintColor, stamp: PaintStamp) -> Self {
        Self {
            part_id: part_id.into(),
            color,
            stamp,
        }
    }

    /// Whether this entry should replace `current` when received from a peer.
    /// Entries rank by stamp, then by color, so the highest one wins whatever
    /// order they arrive in.
    pub fn supersedes(&self, current: &PaintEntry) -> bool {
        (&self.stamp, &self.color) > (&current.stamp, &current.color)
    }
}

/// `modelPaintData` on the wire: every model's paint set
pub type ModelPaintData = BTreeMap<ModelName, Vec<PaintEntry>>;
