use std::collections::BTreeMap;

use log::{debug, warn};

use crate::{
    catalog::BodyPartCatalog,
    color::PaintColor,
    paint::{
        error::PaintError,
        paint_entry::{ModelPaintData, PaintEntry, PaintStamp},
    },
    types::{Identity, ModelName},
};

/// Result of applying a paint entry received from a peer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaintOutcome {
    /// The entry replaced (or created) the part's color
    Applied(PaintEntry),
    /// The store already held this entry or a newer one
    Unchanged,
}

/// Paint sets of every model in the session. At most one entry per part
/// is kept per model; retrieval is by part id, never by position.
pub struct PaintStore {
    sets: ModelPaintData,
    clock: u64,
}

impl PaintStore {
    pub fn new() -> Self {
        Self {
            sets: BTreeMap::new(),
            clock: 0,
        }
    }

    /// Paint a part on behalf of the local user and return the entry to
    /// broadcast.
    pub fn apply_local_paint(
        &mut self,
        catalog: &BodyPartCatalog,
        model: ModelName,
        part_id: &str,
        color: PaintColor,
        painter: &Identity,
    ) -> Result<PaintEntry, PaintError> {
        Self::check_part(catalog, model, part_id)?;

        self.clock += 1;
        let entry = PaintEntry::new(part_id, color, PaintStamp::new(self.clock, painter.clone()));
        self.replace(model, entry.clone());

        Ok(entry)
    }

    /// Apply paint received from a peer. Applying the same entry again is a
    /// no-op, and the final state does not depend on arrival order.
    pub fn apply_remote_paint(
        &mut self,
        catalog: &BodyPartCatalog,
        model: ModelName,
        entry: PaintEntry,
    ) -> Result<PaintOutcome, PaintError> {
        Self::check_part(catalog, model, &entry.part_id)?;

        self.observe(&entry.stamp);

        if let Some(current) = self.entry(model, &entry.part_id) {
            if !entry.supersedes(current) {
                debug!("Paint on {}/{} superseded, ignoring", model, entry.part_id);
                return Ok(PaintOutcome::Unchanged);
            }
        }

        self.replace(model, entry.clone());
        Ok(PaintOutcome::Applied(entry))
    }

    /// Merge a full state received from the host. Incoming entries win on
    /// part collisions.
    pub fn merge_full_state(&mut self, catalog: &BodyPartCatalog, remote: ModelPaintData) {
        for (model, entries) in remote {
            for entry in entries {
                if let Err(error) = Self::check_part(catalog, model, &entry.part_id) {
                    warn!("{}", error);
                    continue;
                }
                self.observe(&entry.stamp);
                self.replace(model, entry);
            }
        }
    }

    pub fn entries(&self, model: ModelName) -> &[PaintEntry] {
        self.sets.get(&model).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn entry(&self, model: ModelName, part_id: &str) -> Option<&PaintEntry> {
        self.entries(model)
            .iter()
            .find(|entry| entry.part_id == part_id)
    }

    pub fn color_of(&self, model: ModelName, part_id: &str) -> PaintColor {
        self.entry(model, part_id)
            .map(|entry| entry.color)
            .unwrap_or(PaintColor::Unpainted)
    }

    pub fn all(&self) -> &ModelPaintData {
        &self.sets
    }

    /// Order-independent view of the store, for comparing peers
    pub fn snapshot(&self) -> BTreeMap<ModelName, BTreeMap<String, PaintColor>> {
        self.sets
            .iter()
            .map(|(model, entries)| {
                let colors = entries
                    .iter()
                    .map(|entry| (entry.part_id.clone(), entry.color))
                    .collect();
                (*model, colors)
            })
            .collect()
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    // Private methods

    fn check_part(
        catalog: &BodyPartCatalog,
        model: ModelName,
        part_id: &str,
    ) -> Result<(), PaintError> {
        if catalog.contains(model, part_id) {
            return Ok(());
        }
        Err(PaintError::UnknownPart {
            model,
            part_id: part_id.to_string(),
        })
    }

    fn observe(&mut self, stamp: &PaintStamp) {
        self.clock = self.clock.max(stamp.clock);
    }

    fn replace(&mut self, model: ModelName, entry: PaintEntry) {
        let set = self.sets.entry(model).or_default();
        set.retain(|current| current.part_id != entry.part_id);
        set.push(entry);
    }
}

impl Default for PaintStore {
    fn default() -> Self {
        Self::new()
    }
}
