use thiserror::Error;

use crate::types::ModelName;

/// Errors that can occur while applying paint to the store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaintError {
    /// Part is not part of the model's mesh set
    #[error("Part {part_id:?} does not exist on model {model}. Paint for unknown parts is ignored")]
    UnknownPart { model: ModelName, part_id: String },
}
