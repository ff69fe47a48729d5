use serde::{Deserialize, Serialize};

use crate::{
    color::PaintColor,
    paint::paint_entry::{ModelPaintData, PaintEntry, PaintStamp},
    roster::participant::Participant,
    types::{Mode, ModelName, QuizCursor},
};

/// `init` content: `[modelPaintData, roster]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitContent(pub ModelPaintData, pub Vec<Participant>);

/// `paint` content
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintContent {
    pub part_id: String,
    pub color: PaintColor,
    pub model_name: ModelName,
    #[serde(default)]
    pub stamp: PaintStamp,
}

impl PaintContent {
    pub fn new(model_name: ModelName, entry: PaintEntry) -> Self {
        Self {
            part_id: entry.part_id,
            color: entry.color,
            model_name,
            stamp: entry.stamp,
        }
    }

    pub fn into_entry(self) -> (ModelName, PaintEntry) {
        (
            self.model_name,
            PaintEntry::new(self.part_id, self.color, self.stamp),
        )
    }
}

/// `syncAllPaintData` content
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncContent {
    pub model_paint_data: ModelPaintData,
    pub current_model: ModelName,
}

/// Every message a peer can exchange, with its typed content
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Host to joiner: full paint state and roster
    Init(InitContent),
    SwitchModel(ModelName),
    ModeChange(Mode),
    Paint(PaintContent),
    SyncAllPaintData(SyncContent),
    NextQuestion(QuizCursor),
    /// The answering peer's local check said "correct" for this question
    Answer(Option<QuizCursor>),
    Update(Vec<Participant>),
    StartDoctor(Vec<Participant>),
    Leave,
}

impl Action {
    pub fn tag(&self) -> &'static str {
        match self {
            Action::Init(_) => "init",
            Action::SwitchModel(_) => "switchModel",
            Action::ModeChange(_) => "modeChange",
            Action::Paint(_) => "paint",
            Action::SyncAllPaintData(_) => "syncAllPaintData",
            Action::NextQuestion(_) => "nextQuestion",
            Action::Answer(_) => "answer",
            Action::Update(_) => "update",
            Action::StartDoctor(_) => "startDoctor",
            Action::Leave => "leave",
        }
    }
}
