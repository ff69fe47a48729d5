use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    messages::{action::Action, error::MessageError},
    types::UserInfo,
};

/// A message as carried by the transport:
/// `{ "user": {..}, "action": <tag>, "content": <payload> }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub user: UserInfo,
    pub action: Action,
}

#[derive(Serialize, Deserialize)]
struct WireEnvelope {
    user: UserInfo,
    action: String,
    #[serde(default)]
    content: Value,
}

impl Envelope {
    pub fn new(user: UserInfo, action: Action) -> Self {
        Self { user, action }
    }

    pub fn encode(&self) -> Result<String, MessageError> {
        let tag = self.action.tag();
        let encode_failed = |error: serde_json::Error| MessageError::EncodeFailed {
            action: tag,
            reason: error.to_string(),
        };

        let content = match &self.action {
            Action::Init(content) => serde_json::to_value(content),
            Action::SwitchModel(model) => serde_json::to_value(model),
            Action::ModeChange(mode) => serde_json::to_value(mode),
            Action::Paint(content) => serde_json::to_value(content),
            Action::SyncAllPaintData(content) => serde_json::to_value(content),
            Action::NextQuestion(cursor) => serde_json::to_value(cursor),
            Action::Answer(question) => serde_json::to_value(question),
            Action::Update(roster) => serde_json::to_value(roster),
            Action::StartDoctor(roster) => serde_json::to_value(roster),
            Action::Leave => Ok(Value::Null),
        }
        .map_err(encode_failed)?;

        let wire = WireEnvelope {
            user: self.user.clone(),
            action: tag.to_string(),
            content,
        };
        serde_json::to_string(&wire).map_err(encode_failed)
    }

    /// Decodes a received payload. Unknown action tags decode to `Ok(None)`
    /// so newer peers can add actions without breaking older ones.
    pub fn decode(payload: &str) -> Result<Option<Envelope>, MessageError> {
        let wire: WireEnvelope =
            serde_json::from_str(payload).map_err(|error| MessageError::InvalidEnvelope {
                reason: error.to_string(),
            })?;
        let WireEnvelope {
            user,
            action,
            content,
        } = wire;

        let action = match action.as_str() {
            "init" => Action::Init(read_content("init", content)?),
            "switchModel" => Action::SwitchModel(read_content("switchModel", content)?),
            "modeChange" => Action::ModeChange(read_content("modeChange", content)?),
            "paint" => Action::Paint(read_content("paint", content)?),
            "syncAllPaintData" => {
                Action::SyncAllPaintData(read_content("syncAllPaintData", content)?)
            }
            "nextQuestion" => Action::NextQuestion(read_content("nextQuestion", content)?),
            // older peers send no question index at all
            "answer" => Action::Answer(read_content("answer", content)?),
            "update" => Action::Update(read_content("update", content)?),
            "startDoctor" => Action::StartDoctor(read_content("startDoctor", content)?),
            "leave" => Action::Leave,
            _ => return Ok(None),
        };

        Ok(Some(Envelope { user, action }))
    }
}

fn read_content<T: DeserializeOwned>(action: &'static str, content: Value) -> Result<T, MessageError> {
    serde_json::from_value(content).map_err(|error| MessageError::MalformedContent {
        action,
        reason: error.to_string(),
    })
}
