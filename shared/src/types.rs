use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identity of a peer, as handed out by the presence layer
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The `user` block carried by every envelope
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub identity: Identity,
    pub display_name: String,
}

impl UserInfo {
    pub fn new(identity: impl Into<Identity>, display_name: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            display_name: display_name.into(),
        }
    }
}

/// One of the interchangeable anatomical visualizations
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelName {
    Skeleton,
    Body,
    Organs,
}

impl ModelName {
    pub const ALL: [ModelName; 3] = [ModelName::Skeleton, ModelName::Body, ModelName::Organs];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::Skeleton => "skeleton",
            ModelName::Body => "body",
            ModelName::Organs => "organs",
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity mode. The discriminant is the index used by `modeChange`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Paint = 0,
    Tour = 1,
    Doctor = 2,
}

impl Mode {
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Mode::Paint),
            1 => Some(Mode::Tour),
            2 => Some(Mode::Doctor),
            _ => None,
        }
    }
}

impl Serialize for Mode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let index = u8::deserialize(deserializer)?;
        Mode::from_index(index)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown mode index {}", index)))
    }
}

/// Index into the active model's part list, as carried by `nextQuestion`
pub type QuizCursor = usize;
