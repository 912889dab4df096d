//! Journey State Types
//!
//! Wire types shared by the tool adapter and the widget. Field names are
//! camelCase on the wire; absent fields are omitted rather than sent as null.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::steps::Step;

/// Requested room type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Multi,
    Single,
    Day,
}

impl RoomType {
    pub const ALL: [RoomType; 3] = [RoomType::Multi, RoomType::Single, RoomType::Day];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Multi => "multi",
            RoomType::Single => "single",
            RoomType::Day => "day",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            RoomType::Multi => "Multi-person room",
            RoomType::Single => "Single room",
            RoomType::Day => "Day admission",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomType::ALL
            .into_iter()
            .find(|room| room.as_str() == s)
            .ok_or_else(|| format!("unknown room type '{}'", s))
    }
}

/// Fields accumulated across the journey.
///
/// Every field is optional. Fields are only ever added or overwritten, never
/// removed. Unknown keys are ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abroad: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admission_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accident: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<RoomType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration_id: Option<String>,
}

/// Arguments of one `hospital_journey` invocation.
///
/// A missing `step` means [`Step::Start`]; a missing `state` means an empty
/// [`JourneyState`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<JourneyState>,
}

impl JourneyArgs {
    pub fn new(step: Step, state: JourneyState) -> Self {
        Self {
            step: Some(step),
            state: Some(state),
        }
    }

    /// Apply the documented defaults
    pub fn into_parts(self) -> (Step, JourneyState) {
        (self.step.unwrap_or_default(), self.state.unwrap_or_default())
    }
}

/// Structured payload returned to the widget after every call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyPayload {
    pub step: Step,
    pub state: JourneyState,
}
