//! Journey Step Table
//!
//! The journey is a linear sequence of named steps. Transitions are data,
//! not control flow: every step owns exactly one [`Transition`] record in
//! [`STEP_TABLE`], and the engine only ever looks the record up.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::JourneyError;

/// A stage of the hospital admission journey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Start,
    SelectMember,
    SelectHospital,
    AdmissionDetails,
    RoomType,
    Review,
    Submitted,
}

impl Step {
    /// All steps in journey order
    pub const ALL: [Step; 7] = [
        Step::Start,
        Step::SelectMember,
        Step::SelectHospital,
        Step::AdmissionDetails,
        Step::RoomType,
        Step::Review,
        Step::Submitted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Start => "start",
            Step::SelectMember => "select_member",
            Step::SelectHospital => "select_hospital",
            Step::AdmissionDetails => "admission_details",
            Step::RoomType => "room_type",
            Step::Review => "review",
            Step::Submitted => "submitted",
        }
    }

    /// The transition record for this step
    pub fn transition(&self) -> &'static Transition {
        // STEP_TABLE is ordered like Step::ALL
        &STEP_TABLE[*self as usize]
    }

    /// Terminal steps map to themselves
    pub fn is_terminal(&self) -> bool {
        self.transition().to == *self
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Step {
    type Err = JourneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Step::ALL
            .into_iter()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| JourneyError::InvalidStep(s.to_string()))
    }
}

/// State mutation applied while leaving a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Issue the declaration identifier (`HSP-NNNNNN`)
    IssueDeclarationId,
}

/// One row of the step table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: Step,
    pub to: Step,
    pub effect: Effect,
    /// Narrative for the model-facing transcript
    pub message: &'static str,
}

/// The journey step table, one row per step in journey order.
pub static STEP_TABLE: [Transition; 7] = [
    Transition {
        from: Step::Start,
        to: Step::SelectMember,
        effect: Effect::None,
        message: "I'll help you with your hospital admission. For whom is the admission (yourself or a family member)?",
    },
    Transition {
        from: Step::SelectMember,
        to: Step::SelectHospital,
        effect: Effect::None,
        message: "Great! Please provide the patient's name, then we'll select the hospital.",
    },
    Transition {
        from: Step::SelectHospital,
        to: Step::AdmissionDetails,
        effect: Effect::None,
        message: "Perfect. Now please provide the admission date and the reason (e.g., knee surgery, childbirth).",
    },
    Transition {
        from: Step::AdmissionDetails,
        to: Step::RoomType,
        effect: Effect::None,
        message: "What type of room would you like? Multi-person room, single room, or day admission?",
    },
    Transition {
        from: Step::RoomType,
        to: Step::Review,
        effect: Effect::None,
        message: "I'll create a summary of your declaration so you can review everything before we submit.",
    },
    Transition {
        from: Step::Review,
        to: Step::Submitted,
        effect: Effect::IssueDeclarationId,
        message: "Your hospitalization has been registered (demo). Use this overview and your member number to inform the hospital.",
    },
    Transition {
        from: Step::Submitted,
        to: Step::Submitted,
        effect: Effect::None,
        message: "Your demo declaration is complete. You can ask additional questions or simulate extra costs.",
    },
];
