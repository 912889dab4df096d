use thiserror::Error;

/// Errors raised by the journey engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JourneyError {
    #[error("Invalid step '{0}': expected one of start, select_member, select_hospital, admission_details, room_type, review, submitted")]
    InvalidStep(String),
}
