//! Hospital Admission Journey
//!
//! A minimal workflow engine guiding a member through a hospital admission
//! declaration, plus the presentation model the widget renders from.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   step    ┌──────────────┐  (step, state)  ┌──────────────┐
//! │  Step Table  │ ────────▶ │    Engine    │ ──────────────▶ │    Widget    │
//! │  (steps.rs)  │           │ (engine.rs)  │ ◀────────────── │ (widget/*)   │
//! └──────────────┘           └──────────────┘   JourneyArgs   └──────────────┘
//! ```
//!
//! The engine is stateless: the caller owns the accumulated [`JourneyState`]
//! and resends it on every call.

pub mod engine;
pub mod error;
pub mod state;
pub mod steps;
pub mod widget;

pub use engine::{advance, advance_named, advance_with_rng, JourneyOutcome, DECLARATION_PREFIX};
pub use error::JourneyError;
pub use state::{JourneyArgs, JourneyPayload, JourneyState, RoomType};
pub use steps::{Effect, Step, Transition, STEP_TABLE};
