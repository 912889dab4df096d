//! Journey Engine
//!
//! Applies the step table to a caller-supplied state. The engine never reads
//! state content to pick a transition; branching is solely on the step.

use rand::Rng;

use crate::error::JourneyError;
use crate::state::JourneyState;
use crate::steps::{Effect, Step};

/// Prefix of issued declaration identifiers
pub const DECLARATION_PREFIX: &str = "HSP";

/// Result of advancing the journey by one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyOutcome {
    pub step: Step,
    pub state: JourneyState,
    pub message: &'static str,
}

/// Advance the journey using the thread-local random source
pub fn advance(step: Step, state: JourneyState) -> JourneyOutcome {
    advance_with_rng(step, state, &mut rand::thread_rng())
}

/// Advance the journey, drawing identifiers from `rng`
pub fn advance_with_rng<R: Rng>(
    step: Step,
    mut state: JourneyState,
    rng: &mut R,
) -> JourneyOutcome {
    let transition = step.transition();

    match transition.effect {
        Effect::None => {}
        Effect::IssueDeclarationId => {
            // An identifier already issued for this journey is kept
            if state.declaration_id.is_none() {
                let id = declaration_id(rng);
                tracing::info!(declaration_id = %id, "issued declaration id");
                state.declaration_id = Some(id);
            }
        }
    }

    tracing::debug!(from = %step, to = %transition.to, "journey transition");

    JourneyOutcome {
        step: transition.to,
        state,
        message: transition.message,
    }
}

/// Advance the journey from a step name
pub fn advance_named(step: &str, state: JourneyState) -> Result<JourneyOutcome, JourneyError> {
    let step: Step = step.parse()?;
    Ok(advance(step, state))
}

/// `HSP-` followed by six digits, never starting with zero
fn declaration_id<R: Rng>(rng: &mut R) -> String {
    format!("{}-{}", DECLARATION_PREFIX, rng.gen_range(100_000..1_000_000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RoomType;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;

    fn filled_state() -> JourneyState {
        JourneyState {
            member_name: Some("Alex".into()),
            hospital_name: Some("General".into()),
            hospital_city: Some("Springfield".into()),
            abroad: Some(false),
            admission_date: Some("2026-01-10".into()),
            reason: Some("appendectomy".into()),
            accident: Some(false),
            room_type: Some(RoomType::Single),
            ..Default::default()
        }
    }

    #[test]
    fn test_start_moves_to_select_member() {
        let outcome = advance(Step::Start, JourneyState::default());
        assert_eq!(outcome.step, Step::SelectMember);
        assert_eq!(outcome.state, JourneyState::default());
        assert!(outcome.message.starts_with("I'll help you"));
    }

    #[test]
    fn test_review_issues_declaration_id() {
        let pattern = Regex::new(r"^HSP-\d{6}$").unwrap();
        let outcome = advance(Step::Review, filled_state());

        assert_eq!(outcome.step, Step::Submitted);
        let id = outcome.state.declaration_id.clone().unwrap();
        assert!(pattern.is_match(&id), "unexpected id {id}");

        let mut expected = filled_state();
        expected.declaration_id = Some(id);
        assert_eq!(outcome.state, expected);
    }

    #[test]
    fn test_review_keeps_existing_declaration_id() {
        let mut state = filled_state();
        state.declaration_id = Some("HSP-123456".into());
        let outcome = advance(Step::Review, state.clone());
        assert_eq!(outcome.state, state);
    }

    #[test]
    fn test_independent_reviews_differ() {
        let first = advance(Step::Review, filled_state());
        let second = advance(Step::Review, filled_state());
        assert_ne!(first.state.declaration_id, second.state.declaration_id);
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let a = advance_with_rng(Step::Review, JourneyState::default(), &mut rng_a);
        let b = advance_with_rng(Step::Review, JourneyState::default(), &mut rng_b);
        assert_eq!(a.state.declaration_id, b.state.declaration_id);
    }

    #[test]
    fn test_submitted_is_idempotent() {
        let submitted = advance(Step::Review, filled_state());
        let once = advance(Step::Submitted, submitted.state.clone());
        let twice = advance(Step::Submitted, once.state.clone());

        assert_eq!(once.step, Step::Submitted);
        assert_eq!(once.state, submitted.state);
        assert_eq!(twice, once);
        assert!(once.message.starts_with("Your demo declaration is complete"));
    }

    #[test]
    fn test_advance_named_rejects_unknown_step() {
        let err = advance_named("discharge", JourneyState::default()).unwrap_err();
        assert_eq!(err, JourneyError::InvalidStep("discharge".into()));
        assert!(advance_named("room_type", JourneyState::default()).is_ok());
    }

    // -- Property tests --

    fn arb_step() -> impl Strategy<Value = Step> {
        prop::sample::select(Step::ALL.to_vec())
    }

    fn arb_text() -> impl Strategy<Value = Option<String>> {
        prop::option::of("[A-Za-z0-9 -]{0,12}")
    }

    fn arb_state() -> impl Strategy<Value = JourneyState> {
        (
            (arb_text(), arb_text(), arb_text(), arb_text()),
            (any::<Option<bool>>(), arb_text(), arb_text(), any::<Option<bool>>()),
            (
                prop::option::of(prop::sample::select(RoomType::ALL.to_vec())),
                arb_text(),
            ),
        )
            .prop_map(
                |(
                    (member_id, member_name, hospital_name, hospital_city),
                    (abroad, admission_date, reason, accident),
                    (room_type, notes),
                )| JourneyState {
                    member_id,
                    member_name,
                    hospital_name,
                    hospital_city,
                    abroad,
                    admission_date,
                    reason,
                    accident,
                    room_type,
                    notes,
                    declaration_id: None,
                },
            )
    }

    proptest! {
        #[test]
        fn next_step_is_always_a_known_step(step in arb_step(), state in arb_state()) {
            let outcome = advance(step, state);
            prop_assert!(Step::ALL.contains(&outcome.step));
            prop_assert_eq!(outcome.step, step.transition().to);
        }

        #[test]
        fn existing_fields_are_never_altered(step in arb_step(), state in arb_state()) {
            let outcome = advance(step, state.clone());
            let mut without_id = outcome.state.clone();
            if step == Step::Review {
                prop_assert!(without_id.declaration_id.is_some());
                without_id.declaration_id = None;
            }
            prop_assert_eq!(without_id, state);
        }

        #[test]
        fn submitted_never_changes_state(state in arb_state()) {
            let outcome = advance(Step::Submitted, state.clone());
            prop_assert_eq!(outcome.step, Step::Submitted);
            prop_assert_eq!(outcome.state, state);
        }
    }
}
