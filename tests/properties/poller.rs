//! Property tests for the poll state machine.

use proptest::prelude::*;

use backsync::domain::services::{transition, Observation, PollResult, PollState};
use backsync::StageGroup;

fn group() -> impl Strategy<Value = StageGroup> {
    prop_oneof![
        Just(StageGroup::InProgress),
        Just(StageGroup::CompletedSuccess),
        Just(StageGroup::CompletedFailure),
        "[A-Z_]{1,20}".prop_map(StageGroup::Unrecognized),
    ]
}

proptest! {
    /// PROPERTY: Replaying observations never issues more than `max` queries.
    #[test]
    fn property_attempts_are_bounded(
        max in 1u32..30,
        groups in proptest::collection::vec(group(), 1..60),
    ) {
        let mut attempt = 1;
        let mut done = None;
        for group in groups {
            match transition(attempt, max, Observation::Status { raw: "S".to_string(), group }) {
                PollState::Polling(next) => {
                    prop_assert_eq!(next, attempt + 1);
                    attempt = next;
                }
                PollState::Done(result) => {
                    done = Some(result);
                    break;
                }
            }
        }
        prop_assert!(attempt <= max);
        if let Some(PollResult::ExhaustedRetries { attempts }) = done {
            prop_assert_eq!(attempts, max);
        }
    }

    /// PROPERTY: Only in-progress statuses keep the poller going.
    #[test]
    fn property_only_in_progress_continues(attempt in 1u32..50, max in 1u32..50, group in group()) {
        let in_progress = group == StageGroup::InProgress;
        let next = transition(attempt, max, Observation::Status { raw: "S".to_string(), group });
        prop_assert_eq!(matches!(next, PollState::Polling(_)), in_progress && attempt < max);
    }

    /// PROPERTY: A failed query ends the poll with its message.
    #[test]
    fn property_query_failure_is_terminal(attempt in 1u32..50, message in "\\PC{0,30}") {
        prop_assert_eq!(
            transition(attempt, 50, Observation::QueryFailed(message.clone())),
            PollState::Done(PollResult::InterruptedByError(message))
        );
    }
}
