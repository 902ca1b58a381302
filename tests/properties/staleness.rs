//! Property tests for the staleness evaluator.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use backsync::domain::services::is_update_needed;
use backsync::Timestamp;

fn ts(secs: i64) -> Timestamp {
    Timestamp::from_datetime(Utc.timestamp_opt(secs, 0).unwrap())
}

fn epoch_secs() -> impl Strategy<Value = i64> {
    // 2001..2096
    1_000_000_000i64..4_000_000_000i64
}

proptest! {
    /// PROPERTY: Without a successful push on record, a push is always needed.
    #[test]
    fn property_unsuccessful_always_needs_push(
        last in epoch_secs(),
        build in epoch_secs(),
        exists in any::<bool>(),
    ) {
        prop_assert!(is_update_needed(false, &ts(last), exists, &ts(build)));
    }

    /// PROPERTY: With valid times, a push is needed iff the build is strictly newer.
    #[test]
    fn property_needed_iff_build_newer(last in epoch_secs(), build in epoch_secs()) {
        prop_assert_eq!(is_update_needed(true, &ts(last), true, &ts(build)), last < build);
    }

    /// PROPERTY: A missing build directory never triggers a push after success.
    #[test]
    fn property_missing_build_dir_is_never_stale(last in epoch_secs(), raw in "\\PC{0,20}") {
        prop_assert!(!is_update_needed(true, &ts(last), false, &Timestamp::parse(&raw)));
    }

    /// PROPERTY: An unreadable recorded time counts as stale.
    #[test]
    fn property_invalid_time_is_stale(build in epoch_secs(), raw in "[a-z ]{0,12}") {
        prop_assert!(is_update_needed(true, &Timestamp::parse(&raw), true, &ts(build)));
    }
}
