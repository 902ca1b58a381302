//! Property tests for the conflict guard.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use backsync::domain::services::check_remote_ahead;
use backsync::{RemoteBackendSnapshot, Timestamp};

fn remote_at(at: Timestamp) -> RemoteBackendSnapshot {
    RemoteBackendSnapshot::new("p-1", "backend").with_last_updated(at)
}

proptest! {
    /// PROPERTY: The remote is ahead exactly when the two valid times differ to the second.
    #[test]
    fn property_ahead_iff_seconds_differ(
        local in 1_000_000_000i64..4_000_000_000i64,
        remote in 1_000_000_000i64..4_000_000_000i64,
        nanos in 0u32..1_000_000_000,
    ) {
        let local_ts = Timestamp::from_datetime(Utc.timestamp_opt(local, 0).unwrap());
        let remote_ts = Timestamp::from_datetime(Utc.timestamp_opt(remote, nanos).unwrap());
        prop_assert_eq!(check_remote_ahead(&local_ts, &remote_at(remote_ts)), local != remote);
    }

    /// PROPERTY: Anything that does not parse as a time reads as "remote ahead".
    #[test]
    fn property_invalid_local_time_is_ahead(raw in "[a-z]{0,16}", remote in 1_000_000_000i64..4_000_000_000i64) {
        let remote_ts = Timestamp::from_datetime(Utc.timestamp_opt(remote, 0).unwrap());
        prop_assert!(check_remote_ahead(&Timestamp::parse(&raw), &remote_at(remote_ts)));
    }
}
