//! Property tests for persisted timestamps.

use proptest::prelude::*;

use backsync::Timestamp;

proptest! {
    /// PROPERTY: Valid persisted timestamps round-trip through parse.
    #[test]
    fn property_persisted_format_round_trips(
        y in 1970i32..2200, mo in 1u32..=12, d in 1u32..=28,
        h in 0u32..24, mi in 0u32..60, s in 0u32..60,
    ) {
        let raw = format!("{y:04}-{mo:02}-{d:02}-{h:02}-{mi:02}-{s:02}");
        let parsed = Timestamp::parse(&raw);
        prop_assert!(parsed.is_valid());
        prop_assert_eq!(parsed.to_persisted(), raw);
    }

    /// PROPERTY: Parsing never panics, and unreadable text is kept verbatim.
    #[test]
    fn property_invalid_text_is_preserved(raw in "\\PC{0,40}") {
        let parsed = Timestamp::parse(&raw);
        if !parsed.is_valid() {
            prop_assert_eq!(parsed.to_persisted(), raw);
        }
    }
}
