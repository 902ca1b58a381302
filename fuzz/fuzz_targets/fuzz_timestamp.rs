#![no_main]

use backsync::Timestamp;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let parsed = Timestamp::parse(raw);
        let persisted = parsed.to_persisted();
        if parsed.is_valid() {
            // Persisted form is second precision and stable from then on
            assert_eq!(Timestamp::parse(&persisted).to_persisted(), persisted);
        } else {
            assert_eq!(persisted, raw);
        }
    }
});
