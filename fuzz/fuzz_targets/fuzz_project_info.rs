#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(state) = serde_json::from_slice::<backsync::ProjectState>(data) {
        // Anything we accept must serialize back out
        let _ = serde_json::to_string(&state).expect("re-serialize project record");
    }
});
