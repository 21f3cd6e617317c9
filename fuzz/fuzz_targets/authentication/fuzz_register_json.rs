// Run with: cargo fuzz run fuzz_register_json
// Exercises every field validator behind registration.
#![no_main]

use clinichub::domain::{NewUser, RegisterPayload};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(payload) = serde_json::from_slice::<RegisterPayload>(data) {
        let _ = NewUser::try_from(payload);
    }
});
