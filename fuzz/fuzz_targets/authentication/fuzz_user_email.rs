// Run with: cargo fuzz run fuzz_user_email
#![no_main]

use clinichub::domain::UserEmail;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = UserEmail::parse(s.to_string());
    }
});
