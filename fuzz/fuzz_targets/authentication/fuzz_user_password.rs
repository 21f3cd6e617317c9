// Run with: cargo fuzz run fuzz_user_password
#![no_main]

use clinichub::domain::UserPassword;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = UserPassword::parse(s.to_string());
    }
});
