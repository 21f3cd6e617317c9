// Run with: cargo fuzz run fuzz_login_json
// Drives JSON -> LoginData -> Credentials the way the login handler does.
#![no_main]

use clinichub::authentication::Credentials;
use clinichub::domain::LoginData;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(payload) = serde_json::from_slice::<LoginData>(data) {
        let _ = Credentials::try_from(payload);
    }
});
