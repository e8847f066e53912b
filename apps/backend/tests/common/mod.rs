#![allow(dead_code)]

use health_backend::{SecurityConfig, TokenAuthority};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const SECRET_A: &str = "integration_secret_key_for_tests_only_A";
pub const SECRET_B: &str = "integration_secret_key_for_tests_only_B";

pub fn authority(secret: &str) -> TokenAuthority {
    let security = SecurityConfig::new(secret.as_bytes()).expect("test secret is long enough");
    TokenAuthority::new(&security)
}
