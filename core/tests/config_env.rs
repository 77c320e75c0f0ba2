//! Endpoint resolution against the real process environment.
//!
//! These tests mutate `CYREST_URL` / `CYREST_PORT`, so they run serially.

use cyrest_core::config::{BASE_URL_ENV, PORT_ENV};
use cyrest_core::{CyCaller, CyRestInstance, HttpMethod};
use serial_test::serial;

/// Clears both variables on creation and on drop.
struct EnvGuard;

impl EnvGuard {
    fn new() -> Self {
        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(PORT_ENV);
        EnvGuard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(PORT_ENV);
    }
}

#[test]
#[serial]
fn defaults_without_env() {
    let _guard = EnvGuard::new();
    let instance = CyRestInstance::default();
    assert_eq!(instance.base_url(), "http://localhost");
    assert_eq!(instance.port(), "1234");
}

#[test]
#[serial]
fn env_is_read_when_arguments_are_absent() {
    let _guard = EnvGuard::new();
    std::env::set_var(BASE_URL_ENV, "http://192.168.1.20");
    std::env::set_var(PORT_ENV, "8888");

    let instance = CyRestInstance::new(None, None);
    assert_eq!(instance.address(), "http://192.168.1.20:8888");
}

#[test]
#[serial]
fn explicit_arguments_beat_env() {
    let _guard = EnvGuard::new();
    std::env::set_var(BASE_URL_ENV, "http://192.168.1.20");
    std::env::set_var(PORT_ENV, "8888");

    let instance = CyRestInstance::new(Some("http://localhost"), None);
    assert_eq!(instance.address(), "http://localhost:8888");

    let instance = CyRestInstance::new(None, Some(1235));
    assert_eq!(instance.address(), "http://192.168.1.20:1235");
}

#[test]
#[serial]
fn resolution_happens_once_at_construction() {
    let _guard = EnvGuard::new();
    std::env::set_var(PORT_ENV, "4000");
    let caller = CyCaller::new();
    std::env::set_var(PORT_ENV, "5000");

    let req = caller.build_request(HttpMethod::Get, "/v1", None, &[]);
    assert_eq!(req.url, "http://localhost:4000/v1");
}
