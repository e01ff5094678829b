//! Smoke tests for the exported entry points, run under `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use springfield_server::{handle_request, init_dashboard};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn init_returns_startup_effects() {
    let json = init_dashboard("", 0.0);
    assert!(json.starts_with('['));
    assert!(json.contains(r#""type":"skyline""#));
    assert!(json.contains(r#""type":"hidden_donuts""#));
}

#[wasm_bindgen_test]
fn card_grid_renders() {
    init_dashboard("{}", 0.0);
    let html = handle_request("GET", "/api/cards", "?category=all", "");
    assert_eq!(html.matches("<article").count(), 6);
}

#[wasm_bindgen_test]
fn unknown_route_is_404() {
    assert!(handle_request("GET", "/nope", "", "").contains("404"));
}

#[wasm_bindgen_test]
fn keyboard_bridge_round_trip() {
    init_dashboard(r#"{"audio_available":false}"#, 0.0);
    let json = handle_request("POST", "/api/keyboard", "", r#"{"code":"Escape","key":"Escape"}"#);
    assert_eq!(json, r#"[{"type":"close_modals"}]"#);
}
