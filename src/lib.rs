//! Springfield dashboard in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the Web Worker
//! bridge to call, plus `init_dashboard(config_json, now)` to start a session. Uses
//! `matchit` for URL routing: the same router engine that powers Axum.
//!
//! Card grid and dialog routes answer with HTML fragments for HTMX. All
//! other routes answer with a JSON list of effects that the page applies.

use wasm_bindgen::prelude::*;

pub mod ambient;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod keyboard;
pub mod modal;
pub mod prefs;
pub mod routes;
pub mod sound;
pub mod theme;

/// Start (or restart) the dashboard session.
///
/// `config_json` may be empty or a partial `DashboardConfig`; malformed input
/// falls back to the defaults. `now` is the page's `performance.now()`.
/// Returns the startup effects as JSON.
#[wasm_bindgen]
pub fn init_dashboard(config_json: &str, now: f64) -> String {
    let config = config::DashboardConfig::from_json_or_default(config_json);
    dashboard::effect::to_json(&dashboard::state::init(config, now))
}

/// Process an HTTP-like request and return a response body.
///
/// Called from JavaScript (Web Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method`: HTTP method (e.g., "GET", "POST")
/// * `path`: URL path (e.g., "/api/cards")
/// * `query`: Query string (e.g., "?category=municipal")
/// * `body`: Request body (e.g., POST form data). Empty string for GET requests.
///
/// # Returns
/// An HTML fragment or a JSON effect list, depending on the route.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    // Build the router. matchit compiles route patterns into a radix tree.
    let mut router = matchit::Router::new();

    // Card grid and filters
    router.insert("/api/cards", "cards").ok();
    router.insert("/api/cards/visible", "cards_visible").ok();
    router.insert("/api/cards/activate", "cards_activate").ok();
    router.insert("/api/search", "search").ok();
    router.insert("/api/map/district", "map_district").ok();
    router.insert("/api/random", "random").ok();
    router.insert("/api/favorites", "favorites").ok();
    router.insert("/api/favorites/toggle", "favorites_toggle").ok();

    // Dialogs
    router.insert("/api/modal/location", "modal_location").ok();
    router.insert("/api/modal/stats", "modal_stats").ok();
    router.insert("/api/modal/help", "modal_help").ok();
    router.insert("/api/modal/close", "modal_close").ok();

    // Preferences
    router.insert("/api/prefs/theme", "prefs_theme").ok();
    router.insert("/api/prefs/contrast", "prefs_contrast").ok();
    router.insert("/api/prefs/season1", "prefs_season1").ok();
    router.insert("/api/prefs/state", "prefs_state").ok();
    router.insert("/api/prefs/restore", "prefs_restore").ok();
    router.insert("/api/prefs/storage-failed", "prefs_storage_failed").ok();

    // Keyboard
    router.insert("/api/keyboard", "keyboard").ok();
    router.insert("/api/keyboard/reset", "keyboard_reset").ok();
    router.insert("/api/keyboard/focus-trap", "keyboard_focus_trap").ok();

    // Easter eggs and sound
    router.insert("/api/effects/sprinkles", "effects_sprinkles").ok();
    router.insert("/api/effects/donut", "effects_donut").ok();
    router.insert("/api/effects/donut-rain", "effects_donut_rain").ok();
    router.insert("/api/effects/seal", "effects_seal").ok();
    router.insert("/api/sound", "sound").ok();

    // Ambient loops and layout
    router.insert("/api/ambient/tick", "ambient_tick").ok();
    router.insert("/api/ambient/pause", "ambient_pause").ok();
    router.insert("/api/ambient/resume", "ambient_resume").ok();
    router.insert("/api/ambient/tasks", "ambient_tasks").ok();
    router.insert("/api/ambient/cancel", "ambient_cancel").ok();
    router.insert("/api/ui/resize", "ui_resize").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            // GET routes
            ("cards", "GET") => routes::cards::handle(query),
            ("cards_visible", "GET") => routes::cards::handle_visible(query),
            ("favorites", "GET") => routes::cards::handle_favorites_get(query),
            ("modal_location", "GET") => routes::modal::handle_location_get(query),
            ("modal_stats", "GET") => routes::modal::handle_stats_get(query),
            ("modal_help", "GET") => routes::modal::handle_help_get(query),
            ("prefs_state", "GET") => routes::prefs::handle_state_get(query),
            ("sound", "GET") => routes::effects::handle_sound_get(query),
            ("ambient_tasks", "GET") => routes::ambient::handle_tasks_get(query),

            // POST routes
            ("cards_activate", "POST") => routes::cards::handle_activate_post(body),
            ("search", "POST") => routes::cards::handle_search_post(body),
            ("map_district", "POST") => routes::cards::handle_district_post(body),
            ("random", "POST") => routes::cards::handle_random_post(body),
            ("favorites_toggle", "POST") => routes::cards::handle_favorite_toggle_post(body),
            ("modal_close", "POST") => routes::modal::handle_close_post(body),
            ("prefs_theme", "POST") => routes::prefs::handle_theme_post(body),
            ("prefs_contrast", "POST") => routes::prefs::handle_contrast_post(body),
            ("prefs_season1", "POST") => routes::prefs::handle_season1_post(body),
            ("prefs_restore", "POST") => routes::prefs::handle_restore_post(body),
            ("prefs_storage_failed", "POST") => routes::prefs::handle_storage_failed_post(body),
            ("keyboard", "POST") => routes::keyboard::handle_key_post(body),
            ("keyboard_reset", "POST") => routes::keyboard::handle_reset_post(body),
            ("keyboard_focus_trap", "POST") => routes::keyboard::handle_focus_trap_post(body),
            ("effects_sprinkles", "POST") => routes::effects::handle_sprinkles_post(body),
            ("effects_donut", "POST") => routes::effects::handle_donut_post(body),
            ("effects_donut_rain", "POST") => routes::effects::handle_donut_rain_post(body),
            ("effects_seal", "POST") => routes::effects::handle_seal_post(body),
            ("ambient_tick", "POST") => routes::ambient::handle_tick_post(body),
            ("ambient_pause", "POST") => routes::ambient::handle_pause_post(body),
            ("ambient_resume", "POST") => routes::ambient::handle_resume_post(body),
            ("ambient_cancel", "POST") => routes::ambient::handle_cancel_post(body),
            ("ui_resize", "POST") => routes::ambient::handle_resize_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="text-error">404: route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-error">405: method not allowed</span>"#.to_string()
}
