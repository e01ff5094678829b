//! `/api/prefs/*`: theme, contrast, and the `localStorage` mirror.
//!
//! The page reads `localStorage` on load and POSTs the raw entries to
//! `/api/prefs/restore` as a JSON object of `key → stored string`. Every
//! later write comes back to the page as a `persist` effect.

use std::collections::BTreeMap;

use crate::dashboard::state::{with_controller, with_controller_mut};
use crate::error::{RequestError, StorageError};
use crate::routes::util::{effects_response, get_param, parse_form_body};

/// Handle POST /api/prefs/theme: advance to the next theme.
pub fn handle_theme_post(_body: &str) -> String {
    effects_response(with_controller_mut(|c| c.cycle_theme()))
}

/// Handle POST /api/prefs/contrast
pub fn handle_contrast_post(_body: &str) -> String {
    effects_response(with_controller_mut(|c| c.toggle_high_contrast()))
}

/// Handle POST /api/prefs/season1
pub fn handle_season1_post(_body: &str) -> String {
    effects_response(with_controller_mut(|c| c.toggle_season1()))
}

/// Handle GET /api/prefs/state: the in-memory preferences as JSON.
pub fn handle_state_get(_query: &str) -> String {
    with_controller(|c| serde_json::to_string(c.preferences()).unwrap_or_else(|_| "{}".to_string()))
}

fn parse_entries(body: &str) -> Result<BTreeMap<String, String>, RequestError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(BTreeMap::new());
    }
    Ok(serde_json::from_str(body)?)
}

/// Handle POST /api/prefs/restore: body is a JSON object of stored entries.
pub fn handle_restore_post(body: &str) -> String {
    match parse_entries(body) {
        Ok(entries) => effects_response(with_controller_mut(|c| c.restore_preferences(entries))),
        Err(e) => {
            tracing::warn!(error = %e, "preference restore rejected");
            format!("error: {}", e)
        }
    }
}

/// Handle POST /api/prefs/storage-failed: body `key=...&reason=...`.
pub fn handle_storage_failed_post(body: &str) -> String {
    let params = parse_form_body(body);
    let error = match get_param(&params, "key") {
        Some(key) => StorageError::Rejected {
            key: key.to_string(),
            reason: get_param(&params, "reason").unwrap_or("unknown").to_string(),
        },
        None => StorageError::Unavailable,
    };
    with_controller_mut(|c| c.storage_failed(&error));
    "ok".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::state::reset;

    #[test]
    fn theme_post_cycles_and_persists() {
        reset();
        let json = handle_theme_post("");
        assert!(json.contains(r#""theme":"night""#));
        assert!(json.contains(r#""key":"springfield_theme""#));
        reset();
    }

    #[test]
    fn restore_then_state() {
        reset();
        let json = handle_restore_post(
            r#"{"springfield_highContrast":"true","springfield_favorites":"[\"channel-6\"]","other":"x"}"#,
        );
        assert!(json.contains(r#""class":"high-contrast","on":true"#));
        let state = handle_state_get("");
        assert!(state.contains(r#""high_contrast":true"#));
        assert!(state.contains(r#""favorites":["channel-6"]"#));
        reset();
    }

    #[test]
    fn restore_rejects_malformed_body() {
        reset();
        assert!(handle_restore_post("not json").starts_with("error:"));
        assert!(handle_restore_post("").starts_with('['));
        reset();
    }

    #[test]
    fn storage_failure_stops_persist_effects() {
        reset();
        assert_eq!(handle_storage_failed_post("key=springfield_theme&reason=QuotaExceededError"), "ok");
        let json = handle_contrast_post("");
        assert!(!json.contains(r#""type":"persist""#));
        assert!(handle_state_get("").contains(r#""high_contrast":true"#));
        reset();
    }
}
