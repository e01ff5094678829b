//! `/api/keyboard*`: global shortcuts and the modal focus trap.

use crate::dashboard::state::with_controller_mut;
use crate::error::RequestError;
use crate::keyboard::{focus_trap, KeyEvent};
use crate::routes::util::{effects_response, get_flag, get_param, parse_form_body};

fn parse_event(body: &str) -> Result<KeyEvent, RequestError> {
    if body.trim().is_empty() {
        return Err(RequestError::Missing("event"));
    }
    Ok(serde_json::from_str(body)?)
}

/// Handle POST /api/keyboard: body is the JSON `KeyEvent`.
pub fn handle_key_post(body: &str) -> String {
    match parse_event(body) {
        Ok(event) => effects_response(with_controller_mut(|c| c.key_down(&event))),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring key event");
            "[]".to_string()
        }
    }
}

/// Handle POST /api/keyboard/reset: forget partial konami progress.
pub fn handle_reset_post(_body: &str) -> String {
    with_controller_mut(|c| c.reset_konami());
    "ok".to_string()
}

/// Handle POST /api/keyboard/focus-trap: body `count=N&active=I&shift=true`.
/// Returns the index to move focus to, or `null`.
pub fn handle_focus_trap_post(body: &str) -> String {
    let params = parse_form_body(body);
    let count = get_param(&params, "count").and_then(|v| v.parse().ok()).unwrap_or(0);
    let active = get_param(&params, "active").and_then(|v| v.parse().ok());
    match focus_trap(count, active, get_flag(&params, "shift")) {
        Some(index) => index.to_string(),
        None => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::state::{reset, with_controller};

    #[test]
    fn slash_focuses_search() {
        reset();
        let json = handle_key_post(r#"{"code":"Slash","key":"/"}"#);
        assert_eq!(json, r#"[{"type":"focus_search"}]"#);
        reset();
    }

    #[test]
    fn malformed_event_is_ignored() {
        reset();
        assert_eq!(handle_key_post("{"), "[]");
        assert_eq!(handle_key_post(""), "[]");
        reset();
    }

    #[test]
    fn reset_clears_konami_progress() {
        reset();
        handle_key_post(r#"{"code":"ArrowUp","key":"ArrowUp"}"#);
        handle_key_post(r#"{"code":"ArrowUp","key":"ArrowUp"}"#);
        assert_eq!(with_controller(|c| c.konami_progress()), 2);
        assert_eq!(handle_reset_post(""), "ok");
        assert_eq!(with_controller(|c| c.konami_progress()), 0);
        reset();
    }

    #[test]
    fn focus_trap_wraps() {
        assert_eq!(handle_focus_trap_post("count=3&active=2"), "0");
        assert_eq!(handle_focus_trap_post("count=3&active=0&shift=true"), "2");
        assert_eq!(handle_focus_trap_post("count=3&active=1"), "null");
        assert_eq!(handle_focus_trap_post(""), "null");
    }
}
