//! `/api/effects/*` and `/api/sound`: easter eggs and one-off tones.

use crate::dashboard::state::{with_controller, with_controller_mut};
use crate::routes::util::{effects_response, get_param, parse_form_body, parse_query};

/// Handle POST /api/effects/sprinkles
pub fn handle_sprinkles_post(_body: &str) -> String {
    effects_response(with_controller_mut(|c| c.sprinkles()))
}

/// Handle POST /api/effects/donut: body `index=N` (which hidden donut).
pub fn handle_donut_post(body: &str) -> String {
    let params = parse_form_body(body);
    match get_param(&params, "index").and_then(|v| v.parse::<usize>().ok()) {
        Some(index) => effects_response(with_controller_mut(|c| c.hidden_donut(index))),
        None => "[]".to_string(),
    }
}

/// Handle POST /api/effects/donut-rain
pub fn handle_donut_rain_post(_body: &str) -> String {
    effects_response(with_controller_mut(|c| c.donut_rain()))
}

/// Handle POST /api/effects/seal
pub fn handle_seal_post(_body: &str) -> String {
    effects_response(with_controller_mut(|c| c.spin_seal()))
}

/// Handle GET /api/sound?name={effect}
pub fn handle_sound_get(query: &str) -> String {
    let params = parse_query(query);
    let name = get_param(&params, "name").unwrap_or("click");
    effects_response(with_controller(|c| c.play_sound(name)))
}
