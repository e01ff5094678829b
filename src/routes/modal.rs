//! `/api/modal/*`: dialog fragments for HTMX to swap into `#modal-root`.

use crate::dashboard::effect::Effect;
use crate::dashboard::state::with_controller_mut;
use crate::routes::util::{effects_response, get_param, parse_query};

/// Pull the first `OpenModal` fragment out of an effect list.
fn modal_html(effects: Vec<Effect>) -> String {
    effects
        .into_iter()
        .find_map(|e| match e {
            Effect::OpenModal { html } => Some(html),
            _ => None,
        })
        .unwrap_or_default()
}

/// Handle GET /api/modal/location?id={location}
pub fn handle_location_get(query: &str) -> String {
    let params = parse_query(query);
    let id = get_param(&params, "id").unwrap_or("");
    let html = modal_html(with_controller_mut(|c| c.activate_card(id)));
    if html.is_empty() {
        return r#"<span class="text-error">Unknown location</span>"#.to_string();
    }
    html
}

/// Handle GET /api/modal/stats
pub fn handle_stats_get(_query: &str) -> String {
    modal_html(with_controller_mut(|c| c.show_stats()))
}

/// Handle GET /api/modal/help
pub fn handle_help_get(_query: &str) -> String {
    modal_html(with_controller_mut(|c| c.show_help()))
}

/// Handle POST /api/modal/close
pub fn handle_close_post(_body: &str) -> String {
    effects_response(with_controller_mut(|c| c.close_modals()))
}
