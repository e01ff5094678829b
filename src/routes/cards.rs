//! `/api/cards*`, `/api/search`, `/api/map/district`, `/api/random`, and
//! `/api/favorites*`: everything that changes which cards are visible.
//!
//! Query parameters for `/api/cards` and `/api/cards/visible` (first match wins):
//! - `chip`: topic chip (`episodes`, `characters`, ..., or `all`)
//! - `category`: district token (`residential`, ..., or `all`)
//! - `favorites`: if "true", show only favorites
//! - `search`: free-text query (blank shows everything)

use crate::catalog::{Card, CARDS};
use crate::dashboard::effect::Effect;
use crate::dashboard::state::{with_controller, with_controller_mut};
use crate::modal::escape_html;
use crate::routes::util::{effects_response, get_flag, get_param, parse_form_body, parse_query};

/// Which filter a request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FilterRequest {
    Chip(String),
    Category(String),
    Favorites,
    Search(String),
}

impl FilterRequest {
    fn from_params(params: &[(String, String)]) -> Self {
        if let Some(chip) = get_param(params, "chip") {
            FilterRequest::Chip(chip.to_string())
        } else if let Some(category) = get_param(params, "category") {
            FilterRequest::Category(category.to_string())
        } else if get_flag(params, "favorites") {
            FilterRequest::Favorites
        } else {
            FilterRequest::Search(get_param(params, "search").unwrap_or("").to_string())
        }
    }

    fn apply(&self) -> Vec<Effect> {
        with_controller_mut(|c| match self {
            FilterRequest::Chip(chip) => c.filter_chip(chip),
            FilterRequest::Category(category) => c.filter_category(category),
            FilterRequest::Favorites => c.show_favorites(),
            FilterRequest::Search(query) => c.search(query),
        })
    }
}

/// Render a single card tile. Hidden cards stay in the DOM so the
/// presentation layer can animate them back in.
fn render_card(card: &Card<'_>, index: usize, visible: bool, delay_ms: usize, favorite: bool) -> String {
    let state_class = if visible { "" } else { " filtered-out" };
    format!(
        r#"<article class="location-card masonry-item{state_class}" data-location="{id}" data-category="{category}" data-visible="{visible}" tabindex="0" style="animation-delay:{delay_ms}ms"{hidden}>
  <div class="location-icon">{icon}</div>
  <h2>{title}</h2>
  <p>{text}</p>
  <button class="favorite-btn" data-favorite="{favorite}" hx-post="/api/favorites/toggle" hx-vals='{{"id":"{id}"}}' aria-label="Toggle favorite">{star}</button>
  <span class="card-shortcut" aria-hidden="true">{shortcut}</span>
</article>"#,
        state_class = state_class,
        id = card.id,
        category = card.category.as_str(),
        visible = visible,
        delay_ms = delay_ms,
        hidden = if visible { "" } else { r#" aria-hidden="true""# },
        icon = card.icon,
        title = escape_html(card.title),
        text = escape_html(card.display_text),
        favorite = favorite,
        star = if favorite { "\u{2B50}" } else { "\u{2606}" },
        shortcut = index + 1,
    )
}

/// Render the polite live region, swapped out-of-band by HTMX.
fn render_announcement(message: &str) -> String {
    format!(
        r#"<div id="aria-live-region" hx-swap-oob="true" aria-live="polite" aria-atomic="true" class="sr-only">{}</div>"#,
        escape_html(message)
    )
}

/// Handle GET /api/cards: the card grid with visibility applied.
pub fn handle(query: &str) -> String {
    let params = parse_query(query);
    let effects = FilterRequest::from_params(&params).apply();

    let (visible, favorites) = with_controller(|c| (c.visible().clone(), c.preferences().favorites.clone()));

    let mut html = String::with_capacity(CARDS.len() * 640);
    let mut shown = 0usize;
    for (i, card) in CARDS.iter().enumerate() {
        let is_visible = visible.is_visible(i);
        let delay_ms = if is_visible { shown * 100 } else { 0 };
        if is_visible {
            shown += 1;
        }
        html.push_str(&render_card(card, i, is_visible, delay_ms, favorites.contains(card.id)));
    }

    let toast = effects.iter().find_map(|e| match e {
        Effect::Notify { html, message, .. } => Some((html.as_str(), message.as_str())),
        _ => None,
    });
    let announced = effects.iter().rev().find_map(|e| match e {
        Effect::Announce { message } => Some(message.as_str()),
        _ => None,
    });
    if let Some((toast_html, _)) = toast {
        html.push_str(toast_html);
    }
    // A toast with no announcement (nothing to filter) still reaches the live region.
    if let Some(message) = announced.or(toast.map(|(_, message)| message)) {
        html.push_str(&render_announcement(message));
    }
    if visible.count == 0 {
        html.push_str(r#"<p class="no-results">D'oh! No Springfield locations match.</p>"#);
    }
    html
}

/// Handle GET /api/cards/visible: same filters, JSON effects.
pub fn handle_visible(query: &str) -> String {
    let params = parse_query(query);
    effects_response(FilterRequest::from_params(&params).apply())
}

/// Handle POST /api/cards/activate: body `id={location}`.
pub fn handle_activate_post(body: &str) -> String {
    let params = parse_form_body(body);
    let id = get_param(&params, "id").unwrap_or("");
    effects_response(with_controller_mut(|c| c.activate_card(id)))
}

/// Handle POST /api/search: the search button. Returns the toast fragment.
pub fn handle_search_post(body: &str) -> String {
    let params = parse_form_body(body);
    let query = get_param(&params, "query").unwrap_or("");
    let effects = with_controller_mut(|c| c.execute_search(query));
    effects
        .into_iter()
        .find_map(|e| match e {
            Effect::Notify { html, .. } => Some(html),
            _ => None,
        })
        .unwrap_or_default()
}

/// Handle POST /api/map/district: body `category={token}`.
pub fn handle_district_post(body: &str) -> String {
    let params = parse_form_body(body);
    let category = get_param(&params, "category").unwrap_or("all");
    effects_response(with_controller_mut(|c| c.map_district(category)))
}

/// Handle POST /api/random.
pub fn handle_random_post(_body: &str) -> String {
    effects_response(with_controller_mut(|c| c.random_location()))
}

/// Handle GET /api/favorites.
pub fn handle_favorites_get(_query: &str) -> String {
    effects_response(with_controller_mut(|c| c.show_favorites()))
}

/// Handle POST /api/favorites/toggle: body `id={location}`.
pub fn handle_favorite_toggle_post(body: &str) -> String {
    let params = parse_form_body(body);
    let id = get_param(&params, "id").unwrap_or("");
    effects_response(with_controller_mut(|c| c.toggle_favorite(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::state::reset;

    #[test]
    fn renders_every_card_with_visibility() {
        reset();
        let html = handle("?category=municipal");
        assert_eq!(html.matches("<article").count(), CARDS.len());
        assert_eq!(html.matches(r#"data-visible="true""#).count(), 2);
        assert!(html.contains("Filtered to 2 Municipal locations"));
        reset();
    }

    #[test]
    fn search_param_is_decoded() {
        reset();
        let html = handle("?search=moe%27s+tavern");
        assert_eq!(html.matches(r#"data-visible="true""#).count(), 1);
        assert!(html.contains("Found 1 locations matching &quot;moe&#39;s tavern&quot;"));
        reset();
    }

    #[test]
    fn no_params_shows_everything() {
        reset();
        let html = handle("");
        assert_eq!(html.matches(r#"data-visible="true""#).count(), CARDS.len());
        assert!(html.contains("Showing all locations"));
        reset();
    }

    #[test]
    fn unknown_category_shows_none() {
        reset();
        let html = handle("?category=industrial");
        assert_eq!(html.matches(r#"data-visible="true""#).count(), 0);
        assert!(html.contains("no-results"));
        reset();
    }

    #[test]
    fn chip_takes_precedence() {
        reset();
        let json = handle_visible("?chip=games&category=residential");
        assert!(json.contains(r#""count":2"#));
        reset();
    }

    #[test]
    fn search_button_empty_warns() {
        reset();
        let html = handle_search_post("query=+");
        assert!(html.contains("notification-warning"));
        let html = handle_search_post("query=donut");
        assert!(html.contains("Searching Springfield for &quot;donut&quot;..."));
        reset();
    }

    #[test]
    fn favorite_toggle_marks_card() {
        reset();
        let json = handle_favorite_toggle_post("id=kwik-e-mart");
        assert!(json.contains(r#""type":"persist""#));
        let html = handle("?favorites=true");
        assert_eq!(html.matches(r#"data-visible="true""#).count(), 1);
        assert!(html.contains(r#"data-favorite="true""#));
        reset();
    }

    #[test]
    fn favorites_without_any_explains_why() {
        reset();
        let html = handle("?favorites=true");
        assert!(html.contains(r#"class="notification notification-info""#));
        assert!(html.contains(r#"<div id="aria-live-region""#));
        assert_eq!(html.matches("No favorites yet!").count(), 2);
        assert_eq!(html.matches(r#"data-visible="true""#).count(), CARDS.len());
        reset();
    }

    #[test]
    fn activate_unknown_card_is_empty() {
        reset();
        assert_eq!(handle_activate_post("id=shelbyville"), "[]");
        assert!(handle_activate_post("id=channel-6").contains("Kent Brockman"));
        reset();
    }

    #[test]
    fn district_click_filters_and_notifies() {
        reset();
        let json = handle_district_post("category=residential");
        assert!(json.contains(r#""type":"map_district""#));
        assert!(json.contains("Exploring residential district"));
        reset();
    }
}
