//! HTML fragments for the dashboard's dialogs and toasts.
//!
//! Markup mirrors the page's existing `.modal` / `.notification` styles so
//! HTMX can swap the fragments straight into the document.

use crate::catalog::{Category, LocationDetails, POPULATION};
use crate::dashboard::effect::NotifyKind;

/// Escape text for safe interpolation into HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn modal_shell(id: Option<&str>, title: &str, body: &str) -> String {
    let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
    format!(
        r#"<div class="modal active"{id_attr} role="dialog" aria-modal="true">
  <div class="modal-content">
    <div class="modal-header">
      <h2>{title}</h2>
      <button class="modal-close" aria-label="Close">&times;</button>
    </div>
    <div class="modal-body">
{body}
    </div>
  </div>
</div>"#,
    )
}

/// Location details dialog opened by clicking a card.
pub fn render_location_modal(name: &str, details: &LocationDetails) -> String {
    let body = format!(
        r#"      <p><strong>Description:</strong> {}</p>
      <p><strong>Notable Characters:</strong> {}</p>
      <p><strong>Fun Fact:</strong> {}</p>
      <p><strong>First Appeared:</strong> {}</p>
      <div class="modal-actions">
        <button class="chip" disabled>Explore Gallery</button>
        <button class="chip" disabled>View Episodes</button>
      </div>"#,
        escape_html(details.description),
        escape_html(details.characters),
        escape_html(details.fun_fact),
        escape_html(details.first_episode),
    );
    modal_shell(None, &escape_html(name), &body)
}

/// Per-category card counts shown on the stats dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TownStats {
    pub residential: usize,
    pub commercial: usize,
    pub municipal: usize,
    pub entertainment: usize,
    pub donuts_consumed: u32,
}

impl TownStats {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Residential => self.residential,
            Category::Commercial => self.commercial,
            Category::Municipal => self.municipal,
            Category::Entertainment => self.entertainment,
        }
    }
}

/// Group a number's digits with commas (`12345` → `12,345`).
fn with_commas(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn render_stats_modal(stats: &TownStats) -> String {
    let mut body = String::from(r#"      <div class="stats-grid">"#);
    for category in Category::ALL {
        body.push_str(&format!(
            r#"<div class="stat-card"><div class="stat-icon">{}</div><div class="stat-value">{}</div><div class="stat-label">{}</div></div>"#,
            category.icon(),
            stats.count(category),
            category.label(),
        ));
    }
    body.push_str(&format!(
        r#"<div class="stat-card full-width"><div class="stat-icon">&#x1F465;</div><div class="stat-value">{}</div><div class="stat-label">Total Population</div></div>"#,
        POPULATION,
    ));
    body.push_str(&format!(
        r#"<div class="stat-card full-width"><div class="stat-icon">&#x1F369;</div><div class="stat-value">{}</div><div class="stat-label">Donuts Consumed Today</div></div>"#,
        with_commas(stats.donuts_consumed),
    ));
    body.push_str("</div>");
    modal_shell(None, "&#x1F4CA; Springfield Statistics", &body)
}

const SHORTCUTS: [(&str, &str); 6] = [
    ("/", "Focus the search box"),
    ("?", "Show this help"),
    ("Esc", "Close dialogs"),
    ("1 – 6", "Open the matching location"),
    ("D", "D'oh!"),
    ("&uarr; &uarr; &darr; &darr; &larr; &rarr; &larr; &rarr; B A", "Something from 1989"),
];

pub fn render_help_modal() -> String {
    let mut body = String::from(r#"      <dl class="shortcut-list">"#);
    for (keys, action) in SHORTCUTS {
        body.push_str(&format!("<dt><kbd>{}</kbd></dt><dd>{}</dd>", keys, action));
    }
    body.push_str("</dl>");
    modal_shell(Some("help-modal"), "Keyboard Shortcuts", &body)
}

/// A toast. A non-zero `delay_ms` tells the host to hold it back that long.
pub fn render_toast(id: u32, message: &str, kind: NotifyKind, delay_ms: u32) -> String {
    let delay = if delay_ms > 0 { format!(r#" data-delay-ms="{}""#, delay_ms) } else { String::new() };
    format!(
        r#"<div class="notification notification-{kind}" data-notification-id="{id}"{delay} role="status">{message}</div>"#,
        kind = kind.as_str(),
        id = id,
        delay = delay,
        message = escape_html(message),
    )
}
