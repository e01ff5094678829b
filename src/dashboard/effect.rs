//! Declarative effects returned to the host page.
//!
//! The worker never touches the DOM. Each dashboard operation returns a list
//! of effects, serialized as JSON objects tagged by `type`, and the page's
//! applier turns them into class toggles, modal swaps, audio, and storage
//! writes.

use serde::Serialize;

use crate::ambient::effects::{Cloud, DonutDrop, DonutPosition, Sparkle, Sprinkle, WindowLight};
use crate::catalog::{Featured, Weather};
use crate::sound::ToneSpec;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyKind {
    Success,
    Warning,
    Error,
    Info,
}

impl NotifyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotifyKind::Success => "success",
            NotifyKind::Warning => "warning",
            NotifyKind::Error => "error",
            NotifyKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardVisibility {
    pub id: String,
    pub visible: bool,
    /// Stagger for the reveal animation, counted over visible cards only.
    pub delay_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    #[serde(flatten)]
    pub weather: Weather,
    pub radiation_class: &'static str,
    pub smog_class: &'static str,
    pub donut_class: &'static str,
}

impl From<&Weather> for WeatherView {
    fn from(w: &Weather) -> Self {
        Self {
            weather: *w,
            radiation_class: w.radiation_class(),
            smog_class: w.smog_class(),
            donut_class: w.donut_class(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Per-card visibility after a filter, in catalog order.
    Visibility { cards: Vec<CardVisibility>, count: usize },
    /// Text for the polite aria-live region.
    Announce { message: String },
    /// Replace any visible toast with this one, after `delay_ms`.
    Notify { id: u32, message: String, kind: NotifyKind, duration_ms: u32, delay_ms: u32, html: String },
    Sound { tone: ToneSpec },
    OpenModal { html: String },
    CloseModals,
    FocusSearch,
    BodyClass { class: String, on: bool },
    Theme { theme: Theme, class: Option<String> },
    /// Mark which control in a button group is active (`None` clears all).
    ActiveControl { group: &'static str, value: Option<String> },
    MapDistrict { category: String, highlight_ms: u32 },
    /// The search box's "searching" pulse.
    Searching { duration_ms: u32 },
    Favorite { id: String, favorite: bool },
    /// Mirror a preference write into `localStorage`.
    Persist { key: String, value: String },
    Highlight { id: String, activate_after_ms: u32 },
    Sprinkles { sprinkles: Vec<Sprinkle>, lifetime_ms: u32 },
    CardSparkle { id: String, sparkle: Sparkle },
    HiddenDonuts { donuts: Vec<DonutPosition> },
    HideDonut { index: usize },
    DonutRain { drops: Vec<DonutDrop> },
    Cloud { cloud: Cloud },
    SpinSeal { duration_ms: u32 },
    Skyline { windows: Vec<WindowLight> },
    WindowLight { building: usize, window: usize, lit: bool },
    NuclearGlow { strong: bool },
    Quote { index: usize },
    Weather { weather: WeatherView },
    Featured { featured: Featured },
}

/// Serialize an effect list for the JS bridge.
pub fn to_json(effects: &[Effect]) -> String {
    serde_json::to_string(effects).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_are_tagged() {
        let json = to_json(&[
            Effect::FocusSearch,
            Effect::BodyClass { class: "high-contrast".to_string(), on: true },
        ]);
        assert_eq!(
            json,
            r#"[{"type":"focus_search"},{"type":"body_class","class":"high-contrast","on":true}]"#
        );
    }

    #[test]
    fn weather_view_flattens() {
        let view = WeatherView::from(&crate::catalog::WEATHER[0]);
        let json = serde_json::to_string(&Effect::Weather { weather: view }).unwrap();
        assert!(json.contains(r#""label":"Nuclear Winter""#));
        assert!(json.contains(r#""donut_class":"excellent""#));
    }
}
