//! The dashboard controller. It owns all session state, from preferences
//! and konami progress to the ambient scheduler and the current filter.
//!
//! Each operation maps one user action (or timer tick) to a list of
//! `Effect`s. Preference writes are flushed as `Persist` effects at the end
//! of the operation that made them.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::ambient::effects;
use crate::ambient::rotation::{quote_announcement, Rotations};
use crate::ambient::scheduler::{AmbientTask, Scheduler, TaskId};
use crate::catalog::{find_card, location_details, Category, CARDS};
use crate::config::DashboardConfig;
use crate::dashboard::effect::{CardVisibility, Effect, NotifyKind, WeatherView};
use crate::error::StorageError;
use crate::filter::{self, FilterState, VisibleSet};
use crate::keyboard::{dispatch, KeyCommand, KeyEvent, KonamiTracker};
use crate::modal::{self, TownStats};
use crate::prefs::{MemoryStore, PrefKey, PreferenceStore, Preferences};
use crate::sound::{location_sound, AudioOutput, SoundEffect};

pub const HIGH_CONTRAST_CLASS: &str = "high-contrast";
pub const SEASON1_CLASS: &str = "season-1-theme";
pub const PAUSED_CLASS: &str = "paused-animations";

/// Reveal stagger between consecutive visible cards.
const CARD_STAGGER_MS: u32 = 100;

/// How long the search box pulses before the search toast shows.
const SEARCH_PULSE_MS: u32 = 1_000;

#[derive(Debug, Clone)]
pub struct DashboardController {
    config: DashboardConfig,
    prefs: PreferenceStore<MemoryStore>,
    preferences: Preferences,
    konami: KonamiTracker,
    audio: AudioOutput,
    scheduler: Scheduler,
    rotations: Rotations,
    rng: Pcg32,
    filter: FilterState,
    visible: VisibleSet,
    next_notification: u32,
}

impl DashboardController {
    pub fn new(config: DashboardConfig) -> Self {
        let prefs = PreferenceStore::new(MemoryStore::new(), config.storage_prefix.clone());
        let preferences = prefs.load();
        Self {
            audio: AudioOutput::new(config.audio_available),
            rng: Pcg32::seed_from_u64(config.seed),
            konami: KonamiTracker::new(),
            scheduler: Scheduler::new(),
            rotations: Rotations::new(),
            filter: FilterState::default(),
            visible: VisibleSet::all(CARDS.len()),
            next_notification: 0,
            prefs,
            preferences,
            config,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn preference_store(&self) -> &PreferenceStore<MemoryStore> {
        &self.prefs
    }

    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn konami_progress(&self) -> usize {
        self.konami.progress()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    // ── Shared helpers ─────────────────────────────────────────────

    fn notify(&mut self, message: impl Into<String>, kind: NotifyKind) -> Effect {
        self.notify_after(message, kind, 0)
    }

    /// A toast the host shows once `delay_ms` has passed.
    fn notify_after(&mut self, message: impl Into<String>, kind: NotifyKind, delay_ms: u32) -> Effect {
        let message = message.into();
        self.next_notification = self.next_notification.wrapping_add(1);
        let id = self.next_notification;
        Effect::Notify {
            id,
            html: modal::render_toast(id, &message, kind, delay_ms),
            message,
            kind,
            duration_ms: self.config.toast_duration_ms,
            delay_ms,
        }
    }

    fn sound(&self, effect: SoundEffect, out: &mut Vec<Effect>) {
        if let Some(tone) = self.audio.play(effect) {
            out.push(Effect::Sound { tone });
        }
    }

    fn flush_persist(&mut self, out: &mut Vec<Effect>) {
        out.extend(
            self.prefs
                .drain_outbox()
                .into_iter()
                .map(|entry| Effect::Persist { key: entry.key, value: entry.value }),
        );
    }

    /// Make `filter` current and derive the visible set from it.
    fn set_filter(&mut self, filter: FilterState) -> Effect {
        self.filter = filter;
        let set = self.filter.apply(&CARDS, &self.preferences.favorites);
        self.visibility_effect(set)
    }

    /// Re-derive the visible set when the favorites behind it changed.
    fn refresh_favorites_view(&mut self, out: &mut Vec<Effect>) {
        if self.filter.favorites_only {
            let filter = self.filter.clone();
            out.push(self.set_filter(filter));
        }
    }

    fn visibility_effect(&mut self, set: VisibleSet) -> Effect {
        let mut shown: u32 = 0;
        let cards = CARDS
            .iter()
            .zip(&set.visible)
            .map(|(card, visible)| {
                let delay_ms = if *visible { shown * CARD_STAGGER_MS } else { 0 };
                if *visible {
                    shown += 1;
                }
                CardVisibility { id: card.id.to_string(), visible: *visible, delay_ms }
            })
            .collect();
        let count = set.count;
        self.visible = set;
        Effect::Visibility { cards, count }
    }

    fn preference_classes(&self) -> Vec<Effect> {
        vec![
            Effect::Theme { theme: self.preferences.theme, class: self.preferences.theme.body_class() },
            Effect::BodyClass { class: HIGH_CONTRAST_CLASS.to_string(), on: self.preferences.high_contrast },
            Effect::BodyClass { class: SEASON1_CLASS.to_string(), on: self.preferences.season1_theme },
        ]
    }

    // ── Lifecycle ──────────────────────────────────────────────────

    /// Apply stored preferences, lay out the skyline and hidden donuts, and
    /// start every ambient loop.
    pub fn startup(&mut self, now: f64) -> Vec<Effect> {
        let mut out = self.preference_classes();

        let windows = effects::skyline(
            &mut self.rng,
            self.config.skyline_buildings,
            self.config.windows_per_building,
        );
        out.push(Effect::Skyline { windows });
        out.push(Effect::HiddenDonuts { donuts: effects::HIDDEN_DONUTS.to_vec() });
        out.push(Effect::Featured { featured: *self.rotations.current_featured() });

        self.start_ambient(now);
        tracing::info!(tasks = self.scheduler.len(), "dashboard started");
        out
    }

    fn start_ambient(&mut self, now: f64) {
        let c = &self.config;
        let (quote, weather, featured) = (c.quote_interval_ms, c.weather_interval_ms, c.featured_interval_ms);
        let (glow, cloud) = (c.glow_interval_ms, c.cloud_interval_ms);
        let (buildings, per_building) = (c.skyline_buildings, c.windows_per_building);
        let (flicker_min, flicker_span) = (c.flicker_min_ms, c.flicker_span_ms);

        self.scheduler.clear();
        self.scheduler.every(AmbientTask::QuoteRotation, quote, now);
        self.scheduler.every(AmbientTask::WeatherRotation, weather, now);
        self.scheduler.every(AmbientTask::FeaturedRotation, featured, now);
        self.scheduler.every(AmbientTask::NuclearGlow, glow, now);
        self.scheduler.every(AmbientTask::CloudSpawn, cloud, now);
        for building in 0..buildings {
            for window in 0..per_building {
                let interval = effects::flicker_interval(&mut self.rng, flicker_min, flicker_span);
                self.scheduler.every(AmbientTask::WindowFlicker { building, window }, interval, now);
            }
        }
    }

    /// Seed preferences from the page's `localStorage` entries and re-apply them.
    pub fn restore_preferences<I>(&mut self, entries: I) -> Vec<Effect>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let accepted = self.prefs.restore(entries);
        self.preferences = self.prefs.load();
        tracing::debug!(accepted, "preferences restored");
        let mut out = self.preference_classes();
        self.refresh_favorites_view(&mut out);
        out
    }

    /// The page could not write to `localStorage`; stop trying.
    pub fn storage_failed(&mut self, error: &StorageError) {
        tracing::warn!(error = %error, "host reported a storage failure");
        self.prefs.mark_unavailable();
    }

    // ── Filtering ──────────────────────────────────────────────────

    pub fn filter_category(&mut self, category: &str) -> Vec<Effect> {
        let visibility = self.set_filter(FilterState::category(category));
        let message = filter::category_announcement(category, &self.visible);
        tracing::debug!(category, count = self.visible.count, "category filter");
        vec![
            visibility,
            Effect::ActiveControl { group: "category", value: Some(category.to_string()) },
            Effect::Announce { message },
        ]
    }

    pub fn search(&mut self, query: &str) -> Vec<Effect> {
        let visibility = self.set_filter(FilterState::query(query));
        let message = filter::query_announcement(query, &self.visible);
        tracing::debug!(query, count = self.visible.count, "search");
        vec![visibility, Effect::Announce { message }]
    }

    /// The search button. An empty box earns a warning; otherwise the box
    /// pulses and the confirming toast appears when the pulse ends.
    pub fn execute_search(&mut self, query: &str) -> Vec<Effect> {
        let query = query.trim();
        if query.is_empty() {
            return vec![self.notify("D'oh! You need to enter something to search for!", NotifyKind::Warning)];
        }
        vec![
            Effect::Searching { duration_ms: SEARCH_PULSE_MS },
            self.notify_after(format!("Searching Springfield for \"{}\"...", query), NotifyKind::Info, SEARCH_PULSE_MS),
        ]
    }

    pub fn filter_chip(&mut self, chip: &str) -> Vec<Effect> {
        let visibility = self.set_filter(FilterState::chip(chip));
        let message = filter::chip_announcement(chip, &self.visible);
        vec![
            visibility,
            Effect::ActiveControl { group: "chip", value: Some(chip.to_string()) },
            Effect::Announce { message },
        ]
    }

    /// Clicking a district on the mini map filters to it.
    pub fn map_district(&mut self, category: &str) -> Vec<Effect> {
        let mut out = self.filter_category(category);
        out.push(Effect::MapDistrict { category: category.to_string(), highlight_ms: 2_000 });
        self.sound(SoundEffect::Click, &mut out);
        out.push(self.notify(format!("Exploring {} district", category), NotifyKind::Info));
        out
    }

    pub fn show_favorites(&mut self) -> Vec<Effect> {
        if self.preferences.favorites.is_empty() {
            return vec![self.notify(
                "No favorites yet! Click the \u{2B50} on location cards to add them.",
                NotifyKind::Info,
            )];
        }
        let visibility = self.set_filter(FilterState::favorites());
        let message = filter::favorites_announcement(&self.visible);
        let toast = format!("\u{2B50} Showing {} favorite locations", self.visible.count);
        vec![
            visibility,
            Effect::ActiveControl { group: "category", value: None },
            self.notify(toast, NotifyKind::Success),
            Effect::Announce { message },
        ]
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Vec<Effect> {
        let Some(card) = find_card(id) else {
            return Vec::new();
        };
        let favorite = if self.preferences.favorites.remove(card.id) {
            false
        } else {
            self.preferences.favorites.insert(card.id.to_string());
            true
        };
        let favorites: &BTreeSet<String> = &self.preferences.favorites;
        self.prefs.write(PrefKey::Favorites, favorites);

        let message = if favorite {
            format!("\u{2B50} Added {} to favorites", card.title)
        } else {
            format!("Removed {} from favorites", card.title)
        };
        let mut out = vec![Effect::Favorite { id: card.id.to_string(), favorite }, self.notify(message, NotifyKind::Success)];
        self.refresh_favorites_view(&mut out);
        self.flush_persist(&mut out);
        out
    }

    /// Jump to a random visible card and open it shortly after.
    pub fn random_location(&mut self) -> Vec<Effect> {
        let visible_ids = self.visible.ids(&CARDS);
        let Some(pick) = effects::pick(&mut self.rng, visible_ids.len()) else {
            return Vec::new();
        };
        let mut out = vec![Effect::Highlight { id: visible_ids[pick].to_string(), activate_after_ms: 1_000 }];
        self.sound(SoundEffect::Whoosh, &mut out);
        out.push(self.notify("\u{1F3B2} Visiting random location!", NotifyKind::Success));
        out
    }

    // ── Dialogs ────────────────────────────────────────────────────

    pub fn town_stats(&mut self) -> TownStats {
        let mut stats = TownStats { donuts_consumed: effects::donuts_consumed(&mut self.rng), ..TownStats::default() };
        for card in CARDS.iter() {
            match card.category {
                Category::Residential => stats.residential += 1,
                Category::Commercial => stats.commercial += 1,
                Category::Municipal => stats.municipal += 1,
                Category::Entertainment => stats.entertainment += 1,
            }
        }
        stats
    }

    pub fn show_stats(&mut self) -> Vec<Effect> {
        let stats = self.town_stats();
        let mut out = vec![Effect::OpenModal { html: modal::render_stats_modal(&stats) }];
        self.sound(SoundEffect::Chime, &mut out);
        out
    }

    /// Clicking (or pressing 1–6 on) a location card.
    pub fn activate_card(&mut self, id: &str) -> Vec<Effect> {
        let Some(card) = find_card(id) else {
            return Vec::new();
        };
        tracing::info!(location = card.id, "location_click");
        let mut out = Vec::new();
        if let Some(tone) = self.audio.play_named(location_sound(card.id)) {
            out.push(Effect::Sound { tone });
        }
        out.push(Effect::OpenModal {
            html: modal::render_location_modal(card.title, &location_details(card.id)),
        });
        out
    }

    pub fn show_help(&self) -> Vec<Effect> {
        vec![Effect::OpenModal { html: modal::render_help_modal() }]
    }

    pub fn close_modals(&self) -> Vec<Effect> {
        vec![Effect::CloseModals]
    }

    // ── Preferences ────────────────────────────────────────────────

    pub fn cycle_theme(&mut self) -> Vec<Effect> {
        let theme = self.preferences.theme.next();
        self.preferences.theme = theme;
        self.prefs.write(PrefKey::Theme, &theme);

        let mut out = vec![
            Effect::Theme { theme, class: theme.body_class() },
            self.notify(format!("\u{1F3A8} Theme: {}", theme.label()), NotifyKind::Success),
        ];
        self.sound(SoundEffect::Achievement, &mut out);
        self.flush_persist(&mut out);
        out
    }

    pub fn toggle_high_contrast(&mut self) -> Vec<Effect> {
        let on = !self.preferences.high_contrast;
        self.preferences.high_contrast = on;
        self.prefs.write(PrefKey::HighContrast, &on);

        let message = if on { "High contrast mode enabled" } else { "High contrast mode disabled" };
        let mut out = vec![
            Effect::BodyClass { class: HIGH_CONTRAST_CLASS.to_string(), on },
            Effect::Announce { message: message.to_string() },
        ];
        self.flush_persist(&mut out);
        out
    }

    pub fn toggle_season1(&mut self) -> Vec<Effect> {
        let on = !self.preferences.season1_theme;
        self.preferences.season1_theme = on;
        self.prefs.write(PrefKey::Season1Theme, &on);

        let message = if on { "Season 1 theme activated! Welcome to 1989!" } else { "Back to modern Springfield!" };
        let mut out = vec![
            Effect::BodyClass { class: SEASON1_CLASS.to_string(), on },
            self.notify(message, NotifyKind::Success),
        ];
        self.sound(SoundEffect::Achievement, &mut out);
        self.flush_persist(&mut out);
        out
    }

    // ── Keyboard ───────────────────────────────────────────────────

    pub fn key_down(&mut self, event: &KeyEvent) -> Vec<Effect> {
        let commands = dispatch(event, &mut self.konami, &self.visible);
        let mut out = Vec::new();
        for command in commands {
            match command {
                KeyCommand::ToggleSeason1 => out.extend(self.toggle_season1()),
                KeyCommand::FocusSearch => out.push(Effect::FocusSearch),
                KeyCommand::PlayDoh => out.extend(self.play_doh()),
                KeyCommand::ShowHelp => out.extend(self.show_help()),
                KeyCommand::CloseModals => out.extend(self.close_modals()),
                KeyCommand::ActivateCard(index) => {
                    if let Some(card) = CARDS.get(index) {
                        out.extend(self.activate_card(card.id));
                    }
                }
            }
        }
        out
    }

    /// The `D` key. Silent when the page has no audio.
    pub fn play_doh(&mut self) -> Vec<Effect> {
        let Some(tone) = self.audio.play(SoundEffect::Doh) else {
            return Vec::new();
        };
        vec![Effect::Sound { tone }, self.notify("D'oh!", NotifyKind::Warning)]
    }

    pub fn reset_konami(&mut self) {
        self.konami.reset();
    }

    // ── Easter eggs ────────────────────────────────────────────────

    pub fn sprinkles(&mut self) -> Vec<Effect> {
        let sprinkles = effects::sprinkles(&mut self.rng, self.config.sprinkle_count);
        let mut out = vec![
            Effect::Sprinkles { sprinkles, lifetime_ms: effects::SPRINKLE_LIFETIME_MS },
            self.notify("\u{1F369} Sprinkles everywhere! \u{1F369}", NotifyKind::Success),
        ];
        self.sound(SoundEffect::Chime, &mut out);
        out
    }

    /// Clicking one of the hidden donuts hides it and sparkles a random card.
    pub fn hidden_donut(&mut self, index: usize) -> Vec<Effect> {
        if index >= effects::HIDDEN_DONUTS.len() {
            return Vec::new();
        }
        let mut out = vec![Effect::HideDonut { index }];
        if let Some(pick) = effects::pick(&mut self.rng, CARDS.len()) {
            let sparkle = effects::sparkle(&mut self.rng);
            out.push(Effect::CardSparkle { id: CARDS[pick].id.to_string(), sparkle });
        }
        out
    }

    pub fn donut_rain(&mut self) -> Vec<Effect> {
        let drops = effects::donut_rain(&mut self.rng, self.config.donut_rain_count);
        let mut out = vec![Effect::DonutRain { drops }];
        self.sound(SoundEffect::Whoosh, &mut out);
        out
    }

    pub fn spin_seal(&mut self) -> Vec<Effect> {
        let mut out = vec![Effect::SpinSeal { duration_ms: 1_000 }];
        self.sound(SoundEffect::Whoosh, &mut out);
        out
    }

    pub fn resized(&self) -> Vec<Effect> {
        vec![Effect::Announce { message: "Page layout updated for new screen size".to_string() }]
    }

    // ── Ambient loops ──────────────────────────────────────────────

    pub fn tick(&mut self, now: f64) -> Vec<Effect> {
        let fired = self.scheduler.tick(now);
        let mut out = Vec::new();
        for (_, task) in fired {
            match task {
                AmbientTask::QuoteRotation => {
                    let (index, quote) = self.rotations.next_quote();
                    out.push(Effect::Quote { index });
                    out.push(Effect::Announce { message: quote_announcement(quote) });
                }
                AmbientTask::WeatherRotation => {
                    let weather = self.rotations.next_weather();
                    out.push(Effect::Weather { weather: WeatherView::from(weather) });
                }
                AmbientTask::FeaturedRotation => {
                    out.push(Effect::Featured { featured: *self.rotations.next_featured() });
                }
                AmbientTask::NuclearGlow => {
                    out.push(Effect::NuclearGlow { strong: true });
                    self.scheduler.once(AmbientTask::NuclearGlowFade, self.config.glow_pulse_ms, now);
                }
                AmbientTask::NuclearGlowFade => out.push(Effect::NuclearGlow { strong: false }),
                AmbientTask::WindowFlicker { building, window } => {
                    let lit = effects::flicker_lit(&mut self.rng);
                    out.push(Effect::WindowLight { building, window, lit });
                }
                AmbientTask::CloudSpawn => out.push(Effect::Cloud { cloud: effects::cloud(&mut self.rng) }),
            }
        }
        out
    }

    /// Page hidden: freeze every loop and CSS animation.
    pub fn pause(&mut self, now: f64) -> Vec<Effect> {
        self.scheduler.pause(now);
        vec![Effect::BodyClass { class: PAUSED_CLASS.to_string(), on: true }]
    }

    pub fn resume(&mut self, now: f64) -> Vec<Effect> {
        self.scheduler.resume(now);
        vec![Effect::BodyClass { class: PAUSED_CLASS.to_string(), on: false }]
    }

    /// Cancel one scheduled task by id.
    pub fn cancel_task(&mut self, id: TaskId) -> bool {
        let cancelled = self.scheduler.cancel(id);
        tracing::debug!(id = id.0, cancelled, "ambient task cancel");
        cancelled
    }

    pub fn ambient_tasks(&self) -> Vec<(TaskId, AmbientTask)> {
        self.scheduler.tasks().collect()
    }

    /// Play a named sound on request from the page.
    pub fn play_sound(&self, name: &str) -> Vec<Effect> {
        self.audio.play_named(name).map(|tone| Effect::Sound { tone }).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::KONAMI_CODE;

    fn controller() -> DashboardController {
        DashboardController::new(DashboardConfig::default())
    }

    fn quiet_controller() -> DashboardController {
        DashboardController::new(DashboardConfig { audio_available: false, ..DashboardConfig::default() })
    }

    fn has_sound(effects: &[Effect]) -> bool {
        effects.iter().any(|e| matches!(e, Effect::Sound { .. }))
    }

    fn persisted(effects: &[Effect]) -> Vec<(String, String)> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Persist { key, value } => Some((key.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn category_filter_updates_visible_set() {
        let mut c = controller();
        let out = c.filter_category("municipal");
        assert_eq!(c.visible().ids(&CARDS), vec!["elementary", "power-plant"]);
        match &out[0] {
            Effect::Visibility { cards, count } => {
                assert_eq!(*count, 2);
                let power = cards.iter().find(|v| v.id == "power-plant").unwrap();
                assert!(power.visible);
                assert_eq!(power.delay_ms, 100);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(out.contains(&Effect::Announce { message: "Filtered to 2 Municipal locations".to_string() }));
        assert_eq!(c.filter_state().active_category.as_deref(), Some("municipal"));
    }

    #[test]
    fn search_replaces_category() {
        let mut c = controller();
        c.filter_category("municipal");
        c.search("apu");
        assert_eq!(c.visible().ids(&CARDS), vec!["kwik-e-mart"]);
        assert_eq!(c.filter_state().active_category, None);
    }

    #[test]
    fn execute_search_empty_warns() {
        let mut c = controller();
        match &c.execute_search("   ")[0] {
            Effect::Notify { kind, message, .. } => {
                assert_eq!(*kind, NotifyKind::Warning);
                assert!(message.starts_with("D'oh!"));
            }
            other => panic!("unexpected {other:?}"),
        }
        let out = c.execute_search(" moe ");
        assert_eq!(out[0], Effect::Searching { duration_ms: 1_000 });
        match &out[1] {
            Effect::Notify { message, delay_ms, html, .. } => {
                assert_eq!(message, "Searching Springfield for \"moe\"...");
                assert_eq!(*delay_ms, 1_000);
                assert!(html.contains(r#"data-delay-ms="1000""#));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn theme_cycle_persists() {
        let mut c = controller();
        let out = c.cycle_theme();
        assert_eq!(c.preferences().theme, crate::theme::Theme::Night);
        assert_eq!(persisted(&out), vec![("springfield_theme".to_string(), "\"night\"".to_string())]);
        assert!(has_sound(&out));
    }

    #[test]
    fn storage_failure_keeps_session_state_but_stops_persisting() {
        let mut c = controller();
        c.storage_failed(&StorageError::Unavailable);
        let out = c.toggle_high_contrast();
        assert!(c.preferences().high_contrast);
        assert!(persisted(&out).is_empty());
        assert_eq!(c.preference_store().load(), Preferences::default());
    }

    #[test]
    fn restore_applies_stored_preferences() {
        let mut c = controller();
        let out = c.restore_preferences([
            ("springfield_highContrast".to_string(), "true".to_string()),
            ("springfield_theme".to_string(), "\"retro\"".to_string()),
            ("springfield_favorites".to_string(), "garbage".to_string()),
        ]);
        assert!(c.preferences().high_contrast);
        assert_eq!(c.preferences().theme, crate::theme::Theme::Retro);
        assert!(c.preferences().favorites.is_empty());
        assert!(out.contains(&Effect::BodyClass { class: HIGH_CONTRAST_CLASS.to_string(), on: true }));
    }

    #[test]
    fn favorites_toggle_and_show() {
        let mut c = controller();
        let empty = c.show_favorites();
        assert_eq!(empty.len(), 1);

        let out = c.toggle_favorite("moes-tavern");
        assert!(out.contains(&Effect::Favorite { id: "moes-tavern".to_string(), favorite: true }));
        assert_eq!(persisted(&out)[0].1, r#"["moes-tavern"]"#);

        c.show_favorites();
        assert_eq!(c.visible().ids(&CARDS), vec!["moes-tavern"]);

        c.toggle_favorite("moes-tavern");
        assert!(c.preferences().favorites.is_empty());
        assert!(c.toggle_favorite("springfield-mall").is_empty());
    }

    #[test]
    fn visible_set_follows_filter_state() {
        let mut c = controller();
        let consistent = |c: &DashboardController| {
            assert_eq!(c.filter_state().apply(&CARDS, &c.preferences().favorites), *c.visible());
        };

        c.filter_category("municipal");
        consistent(&c);
        c.search("burns");
        consistent(&c);
        c.filter_chip("lore");
        assert_eq!(c.filter_state().active_chip.as_deref(), Some("lore"));
        consistent(&c);
        c.toggle_favorite("kwik-e-mart");
        c.show_favorites();
        assert!(c.filter_state().favorites_only);
        consistent(&c);
        c.map_district("residential");
        consistent(&c);
        c.filter_chip("all");
        assert_eq!(*c.filter_state(), FilterState::default());
        consistent(&c);
    }

    #[test]
    fn unfavoriting_updates_favorites_view() {
        let mut c = controller();
        c.toggle_favorite("kwik-e-mart");
        c.toggle_favorite("channel-6");
        c.show_favorites();
        assert_eq!(c.visible().count, 2);

        let out = c.toggle_favorite("channel-6");
        assert!(out.iter().any(|e| matches!(e, Effect::Visibility { count: 1, .. })));
        assert_eq!(c.visible().ids(&CARDS), vec!["kwik-e-mart"]);

        c.filter_category("all");
        assert!(c.toggle_favorite("kwik-e-mart").iter().all(|e| !matches!(e, Effect::Visibility { .. })));
    }

    #[test]
    fn konami_via_keyboard_toggles_season1() {
        let mut c = controller();
        let mut last = Vec::new();
        for code in KONAMI_CODE {
            last = c.key_down(&KeyEvent { code: code.to_string(), ..KeyEvent::default() });
        }
        assert!(c.preferences().season1_theme);
        assert!(last.contains(&Effect::BodyClass { class: SEASON1_CLASS.to_string(), on: true }));
        assert_eq!(c.konami_progress(), 0);
    }

    #[test]
    fn digit_key_respects_current_filter() {
        let mut c = controller();
        c.filter_category("residential");
        let hidden = c.key_down(&KeyEvent { code: "Digit3".to_string(), key: "3".to_string(), ..KeyEvent::default() });
        assert!(hidden.is_empty());
        let shown = c.key_down(&KeyEvent { code: "Digit1".to_string(), key: "1".to_string(), ..KeyEvent::default() });
        assert!(shown.iter().any(|e| matches!(e, Effect::OpenModal { html } if html.contains("742 Evergreen Terrace"))));
    }

    #[test]
    fn audio_unavailable_is_silent() {
        let mut c = quiet_controller();
        assert!(c.play_doh().is_empty());
        assert!(!has_sound(&c.sprinkles()));
        assert!(!has_sound(&c.activate_card("power-plant")));
    }

    #[test]
    fn random_location_picks_visible_card() {
        let mut c = controller();
        c.search("kwik");
        let out = c.random_location();
        assert!(out.contains(&Effect::Highlight { id: "kwik-e-mart".to_string(), activate_after_ms: 1_000 }));
        c.search("no such place");
        assert!(c.random_location().is_empty());
    }

    #[test]
    fn stats_count_categories() {
        let mut c = controller();
        let stats = c.town_stats();
        assert_eq!(stats.residential + stats.commercial + stats.municipal + stats.entertainment, CARDS.len());
        assert_eq!(stats.municipal, 2);
    }

    #[test]
    fn hidden_donut_out_of_range() {
        let mut c = controller();
        assert!(c.hidden_donut(9).is_empty());
        let out = c.hidden_donut(0);
        assert_eq!(out[0], Effect::HideDonut { index: 0 });
        assert!(matches!(out[1], Effect::CardSparkle { .. }));
    }

    #[test]
    fn ambient_loops_run_and_pause() {
        let mut c = controller();
        c.startup(0.0);
        let out = c.tick(5_000.0);
        assert!(out.iter().any(|e| matches!(e, Effect::Quote { index: 1 })));

        c.pause(5_000.0);
        assert!(c.tick(60_000.0).is_empty());
        c.resume(60_000.0);
        // The next quote was 5 s away when paused.
        assert!(!c.tick(64_999.0).iter().any(|e| matches!(e, Effect::Quote { .. })));
        let out = c.tick(65_000.0);
        assert!(out.iter().any(|e| matches!(e, Effect::Quote { index: 2 })));
    }

    #[test]
    fn nuclear_glow_pulses() {
        let mut c = controller();
        c.startup(0.0);
        let out = c.tick(3_000.0);
        assert!(out.contains(&Effect::NuclearGlow { strong: true }));
        let out = c.tick(4_000.0);
        assert!(out.contains(&Effect::NuclearGlow { strong: false }));
    }

    #[test]
    fn cancelled_loop_stops_firing() {
        let mut c = controller();
        c.startup(0.0);
        let (quote_id, _) = c
            .ambient_tasks()
            .into_iter()
            .find(|(_, task)| *task == AmbientTask::QuoteRotation)
            .unwrap();
        assert!(c.cancel_task(quote_id));
        assert!(!c.cancel_task(quote_id));
        assert!(!c.tick(5_000.0).iter().any(|e| matches!(e, Effect::Quote { .. })));
    }

    #[test]
    fn named_sounds_fall_back_to_click() {
        let c = controller();
        assert_eq!(c.play_sound("doorbell"), vec![Effect::Sound { tone: SoundEffect::Click.tone() }]);
        assert!(quiet_controller().play_sound("chime").is_empty());
    }

    #[test]
    fn startup_lays_out_skyline() {
        let mut c = controller();
        let out = c.startup(0.0);
        let windows = out.iter().find_map(|e| match e {
            Effect::Skyline { windows } => Some(windows.len()),
            _ => None,
        });
        assert_eq!(windows, Some(30));
        // 5 fixed loops plus one flicker per window.
        assert_eq!(c.scheduler().len(), 35);
    }
}
