//! Card filtering: decides which catalog cards are visible for a category,
//! a free-text query, a topic chip, or the favorites set.
//!
//! Every function here is pure: it reads the card slice and returns a
//! `VisibleSet` with one boolean per card (in input order) plus the count.
//! Rendering and transitions belong to the presentation layer.

use std::collections::BTreeSet;

use crate::catalog::{chip_locations, Card, Category};

/// The token that disables category and chip filtering.
pub const ALL: &str = "all";

/// Per-card visibility decision, aligned with the input slice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibleSet {
    pub visible: Vec<bool>,
    pub count: usize,
}

impl VisibleSet {
    fn from_predicate<F>(cards: &[Card<'_>], mut keep: F) -> Self
    where
        F: FnMut(&Card<'_>) -> bool,
    {
        let visible: Vec<bool> = cards.iter().map(|card| keep(card)).collect();
        let count = visible.iter().filter(|v| **v).count();
        Self { visible, count }
    }

    fn from_predicate_indexed<F>(len: usize, keep: F) -> Self
    where
        F: Fn(usize) -> bool,
    {
        let visible: Vec<bool> = (0..len).map(keep).collect();
        let count = visible.iter().filter(|v| **v).count();
        Self { visible, count }
    }

    /// Everything visible.
    pub fn all(len: usize) -> Self {
        Self { visible: vec![true; len], count: len }
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// Identifiers of the visible cards, in input order.
    pub fn ids<'a>(&self, cards: &[Card<'a>]) -> Vec<&'a str> {
        cards
            .iter()
            .zip(&self.visible)
            .filter(|(_, v)| **v)
            .map(|(card, _)| card.id)
            .collect()
    }
}

/// Filter by district. `"all"` shows everything; any other token must equal a
/// card's category token exactly. Unknown tokens match nothing.
pub fn apply_category_filter(cards: &[Card<'_>], category: &str) -> VisibleSet {
    if category == ALL {
        return VisibleSet::all(cards.len());
    }
    VisibleSet::from_predicate(cards, |card| card.category.as_str() == category)
}

/// Normalize a search query: trimmed and lower-cased.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Case-insensitive substring match against display text or identifier.
fn card_matches_search(card: &Card<'_>, needle: &str) -> bool {
    card.display_text.to_lowercase().contains(needle) || card.id.to_lowercase().contains(needle)
}

/// Free-text search. A blank query shows everything.
pub fn apply_query_filter(cards: &[Card<'_>], query: &str) -> VisibleSet {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return VisibleSet::all(cards.len());
    }
    VisibleSet::from_predicate(cards, |card| card_matches_search(card, &needle))
}

/// Topic chip filter (`episodes`, `characters`, ...). Unknown chips match nothing.
pub fn apply_chip_filter(cards: &[Card<'_>], chip: &str) -> VisibleSet {
    if chip == ALL {
        return VisibleSet::all(cards.len());
    }
    let ids = chip_locations(chip);
    VisibleSet::from_predicate(cards, |card| ids.iter().any(|id| *id == card.id))
}

/// Show only cards whose identifier is in the favorites set.
pub fn apply_favorites_filter(cards: &[Card<'_>], favorites: &BTreeSet<String>) -> VisibleSet {
    VisibleSet::from_predicate(cards, |card| favorites.contains(card.id))
}

/// The filter behind the current visible set. Rebuilt from each user action,
/// never persisted. `"all"` is stored as `None` for category and chip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub active_category: Option<String>,
    pub active_query: String,
    pub active_chip: Option<String>,
    pub favorites_only: bool,
}

fn unless_all(token: &str) -> Option<String> {
    (token != ALL).then(|| token.to_string())
}

impl FilterState {
    pub fn category(category: &str) -> Self {
        Self { active_category: unless_all(category), ..Self::default() }
    }

    pub fn query(query: &str) -> Self {
        Self { active_query: query.trim().to_string(), ..Self::default() }
    }

    pub fn chip(chip: &str) -> Self {
        Self { active_chip: unless_all(chip), ..Self::default() }
    }

    pub fn favorites() -> Self {
        Self { favorites_only: true, ..Self::default() }
    }

    /// A card is visible when it passes every active filter.
    pub fn apply(&self, cards: &[Card<'_>], favorites: &BTreeSet<String>) -> VisibleSet {
        let mut sets = vec![apply_query_filter(cards, &self.active_query)];
        if let Some(category) = self.active_category.as_deref() {
            sets.push(apply_category_filter(cards, category));
        }
        if let Some(chip) = self.active_chip.as_deref() {
            sets.push(apply_chip_filter(cards, chip));
        }
        if self.favorites_only {
            sets.push(apply_favorites_filter(cards, favorites));
        }
        VisibleSet::from_predicate_indexed(cards.len(), |i| sets.iter().all(|set| set.is_visible(i)))
    }
}

// ── Screen reader announcements ────────────────────────────────────

pub fn category_announcement(category: &str, set: &VisibleSet) -> String {
    if category == ALL {
        return "Showing all Springfield locations".to_string();
    }
    let label = Category::parse(category).map(Category::label).unwrap_or(category);
    format!("Filtered to {} {} locations", set.count, label)
}

/// Echoes the query as typed; only a blank query counts as "show all".
pub fn query_announcement(query: &str, set: &VisibleSet) -> String {
    if query.trim().is_empty() {
        return "Showing all locations".to_string();
    }
    format!("Found {} locations matching \"{}\"", set.count, query)
}

pub fn chip_announcement(chip: &str, set: &VisibleSet) -> String {
    if chip == ALL {
        return "Showing all locations".to_string();
    }
    format!("Filtered to {} {} locations", set.count, chip)
}

pub fn favorites_announcement(set: &VisibleSet) -> String {
    format!("Showing {} favorite locations", set.count)
}
