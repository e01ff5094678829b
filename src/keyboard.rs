//! Global keyboard shortcuts and the konami-code easter egg.

use serde::Deserialize;

use crate::filter::VisibleSet;

/// Up Up Down Down Left Right Left Right B A.
pub const KONAMI_CODE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "KeyB",
    "KeyA",
];

/// Progress through the konami sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KonamiTracker {
    progress: usize,
}

impl KonamiTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn reset(&mut self) {
        self.progress = 0;
    }

    /// Feed one physical key code. Returns true when the sequence completes;
    /// the tracker then starts over.
    pub fn feed(&mut self, code: &str) -> bool {
        self.progress = Self::advance(self.progress, code);
        if self.progress == KONAMI_CODE.len() {
            self.progress = 0;
            return true;
        }
        false
    }

    /// Length of the longest sequence prefix that ends the keys seen so far
    /// followed by `code`. The matched keys are always `KONAMI_CODE[..progress]`.
    fn advance(progress: usize, code: &str) -> usize {
        (1..=progress + 1)
            .rev()
            .find(|&len| {
                KONAMI_CODE[len - 1] == code
                    && KONAMI_CODE[..len - 1] == KONAMI_CODE[progress + 1 - len..progress]
            })
            .unwrap_or(0)
    }
}

/// A `keydown` as reported by the host page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyEvent {
    /// `KeyboardEvent.code` (physical key, e.g. `KeyB`).
    pub code: String,
    /// `KeyboardEvent.key` (produced character, e.g. `b`).
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyEvent {
    fn has_command_modifier(&self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

/// What a key press asks the dashboard to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    ToggleSeason1,
    FocusSearch,
    PlayDoh,
    ShowHelp,
    CloseModals,
    /// Zero-based index into the catalog.
    ActivateCard(usize),
}

/// Translate a key press into commands. The konami tracker sees every key;
/// the other shortcuts are independent of it.
pub fn dispatch(event: &KeyEvent, konami: &mut KonamiTracker, visible: &VisibleSet) -> Vec<KeyCommand> {
    let mut commands = Vec::new();

    if konami.feed(&event.code) {
        commands.push(KeyCommand::ToggleSeason1);
    }

    match event.key.as_str() {
        "/" => commands.push(KeyCommand::FocusSearch),
        "d" | "D" if !event.has_command_modifier() => commands.push(KeyCommand::PlayDoh),
        "?" => commands.push(KeyCommand::ShowHelp),
        "Escape" => commands.push(KeyCommand::CloseModals),
        _ => {}
    }

    if let Some(index) = digit_index(&event.key) {
        if !event.has_command_modifier() && visible.is_visible(index) {
            commands.push(KeyCommand::ActivateCard(index));
        }
    }

    commands
}

/// `"1"`..=`"6"` → 0..=5.
fn digit_index(key: &str) -> Option<usize> {
    match key {
        "1" | "2" | "3" | "4" | "5" | "6" => key.parse::<usize>().ok().map(|d| d - 1),
        _ => None,
    }
}

/// Keep Tab focus inside an open modal. Given the number of focusable
/// elements and the index of the focused one, returns the index focus must
/// wrap to, or `None` when the browser's default move is fine.
pub fn focus_trap(focusable: usize, active: Option<usize>, shift: bool) -> Option<usize> {
    if focusable == 0 {
        return None;
    }
    let last = focusable - 1;
    match (active, shift) {
        (Some(0), true) => Some(last),
        (Some(i), false) if i == last => Some(0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: &str, key: &str) -> KeyEvent {
        KeyEvent { code: code.to_string(), key: key.to_string(), ..KeyEvent::default() }
    }

    fn feed_all(tracker: &mut KonamiTracker, codes: &[&str]) -> usize {
        codes.iter().filter(|c| tracker.feed(c)).count()
    }

    #[test]
    fn konami_completes_and_resets() {
        let mut tracker = KonamiTracker::new();
        assert_eq!(feed_all(&mut tracker, &KONAMI_CODE), 1);
        assert_eq!(tracker.progress(), 0);
        assert_eq!(feed_all(&mut tracker, &KONAMI_CODE), 1);
    }

    #[test]
    fn konami_wrong_key_resets() {
        let mut tracker = KonamiTracker::new();
        feed_all(&mut tracker, &["ArrowUp", "ArrowUp", "ArrowDown"]);
        assert_eq!(tracker.progress(), 3);
        tracker.feed("KeyX");
        assert_eq!(tracker.progress(), 0);
    }

    #[test]
    fn konami_restarts_on_opener() {
        let mut tracker = KonamiTracker::new();
        feed_all(&mut tracker, &["ArrowUp", "ArrowDown"]);
        tracker.feed("ArrowUp");
        assert_eq!(tracker.progress(), 1);
    }

    #[test]
    fn konami_extra_opener_keeps_progress() {
        let mut tracker = KonamiTracker::new();
        let mut keys = vec!["ArrowUp"];
        keys.extend_from_slice(&KONAMI_CODE);
        assert_eq!(feed_all(&mut tracker, &keys), 1);

        feed_all(&mut tracker, &["ArrowUp", "ArrowUp", "ArrowUp"]);
        assert_eq!(tracker.progress(), 2);
    }

    #[test]
    fn konami_mismatch_after_down_starts_over() {
        let mut tracker = KonamiTracker::new();
        feed_all(&mut tracker, &["ArrowUp", "ArrowUp", "ArrowDown", "ArrowUp"]);
        assert_eq!(tracker.progress(), 1);
    }

    #[test]
    fn explicit_reset() {
        let mut tracker = KonamiTracker::new();
        feed_all(&mut tracker, &KONAMI_CODE[..5]);
        tracker.reset();
        assert_eq!(tracker.progress(), 0);
    }

    #[test]
    fn dispatch_konami_toggles_season1() {
        let mut tracker = KonamiTracker::new();
        let visible = VisibleSet::all(6);
        let mut last = Vec::new();
        for code in KONAMI_CODE {
            let k = code.strip_prefix("Key").map(str::to_lowercase).unwrap_or_default();
            last = dispatch(&key(code, &k), &mut tracker, &visible);
        }
        assert_eq!(last, vec![KeyCommand::ToggleSeason1]);
    }

    #[test]
    fn dispatch_shortcuts() {
        let mut tracker = KonamiTracker::new();
        let visible = VisibleSet::all(6);
        assert_eq!(dispatch(&key("Slash", "/"), &mut tracker, &visible), vec![KeyCommand::FocusSearch]);
        assert_eq!(dispatch(&key("Slash", "?"), &mut tracker, &visible), vec![KeyCommand::ShowHelp]);
        assert_eq!(dispatch(&key("Escape", "Escape"), &mut tracker, &visible), vec![KeyCommand::CloseModals]);
        assert_eq!(dispatch(&key("KeyD", "D"), &mut tracker, &visible), vec![KeyCommand::PlayDoh]);

        let mut ctrl_d = key("KeyD", "d");
        ctrl_d.ctrl = true;
        assert!(dispatch(&ctrl_d, &mut tracker, &visible).is_empty());
    }

    #[test]
    fn digits_activate_only_visible_cards() {
        let mut tracker = KonamiTracker::new();
        let visible = VisibleSet { visible: vec![true, false, true], count: 2 };
        assert_eq!(
            dispatch(&key("Digit1", "1"), &mut tracker, &visible),
            vec![KeyCommand::ActivateCard(0)]
        );
        assert!(dispatch(&key("Digit2", "2"), &mut tracker, &visible).is_empty());
        assert!(dispatch(&key("Digit6", "6"), &mut tracker, &visible).is_empty());
        assert!(dispatch(&key("Digit7", "7"), &mut tracker, &VisibleSet::all(9)).is_empty());

        let mut alt_1 = key("Digit1", "1");
        alt_1.alt = true;
        assert!(dispatch(&alt_1, &mut tracker, &visible).is_empty());
    }

    #[test]
    fn focus_trap_wraps_at_ends() {
        assert_eq!(focus_trap(3, Some(2), false), Some(0));
        assert_eq!(focus_trap(3, Some(0), true), Some(2));
        assert_eq!(focus_trap(3, Some(1), false), None);
        assert_eq!(focus_trap(3, None, false), None);
        assert_eq!(focus_trap(0, Some(0), true), None);
    }
}
