//! Synthesized sound effects. The host plays a `ToneSpec` on a Web Audio
//! oscillator: frequency ramps `start_hz → end_hz` and gain ramps
//! `gain_start → gain_end` exponentially over `duration_s`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToneSpec {
    pub start_hz: f64,
    pub end_hz: f64,
    pub duration_s: f64,
    pub gain_start: f64,
    pub gain_end: f64,
}

impl ToneSpec {
    const fn steady(hz: f64, duration_s: f64) -> Self {
        Self { start_hz: hz, end_hz: hz, duration_s, gain_start: 0.05, gain_end: 0.01 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Click,
    Chime,
    Whoosh,
    Achievement,
    Doh,
}

impl SoundEffect {
    /// Parse an event name. Unknown names (including the per-location
    /// names, which have no dedicated tone) play the click.
    pub fn from_name(name: &str) -> SoundEffect {
        match name {
            "chime" => SoundEffect::Chime,
            "whoosh" => SoundEffect::Whoosh,
            "achievement" => SoundEffect::Achievement,
            "doh" => SoundEffect::Doh,
            _ => SoundEffect::Click,
        }
    }

    pub fn tone(self) -> ToneSpec {
        match self {
            SoundEffect::Click => ToneSpec::steady(800.0, 0.1),
            SoundEffect::Chime => ToneSpec::steady(659.25, 0.3),
            SoundEffect::Whoosh => ToneSpec::steady(440.0, 0.5),
            SoundEffect::Achievement => ToneSpec::steady(523.25, 0.8),
            SoundEffect::Doh => ToneSpec {
                start_hz: 220.0,
                end_hz: 110.0,
                duration_s: 0.5,
                gain_start: 0.1,
                gain_end: 0.01,
            },
        }
    }
}

/// Sound name for clicking a location card.
pub fn location_sound(location: &str) -> &'static str {
    match location {
        "simpsons-house" => "doorbell",
        "elementary" => "school-bell",
        "power-plant" => "nuclear-alert",
        "channel-6" => "news-jingle",
        "moes-tavern" => "cash-register",
        "kwik-e-mart" => "scanner-beep",
        _ => "click",
    }
}

/// Audio output gate. When the host has no audio context every request
/// yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioOutput {
    enabled: bool,
}

impl AudioOutput {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn play(&self, effect: SoundEffect) -> Option<ToneSpec> {
        self.enabled.then(|| effect.tone())
    }

    pub fn play_named(&self, name: &str) -> Option<ToneSpec> {
        self.play(SoundEffect::from_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_table() {
        assert_eq!(SoundEffect::Click.tone().start_hz, 800.0);
        assert_eq!(SoundEffect::Chime.tone().duration_s, 0.3);
        assert_eq!(SoundEffect::Achievement.tone().start_hz, 523.25);
        let doh = SoundEffect::Doh.tone();
        assert_eq!((doh.start_hz, doh.end_hz, doh.gain_start), (220.0, 110.0, 0.1));
    }

    #[test]
    fn location_sounds_fall_back_to_click() {
        assert_eq!(location_sound("moes-tavern"), "cash-register");
        assert_eq!(SoundEffect::from_name(location_sound("moes-tavern")), SoundEffect::Click);
        assert_eq!(SoundEffect::from_name("kazoo"), SoundEffect::Click);
    }

    #[test]
    fn disabled_audio_plays_nothing() {
        assert!(AudioOutput::new(false).play(SoundEffect::Chime).is_none());
        assert_eq!(AudioOutput::new(true).play_named("whoosh"), Some(SoundEffect::Whoosh.tone()));
    }
}
