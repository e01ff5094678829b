//! One-off cosmetic bursts: sprinkles, donut rain, parallax clouds, skyline
//! window lights, hidden donuts, and card sparkles.
//!
//! Positions and timings are randomized through a seeded PCG so the host can
//! reproduce a session's layout from its config seed.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

/// Sprinkle palette: yellow, red, green, blue, purple, orange.
pub const SPRINKLE_COLORS: [&str; 6] = ["#FFD90F", "#E74C3C", "#58D68D", "#5DADE2", "#9B59B6", "#F39C12"];

/// Sprinkles are removed from the confetti container after this long.
pub const SPRINKLE_LIFETIME_MS: u32 = 4_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprinkle {
    pub color: &'static str,
    pub left_vw: f64,
    pub delay_s: f64,
    pub duration_s: f64,
}

pub fn sprinkles(rng: &mut Pcg32, count: usize) -> Vec<Sprinkle> {
    (0..count)
        .map(|_| Sprinkle {
            color: SPRINKLE_COLORS[rng.gen_range(0..SPRINKLE_COLORS.len())],
            left_vw: rng.gen_range(0.0..100.0),
            delay_s: rng.gen_range(0.0..2.0),
            duration_s: rng.gen_range(2.0..4.0),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutDrop {
    pub left_vw: f64,
    pub delay_s: f64,
    pub duration_s: f64,
    pub size_rem: f64,
    pub spin_deg: f64,
}

pub fn donut_rain(rng: &mut Pcg32, count: usize) -> Vec<DonutDrop> {
    (0..count)
        .map(|_| DonutDrop {
            left_vw: rng.gen_range(0.0..100.0),
            delay_s: rng.gen_range(0.0..1.5),
            duration_s: rng.gen_range(2.5..5.0),
            size_rem: rng.gen_range(1.0..2.5),
            spin_deg: rng.gen_range(-360.0..360.0),
        })
        .collect()
}

/// A cloud drifting across the sky. Deeper clouds are smaller and slower.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cloud {
    pub top_pct: f64,
    pub depth: u8,
    pub scale: f64,
    pub duration_s: f64,
}

pub fn cloud(rng: &mut Pcg32) -> Cloud {
    let depth: u8 = rng.gen_range(1..=3);
    let d = f64::from(depth);
    Cloud {
        top_pct: rng.gen_range(0.0..40.0),
        depth,
        scale: 1.2 / d,
        duration_s: 30.0 * d + rng.gen_range(0.0..10.0),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowLight {
    pub building: usize,
    pub window: usize,
    pub left_pct: f64,
    pub top_pct: f64,
    pub lit: bool,
}

/// Initial window layout: each building gets `per_building` windows at random
/// spots, about half of them lit.
pub fn skyline(rng: &mut Pcg32, buildings: usize, per_building: usize) -> Vec<WindowLight> {
    let mut windows = Vec::with_capacity(buildings * per_building);
    for building in 0..buildings {
        for window in 0..per_building {
            windows.push(WindowLight {
                building,
                window,
                left_pct: rng.gen_range(0.0..60.0),
                top_pct: rng.gen_range(0.0..70.0),
                lit: rng.gen_bool(0.5),
            });
        }
    }
    windows
}

/// Whether a window is lit after a flicker. Flickers favour dark windows.
pub fn flicker_lit(rng: &mut Pcg32) -> bool {
    rng.gen_bool(0.3)
}

/// Flicker period for one window: `min + rand * span`.
pub fn flicker_interval(rng: &mut Pcg32, min_ms: f64, span_ms: f64) -> f64 {
    min_ms + rng.gen_range(0.0..1.0) * span_ms.max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DonutPosition {
    pub top: &'static str,
    pub left: &'static str,
}

/// Barely visible donuts tucked around the page edges.
pub const HIDDEN_DONUTS: [DonutPosition; 4] = [
    DonutPosition { top: "15%", left: "85%" },
    DonutPosition { top: "65%", left: "5%" },
    DonutPosition { top: "45%", left: "95%" },
    DonutPosition { top: "85%", left: "15%" },
];

/// A twinkling sparkle pinned to a card's top-right corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sparkle {
    pub top_px: f64,
    pub right_px: f64,
}

pub fn sparkle(rng: &mut Pcg32) -> Sparkle {
    Sparkle { top_px: rng.gen_range(0.0..20.0), right_px: rng.gen_range(0.0..20.0) }
}

/// Pick a random index below `len`, or `None` if empty.
pub fn pick(rng: &mut Pcg32, len: usize) -> Option<usize> {
    (len > 0).then(|| rng.gen_range(0..len))
}

/// The stats modal's tongue-in-cheek "donuts consumed today".
pub fn donuts_consumed(rng: &mut Pcg32) -> u32 {
    rng.gen_range(5_000..15_000)
}
