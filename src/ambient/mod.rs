//! Ambient effects: the decorative loops and bursts around the dashboard.
//!
//! Nothing here touches filter state. Periodic work is driven by the
//! `Scheduler`, which the host ticks with its own clock, so a hidden page can
//! pause every loop at once and resume where it left off.

pub mod effects;
pub mod rotation;
pub mod scheduler;
