//! Route handlers. Each takes the raw query string or form body and returns
//! the response body: an HTML fragment for HTMX swaps or a JSON effect list.

pub mod ambient;
pub mod cards;
pub mod effects;
pub mod keyboard;
pub mod modal;
pub mod prefs;
pub mod util;
