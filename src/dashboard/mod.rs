//! Dashboard session: the single controller the worker keeps alive, the
//! effects it emits, and thread-local access to it.

pub mod controller;
pub mod effect;
pub mod state;
