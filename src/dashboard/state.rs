//! Session-wide dashboard controller.
//!
//! Uses `thread_local!` + `RefCell` for mutable access in single-threaded
//! WASM. The Web Worker keeps the module alive, so the controller persists
//! across `handle_request` calls until the page is torn down.

use std::cell::RefCell;

use crate::config::DashboardConfig;
use crate::dashboard::controller::DashboardController;
use crate::dashboard::effect::Effect;

thread_local! {
    static CONTROLLER: RefCell<DashboardController> =
        RefCell::new(DashboardController::new(DashboardConfig::default()));
}

/// Execute a closure with read access to the controller.
pub fn with_controller<F, R>(f: F) -> R
where
    F: FnOnce(&DashboardController) -> R,
{
    CONTROLLER.with(|c| f(&c.borrow()))
}

/// Execute a closure with mutable access to the controller.
pub fn with_controller_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut DashboardController) -> R,
{
    CONTROLLER.with(|c| f(&mut c.borrow_mut()))
}

/// Replace the controller with a fresh one built from `config` and start it.
pub fn init(config: DashboardConfig, now: f64) -> Vec<Effect> {
    let mut controller = DashboardController::new(config);
    let effects = controller.startup(now);
    CONTROLLER.with(|c| *c.borrow_mut() = controller);
    effects
}

/// Drop all session state and return to defaults.
pub fn reset() {
    CONTROLLER.with(|c| *c.borrow_mut() = DashboardController::new(DashboardConfig::default()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_replaces_controller() {
        let config = DashboardConfig { audio_available: false, ..DashboardConfig::default() };
        let effects = init(config, 0.0);
        assert!(!effects.is_empty());
        with_controller(|c| {
            assert!(!c.config().audio_available);
            assert!(!c.scheduler().is_empty());
        });
        reset();
        with_controller(|c| {
            assert!(c.config().audio_available);
            assert!(c.scheduler().is_empty());
        });
    }

    #[test]
    fn mutations_persist_between_calls() {
        reset();
        with_controller_mut(|c| c.filter_category("commercial"));
        with_controller(|c| assert_eq!(c.visible().count, 1));
        reset();
    }
}
