//! HUD output port
//!
//! The simulation never reads anything back from the UI; it only reports
//! state after each change.

/// On-screen HUD and menus
pub trait UiPort {
    fn update_score(&mut self, score: u64);
    /// Health as a percentage (0.0 - 100.0)
    fn update_health(&mut self, percent: f32);
    fn update_ammo(&mut self, ammo: u32);
    fn show_game_over(&mut self, score: u64);
    fn toggle_pause_menu(&mut self, visible: bool);
    /// Short transient message (loot pickups)
    fn notify(&mut self, _message: &str) {}
}

/// Port that discards everything
#[derive(Debug, Default)]
pub struct NullUi;

impl UiPort for NullUi {
    fn update_score(&mut self, _score: u64) {}
    fn update_health(&mut self, _percent: f32) {}
    fn update_ammo(&mut self, _ammo: u32) {}
    fn show_game_over(&mut self, _score: u64) {}
    fn toggle_pause_menu(&mut self, _visible: bool) {}
}

/// Port that logs HUD changes
#[derive(Debug, Default)]
pub struct LogUi;

impl UiPort for LogUi {
    fn update_score(&mut self, score: u64) {
        log::debug!("HUD score: {}", score);
    }

    fn update_health(&mut self, percent: f32) {
        log::debug!("HUD health: {:.0}%", percent);
    }

    fn update_ammo(&mut self, ammo: u32) {
        log::debug!("HUD ammo: {}", ammo);
    }

    fn show_game_over(&mut self, score: u64) {
        log::info!("GAME OVER - final score {}", score);
    }

    fn toggle_pause_menu(&mut self, visible: bool) {
        log::info!("Pause menu {}", if visible { "shown" } else { "hidden" });
    }

    fn notify(&mut self, message: &str) {
        log::info!("{}", message);
    }
}
