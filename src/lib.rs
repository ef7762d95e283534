//! Vessel Bounds Fix - respawns vessels that spawn outside the playable map
//!
//! Core modules:
//! - `sim`: Deterministic correction core (bounds check, timers, respawn sequencing)
//! - `guard`: Plugin facade wired to the host's lifecycle hooks
//! - `journal`: Operator log (file and console)
//! - `settings`: Logging preferences
//! - `persistence`: Config file load/save with default recovery

pub mod guard;
pub mod journal;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use guard::BoundsGuard;
pub use journal::{Journal, LogLevel};
pub use persistence::{ConfigStore, PersistError};
pub use settings::Config;

use glam::Vec3;

/// Plugin configuration constants
pub mod consts {
    /// Hard cap on the inward-clamp map limit (world units)
    pub const MAP_LIMIT_CAP: u32 = 4000;
    /// Distance a corrected axis is pulled back inside the limit
    pub const INWARD_MARGIN: f32 = 100.0;
    /// Extra room allowed past the map edge by the tolerance policy
    pub const OVER_BORDER_TOLERANCE: f32 = 100.0;

    /// Delay before the stray vessel is destroyed (seconds after detection)
    pub const DESTROY_DELAY: f64 = 1.0;
    /// Delay before the replacement is created (seconds after detection)
    pub const RESPAWN_DELAY: f64 = 2.0;

    /// Interval between position reports for a replacement vessel
    pub const POSITION_LOG_INTERVAL: f64 = 30.0;
    /// Number of position reports per replacement
    pub const POSITION_LOG_REPEATS: u32 = 5;

    /// Prefab the host instantiates for a replacement vessel
    pub const VESSEL_PREFAB: &str = "assets/content/vehicles/boats/cargoship/cargoshiptest.prefab";

    /// Journal file stem (`<stem>.txt`, or `<stem>_<name>.txt` for named files)
    pub const JOURNAL_STEM: &str = "vessel_bounds_fix";
}

/// Format a position as `x|y|z` for the journal
pub fn format_position(pos: Vec3) -> String {
    format!("{}|{}|{}", pos.x, pos.y, pos.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_position() {
        assert_eq!(format_position(Vec3::new(4500.0, 50.0, -12.5)), "4500|50|-12.5");
    }
}
