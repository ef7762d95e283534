//! Map bounds check and position correction
//!
//! The playable world is a square centred on the origin in the horizontal
//! (x, z) plane. Two correction strategies exist and are kept separate:
//! - `InwardClampPolicy`: strict square, stray axes pulled a margin inside
//! - `ToleranceSnapPolicy`: square padded by a tolerance, stray axes snapped
//!   onto the padded edge
//!
//! The vertical axis (y) is never checked or modified. A NaN coordinate
//! compares false against both edges and so counts as inside; infinities
//! are outside and clamp to a finite value.

use glam::Vec3;

use crate::consts::{INWARD_MARGIN, MAP_LIMIT_CAP, OVER_BORDER_TOLERANCE};

/// Half-extent of the playable square, in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapLimit(pub f32);

impl MapLimit {
    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }
}

/// Result of checking a position against the map limit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsCheck {
    /// Position is playable as-is
    Inside,
    /// Position is outside; `corrected` is the in-bounds replacement
    Outside { corrected: Vec3 },
}

impl BoundsCheck {
    pub fn is_inside(&self) -> bool {
        matches!(self, BoundsCheck::Inside)
    }

    /// The position to use after correction
    pub fn resolve(&self, original: Vec3) -> Vec3 {
        match *self {
            BoundsCheck::Inside => original,
            BoundsCheck::Outside { corrected } => corrected,
        }
    }
}

/// A bounds-check and correction strategy
pub trait ClampPolicy {
    /// Derive the map limit from the host's world size setting
    fn map_limit(&self, world_size: u32) -> MapLimit;

    /// Whether a single horizontal coordinate is within the limit.
    /// Written as "not beyond either edge" so NaN is never flagged.
    fn axis_inside(&self, limit: MapLimit, value: f32) -> bool;

    /// Corrected value for a coordinate that failed `axis_inside`
    fn clamp_axis(&self, limit: MapLimit, value: f32) -> f32;

    /// Check x and z; y passes through untouched
    fn check(&self, limit: MapLimit, pos: Vec3) -> BoundsCheck {
        let x_ok = self.axis_inside(limit, pos.x);
        let z_ok = self.axis_inside(limit, pos.z);
        if x_ok && z_ok {
            return BoundsCheck::Inside;
        }

        let mut corrected = pos;
        if !x_ok {
            corrected.x = self.clamp_axis(limit, pos.x);
        }
        if !z_ok {
            corrected.z = self.clamp_axis(limit, pos.z);
        }
        BoundsCheck::Outside { corrected }
    }
}

/// Strict square; stray axes are pulled `margin` units inside the edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InwardClampPolicy {
    /// Upper bound on the derived limit
    pub cap: u32,
    /// Distance inside the edge a corrected axis lands at
    pub margin: f32,
}

impl Default for InwardClampPolicy {
    fn default() -> Self {
        Self {
            cap: MAP_LIMIT_CAP,
            margin: INWARD_MARGIN,
        }
    }
}

impl ClampPolicy for InwardClampPolicy {
    fn map_limit(&self, world_size: u32) -> MapLimit {
        // Integer math: odd world sizes round down before scaling
        let limit = (world_size / 2).saturating_mul(3).min(self.cap);
        MapLimit(limit as f32)
    }

    fn axis_inside(&self, limit: MapLimit, value: f32) -> bool {
        !(value < -limit.0 || value > limit.0)
    }

    fn clamp_axis(&self, limit: MapLimit, value: f32) -> f32 {
        // Never cross the origin when the limit is smaller than the margin
        let target = (limit.0 - self.margin).max(0.0);
        if value < -limit.0 {
            -target
        } else if value > limit.0 {
            target
        } else {
            value
        }
    }
}

/// Square padded by `tolerance`; stray axes snap onto the padded edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceSnapPolicy {
    pub tolerance: f32,
}

impl Default for ToleranceSnapPolicy {
    fn default() -> Self {
        Self {
            tolerance: OVER_BORDER_TOLERANCE,
        }
    }
}

impl ToleranceSnapPolicy {
    #[inline]
    fn padded(&self, limit: MapLimit) -> f32 {
        limit.0 + self.tolerance
    }
}

impl ClampPolicy for ToleranceSnapPolicy {
    fn map_limit(&self, world_size: u32) -> MapLimit {
        MapLimit((world_size / 2) as f32)
    }

    fn axis_inside(&self, limit: MapLimit, value: f32) -> bool {
        let edge = self.padded(limit);
        !(value < -edge || value > edge)
    }

    fn clamp_axis(&self, limit: MapLimit, value: f32) -> f32 {
        let edge = self.padded(limit);
        value.clamp(-edge, edge)
    }
}
