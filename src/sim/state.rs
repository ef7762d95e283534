//! Respawn sequencing state and events
//!
//! A correction walks `PendingDestroy -> PendingCreate -> Respawned` (or
//! `Failed` if the host refuses to create the replacement).

use glam::Vec3;

use super::host::EntityId;

/// Identifier of one correction cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CorrectionId(pub u32);

/// Where a correction cycle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionPhase {
    /// Stray vessel still alive, destroy timer pending
    PendingDestroy,
    /// Stray vessel gone, create timer pending
    PendingCreate,
    /// Replacement spawned
    Respawned { replacement: EntityId },
    /// Host returned no entity for the replacement
    Failed,
}

/// One stray vessel being replaced
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub id: CorrectionId,
    /// The out-of-bounds vessel
    pub original: EntityId,
    /// Where the replacement goes
    pub target: Vec3,
    pub phase: CorrectionPhase,
}

impl Correction {
    pub fn is_finished(&self) -> bool {
        matches!(
            self.phase,
            CorrectionPhase::Respawned { .. } | CorrectionPhase::Failed
        )
    }
}

/// Delayed actions the sequencer schedules
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequencerAction {
    Destroy { correction: CorrectionId },
    Create { correction: CorrectionId },
    ReportPosition { entity: EntityId },
}

/// Things that happened during a sequencer step (for logging/UI)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequencerEvent {
    /// Stray vessel destroyed
    Destroyed { correction: CorrectionId, entity: EntityId },
    /// Replacement vessel spawned
    Respawned {
        correction: CorrectionId,
        replacement: EntityId,
        position: Vec3,
    },
    /// Host could not create the replacement
    RespawnFailed { correction: CorrectionId },
    /// Periodic position sample of the replacement
    PositionReport { entity: EntityId, position: Vec3 },
}
