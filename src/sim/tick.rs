//! Respawn sequencer
//!
//! Schedules and runs the destroy/create pair for each stray vessel. Both
//! timers are armed at detection time (destroy at +1 s, create at +2 s);
//! `tick` fires whatever is due against the host.

use std::collections::BTreeSet;

use glam::{Quat, Vec3};

use super::host::{EntityId, Host};
use super::state::{Correction, CorrectionId, CorrectionPhase, SequencerAction, SequencerEvent};
use super::timer::{TimerHandle, TimerQueue};
use crate::consts::*;

/// Drives correction cycles and the replacement position reports
#[derive(Debug, Default)]
pub struct RespawnSequencer {
    corrections: Vec<Correction>,
    timers: TimerQueue<SequencerAction>,
    /// Replacements we created whose spawn event has not arrived yet
    own_spawns: BTreeSet<EntityId>,
    /// Position report task for the latest replacement
    position_log: Option<TimerHandle>,
    next_correction: u32,
}

impl RespawnSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a correction cycle for a stray vessel detected at `now`
    pub fn begin(&mut self, original: EntityId, target: Vec3, now: f64) -> CorrectionId {
        self.corrections.retain(|c| !c.is_finished());
        self.cancel_position_log();

        let id = CorrectionId(self.next_correction);
        self.next_correction += 1;

        self.corrections.push(Correction {
            id,
            original,
            target,
            phase: CorrectionPhase::PendingDestroy,
        });
        self.timers
            .once(now, DESTROY_DELAY, SequencerAction::Destroy { correction: id });
        self.timers
            .once(now, RESPAWN_DELAY, SequencerAction::Create { correction: id });

        id
    }

    /// Consume the marker for a replacement we spawned ourselves.
    ///
    /// Returns true if `id` was one of ours; its spawn event must be ignored.
    pub fn claim_own_spawn(&mut self, id: EntityId) -> bool {
        self.own_spawns.remove(&id)
    }

    /// Replacements still waiting for their spawn event
    pub fn pending_own_spawns(&self) -> usize {
        self.own_spawns.len()
    }

    /// Whether `entity` is already the subject of an unfinished correction
    pub fn is_correcting(&self, entity: EntityId) -> bool {
        self.corrections
            .iter()
            .any(|c| c.original == entity && !c.is_finished())
    }

    /// Fire every action due at or before `now`
    pub fn tick(&mut self, host: &mut impl Host, now: f64) -> Vec<SequencerEvent> {
        // A replacement destroyed before its spawn event arrived never claims its tag
        self.own_spawns.retain(|id| !host.is_destroyed(*id));

        let mut events = Vec::new();
        while let Some((_, action)) = self.timers.pop_due(now) {
            match action {
                SequencerAction::Destroy { correction } => {
                    self.fire_destroy(host, correction, &mut events)
                }
                SequencerAction::Create { correction } => {
                    self.fire_create(host, correction, now, &mut events)
                }
                SequencerAction::ReportPosition { entity } => {
                    if let Some(position) = live_position(host, entity) {
                        events.push(SequencerEvent::PositionReport { entity, position });
                    }
                }
            }
        }
        events
    }

    fn fire_destroy(
        &mut self,
        host: &mut impl Host,
        id: CorrectionId,
        events: &mut Vec<SequencerEvent>,
    ) {
        let Some(correction) = self.corrections.iter_mut().find(|c| c.id == id) else {
            return;
        };
        if !host.is_destroyed(correction.original) {
            host.destroy(correction.original);
        }
        correction.phase = CorrectionPhase::PendingCreate;
        events.push(SequencerEvent::Destroyed {
            correction: id,
            entity: correction.original,
        });
    }

    fn fire_create(
        &mut self,
        host: &mut impl Host,
        id: CorrectionId,
        now: f64,
        events: &mut Vec<SequencerEvent>,
    ) {
        let Some(idx) = self.corrections.iter().position(|c| c.id == id) else {
            return;
        };
        let target = self.corrections[idx].target;

        let Some(replacement) = host.create_entity(VESSEL_PREFAB) else {
            log::debug!("Host returned no entity for correction {:?}", id);
            self.corrections[idx].phase = CorrectionPhase::Failed;
            events.push(SequencerEvent::RespawnFailed { correction: id });
            return;
        };

        // Tag before finalize_spawn: the host may fire the spawn event from there
        self.own_spawns.insert(replacement);
        host.set_position_and_rotation(replacement, target, Quat::IDENTITY);
        host.mark_triggered_spawn(replacement);
        host.finalize_spawn(replacement);

        self.corrections[idx].phase = CorrectionPhase::Respawned { replacement };

        self.cancel_position_log();
        self.position_log = Some(self.timers.repeat(
            now,
            POSITION_LOG_INTERVAL,
            POSITION_LOG_REPEATS,
            SequencerAction::ReportPosition {
                entity: replacement,
            },
        ));

        events.push(SequencerEvent::Respawned {
            correction: id,
            replacement,
            position: host.position(replacement).unwrap_or(target),
        });
    }

    /// Stop the replacement position reports. Returns true if one was running.
    pub fn cancel_position_log(&mut self) -> bool {
        match self.position_log.take() {
            Some(handle) => self.timers.cancel(handle),
            None => false,
        }
    }

    pub fn position_log_active(&self) -> bool {
        self.position_log
            .is_some_and(|handle| self.timers.is_active(handle))
    }

    pub fn corrections(&self) -> &[Correction] {
        &self.corrections
    }

    pub fn correction(&self, id: CorrectionId) -> Option<&Correction> {
        self.corrections.iter().find(|c| c.id == id)
    }

    /// Pending actions with their due times, earliest first
    pub fn scheduled(&self) -> Vec<(f64, SequencerAction)> {
        let mut pending: Vec<_> = self
            .timers
            .iter()
            .map(|(handle, due, action)| (due, handle, *action))
            .collect();
        pending.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });
        pending.into_iter().map(|(due, _, action)| (due, action)).collect()
    }
}

/// Position of an entity that still exists
fn live_position(host: &impl Host, entity: EntityId) -> Option<Vec3> {
    if host.is_destroyed(entity) {
        return None;
    }
    host.position(entity)
}
