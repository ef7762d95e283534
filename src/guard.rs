//! Plugin facade
//!
//! `BoundsGuard` is what the host loads. It exposes the host's lifecycle
//! hooks, decides what to do with each spawned vessel and writes the journal.

use glam::Vec3;

use crate::format_position;
use crate::journal::Journal;
use crate::sim::{
    BoundsCheck, ClampPolicy, CorrectionId, EntityKind, Host, InwardClampPolicy, MapLimit,
    RespawnSequencer, SequencerEvent, SpawnEvent,
};

/// Outcome of a spawn event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnVerdict {
    /// Server not initialized yet, event dropped
    NotReady,
    /// Not a vessel
    Ignored,
    /// Replacement we spawned ourselves
    OwnReplacement,
    /// Vessel already has a correction in flight
    AlreadyCorrecting,
    InBounds,
    /// Out of bounds, correction scheduled
    Corrected(CorrectionId),
}

/// Watches vessel spawns and replaces the ones outside the map
#[derive(Debug)]
pub struct BoundsGuard<P = InwardClampPolicy> {
    policy: P,
    journal: Journal,
    /// Set by `on_server_initialized`
    map_limit: Option<MapLimit>,
    sequencer: RespawnSequencer,
}

impl BoundsGuard<InwardClampPolicy> {
    /// Guard using the default inward clamp
    pub fn with_journal(journal: Journal) -> Self {
        Self::new(InwardClampPolicy::default(), journal)
    }
}

impl<P: ClampPolicy> BoundsGuard<P> {
    pub fn new(policy: P, journal: Journal) -> Self {
        Self {
            policy,
            journal,
            map_limit: None,
            sequencer: RespawnSequencer::new(),
        }
    }

    /// Host finished starting: derive the map limit and start watching
    pub fn on_server_initialized(&mut self, host: &impl Host) -> MapLimit {
        let world_size = host.world_size();
        let limit = self.policy.map_limit(world_size);
        self.map_limit = Some(limit);
        self.journal.info(&format!(
            "Server initialized: MapSize: {} / MapLimit set to {}",
            world_size,
            limit.value()
        ));
        limit
    }

    /// Host spawned an entity at simulation time `now`
    pub fn on_entity_spawned(&mut self, event: &SpawnEvent, now: f64) -> SpawnVerdict {
        let Some(limit) = self.map_limit else {
            return SpawnVerdict::NotReady;
        };
        // Claim before the kind filter so a tag never outlives its event
        if self.sequencer.claim_own_spawn(event.id) {
            log::debug!("Ignoring spawn of our own replacement {:?}", event.id);
            return SpawnVerdict::OwnReplacement;
        }
        if event.kind != EntityKind::Vessel {
            return SpawnVerdict::Ignored;
        }
        if self.sequencer.is_correcting(event.id) {
            return SpawnVerdict::AlreadyCorrecting;
        }

        match self.policy.check(limit, event.position) {
            BoundsCheck::Inside => {
                self.journal.info("Vessel spawned inside the livable area");
                self.journal.info(&format_position(event.position));
                SpawnVerdict::InBounds
            }
            BoundsCheck::Outside { corrected } => {
                self.journal.warn("Vessel spawned outside the livable area");
                self.journal.warn(&format_position(event.position));
                let correction = self.sequencer.begin(event.id, corrected, now);
                SpawnVerdict::Corrected(correction)
            }
        }
    }

    /// Host update loop: run due actions and journal what happened
    pub fn update(&mut self, host: &mut impl Host, now: f64) -> Vec<SequencerEvent> {
        let events = self.sequencer.tick(host, now);
        for event in &events {
            self.record(event);
        }
        events
    }

    /// Host is unloading the plugin
    pub fn unload(&mut self) {
        if self.sequencer.cancel_position_log() {
            log::debug!("Position reports cancelled on unload");
        }
    }

    fn record(&self, event: &SequencerEvent) {
        match event {
            SequencerEvent::Destroyed { entity, .. } => {
                log::debug!("Stray vessel {:?} destroyed", entity);
            }
            SequencerEvent::Respawned { position, .. } => {
                self.journal
                    .info(&format!("Standby vessel spawned: {}", format_position(*position)));
            }
            SequencerEvent::RespawnFailed { correction } => {
                log::debug!("Replacement for {:?} was not created", correction);
            }
            SequencerEvent::PositionReport { position, .. } => {
                self.journal
                    .info(&format!("Current position: {}", format_position(*position)));
            }
        }
    }

    pub fn map_limit(&self) -> Option<MapLimit> {
        self.map_limit
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn sequencer(&self) -> &RespawnSequencer {
        &self.sequencer
    }

    /// Where a vessel at `pos` would end up (unchanged if in bounds)
    pub fn corrected_position(&self, pos: Vec3) -> Option<Vec3> {
        self.map_limit
            .map(|limit| self.policy.check(limit, pos).resolve(pos))
    }
}
