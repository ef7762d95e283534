//! In-memory host used by the tests and the demo harness
//!
//! Behaves like the game server as far as the plugin can tell: entities get
//! sequential ids, `finalize_spawn` queues a spawn event, destroyed entities
//! stay in the table flagged as destroyed.

use std::collections::{BTreeMap, VecDeque};

use glam::{Quat, Vec3};

use super::host::{EntityId, EntityKind, Host, SpawnEvent};
use crate::consts::VESSEL_PREFAB;

/// A host-side entity record
#[derive(Debug, Clone, PartialEq)]
pub struct SimEntity {
    pub kind: EntityKind,
    pub position: Vec3,
    pub rotation: Quat,
    /// Spawned by a triggered event
    pub triggered: bool,
    /// Spawn finalized
    pub spawned: bool,
    pub destroyed: bool,
}

impl SimEntity {
    fn new(kind: EntityKind, position: Vec3) -> Self {
        Self {
            kind,
            position,
            rotation: Quat::IDENTITY,
            triggered: false,
            spawned: false,
            destroyed: false,
        }
    }
}

/// Host operations recorded in call order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    Create(Option<EntityId>),
    SetPositionAndRotation(EntityId),
    MarkTriggered(EntityId),
    FinalizeSpawn(EntityId),
    Destroy(EntityId),
}

#[derive(Debug, Clone)]
pub struct SimHost {
    world_size: u32,
    entities: BTreeMap<EntityId, SimEntity>,
    next_id: u64,
    events: VecDeque<SpawnEvent>,
    fail_creates: bool,
    calls: Vec<HostCall>,
}

impl SimHost {
    pub fn new(world_size: u32) -> Self {
        Self {
            world_size,
            entities: BTreeMap::new(),
            next_id: 1,
            events: VecDeque::new(),
            fail_creates: false,
            calls: Vec::new(),
        }
    }

    fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn an entity the way the map/event system would (fires an event)
    pub fn spawn_natural(&mut self, kind: EntityKind, position: Vec3) -> EntityId {
        let id = self.allocate();
        let mut entity = SimEntity::new(kind, position);
        entity.spawned = true;
        self.entities.insert(id, entity);
        self.events.push_back(SpawnEvent { id, kind, position });
        id
    }

    /// Make every following `create_entity` call fail
    pub fn set_fail_creates(&mut self, fail: bool) {
        self.fail_creates = fail;
    }

    /// Teleport an entity (simulates drift)
    pub fn move_entity(&mut self, id: EntityId, position: Vec3) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.position = position;
        }
    }

    pub fn entity(&self, id: EntityId) -> Option<&SimEntity> {
        self.entities.get(&id)
    }

    /// Take all spawn events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<SpawnEvent> {
        self.events.drain(..).collect()
    }

    /// Ids of vessels that are spawned and not destroyed
    pub fn live_vessels(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|(_, e)| e.kind == EntityKind::Vessel && e.spawned && !e.destroyed)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }
}

impl Host for SimHost {
    fn world_size(&self) -> u32 {
        self.world_size
    }

    fn create_entity(&mut self, prefab: &str) -> Option<EntityId> {
        if self.fail_creates {
            self.calls.push(HostCall::Create(None));
            return None;
        }
        let kind = if prefab == VESSEL_PREFAB {
            EntityKind::Vessel
        } else {
            EntityKind::Other
        };
        let id = self.allocate();
        self.entities.insert(id, SimEntity::new(kind, Vec3::ZERO));
        self.calls.push(HostCall::Create(Some(id)));
        Some(id)
    }

    fn set_position_and_rotation(&mut self, id: EntityId, position: Vec3, rotation: Quat) {
        self.calls.push(HostCall::SetPositionAndRotation(id));
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.position = position;
            entity.rotation = rotation;
        }
    }

    fn mark_triggered_spawn(&mut self, id: EntityId) {
        self.calls.push(HostCall::MarkTriggered(id));
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.triggered = true;
        }
    }

    fn finalize_spawn(&mut self, id: EntityId) {
        self.calls.push(HostCall::FinalizeSpawn(id));
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.spawned = true;
            self.events.push_back(SpawnEvent {
                id,
                kind: entity.kind,
                position: entity.position,
            });
        }
    }

    fn destroy(&mut self, id: EntityId) {
        self.calls.push(HostCall::Destroy(id));
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.destroyed = true;
        }
    }

    fn position(&self, id: EntityId) -> Option<Vec3> {
        self.entities
            .get(&id)
            .filter(|e| !e.destroyed)
            .map(|e| e.position)
    }

    fn is_destroyed(&self, id: EntityId) -> bool {
        self.entities.get(&id).is_none_or(|e| e.destroyed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_spawn_fires_event() {
        let mut host = SimHost::new(3000);
        let id = host.create_entity(VESSEL_PREFAB).unwrap();
        assert!(host.drain_events().is_empty());

        host.set_position_and_rotation(id, Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        host.finalize_spawn(id);
        assert_eq!(
            host.drain_events(),
            vec![SpawnEvent {
                id,
                kind: EntityKind::Vessel,
                position: Vec3::new(1.0, 2.0, 3.0),
            }]
        );
    }

    #[test]
    fn test_destroyed_entities() {
        let mut host = SimHost::new(3000);
        let id = host.spawn_natural(EntityKind::Vessel, Vec3::ZERO);
        assert_eq!(host.live_vessels(), vec![id]);

        host.destroy(id);
        assert!(host.is_destroyed(id));
        assert_eq!(host.position(id), None);
        assert!(host.live_vessels().is_empty());
        assert!(host.is_destroyed(EntityId(999)));
    }

    #[test]
    fn test_fail_creates() {
        let mut host = SimHost::new(3000);
        host.set_fail_creates(true);
        assert_eq!(host.create_entity(VESSEL_PREFAB), None);
        assert_eq!(host.calls(), &[HostCall::Create(None)]);
    }
}
