//! Host game-server interface
//!
//! Entities are owned by the host. The plugin only ever holds an `EntityId`
//! and asks the host to create, place or destroy things through `Host`.

use glam::{Quat, Vec3};

/// Opaque handle to a host-owned entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Entity categories the plugin distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// The large scripted vessel this plugin watches
    Vessel,
    /// Anything else the host spawns
    Other,
}

/// Fired by the host once per entity creation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnEvent {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec3,
}

/// Operations the plugin needs from the host server
pub trait Host {
    /// Configured world size (edge length of the generated map)
    fn world_size(&self) -> u32;

    /// Instantiate a prefab. Returns None if the host could not create it.
    fn create_entity(&mut self, prefab: &str) -> Option<EntityId>;

    fn set_position_and_rotation(&mut self, id: EntityId, position: Vec3, rotation: Quat);

    /// Flag the entity as spawned by a triggered event rather than the map
    fn mark_triggered_spawn(&mut self, id: EntityId);

    /// Complete the spawn; the host fires its spawn event from here
    fn finalize_spawn(&mut self, id: EntityId);

    fn destroy(&mut self, id: EntityId);

    /// Current position, None if the entity no longer exists
    fn position(&self, id: EntityId) -> Option<Vec3>;

    fn is_destroyed(&self, id: EntityId) -> bool;
}
