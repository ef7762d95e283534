//! Deterministic correction core
//!
//! Everything that decides and sequences a vessel correction lives here:
//! - Pure bounds math (no host access)
//! - Explicit simulation time passed in by the caller
//! - Host access only through the `Host` trait

pub mod bounds;
pub mod host;
pub mod state;
pub mod tick;
pub mod timer;
pub mod world;

pub use bounds::{BoundsCheck, ClampPolicy, InwardClampPolicy, MapLimit, ToleranceSnapPolicy};
pub use host::{EntityId, EntityKind, Host, SpawnEvent};
pub use state::{Correction, CorrectionId, CorrectionPhase, SequencerAction, SequencerEvent};
pub use tick::RespawnSequencer;
pub use timer::{TimerHandle, TimerQueue};
pub use world::{HostCall, SimEntity, SimHost};
