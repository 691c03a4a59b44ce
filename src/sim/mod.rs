//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod ai;
pub mod arena;
pub mod autopilot;
pub mod input;
pub mod physics;
pub mod play;
pub mod session;
pub mod state;
pub mod tick;
pub mod timers;

pub use arena::{Arena, EntityId};
pub use input::{MoveCommand, MoveSource, TickInput, VirtualJoystick, map_movement};
pub use physics::{Body, CollisionResult, box_collision};
pub use play::{PlayScene, StepOutcome};
pub use session::{Scene, Session};
pub use state::{
    Bullet, Enemy, FuelPickup, GameEvent, Mission, MissionKind, Player, PlayerStats, SceneKind,
};
pub use tick::tick;
pub use timers::{Scheduler, TaskId, TaskKind};
