//! Deterministic tactical decision and movement core.
//!
//! `tactics-core` decides where a unit can move, which enemy it engages, and
//! which action it takes next. Everything here is synchronous and pure over a
//! [`BattleView`]: the grid and roster are passed in, never looked up
//! globally. The asynchronous turn loop lives in `tactics-runtime`.
pub mod action;
pub mod behavior;
pub mod config;
pub mod context;
pub mod error;
pub mod grid;
pub mod pathfinding;
pub mod planner;
pub mod rng;
pub mod session;
pub mod targeting;
pub mod trigger;
pub mod unit;

#[cfg(test)]
mod testing;

pub use action::{ActionId, ActionKind, ActionRules, ActionSpec};
pub use behavior::{BehaviorPattern, BehaviorProfile, PrioritizedPattern, SequentialPattern};
pub use config::{PathfinderConfig, TacticsConfig, ThreatWeights};
pub use context::DecisionContext;
pub use error::{ConfigError, ErrorSeverity, GridError, PathError, TacticsError};
pub use grid::{
    Cell, CellState, Footprint, GridDimensions, GridMap, GridModel, GridPosition, Occupant,
    footprint_distance,
};
pub use pathfinding::{PathResult, Pathfinder, Route};
pub use planner::{MovePlanner, PathMovePlanner, is_exclusive};
pub use rng::{PcgRng, RollSource, compute_seed};
pub use session::{BattleSession, BattleView};
pub use targeting::{TargetSelector, TargetingStrategy};
pub use trigger::Trigger;
pub use unit::{
    Faction, PropId, PropState, ResourceMeter, UnitId, UnitState, WeaponKind, WeaponMode,
};
