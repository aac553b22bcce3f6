//! Asynchronous turn orchestration for the tactical decision core.
//!
//! This crate runs unit turns over a shared battle: it spends action points,
//! asks a behavior pattern for the next action, awaits the action (or the
//! actor's death), and publishes what happened on a topic-based event bus.
//! Consumers embed [`BattleFlow`] to drive rounds, or use [`TurnController`]
//! directly for single turns.
//!
//! Modules are organized by responsibility:
//! - [`flow`] hosts the orchestrator and builder
//! - [`turn`] runs one unit's turn
//! - [`api`] exposes the action trait and error types
//! - [`actions`] provides movement and attack actions
//! - [`events`] provides the topic-based event bus
//! - [`state`] holds the shared battle and per-unit loadouts
pub mod actions;
pub mod api;
pub mod budget;
pub mod events;
pub mod flow;
pub mod state;
pub mod turn;

pub use actions::{AttackAction, MoveTowardTarget};
pub use api::{Action, ActionOutcome, Result, RuntimeError};
pub use budget::ActionBudget;
pub use events::{ActionEvent, Event, EventBus, Topic, TurnEvent};
pub use flow::{BattleFlow, BattleFlowBuilder, RuntimeConfig};
pub use state::{BattleState, SharedBattle, UnitLoadout};
pub use turn::{TurnController, TurnEnd, TurnReport};
