//! Battle orchestrator.
//!
//! [`BattleFlow`] owns the shared battle, the turn controller, and the event
//! bus, and drives rounds: every living registered unit takes one turn, in
//! registration order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use tactics_core::{BattleSession, ConfigError, Faction, GridMap, TacticsConfig, UnitId};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::state::{BattleState, SharedBattle, UnitLoadout};
use crate::turn::{TurnController, TurnReport};

/// Runtime configuration shared by the orchestrator and the turn controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub tactics: TacticsConfig,
    pub event_buffer_size: usize,
    /// Upper bound on actions started in one turn, so zero-cost actions
    /// cannot spin forever.
    pub max_actions_per_turn: u32,
}

impl RuntimeConfig {
    pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;
    pub const DEFAULT_MAX_ACTIONS_PER_TURN: u32 = 64;

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.tactics.validate()?;
        if self.event_buffer_size == 0 {
            return Err(ConfigError::ZeroCap("runtime.event_buffer_size"));
        }
        if self.max_actions_per_turn == 0 {
            return Err(ConfigError::ZeroCap("runtime.max_actions_per_turn"));
        }
        Ok(())
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tactics: TacticsConfig::default(),
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER_SIZE,
            max_actions_per_turn: Self::DEFAULT_MAX_ACTIONS_PER_TURN,
        }
    }
}

pub struct BattleFlow {
    controller: TurnController,
    order: Vec<UnitId>,
    events: EventBus,
}

impl BattleFlow {
    pub fn builder() -> BattleFlowBuilder {
        BattleFlowBuilder::new()
    }

    pub fn battle(&self) -> &SharedBattle {
        self.controller.battle()
    }

    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    pub fn action_points(&self) -> watch::Receiver<u32> {
        self.controller.action_points()
    }

    /// Runs a single unit's turn.
    pub async fn execute_turn(&self, unit: UnitId) -> TurnReport {
        self.controller.execute_turn(unit).await
    }

    /// Advances the battle turn counter, then gives every living registered
    /// unit one turn. Units killed earlier in the round are skipped.
    pub async fn run_round(&self) -> Vec<TurnReport> {
        let turn = self.battle().write().await.session.begin_turn();
        debug!(turn, units = self.order.len(), "round started");

        let mut reports = Vec::with_capacity(self.order.len());
        for &unit in &self.order {
            if !self.battle().read().await.is_alive(unit) {
                continue;
            }
            reports.push(self.controller.execute_turn(unit).await);
        }
        reports
    }

    /// Plays rounds until at most one faction has living units left, or
    /// `max_rounds` is reached. Returns the last faction standing, if any.
    pub async fn run_until_victory(&self, max_rounds: u32) -> Option<Faction> {
        for round in 0..max_rounds {
            let standing = self.standing_factions().await;
            if standing.len() <= 1 {
                let winner = standing.into_iter().next();
                info!(round, winner = ?winner, "battle decided");
                return winner;
            }
            self.run_round().await;
        }
        let standing = self.standing_factions().await;
        info!(max_rounds, factions = standing.len(), "round limit reached");
        match standing.len() {
            1 => standing.into_iter().next(),
            _ => None,
        }
    }

    async fn standing_factions(&self) -> HashSet<Faction> {
        let state = self.battle().read().await;
        state
            .session
            .units()
            .filter(|u| u.is_alive())
            .map(|u| u.faction)
            .collect()
    }
}

/// Builder for [`BattleFlow`].
pub struct BattleFlowBuilder {
    config: RuntimeConfig,
    grid: Option<GridMap>,
    session: Option<BattleSession>,
    loadouts: Vec<(UnitId, UnitLoadout)>,
}

impl BattleFlowBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            grid: None,
            session: None,
            loadouts: Vec::new(),
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Empty map. Units and props are placed from the session on build.
    pub fn grid(mut self, grid: GridMap) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn session(mut self, session: BattleSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Registers a unit's loadout. Units take turns in registration order.
    pub fn unit(mut self, unit: UnitId, loadout: UnitLoadout) -> Self {
        self.loadouts.push((unit, loadout));
        self
    }

    pub fn build(self) -> Result<BattleFlow> {
        self.config.validate()?;
        let grid = self.grid.ok_or(RuntimeError::MissingGrid)?;
        let session = self.session.ok_or(RuntimeError::MissingSession)?;
        let battle = BattleState::deploy(grid, session)?;

        let events = EventBus::with_capacity(self.config.event_buffer_size);
        let mut order = Vec::with_capacity(self.loadouts.len());
        for (unit, _) in &self.loadouts {
            if battle.session.unit(*unit).is_none() {
                return Err(RuntimeError::UnknownUnit(*unit));
            }
        }

        let mut controller = TurnController::new(battle.into_shared(), &self.config, events.clone());
        for (unit, loadout) in self.loadouts {
            controller.register(unit, loadout)?;
            order.push(unit);
        }

        Ok(BattleFlow {
            controller,
            order,
            events,
        })
    }
}
