//! Target selector managing strategy selection and execution.
//!
//! Acts as the facade units hold on to: the strategy is chosen once at
//! configuration time and consulted whenever a unit needs a fresh target.

use tracing::debug;

use crate::config::ThreatWeights;
use crate::error::ConfigError;
use crate::session::BattleView;
use crate::targeting::{
    TargetingStrategy,
    strategies::{ClosestStrategy, LowestHealthStrategy, PriorityStrategy, ThreatBasedStrategy},
};
use crate::unit::{UnitId, UnitState};

pub struct TargetSelector {
    strategy: Box<dyn TargetingStrategy>,
}

impl TargetSelector {
    pub fn new(strategy: Box<dyn TargetingStrategy>) -> Self {
        Self { strategy }
    }

    /// Weighted-threat selection with default weights.
    pub fn with_default() -> Self {
        Self::new(Box::new(ThreatBasedStrategy::default()))
    }

    /// Create with a named strategy.
    ///
    /// # Supported Names
    ///
    /// - `"threat"` or `"threat-based"` - weighted threat scoring
    /// - `"closest"` or `"nearest"` - nearest enemy
    /// - `"priority"` - designated target, else nearest
    /// - `"lowest-health"` - lowest health percentage
    pub fn with_strategy_name(name: &str) -> Result<Self, ConfigError> {
        Self::from_name(name, ThreatWeights::default())
    }

    /// Like [`Self::with_strategy_name`], with explicit threat weights.
    pub fn from_name(name: &str, weights: ThreatWeights) -> Result<Self, ConfigError> {
        let strategy: Box<dyn TargetingStrategy> = match name {
            "threat" | "threat-based" => Box::new(ThreatBasedStrategy::with_weights(weights)),
            "closest" | "nearest" => Box::new(ClosestStrategy),
            "priority" => Box::new(PriorityStrategy::default()),
            "lowest-health" => Box::new(LowestHealthStrategy::default()),
            _ => return Err(ConfigError::UnknownStrategy(name.to_owned())),
        };
        Ok(Self::new(strategy))
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn TargetingStrategy>) {
        self.strategy = strategy;
    }

    /// Select among an explicit candidate list.
    pub fn select_from(
        &self,
        view: BattleView<'_>,
        actor: &UnitState,
        candidates: &[&UnitState],
    ) -> Option<UnitId> {
        self.strategy.select_target(view, actor, candidates)
    }

    /// Select among every living unit hostile to `actor`.
    pub fn select_target(&self, view: BattleView<'_>, actor: &UnitState) -> Option<UnitId> {
        let candidates: Vec<&UnitState> = view.session.hostiles_of(actor).collect();
        let chosen = self.select_from(view, actor, &candidates);
        debug!(
            unit = %actor.id,
            strategy = self.strategy.name(),
            candidates = candidates.len(),
            target = ?chosen,
            "target selected"
        );
        chosen
    }

    pub fn current_strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn current_strategy_description(&self) -> &'static str {
        self.strategy.description()
    }
}

impl Default for TargetSelector {
    fn default() -> Self {
        Self::with_default()
    }
}

impl std::fmt::Debug for TargetSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetSelector")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
