use crate::error::ConfigError;

/// Search caps for the pathfinder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfinderConfig {
    /// Node expansions allowed in the primary search.
    pub max_iterations: u32,
    /// Node expansions allowed in each fallback sub-search.
    pub fallback_iterations: u32,
    /// Largest Chebyshev ring scanned around the target during fallback.
    pub fallback_radius: u32,
    /// Parent-chain steps followed before reconstruction gives up.
    pub max_path_length: usize,
}

impl PathfinderConfig {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 5000;
    pub const DEFAULT_FALLBACK_ITERATIONS: u32 = 2000;
    pub const DEFAULT_FALLBACK_RADIUS: u32 = 8;
    pub const DEFAULT_MAX_PATH_LENGTH: usize = 1000;

    pub const fn new() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            fallback_iterations: Self::DEFAULT_FALLBACK_ITERATIONS,
            fallback_radius: Self::DEFAULT_FALLBACK_RADIUS,
            max_path_length: Self::DEFAULT_MAX_PATH_LENGTH,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroCap("pathfinder.max_iterations"));
        }
        if self.fallback_iterations == 0 {
            return Err(ConfigError::ZeroCap("pathfinder.fallback_iterations"));
        }
        if self.max_path_length == 0 {
            return Err(ConfigError::ZeroCap("pathfinder.max_path_length"));
        }
        Ok(())
    }
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Score weights for the weighted-threat targeting strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThreatWeights {
    /// Melee threat already within striking range of its goal.
    pub melee_in_range: f32,
    /// Ranged threat lining up a shot.
    pub aiming: f32,
    /// Ranged threat within attack distance of its goal.
    pub ranged_in_range: f32,
    /// Per cell advanced from the spawn position.
    pub advance_per_cell: f32,
    /// Scaled by the candidate's missing health fraction.
    pub missing_health: f32,
    /// Per point of the candidate's strongest attack damage.
    pub per_damage: f32,
    /// Divided by the number of hits the actor needs to kill the candidate.
    pub killability: f32,
}

impl ThreatWeights {
    pub const DEFAULT_MELEE_IN_RANGE: f32 = 1000.0;
    pub const DEFAULT_AIMING: f32 = 600.0;
    pub const DEFAULT_RANGED_IN_RANGE: f32 = 300.0;
    pub const DEFAULT_ADVANCE_PER_CELL: f32 = 10.0;
    pub const DEFAULT_MISSING_HEALTH: f32 = 200.0;
    pub const DEFAULT_PER_DAMAGE: f32 = 1.0;
    pub const DEFAULT_KILLABILITY: f32 = 150.0;
}

impl Default for ThreatWeights {
    fn default() -> Self {
        Self {
            melee_in_range: Self::DEFAULT_MELEE_IN_RANGE,
            aiming: Self::DEFAULT_AIMING,
            ranged_in_range: Self::DEFAULT_RANGED_IN_RANGE,
            advance_per_cell: Self::DEFAULT_ADVANCE_PER_CELL,
            missing_health: Self::DEFAULT_MISSING_HEALTH,
            per_damage: Self::DEFAULT_PER_DAMAGE,
            killability: Self::DEFAULT_KILLABILITY,
        }
    }
}

/// Top-level tunables for the decision core.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TacticsConfig {
    pub pathfinder: PathfinderConfig,
    pub threat: ThreatWeights,
}

impl TacticsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pathfinder.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TacticsConfig::default();
        assert_eq!(config.pathfinder.max_iterations, 5000);
        assert_eq!(config.pathfinder.fallback_radius, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_cap_is_rejected() {
        let mut config = TacticsConfig::default();
        config.pathfinder.fallback_iterations = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroCap("pathfinder.fallback_iterations"))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_fills_defaults() {
        let config: TacticsConfig =
            serde_json::from_str(r#"{ "pathfinder": { "max_iterations": 50 } }"#).unwrap();
        assert_eq!(config.pathfinder.max_iterations, 50);
        assert_eq!(config.pathfinder.fallback_iterations, 2000);
        assert_eq!(config.threat, ThreatWeights::default());
    }
}
