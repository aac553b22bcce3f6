//! Targeting profiles: pure functions choosing which enemy a unit engages.

pub mod strategies;
mod selector;
mod strategy;
pub mod utils;

pub use selector::TargetSelector;
pub use strategies::{ClosestStrategy, LowestHealthStrategy, PriorityStrategy, ThreatBasedStrategy};
pub use strategy::TargetingStrategy;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::grid::GridPosition;
    use crate::testing::Fixture;
    use crate::unit::{Faction, UnitId, UnitState, WeaponMode};

    fn p(x: i32, y: i32) -> GridPosition {
        GridPosition::new(x, y)
    }

    fn enemy(id: u32, at: GridPosition) -> UnitState {
        UnitState::new(UnitId(id), Faction::Enemy, at)
    }

    fn candidates<'a>(fixture: &'a Fixture, ids: &[u32]) -> Vec<&'a UnitState> {
        ids.iter()
            .map(|id| fixture.session.unit(UnitId(*id)).unwrap())
            .collect()
    }

    #[test]
    fn closest_breaks_ties_by_order() {
        let fixture = Fixture::new(8, 8)
            .unit(UnitState::new(UnitId(1), Faction::Hero, p(3, 3)))
            .unit(enemy(2, p(3, 6)))
            .unit(enemy(3, p(6, 3)))
            .unit(enemy(4, p(3, 1)));
        let actor = fixture.session.unit(UnitId(1)).unwrap();

        let picked = ClosestStrategy.select_target(fixture.view(), actor, &candidates(&fixture, &[2, 3]));
        assert_eq!(picked, Some(UnitId(2)));
        let picked = ClosestStrategy.select_target(fixture.view(), actor, &candidates(&fixture, &[2, 3, 4]));
        assert_eq!(picked, Some(UnitId(4)));
    }

    #[test]
    fn dead_or_missing_candidates_yield_none() {
        let mut dead = enemy(2, p(1, 1));
        dead.alive = false;
        let fixture = Fixture::new(4, 4)
            .unit(UnitState::new(UnitId(1), Faction::Hero, p(0, 0)))
            .unit(dead);
        let actor = fixture.session.unit(UnitId(1)).unwrap();
        let selector = TargetSelector::default();

        assert_eq!(selector.select_from(fixture.view(), actor, &[]), None);
        assert_eq!(
            selector.select_from(fixture.view(), actor, &candidates(&fixture, &[2])),
            None
        );
        assert_eq!(selector.select_target(fixture.view(), actor), None);
    }

    #[test]
    fn priority_sticks_to_designated_target() {
        let fixture = Fixture::new(8, 8)
            .unit(UnitState::new(UnitId(1), Faction::Hero, p(0, 0)).with_target(UnitId(3)))
            .unit(enemy(2, p(1, 0)))
            .unit(enemy(3, p(7, 7)));
        let actor = fixture.session.unit(UnitId(1)).unwrap();
        let all = candidates(&fixture, &[2, 3]);

        assert_eq!(
            PriorityStrategy::default().select_target(fixture.view(), actor, &all),
            Some(UnitId(3))
        );
        assert_eq!(
            PriorityStrategy::with_priority(UnitId(9)).select_target(fixture.view(), actor, &all),
            Some(UnitId(2))
        );
    }

    #[test]
    fn lowest_health_prefers_wounded() {
        let fixture = Fixture::new(8, 8)
            .unit(UnitState::new(UnitId(1), Faction::Hero, p(0, 0)))
            .unit(enemy(2, p(1, 0)).with_health(80, 100))
            .unit(enemy(3, p(7, 7)).with_health(10, 50));
        let actor = fixture.session.unit(UnitId(1)).unwrap();
        let all = candidates(&fixture, &[2, 3]);

        assert_eq!(
            LowestHealthStrategy::default().select_target(fixture.view(), actor, &all),
            Some(UnitId(3))
        );
        assert_eq!(
            LowestHealthStrategy::with_max_distance(3).select_target(fixture.view(), actor, &all),
            Some(UnitId(2))
        );
    }

    #[test]
    fn melee_in_range_outranks_ranged_in_range() {
        let fixture = Fixture::new(10, 10)
            .unit(
                UnitState::new(UnitId(1), Faction::Hero, p(0, 0))
                    .with_weapon(WeaponMode::melee("sword", 10)),
            )
            .unit(UnitState::new(UnitId(2), Faction::Hero, p(5, 0)))
            .unit(
                enemy(3, p(5, 4))
                    .with_weapon(WeaponMode::ranged("bow", 10, 6, 8))
                    .with_target(UnitId(2)),
            )
            .unit(
                enemy(4, p(5, 1))
                    .with_weapon(WeaponMode::melee("axe", 10))
                    .with_target(UnitId(2)),
            );
        let actor = fixture.session.unit(UnitId(1)).unwrap();
        let strategy = ThreatBasedStrategy::default();

        let ranged = fixture.session.unit(UnitId(3)).unwrap();
        let melee = fixture.session.unit(UnitId(4)).unwrap();
        assert!(strategy.score(fixture.view(), actor, melee) > strategy.score(fixture.view(), actor, ranged));
        assert_eq!(
            strategy.select_target(fixture.view(), actor, &candidates(&fixture, &[3, 4])),
            Some(UnitId(4))
        );
    }

    #[test]
    fn aiming_outranks_merely_in_range() {
        let fixture = Fixture::new(10, 10)
            .unit(UnitState::new(UnitId(1), Faction::Hero, p(0, 0)))
            .unit(enemy(2, p(0, 5)).with_weapon(WeaponMode::ranged("bow", 5, 6, 8)))
            .unit(
                enemy(3, p(9, 9))
                    .with_weapon(WeaponMode::ranged("bow", 5, 6, 8))
                    .aiming(true),
            );
        let actor = fixture.session.unit(UnitId(1)).unwrap();

        assert_eq!(
            ThreatBasedStrategy::default().select_target(fixture.view(), actor, &candidates(&fixture, &[2, 3])),
            Some(UnitId(3))
        );
    }

    #[test]
    fn selector_by_name() {
        let selector = TargetSelector::with_strategy_name("closest").unwrap();
        assert_eq!(selector.current_strategy_name(), "Closest");
        assert_eq!(
            TargetSelector::with_strategy_name("threat").unwrap().current_strategy_name(),
            "Threat-Based"
        );
        assert!(matches!(
            TargetSelector::with_strategy_name("random"),
            Err(ConfigError::UnknownStrategy(name)) if name == "random"
        ));
    }
}
