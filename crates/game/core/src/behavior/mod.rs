//! Behavior patterns: per-iteration action choice for a unit's turn.
//!
//! The turn controller hands a pattern the actions that are already
//! executable (within budget, under their use limit, CanExecute holds), in
//! the unit's priority order. The pattern picks one or declines.

mod prioritized;
mod sequential;

pub use prioritized::PrioritizedPattern;
pub use sequential::SequentialPattern;

use crate::action::{ActionId, ActionRules};
use crate::context::DecisionContext;

pub trait BehaviorPattern: Send + Sync {
    /// Returns `None` to end the turn.
    fn decide_action(
        &self,
        ctx: &DecisionContext<'_>,
        executable: &[&dyn ActionRules],
    ) -> Option<ActionId>;

    fn name(&self) -> &'static str;
}

/// Configuration-time choice of behavior pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BehaviorProfile {
    #[default]
    Prioritized,
    Sequential,
}

impl BehaviorProfile {
    pub fn into_pattern(self) -> Box<dyn BehaviorPattern> {
        match self {
            BehaviorProfile::Prioritized => Box::new(PrioritizedPattern),
            BehaviorProfile::Sequential => Box::new(SequentialPattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, ActionSpec};
    use crate::grid::GridPosition;
    use crate::testing::Fixture;
    use crate::unit::{Faction, UnitId, UnitState};

    fn p(x: i32, y: i32) -> GridPosition {
        GridPosition::new(x, y)
    }

    fn spec(id: u32, kind: ActionKind) -> ActionSpec {
        ActionSpec::new(ActionId(id), kind, 1)
    }

    fn decide(fixture: &Fixture, specs: &[ActionSpec]) -> Option<ActionId> {
        let executable: Vec<&dyn ActionRules> = specs.iter().map(|s| s as &dyn ActionRules).collect();
        PrioritizedPattern.decide_action(&fixture.ctx(1), &executable)
    }

    fn open_field() -> Fixture {
        Fixture::new(6, 6)
            .unit(UnitState::new(UnitId(1), Faction::Hero, p(0, 0)).with_target(UnitId(2)))
            .unit(UnitState::new(UnitId(2), Faction::Enemy, p(0, 5)))
    }

    fn walled_in() -> Fixture {
        let mut fixture = Fixture::new(1, 6)
            .unit(UnitState::new(UnitId(1), Faction::Hero, p(0, 0)).with_target(UnitId(2)))
            .unit(UnitState::new(UnitId(2), Faction::Enemy, p(0, 5)));
        fixture.grid.set_passable(p(0, 1), false).unwrap();
        fixture
    }

    #[test]
    fn free_unit_skips_bypass_actions() {
        let specs = [
            spec(1, ActionKind::Jump),
            spec(2, ActionKind::MoveTowardTarget),
            spec(3, ActionKind::Attack),
        ];
        assert_eq!(decide(&open_field(), &specs), Some(ActionId(2)));
    }

    #[test]
    fn blocked_unit_prefers_bypass() {
        let specs = [
            spec(1, ActionKind::MoveTowardTarget),
            spec(2, ActionKind::Defend),
            spec(3, ActionKind::BuildBridge),
        ];
        assert_eq!(decide(&walled_in(), &specs), Some(ActionId(3)));
    }

    #[test]
    fn blocked_without_bypass_skips_default_move() {
        let specs = [
            spec(1, ActionKind::MoveTowardTarget),
            spec(2, ActionKind::Defend),
        ];
        assert_eq!(decide(&walled_in(), &specs), Some(ActionId(2)));
        assert_eq!(decide(&walled_in(), &specs[..1]), None);
    }

    #[test]
    fn no_target_counts_as_no_move() {
        let fixture = Fixture::new(4, 4).unit(UnitState::new(UnitId(1), Faction::Hero, p(0, 0)));
        let specs = [spec(1, ActionKind::Attack), spec(2, ActionKind::LateralShuffle)];
        assert_eq!(decide(&fixture, &specs), Some(ActionId(2)));
    }

    #[test]
    fn empty_list_declines() {
        assert_eq!(decide(&open_field(), &[]), None);
    }

    #[test]
    fn sequential_takes_first() {
        let fixture = walled_in();
        let specs = [spec(7, ActionKind::MoveTowardTarget), spec(8, ActionKind::Jump)];
        let executable: Vec<&dyn ActionRules> = specs.iter().map(|s| s as &dyn ActionRules).collect();
        assert_eq!(
            SequentialPattern.decide_action(&fixture.ctx(1), &executable),
            Some(ActionId(7))
        );
    }

    #[test]
    fn profile_builds_pattern() {
        let profile: BehaviorProfile = "Sequential".parse().unwrap();
        assert_eq!(profile.into_pattern().name(), "sequential");
        assert_eq!(BehaviorProfile::default().into_pattern().name(), "prioritized");
    }
}
