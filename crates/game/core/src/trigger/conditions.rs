//! Parameter types shared by trigger variants.

use crate::context::DecisionContext;
use crate::unit::UnitState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Comparison {
    LessThan,
    GreaterThan,
    Equal,
    AtLeast,
    AtMost,
}

impl Comparison {
    #[inline]
    pub fn holds(self, lhs: u32, rhs: u32) -> bool {
        match self {
            Comparison::LessThan => lhs < rhs,
            Comparison::GreaterThan => lhs > rhs,
            Comparison::Equal => lhs == rhs,
            Comparison::AtLeast => lhs >= rhs,
            Comparison::AtMost => lhs <= rhs,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AmmoCondition {
    Full,
    Empty,
    /// Magazine strictly below this percentage of capacity.
    BelowPercent(u32),
}

/// Whose state a trigger inspects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Subject {
    #[default]
    Actor,
    Target,
}

impl Subject {
    /// Resolves the subject; `None` if it is the target and there is none.
    pub fn resolve<'a>(self, ctx: &DecisionContext<'a>) -> Option<&'a UnitState> {
        match self {
            Subject::Actor => Some(ctx.actor),
            Subject::Target => ctx.target(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Bound {
    Above,
    Below,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PropFilter {
    #[default]
    Any,
    Destructible,
    Indestructible,
}

impl PropFilter {
    pub fn accepts(self, destructible: bool) -> bool {
        match self {
            PropFilter::Any => true,
            PropFilter::Destructible => destructible,
            PropFilter::Indestructible => !destructible,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TurnCondition {
    /// Every Nth turn (turn 0 excluded). `Every(0)` never holds.
    Every(u32),
    Exactly(u32),
    /// Strictly after turn N.
    After(u32),
}

impl TurnCondition {
    pub fn holds(self, turn: u32) -> bool {
        match self {
            TurnCondition::Every(0) => false,
            TurnCondition::Every(n) => turn > 0 && turn % n == 0,
            TurnCondition::Exactly(n) => turn == n,
            TurnCondition::After(n) => turn > n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparisons() {
        assert!(Comparison::LessThan.holds(1, 2));
        assert!(!Comparison::LessThan.holds(2, 2));
        assert!(Comparison::AtMost.holds(2, 2));
        assert!(Comparison::AtLeast.holds(3, 2));
        assert!(Comparison::Equal.holds(0, 0));
    }

    #[test]
    fn turn_conditions() {
        assert!(TurnCondition::Every(3).holds(6));
        assert!(!TurnCondition::Every(3).holds(0));
        assert!(!TurnCondition::Every(0).holds(4));
        assert!(TurnCondition::Exactly(2).holds(2));
        assert!(!TurnCondition::After(2).holds(2));
        assert!(TurnCondition::After(2).holds(3));
    }
}
