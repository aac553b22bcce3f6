//! Trigger library.
//!
//! A trigger is a pure predicate over the decision context. Triggers are
//! evaluated fresh on every check and never cache; the only side effect is
//! consuming a roll for [`Trigger::RandomChance`]. Composite variants let
//! configuration express compound conditions without code.

mod conditions;

pub use conditions::{AmmoCondition, Bound, Comparison, PropFilter, Subject, TurnCondition};

use tracing::trace;

use crate::context::DecisionContext;
use crate::error::ConfigError;
use crate::grid::CellState;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Trigger {
    /// Number of living allies within `radius` compared to `count`.
    AlliesWithinRadius {
        radius: u32,
        comparison: Comparison,
        count: u32,
    },
    /// State of the actor's named weapon mode. Missing weapon never holds.
    AmmoState {
        weapon: String,
        condition: AmmoCondition,
    },
    /// The actor can neither advance toward nor melee its target.
    Blocked,
    /// Uniform roll below `percent`.
    RandomChance { percent: u32 },
    /// Footprint-aware distance to the target compared to `distance`.
    DistanceToTarget {
        comparison: Comparison,
        distance: u32,
    },
    DamagedThisTurn,
    /// Damaged this turn, and that damage was the first the actor ever took.
    FirstDamageTaken,
    HealthThreshold {
        #[cfg_attr(feature = "serde", serde(default))]
        subject: Subject,
        bound: Bound,
        percent: u32,
    },
    /// The actor is the only living unit of its faction.
    LastOfFaction,
    /// A prop matching `filter` lies within `radius`.
    NearProp {
        radius: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        filter: PropFilter,
    },
    /// Any cell the subject occupies is in `state`.
    StandingOn {
        #[cfg_attr(feature = "serde", serde(default))]
        subject: Subject,
        state: CellState,
    },
    /// Named boolean flag equals `expected`. A missing flag reads as false.
    Flag {
        #[cfg_attr(feature = "serde", serde(default))]
        subject: Subject,
        name: String,
        expected: bool,
    },
    Turn { condition: TurnCondition },
    All { triggers: Vec<Trigger> },
    Any { triggers: Vec<Trigger> },
    Not { trigger: Box<Trigger> },
}

impl Trigger {
    pub fn not(trigger: Trigger) -> Self {
        Trigger::Not {
            trigger: Box::new(trigger),
        }
    }

    pub fn is_triggered(&self, ctx: &DecisionContext<'_>) -> bool {
        let actor = ctx.actor;
        let result = match self {
            Trigger::AlliesWithinRadius {
                radius,
                comparison,
                count,
            } => {
                let nearby = ctx
                    .view
                    .session
                    .allies_of(actor)
                    .filter(|ally| actor.distance_to(ally) <= *radius)
                    .count() as u32;
                comparison.holds(nearby, *count)
            }
            Trigger::AmmoState { weapon, condition } => {
                actor.weapon(weapon).is_some_and(|mode| match condition {
                    AmmoCondition::Full => {
                        mode.uses_ammo() && mode.ammo.current == mode.ammo.maximum
                    }
                    AmmoCondition::Empty => mode.uses_ammo() && mode.ammo.current == 0,
                    AmmoCondition::BelowPercent(percent) => {
                        mode.uses_ammo() && mode.ammo.percent() < *percent
                    }
                })
            }
            Trigger::Blocked => {
                ctx.target().is_some() && !ctx.can_advance() && !ctx.can_melee_target()
            }
            Trigger::RandomChance { percent } => ctx.roll_percent() < *percent,
            Trigger::DistanceToTarget {
                comparison,
                distance,
            } => ctx
                .target()
                .is_some_and(|target| comparison.holds(actor.distance_to(target), *distance)),
            Trigger::DamagedThisTurn => actor.damaged_this_turn,
            Trigger::FirstDamageTaken => actor.damaged_this_turn && actor.damage_events == 1,
            Trigger::HealthThreshold {
                subject,
                bound,
                percent,
            } => subject.resolve(ctx).is_some_and(|unit| {
                let health = unit.health.percent();
                match bound {
                    Bound::Above => health > *percent,
                    Bound::Below => health < *percent,
                }
            }),
            Trigger::LastOfFaction => {
                actor.is_alive() && ctx.view.session.allies_of(actor).next().is_none()
            }
            Trigger::NearProp { radius, filter } => ctx
                .view
                .session
                .props()
                .filter(|prop| filter.accepts(prop.destructible))
                .any(|prop| actor.distance_to_prop(prop) <= *radius),
            Trigger::StandingOn { subject, state } => subject.resolve(ctx).is_some_and(|unit| {
                unit.footprint
                    .cells(unit.position)
                    .filter_map(|position| ctx.view.grid.cell(position))
                    .any(|cell| cell.state() == *state)
            }),
            Trigger::Flag {
                subject,
                name,
                expected,
            } => subject
                .resolve(ctx)
                .is_some_and(|unit| unit.flag(name).unwrap_or(false) == *expected),
            Trigger::Turn { condition } => condition.holds(ctx.turn()),
            Trigger::All { triggers } => triggers.iter().all(|t| t.is_triggered(ctx)),
            Trigger::Any { triggers } => triggers.iter().any(|t| t.is_triggered(ctx)),
            Trigger::Not { trigger } => !trigger.is_triggered(ctx),
        };
        trace!(unit = %actor.id, trigger = ?self, result, "trigger evaluated");
        result
    }

    /// Rejects parameter values that can never be meaningful.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Trigger::RandomChance { percent } if *percent > 100 => {
                Err(ConfigError::InvalidPercent(*percent))
            }
            Trigger::AmmoState {
                condition: AmmoCondition::BelowPercent(percent),
                ..
            } if *percent > 100 => Err(ConfigError::InvalidPercent(*percent)),
            Trigger::HealthThreshold { percent, .. } if *percent > 100 => {
                Err(ConfigError::InvalidPercent(*percent))
            }
            Trigger::All { triggers } | Trigger::Any { triggers } => {
                triggers.iter().try_for_each(Trigger::validate)
            }
            Trigger::Not { trigger } => trigger.validate(),
            _ => Ok(()),
        }
    }
}
