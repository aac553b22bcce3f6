//! Common helpers for targeting strategies.

use crate::unit::UnitState;

/// Live candidates in their original order.
pub fn living<'a, 'b>(candidates: &'b [&'a UnitState]) -> impl Iterator<Item = &'a UnitState> + 'b {
    candidates.iter().copied().filter(|unit| unit.is_alive())
}

/// Hits of `damage` needed to bring `health` to zero. `None` if the damage
/// is zero.
pub fn hits_to_kill(health: u32, damage: u32) -> Option<u32> {
    if damage == 0 {
        return None;
    }
    Some(health.div_ceil(damage).max(1))
}
