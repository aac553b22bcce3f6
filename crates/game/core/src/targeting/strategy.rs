//! Targeting strategy trait.

use crate::session::BattleView;
use crate::unit::{UnitId, UnitState};

/// Picks which enemy a unit should engage.
///
/// Implementations must be deterministic: ties resolve to the earliest
/// candidate in the slice. Dead candidates are never selected.
pub trait TargetingStrategy: Send + Sync {
    /// Returns `None` if no live candidate exists.
    fn select_target(
        &self,
        view: BattleView<'_>,
        actor: &UnitState,
        candidates: &[&UnitState],
    ) -> Option<UnitId>;

    /// Strategy name for debugging and logging.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        "No description available"
    }
}
