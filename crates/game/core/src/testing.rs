//! Battlefield fixture shared by unit tests.

use crate::context::DecisionContext;
use crate::grid::GridMap;
use crate::planner::PathMovePlanner;
use crate::rng::RollSource;
use crate::session::{BattleSession, BattleView};
use crate::unit::{PropState, UnitId, UnitState};

pub(crate) struct Fixture {
    pub grid: GridMap,
    pub session: BattleSession,
    pub planner: PathMovePlanner,
    pub rolls: RollSource,
}

impl Fixture {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid: GridMap::new(width, height),
            session: BattleSession::new(0),
            planner: PathMovePlanner::default(),
            rolls: RollSource::new(0, 0, UnitId(0)),
        }
    }

    pub fn unit(mut self, unit: UnitState) -> Self {
        self.grid
            .place_unit(unit.id, unit.position, unit.footprint)
            .unwrap();
        self.session.add_unit(unit);
        self
    }

    pub fn prop(mut self, prop: PropState) -> Self {
        self.grid
            .place_prop(prop.id, prop.position, prop.footprint)
            .unwrap();
        self.session.add_prop(prop);
        self
    }

    pub fn view(&self) -> BattleView<'_> {
        BattleView::new(&self.grid, &self.session)
    }

    pub fn ctx(&self, actor: u32) -> DecisionContext<'_> {
        let actor = self.session.unit(UnitId(actor)).unwrap();
        DecisionContext::new(self.view(), actor, &self.planner, &self.rolls)
    }
}
