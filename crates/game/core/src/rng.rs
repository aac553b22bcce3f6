//! Deterministic randomness for chance-based triggers.
//!
//! Every roll is derived from the battle seed plus the context it is made in,
//! so replaying a battle with the same seed replays the same decisions.

use std::cell::Cell;

use crate::unit::UnitId;

/// PCG-XSH-RR: 64-bit LCG state, 32-bit permuted output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }

    /// Uniform roll in `0..100`.
    pub fn percent(&self, seed: u64) -> u32 {
        self.next_u32(seed) % 100
    }
}

/// Mixes the battle seed with the roll context into a single PCG seed.
pub fn compute_seed(battle_seed: u64, turn: u32, actor: UnitId, roll: u32) -> u64 {
    let mut hash = battle_seed;
    hash ^= (turn as u64).wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor.0 as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (roll as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

/// Per-decision roll source. Each call consumes one slot of the counter, so
/// two chance triggers checked in the same decision get independent rolls.
#[derive(Debug)]
pub struct RollSource {
    battle_seed: u64,
    turn: u32,
    actor: UnitId,
    counter: Cell<u32>,
}

impl RollSource {
    pub fn new(battle_seed: u64, turn: u32, actor: UnitId) -> Self {
        Self {
            battle_seed,
            turn,
            actor,
            counter: Cell::new(0),
        }
    }

    /// Starts counting at `offset`, used to keep rolls distinct across the
    /// iterations of one turn.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.counter = Cell::new(offset);
        self
    }

    pub fn roll_percent(&self) -> u32 {
        let roll = self.counter.get();
        self.counter.set(roll.wrapping_add(1));
        PcgRng.percent(compute_seed(self.battle_seed, self.turn, self.actor, roll))
    }

    pub fn rolls_taken(&self) -> u32 {
        self.counter.get()
    }
}
