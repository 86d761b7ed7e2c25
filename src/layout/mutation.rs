//! Adjacent-swap mutation.
//!
//! Every node independently draws `d ~ U{1..=100}`. If `d > resistance`, a
//! fair coin decides whether the node moves: it swaps with the occupant of
//! the slot above (`y + 1`) or, if that slot is empty, with the slot below
//! (`y - 1`). A node alone in its column has no neighbor and stays put.
//!
//! Resistance 100 therefore never moves anything and resistance 0 makes
//! every node eligible, giving each node roughly a 50% chance to move.
//! Left and right columns are processed independently in one pass, left
//! first, nodes in id order.

use super::graph::Side;
use super::placement::LayoutDraft;
use crate::geometry::Position;
use rand::Rng;

/// Upper bound for mutation resistance.
pub const MAX_RESISTANCE: u8 = 100;

impl LayoutDraft {
    /// Applies one round of adjacent swaps and returns the number of swaps
    /// performed. Values above [`MAX_RESISTANCE`] are treated as 100.
    ///
    /// The draft stays a valid layout: each side remains a permutation of
    /// its node ids over slots `0..n`.
    pub fn mutate<R: Rng>(&mut self, resistance: u8, rng: &mut R) -> usize {
        let resistance = resistance.min(MAX_RESISTANCE);
        let mut swaps = 0;

        for side in Side::BOTH {
            for id in 0..self.graph().node_count(side) {
                let draw: u8 = rng.random_range(1..=MAX_RESISTANCE);
                if draw <= resistance || !rng.random_bool(0.5) {
                    continue;
                }
                let here = self.position(side, id);
                let above = Position::new(here.x, here.y + 1);
                let below = Position::new(here.x, here.y - 1);
                if self.swap_cells(here, above) || self.swap_cells(here, below) {
                    swaps += 1;
                }
            }
        }

        swaps
    }
}
