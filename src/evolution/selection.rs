//! Survivor selection.
//!
//! Selection decides which members of a ranked generation are carried over
//! unchanged. The remaining places are refilled by mutating survivors.

use rand::Rng;

/// Policy for choosing the members that survive into the next generation.
///
/// # Examples
///
/// ```
/// use autograph::evolution::SurvivorPolicy;
///
/// // Keep the best 10% (at least one member).
/// let sel = SurvivorPolicy::Elitist { ratio: 0.1 };
///
/// // One survival probability per generation, shared by all members.
/// let sel = SurvivorPolicy::RandomRetain;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurvivorPolicy {
    /// Keep the best `max(1, floor(ratio * len))` members.
    ///
    /// The best layout always survives, so the best score of a population
    /// never increases from one generation to the next.
    Elitist { ratio: f64 },

    /// Draw one threshold `t ~ U[0, 1)` per generation; every member
    /// survives independently with probability `t`, regardless of score.
    /// If nobody survives, one uniformly chosen member is kept.
    ///
    /// Offers no elitism: the best score can get worse.
    RandomRetain,
}

impl Default for SurvivorPolicy {
    fn default() -> Self {
        SurvivorPolicy::Elitist { ratio: 0.1 }
    }
}

impl SurvivorPolicy {
    /// Selects survivor indices from a population of `len` members ranked
    /// best first. Indices are returned in ascending (rank) order.
    ///
    /// # Panics
    /// Panics if `len` is 0.
    pub fn select<R: Rng>(&self, len: usize, rng: &mut R) -> Vec<usize> {
        assert!(len > 0, "cannot select from empty population");

        match *self {
            SurvivorPolicy::Elitist { ratio } => {
                let keep = ((len as f64 * ratio) as usize).clamp(1, len);
                (0..keep).collect()
            }
            SurvivorPolicy::RandomRetain => {
                let threshold: f64 = rng.random();
                let kept: Vec<usize> = (0..len).filter(|_| rng.random_bool(threshold)).collect();
                if kept.is_empty() {
                    vec![rng.random_range(0..len)]
                } else {
                    kept
                }
            }
        }
    }
}
