//! Construction and removal policies.
use rand::rngs::StdRng;
use rand::{thread_rng, Rng, RngCore, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a vantage point is picked from a set of points during bulk build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VantagePolicy {
    /// Uniformly at random. Avoids skew on sorted or adversarial input.
    #[default]
    Random,
    /// The first point of the set.
    First,
}

/// Which child replaces a removed node that has two children.
///
/// The other child's points are re-inserted below the promoted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PromotionPolicy {
    /// The child holding more points; re-inserts the smaller sibling.
    #[default]
    Larger,
    Near,
    Far,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TreeConfig {
    pub vantage: VantagePolicy,
    pub promotion: PromotionPolicy,
    /// Seed for vantage selection. `None` draws from the thread rng.
    pub seed: Option<u64>,
}

impl TreeConfig {
    pub fn vantage(mut self, vantage: VantagePolicy) -> Self {
        self.vantage = vantage;
        self
    }

    pub fn promotion(mut self, promotion: PromotionPolicy) -> Self {
        self.promotion = promotion;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn rng(&self) -> Box<dyn RngCore> {
        match self.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(thread_rng()),
        }
    }
}

impl VantagePolicy {
    /// Index of the vantage point among `n > 0` candidates.
    pub(crate) fn pick<R: Rng + ?Sized>(self, n: usize, rng: &mut R) -> usize {
        match self {
            VantagePolicy::Random => rng.gen_range(0..n),
            VantagePolicy::First => 0,
        }
    }
}
