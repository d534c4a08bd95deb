//! Non-repeating random id selection.
//!
//! The sampler never loops forever: once the free part of `[1, max]` becomes
//! sparse it stops rejecting and picks uniformly among the remaining ids, and
//! an exhausted range is reported as [`SamplingError::Exhausted`].

use std::collections::HashSet;

use rand::Rng;

use crate::error::{ErrorSeverity, GameError};
use crate::state::ItemId;

/// Errors raised while drawing ids.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SamplingError {
    #[error("id range [1, {max}] has {available} free ids, {requested} requested")]
    Exhausted {
        max: u32,
        available: usize,
        requested: usize,
    },
}

impl GameError for SamplingError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Exhausted { .. } => "SAMPLING_EXHAUSTED",
        }
    }
}

/// Draws ids in `[1, max]` that are not in a caller-managed exclusion set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniqueIdSampler {
    max: u32,
}

impl UniqueIdSampler {
    /// Random probes attempted before falling back to an exact pick.
    const MAX_REJECTIONS: usize = 32;

    pub const fn new(max: u32) -> Self {
        Self { max }
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Number of ids in `[1, max]` not contained in `excluded`.
    pub fn available(&self, excluded: &HashSet<ItemId>) -> usize {
        let taken = excluded
            .iter()
            .filter(|id| (1..=self.max).contains(&id.0))
            .count();
        self.max as usize - taken
    }

    /// Returns an id in `[1, max]` absent from `excluded`.
    ///
    /// The caller inserts the result into `excluded` before the next call.
    pub fn sample<R: Rng>(
        &self,
        rng: &mut R,
        excluded: &HashSet<ItemId>,
    ) -> Result<ItemId, SamplingError> {
        let available = self.available(excluded);
        if available == 0 {
            return Err(SamplingError::Exhausted {
                max: self.max,
                available,
                requested: 1,
            });
        }

        for _ in 0..Self::MAX_REJECTIONS {
            let candidate = ItemId(rng.random_range(1..=self.max));
            if !excluded.contains(&candidate) {
                return Ok(candidate);
            }
        }

        // Dense exclusion set: pick the n-th free id directly.
        let nth = rng.random_range(0..available);
        (1..=self.max)
            .map(ItemId)
            .filter(|id| !excluded.contains(id))
            .nth(nth)
            .ok_or(SamplingError::Exhausted {
                max: self.max,
                available,
                requested: 1,
            })
    }

    /// Draws `count` pairwise-distinct ids absent from `excluded`.
    ///
    /// `excluded` is left untouched so a failed round setup has nothing to undo.
    /// Fails before drawing anything when the free range is too small.
    pub fn sample_many<R: Rng>(
        &self,
        rng: &mut R,
        count: usize,
        excluded: &HashSet<ItemId>,
    ) -> Result<Vec<ItemId>, SamplingError> {
        let available = self.available(excluded);
        if available < count {
            return Err(SamplingError::Exhausted {
                max: self.max,
                available,
                requested: count,
            });
        }

        let mut taken = excluded.clone();
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let id = self.sample(rng, &taken)?;
            taken.insert(id);
            ids.push(id);
        }
        Ok(ids)
    }
}
