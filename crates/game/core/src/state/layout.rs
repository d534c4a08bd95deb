//! Presented order of pictures and labels.
//!
//! Layout is cosmetic: the rules never read it. The chaos perturbation only
//! reorders labels and toggles their upside-down flag.

use rand::Rng;
use rand::seq::SliceRandom;

use super::item::{Item, ItemId};

/// One label as currently shown.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelTile {
    pub label: String,
    /// Rendered rotated by 180 degrees.
    pub flipped: bool,
}

/// Ordered label presentation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelLayout {
    tiles: Vec<LabelTile>,
}

impl LabelLayout {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tiles: labels
                .into_iter()
                .map(|label| LabelTile {
                    label: label.into(),
                    flipped: false,
                })
                .collect(),
        }
    }

    pub fn tiles(&self) -> &[LabelTile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Chaos step: Fisher-Yates reorder, then each label is flipped with
    /// probability `flip_chance` (recomputed for every label on every call).
    pub fn perturb<R: Rng>(&mut self, rng: &mut R, flip_chance: f64) {
        self.tiles.shuffle(rng);
        let chance = if flip_chance.is_nan() {
            0.0
        } else {
            flip_chance.clamp(0.0, 1.0)
        };
        for tile in &mut self.tiles {
            tile.flipped = rng.random_bool(chance);
        }
    }
}

/// Full board presentation for one round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardLayout {
    pub images: Vec<ItemId>,
    pub labels: LabelLayout,
}

impl BoardLayout {
    /// Shuffles pictures and labels independently so positions give nothing away.
    pub fn shuffled<R: Rng>(items: &[Item], rng: &mut R) -> Self {
        let mut images: Vec<ItemId> = items.iter().map(|item| item.id).collect();
        images.shuffle(rng);

        let mut labels: Vec<&str> = items.iter().map(|item| item.display_name.as_str()).collect();
        labels.shuffle(rng);

        Self {
            images,
            labels: LabelLayout::from_labels(labels),
        }
    }
}
