//! Fruit tiers and their physical properties.

use serde::{Deserialize, Serialize};

/// Merge tier of a simulated object, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Fruit {
    Cherry,
    Strawberry,
    Grape,
    Dekopon,
    Persimmon,
    Apple,
    Pear,
    Peach,
    Pineapple,
    Melon,
    Watermelon,
}

impl Fruit {
    pub const ALL: [Fruit; 11] = [
        Fruit::Cherry,
        Fruit::Strawberry,
        Fruit::Grape,
        Fruit::Dekopon,
        Fruit::Persimmon,
        Fruit::Apple,
        Fruit::Pear,
        Fruit::Peach,
        Fruit::Pineapple,
        Fruit::Melon,
        Fruit::Watermelon,
    ];

    /// Tiers the player may be handed to drop.
    pub const DROPPABLE: [Fruit; 5] = [
        Fruit::Cherry,
        Fruit::Strawberry,
        Fruit::Grape,
        Fruit::Dekopon,
        Fruit::Persimmon,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Fully grown radius of this tier.
    pub fn radius(self) -> f32 {
        match self {
            Fruit::Cherry => 0.33,
            Fruit::Strawberry => 0.48,
            Fruit::Grape => 0.63,
            Fruit::Dekopon => 0.78,
            Fruit::Persimmon => 0.93,
            Fruit::Apple => 1.08,
            Fruit::Pear => 1.23,
            Fruit::Peach => 1.38,
            Fruit::Pineapple => 1.53,
            Fruit::Melon => 1.68,
            Fruit::Watermelon => 2.0,
        }
    }

    /// Tier produced by merging two of this fruit. The top tier never merges.
    pub fn next(self) -> Option<Fruit> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Score awarded when this tier is produced by a merge.
    pub fn points(self) -> u32 {
        let tier = self.index() as u32 + 1;
        tier * (tier + 1) / 2
    }

    pub fn name(self) -> &'static str {
        match self {
            Fruit::Cherry => "Cherry",
            Fruit::Strawberry => "Strawberry",
            Fruit::Grape => "Grape",
            Fruit::Dekopon => "Dekopon",
            Fruit::Persimmon => "Persimmon",
            Fruit::Apple => "Apple",
            Fruit::Pear => "Pear",
            Fruit::Peach => "Peach",
            Fruit::Pineapple => "Pineapple",
            Fruit::Melon => "Melon",
            Fruit::Watermelon => "Watermelon",
        }
    }
}
