//! Development cards and the shared development grid.
//!
//! The grid holds one face-down stack per (level, colour). Row `0` holds
//! level 1 cards, row `2` level 3; columns follow [`CardColor::ALL`]. Only
//! the top card of each stack can be bought.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, GameRng, Result};
use crate::effects::{bundle, Bundle, Production};
use crate::resources::{Resource, ResourceType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DevelopmentCardId(pub u32);

impl DevelopmentCardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DevelopmentCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Development({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardColor {
    Green,
    Blue,
    Yellow,
    Purple,
}

impl CardColor {
    pub const ALL: [CardColor; 4] = [CardColor::Green, CardColor::Blue, CardColor::Yellow, CardColor::Purple];

    /// Grid column of this colour.
    #[must_use]
    pub const fn column(self) -> usize {
        match self {
            CardColor::Green => 0,
            CardColor::Blue => 1,
            CardColor::Yellow => 2,
            CardColor::Purple => 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevelopmentCard {
    pub id: DevelopmentCardId,
    /// 1 to 3.
    pub level: u8,
    pub color: CardColor,
    pub cost: Bundle,
    pub production: Production,
}

impl DevelopmentCard {
    #[must_use]
    pub fn new(id: DevelopmentCardId, level: u8, color: CardColor, cost: &[Resource], production: Production) -> Self {
        Self {
            id,
            level,
            color,
            cost: bundle(cost),
            production,
        }
    }
}

/// The shared market of development cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DevelopmentGrid {
    levels: usize,
    /// Row-major stacks, top card last.
    stacks: Vec<Vec<DevelopmentCard>>,
}

impl DevelopmentGrid {
    /// Sort `cards` into stacks by level and colour and shuffle each stack.
    pub fn new(cards: Vec<DevelopmentCard>, levels: usize, rng: &mut GameRng) -> Result<Self> {
        let cols = CardColor::ALL.len();
        let mut stacks = vec![Vec::new(); levels * cols];
        for card in cards {
            let level = usize::from(card.level);
            if level == 0 || level > levels {
                return Err(EngineError::InvalidConfig(format!(
                    "{} has level {}, grid has {} levels",
                    card.id, card.level, levels
                )));
            }
            stacks[(level - 1) * cols + card.color.column()].push(card);
        }
        for stack in &mut stacks {
            rng.shuffle(stack);
        }
        Ok(Self { levels, stacks })
    }

    /// Rebuild from row-major stacks, top card last. Every card must sit in
    /// the stack of its level and colour.
    pub fn from_stacks(levels: usize, stacks: Vec<Vec<DevelopmentCard>>) -> Result<Self> {
        let cols = CardColor::ALL.len();
        if stacks.len() != levels * cols {
            return Err(EngineError::Snapshot(format!(
                "{} development stacks for {} levels",
                stacks.len(),
                levels
            )));
        }
        for (index, stack) in stacks.iter().enumerate() {
            let (row, col) = (index / cols, index % cols);
            if let Some(card) = stack
                .iter()
                .find(|c| usize::from(c.level) != row + 1 || c.color.column() != col)
            {
                return Err(EngineError::Snapshot(format!(
                    "{} does not belong in stack ({row}, {col})",
                    card.id
                )));
            }
        }
        Ok(Self { levels, stacks })
    }

    #[must_use]
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Row-major stacks, top card last.
    #[must_use]
    pub fn stacks(&self) -> &[Vec<DevelopmentCard>] {
        &self.stacks
    }

    fn stack_index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.levels && col < CardColor::ALL.len()).then(|| row * CardColor::ALL.len() + col)
    }

    /// Top card of the stack at (`row`, `col`).
    pub fn top(&self, row: usize, col: usize) -> Result<&DevelopmentCard> {
        self.stack_index(row, col)
            .and_then(|i| self.stacks[i].last())
            .ok_or(EngineError::EmptyDevelopmentStack { row, col })
    }

    /// Remove and return the top card of the stack at (`row`, `col`).
    pub fn take(&mut self, row: usize, col: usize) -> Result<DevelopmentCard> {
        self.stack_index(row, col)
            .and_then(|i| self.stacks[i].pop())
            .ok_or(EngineError::EmptyDevelopmentStack { row, col })
    }

    #[must_use]
    pub fn remaining(&self, row: usize, col: usize) -> usize {
        self.stack_index(row, col).map_or(0, |i| self.stacks[i].len())
    }
}

/// The standard 48 card development deck: four cards per level and colour.
#[must_use]
pub fn standard_development_cards() -> Vec<DevelopmentCard> {
    use ResourceType::*;

    // Each colour leans on one resource for its cost and converts another.
    let lean = |color: CardColor| match color {
        CardColor::Green => (Shield, Coin),
        CardColor::Blue => (Coin, Servant),
        CardColor::Yellow => (Servant, Stone),
        CardColor::Purple => (Stone, Shield),
    };

    let mut cards = Vec::with_capacity(48);
    let mut id = 0;
    for level in 1..=3u8 {
        for color in CardColor::ALL {
            let (main, other) = lean(color);
            for variant in 0..4u32 {
                let l = u32::from(level);
                let cost = [
                    Resource::new(main, 2 * l + variant / 2),
                    Resource::new(other, (l - 1) + variant % 2),
                ];
                let production = Production::new(
                    &[Resource::new(other, l.min(2))],
                    &[Resource::new(main, l), Resource::faith(variant % 2)],
                );
                cards.push(DevelopmentCard::new(DevelopmentCardId::new(id), level, color, &cost, production));
                id += 1;
            }
        }
    }
    cards
}
