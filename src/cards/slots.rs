//! Personal development card slots.

use super::development::{CardColor, DevelopmentCard};
use crate::core::{EngineError, Result};

/// Stacks of bought development cards. Only the top card of each slot
/// produces; a level `n` card goes on a slot topped by level `n - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardSlots {
    slots: Vec<Vec<DevelopmentCard>>,
}

impl CardSlots {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![Vec::new(); count],
        }
    }

    /// Rebuild slots from their stacks, bottom card first. Each card must
    /// be a legal placement on the one below.
    pub fn from_stacks(stacks: Vec<Vec<DevelopmentCard>>) -> Result<Self> {
        let mut slots = Self::new(stacks.len());
        for (slot, stack) in stacks.into_iter().enumerate() {
            for card in stack {
                slots.place(slot, card)?;
            }
        }
        Ok(slots)
    }

    /// Stacks, bottom card first.
    #[must_use]
    pub fn stacks(&self) -> &[Vec<DevelopmentCard>] {
        &self.slots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    #[must_use]
    pub fn top(&self, slot: usize) -> Option<&DevelopmentCard> {
        self.slots.get(slot).and_then(|s| s.last())
    }

    #[must_use]
    pub fn can_place(&self, slot: usize, card: &DevelopmentCard) -> bool {
        match self.slots.get(slot) {
            Some(stack) => {
                let top_level = stack.last().map_or(0, |c| c.level);
                card.level == top_level + 1
            }
            None => false,
        }
    }

    pub fn place(&mut self, slot: usize, card: DevelopmentCard) -> Result<()> {
        if !self.can_place(slot, &card) {
            return Err(EngineError::InvalidCardSlot(slot));
        }
        self.slots[slot].push(card);
        Ok(())
    }

    /// Cards owned of `color`, at `level` if given.
    #[must_use]
    pub fn count_matching(&self, color: CardColor, level: Option<u8>) -> u32 {
        let matching = self
            .slots
            .iter()
            .flatten()
            .filter(|c| c.color == color && level.map_or(true, |l| c.level == l))
            .count();
        u32::try_from(matching).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }
}
