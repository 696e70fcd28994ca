//! The shared marble market.
//!
//! ## Insertion
//!
//! Inserting a row pushes the spare marble in at column 0. Every marble in
//! the row shifts one column toward the end, and the marble pushed out of
//! the last column becomes the new spare. The marbles that were in the row
//! before the insertion, except the one that becomes the spare, are drawn:
//!
//! - coloured marbles add a resource to the pending delta
//! - white marbles are counted, to be resolved by marble effects
//! - red marbles add a faith step
//!
//! Columns work the same way with row 0 as the leading position.
//!
//! ```
//! use renaissance_core::market::{Marble, MarbleMarket};
//!
//! let grid = vec![Marble::Blue, Marble::White, Marble::Grey, Marble::Red];
//! let mut market = MarbleMarket::new(1, 4, grid, Marble::Yellow).unwrap();
//!
//! let white = market.insert_row(0).unwrap();
//! assert_eq!(white, 1);
//! assert_eq!(market.spare(), Marble::Red);
//! assert_eq!(market.row(0), vec![Marble::Yellow, Marble::Blue, Marble::White, Marble::Grey]);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::marble::{Marble, MarbleYield};
use crate::core::{EngineError, GameRng, MatchConfig, Result};
use crate::resources::{Resource, ResourceBag};

/// Grid layout of the market, enough to rebuild it exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major cells.
    pub grid: Vec<Marble>,
    pub spare: Marble,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarbleMarket {
    rows: usize,
    cols: usize,
    grid: Vec<Marble>,
    spare: Marble,

    // Per-insertion state, cleared by `reset`.
    pending: ResourceBag,
    faith: u32,
    white_drawn: u32,
    white_remaining: u32,
    white_to_transform: u32,
}

impl MarbleMarket {
    /// Build a market from a row-major grid and a spare marble.
    pub fn new(rows: usize, cols: usize, grid: Vec<Marble>, spare: Marble) -> Result<Self> {
        if rows == 0 || cols == 0 || grid.len() != rows * cols {
            return Err(EngineError::InvalidConfig(format!(
                "a {}x{} market needs {} cells, got {}",
                rows,
                cols,
                rows * cols,
                grid.len()
            )));
        }
        Ok(Self {
            rows,
            cols,
            grid,
            spare,
            pending: ResourceBag::new(),
            faith: 0,
            white_drawn: 0,
            white_remaining: 0,
            white_to_transform: 0,
        })
    }

    /// Lay out the configured marbles in random order; the last one is the spare.
    pub fn shuffled(config: &MatchConfig, rng: &mut GameRng) -> Result<Self> {
        let mut marbles: Vec<Marble> = config
            .marbles
            .iter()
            .flat_map(|&(marble, n)| std::iter::repeat(marble).take(n as usize))
            .collect();
        rng.shuffle(&mut marbles);
        let spare = marbles
            .pop()
            .ok_or_else(|| EngineError::InvalidConfig("market has no marbles".into()))?;
        Self::new(config.market_rows, config.market_cols, marbles, spare)
    }

    pub fn from_snapshot(snapshot: &MarketSnapshot) -> Result<Self> {
        Self::new(snapshot.rows, snapshot.cols, snapshot.grid.clone(), snapshot.spare)
    }

    /// Rebuild a market part way through a draw: `pending` and `faith` are
    /// the delta not yet sent, `white_remaining` of `white_drawn` white
    /// marbles still wait for an effect.
    pub fn resume(
        layout: &MarketSnapshot,
        pending: ResourceBag,
        faith: u32,
        white_drawn: u32,
        white_remaining: u32,
    ) -> Result<Self> {
        let mut market = Self::from_snapshot(layout)?;
        if white_remaining > white_drawn {
            return Err(EngineError::Snapshot(format!(
                "{white_remaining} white marbles left of {white_drawn} drawn"
            )));
        }
        if let Some(kind) = pending.resources().iter().map(|r| r.kind).find(|k| !k.is_concrete()) {
            return Err(EngineError::Snapshot(format!("market delta holds {kind}")));
        }
        market.pending = pending;
        market.faith = faith;
        market.white_drawn = white_drawn;
        market.white_remaining = white_remaining;
        Ok(market)
    }

    #[must_use]
    pub fn snapshot(&self) -> MarketSnapshot {
        MarketSnapshot {
            rows: self.rows,
            cols: self.cols,
            grid: self.grid.clone(),
            spare: self.spare,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn spare(&self) -> Marble {
        self.spare
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Marble> {
        if row < self.rows && col < self.cols {
            Some(self.grid[row * self.cols + col])
        } else {
            None
        }
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Vec<Marble> {
        self.line(row, true).into_iter().map(|i| self.grid[i]).collect()
    }

    #[must_use]
    pub fn col(&self, col: usize) -> Vec<Marble> {
        self.line(col, false).into_iter().map(|i| self.grid[i]).collect()
    }

    /// Grid indices of a line, leading position first. Empty if out of range.
    fn line(&self, index: usize, is_row: bool) -> Vec<usize> {
        match (is_row, index) {
            (true, r) if r < self.rows => (0..self.cols).map(|c| r * self.cols + c).collect(),
            (false, c) if c < self.cols => (0..self.rows).map(|r| r * self.cols + c).collect(),
            _ => Vec::new(),
        }
    }

    /// Insert the spare at the head of row `row`. Returns white marbles drawn.
    pub fn insert_row(&mut self, row: usize) -> Result<u32> {
        self.insert(row, true)
    }

    /// Insert the spare at the head of column `col`. Returns white marbles drawn.
    pub fn insert_col(&mut self, col: usize) -> Result<u32> {
        self.insert(col, false)
    }

    pub fn insert(&mut self, index: usize, is_row: bool) -> Result<u32> {
        let cells = self.line(index, is_row);
        let Some(&last) = cells.last() else {
            return Err(EngineError::InvalidMarketLine { index, is_row });
        };

        let before: Vec<Marble> = cells.iter().map(|&i| self.grid[i]).collect();
        let pushed_out = self.grid[last];
        for (pos, &cell) in cells.iter().enumerate() {
            self.grid[cell] = if pos == 0 { self.spare } else { before[pos - 1] };
        }
        self.spare = pushed_out;

        let mut white = 0;
        for marble in &before[..before.len() - 1] {
            match marble.yields() {
                MarbleYield::Resource(kind) => self.pending.add(Resource::new(kind, 1)),
                MarbleYield::White => white += 1,
                MarbleYield::Faith => self.faith += 1,
            }
        }
        self.white_drawn += white;
        self.white_remaining += white;

        debug!(
            index,
            is_row,
            drawn = self.pending.total(),
            white,
            faith = self.faith,
            spare = %self.spare,
            "market insertion"
        );
        Ok(white)
    }

    /// White marbles drawn since the last reset.
    #[must_use]
    pub fn white_marble_drew(&self) -> u32 {
        self.white_drawn
    }

    /// White marbles not yet assigned to an effect.
    #[must_use]
    pub fn white_remaining(&self) -> u32 {
        self.white_remaining
    }

    #[must_use]
    pub fn white_marble_to_transform(&self) -> u32 {
        self.white_to_transform
    }

    /// Faith drawn since the last reset.
    #[must_use]
    pub fn faith(&self) -> u32 {
        self.faith
    }

    #[must_use]
    pub fn pending(&self) -> &ResourceBag {
        &self.pending
    }

    /// Declare how many of the remaining white marbles the next marble
    /// effect transforms.
    pub fn set_white_marble_to_transform(&mut self, count: u32) -> Result<()> {
        if count > self.white_remaining {
            return Err(EngineError::WhiteMarbleOverflow {
                requested: count,
                remaining: self.white_remaining,
            });
        }
        self.white_to_transform = count;
        Ok(())
    }

    /// Add a marble effect's output to the pending delta and consume the
    /// white marbles it was declared for.
    pub fn insert_leader_resources(&mut self, resources: &[Resource]) {
        self.pending.add_all(resources);
        self.white_remaining -= self.white_to_transform;
        self.white_to_transform = 0;
    }

    /// Drop the white marbles that were not transformed.
    pub fn discard_white_marbles(&mut self) {
        self.white_remaining = 0;
        self.white_to_transform = 0;
    }

    /// Drain the pending delta and faith drawn.
    pub fn take_resources_to_send(&mut self) -> (ResourceBag, u32) {
        (std::mem::take(&mut self.pending), std::mem::take(&mut self.faith))
    }

    /// Clear per-insertion counters before the next market action.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.faith = 0;
        self.white_drawn = 0;
        self.white_remaining = 0;
        self.white_to_transform = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceType;
    use Marble::*;

    /// 3x4:
    /// ```text
    /// W B G Y
    /// P R W B
    /// G Y P W
    /// ```
    /// spare W
    fn market() -> MarbleMarket {
        let grid = vec![
            White, Blue, Grey, Yellow, //
            Purple, Red, White, Blue, //
            Grey, Yellow, Purple, White,
        ];
        MarbleMarket::new(3, 4, grid, White).unwrap()
    }

    #[test]
    fn test_insert_row_rotates() {
        let mut m = market();

        let white = m.insert_row(0).unwrap();

        assert_eq!(m.row(0), vec![White, White, Blue, Grey]);
        assert_eq!(m.spare(), Yellow);
        assert_eq!(white, 1);
        // Yellow became the spare; blue and grey were drawn.
        assert_eq!(m.pending().get(ResourceType::Shield), 1);
        assert_eq!(m.pending().get(ResourceType::Stone), 1);
        assert_eq!(m.pending().get(ResourceType::Coin), 0);
    }

    #[test]
    fn test_insert_col_rotates() {
        let mut m = market();

        m.insert_col(1).unwrap();

        assert_eq!(m.col(1), vec![White, Blue, Red]);
        assert_eq!(m.spare(), Yellow);
        assert_eq!(m.faith(), 1);
        assert_eq!(m.pending().get(ResourceType::Shield), 1);
    }

    #[test]
    fn test_other_lines_untouched() {
        let mut m = market();
        m.insert_row(1).unwrap();

        assert_eq!(m.row(0), vec![White, Blue, Grey, Yellow]);
        assert_eq!(m.row(2), vec![Grey, Yellow, Purple, White]);
    }

    #[test]
    fn test_invalid_line() {
        let mut m = market();
        let before = m.snapshot();

        assert_eq!(
            m.insert_row(3),
            Err(EngineError::InvalidMarketLine { index: 3, is_row: true })
        );
        assert_eq!(
            m.insert_col(4),
            Err(EngineError::InvalidMarketLine { index: 4, is_row: false })
        );
        assert_eq!(m.snapshot(), before);
    }

    #[test]
    fn test_white_marble_transform() {
        let mut m = market();
        // Row 1 draws P R W; B becomes the spare.
        m.insert_row(1).unwrap();
        assert_eq!(m.white_remaining(), 1);

        assert!(matches!(
            m.set_white_marble_to_transform(2),
            Err(EngineError::WhiteMarbleOverflow { requested: 2, remaining: 1 })
        ));

        m.set_white_marble_to_transform(1).unwrap();
        m.insert_leader_resources(&[Resource::coin(1)]);
        assert_eq!(m.white_remaining(), 0);
        assert_eq!(m.white_marble_drew(), 1);

        let (drawn, faith) = m.take_resources_to_send();
        assert_eq!(drawn.get(ResourceType::Coin), 1);
        assert_eq!(drawn.get(ResourceType::Servant), 1);
        assert_eq!(faith, 1);
        assert!(m.pending().is_empty());
    }

    #[test]
    fn test_reset_clears_counters() {
        let mut m = market();
        m.insert_row(2).unwrap();
        m.reset();

        assert_eq!(m.white_marble_drew(), 0);
        assert_eq!(m.faith(), 0);
        assert!(m.pending().is_empty());
    }

    #[test]
    fn test_shuffled_is_seeded() {
        let config = MatchConfig::default().with_seed(5);
        let a = MarbleMarket::shuffled(&config, &mut GameRng::new(5)).unwrap();
        let b = MarbleMarket::shuffled(&config, &mut GameRng::new(5)).unwrap();

        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.rows() * a.cols(), 12);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut m = market();
        m.insert_col(3).unwrap();

        let back = MarbleMarket::from_snapshot(&m.snapshot()).unwrap();
        assert_eq!(back.snapshot(), m.snapshot());
    }

    #[test]
    fn test_from_snapshot_rejects_bad_layout() {
        let mut layout = market().snapshot();
        layout.rows = 4;

        assert!(matches!(MarbleMarket::from_snapshot(&layout), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_resume_keeps_draw_in_progress() {
        let mut m = market();
        m.insert_row(0).unwrap();

        let back =
            MarbleMarket::resume(&m.snapshot(), m.pending().clone(), m.faith(), m.white_marble_drew(), 1).unwrap();
        assert_eq!(back, m);

        let err = MarbleMarket::resume(&m.snapshot(), ResourceBag::new(), 0, 1, 2).unwrap_err();
        assert!(matches!(err, EngineError::Snapshot(_)));
        let wild: ResourceBag = [Resource::any(1)].into_iter().collect();
        assert!(MarbleMarket::resume(&m.snapshot(), wild, 0, 0, 0).is_err());
    }
}
