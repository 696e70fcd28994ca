//! A player's faith track position and favour tiles.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::report::VaticanReport;
use crate::core::{EngineError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FavourTile {
    #[default]
    Pending,
    Granted,
    Lost,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaithTrack {
    position: u32,
    length: u32,
    favours: Vec<FavourTile>,
}

impl FaithTrack {
    #[must_use]
    pub fn new(length: u32) -> Self {
        Self {
            position: 0,
            length,
            favours: Vec::new(),
        }
    }

    /// A track already `position` spaces in, with favours settled so far.
    pub fn resume(length: u32, position: u32, favours: Vec<FavourTile>) -> Result<Self> {
        if position > length {
            return Err(EngineError::Snapshot(format!(
                "faith position {position} past the last space {length}"
            )));
        }
        Ok(Self { position, length, favours })
    }

    #[must_use]
    pub fn position(&self) -> u32 {
        self.position
    }

    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Whether the last space has been reached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.position >= self.length
    }

    #[must_use]
    pub fn favour(&self, report: usize) -> FavourTile {
        self.favours.get(report).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn favours(&self) -> &[FavourTile] {
        &self.favours
    }

    /// Advance by `steps`, stopping on the last space.
    pub fn move_player(&mut self, steps: u32) {
        if steps == 0 {
            return;
        }
        self.position = self.position.saturating_add(steps).min(self.length);
        debug!(steps, position = self.position, "faith track advanced");
    }

    /// Apply a fired report to this player.
    pub fn resolve_report(&mut self, index: usize, report: &VaticanReport) {
        if self.favours.len() <= index {
            self.favours.resize(index + 1, FavourTile::Pending);
        }
        self.favours[index] = if report.rewards(self.position) {
            FavourTile::Granted
        } else {
            FavourTile::Lost
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_stops_at_end() {
        let mut track = FaithTrack::new(24);
        track.move_player(20);
        track.move_player(10);

        assert_eq!(track.position(), 24);
        assert!(track.is_complete());
    }

    #[test]
    fn test_resolve_report() {
        let report = VaticanReport::new(5, 8);
        let mut inside = FaithTrack::new(24);
        let mut behind = FaithTrack::new(24);
        inside.move_player(6);
        behind.move_player(2);

        inside.resolve_report(0, &report);
        behind.resolve_report(0, &report);

        assert_eq!(inside.favour(0), FavourTile::Granted);
        assert_eq!(behind.favour(0), FavourTile::Lost);
        assert_eq!(behind.favour(1), FavourTile::Pending);
    }

    #[test]
    fn test_resume_bounds_position() {
        let track = FaithTrack::resume(24, 9, vec![FavourTile::Granted]).unwrap();
        assert_eq!(track.position(), 9);
        assert_eq!(track.favour(0), FavourTile::Granted);

        assert!(matches!(FaithTrack::resume(24, 25, Vec::new()), Err(EngineError::Snapshot(_))));
    }
}
