//! Player identification and per-player storage.
//!
//! Seats are addressed by `PlayerId` and every per-player structure in a
//! match (personal boards, phases, activity flags) lives in a `PlayerMap`
//! indexed by it. Nothing holds a reference to another player's data; the
//! match resolves a `PlayerId` to the board it needs at call time.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::{EngineError, Result};

/// Seats addressable by a `PlayerId`.
pub const MAX_PLAYERS: usize = u8::MAX as usize;

/// Seat identifier. Seat 0 plays first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Seat index (0-based), also the player's turn-order position.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one, wrapping around the table.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all seats of a match with `player_count` players.
    ///
    /// ```
    /// use renaissance_core::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat, indexable by `PlayerId`.
///
/// ```
/// use renaissance_core::core::{PlayerId, PlayerMap};
///
/// let mut faith: PlayerMap<u32> = PlayerMap::with_value(4, 0).unwrap();
/// faith[PlayerId::new(2)] += 1;
/// assert_eq!(faith[PlayerId::new(2)], 1);
/// ```
///
/// A map always has between 1 and [`MAX_PLAYERS`] seats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build one entry per seat with a factory.
    pub fn new(player_count: usize, factory: impl FnMut(PlayerId) -> T) -> Result<Self> {
        check_seats(player_count)?;
        Ok(Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        })
    }

    /// Every seat starts with a clone of `value`.
    pub fn with_value(player_count: usize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Whether `player` is a seat of this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all seats.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.data.len())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Seat `i` gets `data[i]`.
impl<T> TryFrom<Vec<T>> for PlayerMap<T> {
    type Error = EngineError;

    fn try_from(data: Vec<T>) -> Result<Self> {
        check_seats(data.len())?;
        Ok(Self { data })
    }
}

fn check_seats(player_count: usize) -> Result<()> {
    if player_count == 0 || player_count > MAX_PLAYERS {
        return Err(EngineError::InvalidConfig(format!(
            "a table needs 1 to {MAX_PLAYERS} seats, got {player_count}"
        )));
    }
    Ok(())
}
