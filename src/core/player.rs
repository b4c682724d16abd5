//! Player identification and per-player storage.
//!
//! ## PlayerId
//!
//! Seat index of a player, 0-based. Seats rotate in index order, so the
//! player after the last seat is seat 0 again.
//!
//! ## PlayerMap
//!
//! One value per seat, backed by a `Vec` and indexable by `PlayerId`. The
//! game keeps each player's grid, patterns and scoring cards in one.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat index of a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that plays after this one in a game of `player_count`.
    ///
    /// ```
    /// use terra_futura::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).next(3), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count.max(1)) as u8)
    }

    /// Iterate over every seat of a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player storage with O(1) access.
///
/// ```
/// use terra_futura::core::{PlayerId, PlayerMap};
///
/// let mut turns: PlayerMap<u32> = PlayerMap::new(3, |_| 0);
/// turns[PlayerId::new(1)] += 1;
///
/// assert_eq!(turns[PlayerId::new(0)], 0);
/// assert_eq!(turns[PlayerId::new(1)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build one value per seat with `factory`.
    pub fn new(player_count: usize, factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Wrap an existing list, seat `i` owning element `i`.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Value of a seat, or `None` if the seat does not exist.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Mutable value of a seat, or `None` if the seat does not exist.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Check if `player` is a seat of this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Iterate over `(PlayerId, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
