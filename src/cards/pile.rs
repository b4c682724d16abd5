//! Card piles players draw from.
//!
//! Each deck is shuffled once at setup. A pile shows `visible` face-up
//! cards; the rest wait face down. Taking a face-up card or discarding the
//! oldest one slides a fresh card in at the front, so index 0 is always the
//! newest card on display.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardSnapshot};
use crate::core::GameRng;

/// The two decks of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Deck {
    I,
    II,
}

impl Deck {
    pub const ALL: [Deck; 2] = [Deck::I, Deck::II];

    /// Name of this deck's shuffle stream.
    #[must_use]
    pub const fn rng_context(self) -> &'static str {
        match self {
            Deck::I => "deck-I",
            Deck::II => "deck-II",
        }
    }
}

/// A face-up slot of one pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSource {
    pub deck: Deck,
    pub index: usize,
}

impl CardSource {
    #[must_use]
    pub const fn new(deck: Deck, index: usize) -> Self {
        Self { deck, index }
    }
}

/// Face-up display backed by a face-down stack.
#[derive(Clone, Debug)]
pub struct Pile {
    /// Face-up cards, newest first.
    visible: Vec<Card>,
    /// Face-down stack; the last element is drawn next.
    hidden: Vec<Card>,
    discarded: Vec<Card>,
    visible_count: usize,
}

impl Pile {
    /// Shuffle `cards` and lay out `visible_count` of them face up.
    #[must_use]
    pub fn new(mut cards: Vec<Card>, visible_count: usize, rng: &mut GameRng) -> Self {
        rng.shuffle(&mut cards);
        Self::ordered(cards, visible_count)
    }

    /// Lay out `cards` without shuffling. The last card is drawn first.
    #[must_use]
    pub fn ordered(cards: Vec<Card>, visible_count: usize) -> Self {
        let mut pile = Self {
            visible: Vec::with_capacity(visible_count),
            hidden: cards,
            discarded: Vec::new(),
            visible_count,
        };
        pile.refill();
        pile
    }

    /// Face-up card at `index`.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.visible.get(index)
    }

    /// Remove the face-up card at `index` and refill the display.
    pub fn take_card(&mut self, index: usize) -> Option<Card> {
        if index >= self.visible.len() {
            return None;
        }
        let card = self.visible.remove(index);
        self.refill();
        Some(card)
    }

    /// Discard the oldest face-up card and refill the display.
    ///
    /// Returns `false` when nothing is on display.
    pub fn remove_last_card(&mut self) -> bool {
        match self.visible.pop() {
            Some(card) => {
                self.discarded.push(card);
                self.refill();
                true
            }
            None => false,
        }
    }

    /// Face-up cards, newest first.
    #[must_use]
    pub fn visible(&self) -> &[Card] {
        &self.visible
    }

    /// Cards left face down.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }

    #[must_use]
    pub fn discarded_count(&self) -> usize {
        self.discarded.len()
    }

    fn refill(&mut self) {
        while self.visible.len() < self.visible_count {
            match self.hidden.pop() {
                Some(card) => self.visible.insert(0, card),
                None => break,
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> PileSnapshot {
        PileSnapshot {
            visible: self.visible.iter().map(Card::snapshot).collect(),
            hidden_count: self.hidden.len(),
            discarded_count: self.discarded.len(),
        }
    }
}

/// Public view of a pile: face-down cards are only counted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PileSnapshot {
    pub visible: Vec<CardSnapshot>,
    pub hidden_count: usize,
    pub discarded_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn cards(ids: std::ops::Range<u32>) -> Vec<Card> {
        ids.map(|i| Card::new(CardId::new(i), 1)).collect()
    }

    fn visible_ids(pile: &Pile) -> Vec<u32> {
        pile.visible().iter().map(|c| c.id().raw()).collect()
    }

    #[test]
    fn test_initial_display() {
        let pile = Pile::ordered(cards(0..6), 4);

        assert_eq!(visible_ids(&pile), vec![2, 3, 4, 5]);
        assert_eq!(pile.hidden_count(), 2);
        assert!(pile.card(4).is_none());
    }

    #[test]
    fn test_take_refills_front() {
        let mut pile = Pile::ordered(cards(0..6), 4);

        let taken = pile.take_card(2).unwrap();
        assert_eq!(taken.id(), CardId::new(4));
        assert_eq!(visible_ids(&pile), vec![1, 2, 3, 5]);
        assert!(pile.take_card(7).is_none());
    }

    #[test]
    fn test_remove_last_discards_oldest() {
        let mut pile = Pile::ordered(cards(0..5), 4);

        assert!(pile.remove_last_card());
        assert_eq!(visible_ids(&pile), vec![0, 1, 2, 3]);
        assert_eq!(pile.discarded_count(), 1);

        assert!(pile.remove_last_card());
        assert_eq!(visible_ids(&pile), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_pile() {
        let mut pile = Pile::ordered(Vec::new(), 4);
        assert!(!pile.remove_last_card());
        assert!(pile.take_card(0).is_none());
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut rng = GameRng::new(5);
        let pile = Pile::new(cards(0..10), 4, &mut rng);

        assert_eq!(pile.visible().len(), 4);
        assert_eq!(pile.hidden_count(), 6);

        let mut again = GameRng::new(5);
        let twin = Pile::new(cards(0..10), 4, &mut again);
        assert_eq!(visible_ids(&pile), visible_ids(&twin));
    }

    #[test]
    fn test_snapshot_hides_stack() {
        let pile = Pile::ordered(cards(0..6), 2);
        let value = serde_json::to_value(pile.snapshot()).unwrap();

        assert_eq!(value["visible"].as_array().unwrap().len(), 2);
        assert_eq!(value["hiddenCount"], 4);
        assert_eq!(value["discardedCount"], 0);
    }
}
