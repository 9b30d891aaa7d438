use crate::bag::SortedBag;
use crate::error::{GameError, Result};

use im::Vector;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An immutable, ordered pile of cards. The top of the deck is its first element.
///
/// Removing cards from the top shares the remaining structure with the original deck,
/// which stays valid.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Deck<T: Clone> {
    cards: Vector<T>,
}

impl<T: Clone + Ord> Deck<T> {
    /// Creates a deck holding the given cards, shuffled with `rng`.
    ///
    /// # Example
    /// ```
    /// use rail_network::card::Card;
    /// use rail_network::deck::Deck;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let deck = Deck::of(&Card::full_set(), &mut ChaCha8Rng::seed_from_u64(2021));
    /// assert_eq!(deck.len(), 110);
    /// ```
    pub fn of<R: Rng + ?Sized>(cards: &SortedBag<T>, rng: &mut R) -> Self {
        let mut shuffled = cards.to_vec();
        shuffled.shuffle(rng);
        Self {
            cards: shuffled.into_iter().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn top_card(&self) -> Result<T> {
        self.cards
            .front()
            .cloned()
            .ok_or_else(|| GameError::invalid("Cannot look at the top card of an empty deck."))
    }

    pub fn without_top_card(&self) -> Result<Self> {
        self.without_top_cards(1)
    }

    /// The `count` cards on top of the deck.
    pub fn top_cards(&self, count: usize) -> Result<SortedBag<T>> {
        self.check_count(count)?;
        Ok(self.cards.iter().take(count).cloned().collect())
    }

    pub fn without_top_cards(&self, count: usize) -> Result<Self> {
        self.check_count(count)?;
        Ok(Self {
            cards: self.cards.skip(count),
        })
    }

    /// Iterates over the cards, from the top of the deck.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.cards.iter()
    }

    fn check_count(&self, count: usize) -> Result<()> {
        if count > self.len() {
            return Err(GameError::invalid(format!(
                "Cannot take {} cards from a deck of {} cards.",
                count,
                self.len()
            )));
        }
        Ok(())
    }
}
