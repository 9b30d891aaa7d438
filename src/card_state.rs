use crate::bag::SortedBag;
use crate::card::Card;
use crate::constants::FACE_UP_CARDS_COUNT;
use crate::deck::Deck;
use crate::error::{check_index, GameError, Result};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// What every player knows about the cards: the face-up cards, and the sizes of the deck
/// and of the discard pile.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PublicCardState {
    face_up_cards: [Card; FACE_UP_CARDS_COUNT],
    deck_size: usize,
    discards_size: usize,
}

impl PublicCardState {
    pub fn new(
        face_up_cards: [Card; FACE_UP_CARDS_COUNT],
        deck_size: usize,
        discards_size: usize,
    ) -> Self {
        Self {
            face_up_cards,
            deck_size,
            discards_size,
        }
    }

    #[inline]
    pub fn face_up_cards(&self) -> &[Card; FACE_UP_CARDS_COUNT] {
        &self.face_up_cards
    }

    pub fn face_up_card(&self, slot: usize) -> Result<Card> {
        check_index(slot, FACE_UP_CARDS_COUNT)?;
        Ok(self.face_up_cards[slot])
    }

    #[inline]
    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    #[inline]
    pub fn is_deck_empty(&self) -> bool {
        self.deck_size == 0
    }

    #[inline]
    pub fn discards_size(&self) -> usize {
        self.discards_size
    }
}

/// The complete state of the cards that are not in a player's hand.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CardState {
    face_up_cards: [Card; FACE_UP_CARDS_COUNT],
    deck: Deck<Card>,
    discards: SortedBag<Card>,
}

impl CardState {
    /// Lays the five top cards of `deck` face up; the rest of it becomes the draw pile.
    /// The discard pile starts empty.
    pub fn of(deck: &Deck<Card>) -> Result<Self> {
        let face_up_cards = array_init::from_iter(deck.iter().copied()).ok_or_else(|| {
            GameError::invalid(format!(
                "Cannot lay {} cards face up from a deck of {} cards.",
                FACE_UP_CARDS_COUNT,
                deck.len()
            ))
        })?;

        Ok(Self {
            face_up_cards,
            deck: deck.without_top_cards(FACE_UP_CARDS_COUNT)?,
            discards: SortedBag::new(),
        })
    }

    #[inline]
    pub fn face_up_cards(&self) -> &[Card; FACE_UP_CARDS_COUNT] {
        &self.face_up_cards
    }

    pub fn face_up_card(&self, slot: usize) -> Result<Card> {
        check_index(slot, FACE_UP_CARDS_COUNT)?;
        Ok(self.face_up_cards[slot])
    }

    #[inline]
    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    #[inline]
    pub fn is_deck_empty(&self) -> bool {
        self.deck.is_empty()
    }

    #[inline]
    pub fn discards_size(&self) -> usize {
        self.discards.len()
    }

    #[inline]
    pub fn discards(&self) -> &SortedBag<Card> {
        &self.discards
    }

    /// Replaces the face-up card at `slot` with the top card of the deck.
    pub fn with_drawn_face_up_card(&self, slot: usize) -> Result<Self> {
        check_index(slot, FACE_UP_CARDS_COUNT)?;
        let replacement = self.top_deck_card()?;

        let mut face_up_cards = self.face_up_cards;
        face_up_cards[slot] = replacement;
        Ok(Self {
            face_up_cards,
            deck: self.deck.without_top_card()?,
            discards: self.discards.clone(),
        })
    }

    pub fn top_deck_card(&self) -> Result<Card> {
        self.deck.top_card()
    }

    pub fn without_top_deck_card(&self) -> Result<Self> {
        Ok(Self {
            face_up_cards: self.face_up_cards,
            deck: self.deck.without_top_card()?,
            discards: self.discards.clone(),
        })
    }

    /// Shuffles the discard pile into a new deck. Only allowed once the deck is empty.
    pub fn with_deck_recreated_from_discards<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self> {
        if !self.is_deck_empty() {
            return Err(GameError::invalid(format!(
                "Cannot recreate the deck while it still holds {} cards.",
                self.deck_size()
            )));
        }

        Ok(Self {
            face_up_cards: self.face_up_cards,
            deck: Deck::of(&self.discards, rng),
            discards: SortedBag::new(),
        })
    }

    pub fn with_more_discarded_cards(&self, cards: &SortedBag<Card>) -> Self {
        Self {
            face_up_cards: self.face_up_cards,
            deck: self.deck.clone(),
            discards: self.discards.union(cards),
        }
    }

    pub fn to_public(&self) -> PublicCardState {
        PublicCardState::new(self.face_up_cards, self.deck_size(), self.discards_size())
    }
}
