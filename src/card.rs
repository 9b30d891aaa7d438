use crate::bag::SortedBag;
use crate::constants::{CAR_CARDS_COUNT, LOCOMOTIVE_CARDS_COUNT};

use serde::{Deserialize, Serialize};
use std::iter::repeat;
#[allow(unused_imports)]
use strum::EnumCount;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

/// The eight colors a route, or a car card, can have.
///
/// # JSON
/// Colors are serialized as lowercase strings.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumCountMacro,
    EnumIter,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    Black,
    Violet,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    White,
}

/// Represents the different variants of cards.
///
/// There is one car card per [`Color`], plus the locomotive, which matches with any color.
///
/// # JSON
/// Cards are serialized as lowercase strings.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumCountMacro,
    EnumIter,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Card {
    Black,
    Violet,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    White,
    Locomotive,
}

impl Card {
    /// All car cards, i.e. every card but the locomotive, in the order of their colors.
    pub const CARS: [Card; 8] = [
        Card::Black,
        Card::Violet,
        Card::Blue,
        Card::Green,
        Card::Yellow,
        Card::Orange,
        Card::Red,
        Card::White,
    ];

    /// Every kind of card, the locomotive last.
    pub const ALL: [Card; 9] = [
        Card::Black,
        Card::Violet,
        Card::Blue,
        Card::Green,
        Card::Yellow,
        Card::Orange,
        Card::Red,
        Card::White,
        Card::Locomotive,
    ];

    /// The car card of the given color.
    ///
    /// # Example
    /// ```
    /// use rail_network::card::{Card, Color};
    ///
    /// assert_eq!(Card::of(Color::Violet), Card::Violet);
    /// assert_eq!(Card::of(Color::Violet).color(), Some(Color::Violet));
    /// ```
    pub fn of(color: Color) -> Self {
        match color {
            Color::Black => Card::Black,
            Color::Violet => Card::Violet,
            Color::Blue => Card::Blue,
            Color::Green => Card::Green,
            Color::Yellow => Card::Yellow,
            Color::Orange => Card::Orange,
            Color::Red => Card::Red,
            Color::White => Card::White,
        }
    }

    /// The color of this card, `None` for the locomotive.
    pub fn color(self) -> Option<Color> {
        match self {
            Card::Black => Some(Color::Black),
            Card::Violet => Some(Color::Violet),
            Card::Blue => Some(Color::Blue),
            Card::Green => Some(Color::Green),
            Card::Yellow => Some(Color::Yellow),
            Card::Orange => Some(Color::Orange),
            Card::Red => Some(Color::Red),
            Card::White => Some(Color::White),
            Card::Locomotive => None,
        }
    }

    #[inline]
    pub fn is_locomotive(self) -> bool {
        self == Card::Locomotive
    }

    /// The complete set of cards a game starts with: twelve of each car card and
    /// fourteen locomotives.
    ///
    /// # Example
    /// ```
    /// use rail_network::card::Card;
    ///
    /// let cards = Card::full_set();
    /// assert_eq!(cards.len(), 110);
    /// assert_eq!(cards.count_of(&Card::Locomotive), 14);
    /// ```
    pub fn full_set() -> SortedBag<Card> {
        Card::iter()
            .flat_map(|card| {
                let count = if card.is_locomotive() {
                    LOCOMOTIVE_CARDS_COUNT
                } else {
                    CAR_CARDS_COUNT
                };
                repeat(card).take(count)
            })
            .collect()
    }
}

impl From<Color> for Card {
    fn from(color: Color) -> Self {
        Card::of(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests for `Color`.

    #[test]
    fn color_count() {
        assert_eq!(Color::COUNT, 8);
        assert_eq!(Color::iter().count(), 8);
    }

    #[test]
    fn color_to_string() {
        assert_eq!(Color::Violet.to_string(), "violet");
        assert_eq!(Color::White.to_string(), "white");
    }

    #[test]
    fn color_to_json() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&Color::Orange)?, "\"orange\"");

        Ok(())
    }

    #[test]
    fn json_to_color() -> serde_json::Result<()> {
        assert_eq!(serde_json::from_str::<Color>("\"green\"")?, Color::Green);
        assert!(serde_json::from_str::<Color>("\"pink\"").is_err());

        Ok(())
    }

    // Tests for `Card`.

    #[test]
    fn card_count() {
        assert_eq!(Card::COUNT, 9);
    }

    #[test]
    fn cars_follow_color_order() {
        let colors: Vec<_> = Card::CARS.iter().map(|card| card.color()).collect();
        let expected: Vec<_> = Color::iter().map(Some).collect();

        assert_eq!(colors, expected);
        assert!(Card::CARS.iter().all(|card| !card.is_locomotive()));
    }

    #[test]
    fn of_color_round_trips() {
        for color in Color::iter() {
            assert_eq!(Card::of(color).color(), Some(color));
            assert_eq!(Card::from(color), Card::of(color));
        }
        assert_eq!(Card::Locomotive.color(), None);
    }

    #[test]
    fn locomotive_sorts_last() {
        assert!(Card::CARS.iter().all(|card| *card < Card::Locomotive));
        assert_eq!(Card::ALL.to_vec(), Card::iter().collect::<Vec<_>>());
    }

    #[test]
    fn full_set_composition() {
        let cards = Card::full_set();

        assert_eq!(cards.len(), 110);
        for car in Card::CARS {
            assert_eq!(cards.count_of(&car), 12);
        }
        assert_eq!(cards.count_of(&Card::Locomotive), 14);
    }

    #[test]
    fn card_to_json() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&Card::Locomotive)?, "\"locomotive\"");
        assert_eq!(serde_json::from_str::<Card>("\"red\"")?, Card::Red);

        Ok(())
    }
}
