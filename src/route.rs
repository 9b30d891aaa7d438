use crate::bag::SortedBag;
use crate::card::{Card, Color};
use crate::constants::{route_claim_points, ADDITIONAL_TUNNEL_CARDS, MAX_ROUTE_LENGTH, MIN_ROUTE_LENGTH};
use crate::error::{GameError, Result};
use crate::station::Station;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use strum_macros::Display;

/// Whether a route runs on the surface, or through a tunnel.
///
/// Claiming a tunnel may cost additional cards, see [`Route::additional_claim_cards_count`].
#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    Surface,
    Tunnel,
}

/// A claimable connection between two adjacent stations.
///
/// There can be two "twin" routes between the same two stations; each is a distinct `Route`
/// with its own id.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Route {
    id: Cow<'static, str>,
    station1: Station,
    station2: Station,
    length: u8,
    level: Level,
    /// `None` means that cards of any single color can be used to claim the route.
    color: Option<Color>,
}

impl Route {
    /// Creates a route, after checking that both stations differ and that the length is allowed.
    ///
    /// # Example
    /// ```
    /// use rail_network::card::Color;
    /// use rail_network::route::{Level, Route};
    /// use rail_network::station::Station;
    ///
    /// let (lausanne, fribourg) = (Station::new(0, "Lausanne"), Station::new(1, "Fribourg"));
    ///
    /// let route = Route::new("LAU_FRI_1", lausanne.clone(), fribourg.clone(), 3, Level::Surface, Some(Color::Red));
    /// assert!(route.is_ok());
    ///
    /// let route = Route::new("LAU_LAU_1", lausanne.clone(), lausanne, 3, Level::Surface, None);
    /// assert!(route.is_err());
    /// ```
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        station1: Station,
        station2: Station,
        length: u8,
        level: Level,
        color: Option<Color>,
    ) -> Result<Self> {
        if station1.id() == station2.id() {
            return Err(GameError::invalid(format!(
                "Cannot create a route from {} to itself.",
                station1
            )));
        }
        if !(MIN_ROUTE_LENGTH..=MAX_ROUTE_LENGTH).contains(&length) {
            return Err(GameError::invalid(format!(
                "Cannot create a route of length {}: it must be between {} and {}.",
                length, MIN_ROUTE_LENGTH, MAX_ROUTE_LENGTH
            )));
        }
        Ok(Self::from_parts(id, station1, station2, length, level, color))
    }

    /// Unchecked constructor, for static board data.
    pub(crate) fn from_parts(
        id: impl Into<Cow<'static, str>>,
        station1: Station,
        station2: Station,
        length: u8,
        level: Level,
        color: Option<Color>,
    ) -> Self {
        Self {
            id: id.into(),
            station1,
            station2,
            length,
            level,
            color,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn station1(&self) -> &Station {
        &self.station1
    }

    #[inline]
    pub fn station2(&self) -> &Station {
        &self.station2
    }

    #[inline]
    pub fn stations(&self) -> [&Station; 2] {
        [&self.station1, &self.station2]
    }

    #[inline]
    pub fn length(&self) -> u8 {
        self.length
    }

    #[inline]
    pub fn level(&self) -> Level {
        self.level
    }

    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    #[inline]
    pub fn is_tunnel(&self) -> bool {
        self.level == Level::Tunnel
    }

    /// Whether both routes link the same two stations, in whatever direction.
    pub fn joins_same_stations(&self, other: &Route) -> bool {
        let (a1, a2) = (self.station1.id(), self.station2.id());
        let (b1, b2) = (other.station1.id(), other.station2.id());
        (a1 == b1 && a2 == b2) || (a1 == b2 && a2 == b1)
    }

    /// The end of the route that is not `station`.
    pub fn station_opposite(&self, station: &Station) -> Result<&Station> {
        if station.id() == self.station1.id() {
            Ok(&self.station2)
        } else if station.id() == self.station2.id() {
            Ok(&self.station1)
        } else {
            Err(GameError::invalid(format!(
                "{} is not an end of the route {}.",
                station, self
            )))
        }
    }

    /// Every card combination that can be played to claim this route, sorted by ascending
    /// number of locomotives, then by color.
    ///
    /// Surface routes only accept car cards. A colorless surface route thus has one option per
    /// color. Tunnels also accept locomotives in place of any car card.
    ///
    /// # Example
    /// ```
    /// use rail_network::card::{Card, Color};
    /// use rail_network::route::{Level, Route};
    /// use rail_network::station::Station;
    ///
    /// let (s1, s2) = (Station::new(0, "Lausanne"), Station::new(1, "Fribourg"));
    ///
    /// let surface = Route::new("A", s1.clone(), s2.clone(), 2, Level::Surface, None).unwrap();
    /// assert_eq!(surface.possible_claim_cards().len(), 8);
    ///
    /// let tunnel = Route::new("B", s1, s2, 2, Level::Tunnel, Some(Color::Blue)).unwrap();
    /// let options = tunnel.possible_claim_cards();
    /// assert_eq!(options.len(), 3);
    /// assert_eq!(options[2].count_of(&Card::Locomotive), 2);
    /// ```
    pub fn possible_claim_cards(&self) -> Vec<SortedBag<Card>> {
        let length = self.length as usize;
        let cars: Vec<Card> = match self.color {
            Some(color) => vec![Card::of(color)],
            None => Card::CARS.to_vec(),
        };

        if !self.is_tunnel() {
            return cars
                .into_iter()
                .map(|car| SortedBag::of(length, car))
                .collect();
        }

        let mut options = Vec::with_capacity(length * cars.len() + 1);
        for locomotives in 0..length {
            for car in &cars {
                options.push(
                    SortedBag::of(locomotives, Card::Locomotive)
                        .union(&SortedBag::of(length - locomotives, *car)),
                );
            }
        }
        options.push(SortedBag::of(length, Card::Locomotive));
        options
    }

    /// How many additional cards must be played to claim this tunnel, given the cards initially
    /// played and the three cards drawn from the deck.
    ///
    /// Every drawn card that is a locomotive, or that appears among the initial cards, costs
    /// one more card.
    pub fn additional_claim_cards_count(
        &self,
        claim_cards: &SortedBag<Card>,
        drawn_cards: &SortedBag<Card>,
    ) -> Result<usize> {
        if !self.is_tunnel() {
            return Err(GameError::invalid(format!(
                "The route {} is not a tunnel.",
                self
            )));
        }
        if drawn_cards.len() != ADDITIONAL_TUNNEL_CARDS {
            return Err(GameError::invalid(format!(
                "Exactly {} cards must be drawn to attempt a tunnel, not {}.",
                ADDITIONAL_TUNNEL_CARDS,
                drawn_cards.len()
            )));
        }

        Ok(drawn_cards
            .iter()
            .filter(|card| card.is_locomotive() || claim_cards.contains(card))
            .count())
    }

    /// Points granted for claiming this route.
    #[inline]
    pub fn claim_points(&self) -> u32 {
        route_claim_points(self.length)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.station1, self.station2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lausanne() -> Station {
        Station::new(0, "Lausanne")
    }

    fn fribourg() -> Station {
        Station::new(1, "Fribourg")
    }

    fn route(length: u8, level: Level, color: Option<Color>) -> Route {
        Route::from_parts("LAU_FRI_1", lausanne(), fribourg(), length, level, color)
    }

    fn cards(items: &[Card]) -> SortedBag<Card> {
        items.iter().copied().collect()
    }

    // Tests for `Route::new`.

    #[test]
    fn invalid_lengths() {
        assert!(Route::new("X", lausanne(), fribourg(), 0, Level::Surface, None).is_err());
        assert!(Route::new("X", lausanne(), fribourg(), 7, Level::Surface, None).is_err());
        assert!(Route::new("X", lausanne(), fribourg(), 6, Level::Surface, None).is_ok());
    }

    #[test]
    fn same_station_twice() {
        assert_eq!(
            Route::new("X", lausanne(), lausanne(), 1, Level::Surface, None),
            Err(GameError::invalid("Cannot create a route from Lausanne to itself."))
        );
    }

    // Tests for stations.

    #[test]
    fn station_opposite() {
        let route = route(1, Level::Surface, None);

        assert_eq!(route.station_opposite(&lausanne()), Ok(&fribourg()));
        assert_eq!(route.station_opposite(&fribourg()), Ok(&lausanne()));
        assert!(route.station_opposite(&Station::new(2, "Bern")).is_err());
    }

    #[test]
    fn twin_routes_join_same_stations() {
        let route = route(1, Level::Surface, None);
        let reversed =
            Route::from_parts("LAU_FRI_2", fribourg(), lausanne(), 1, Level::Surface, None);
        let other = Route::from_parts(
            "LAU_BER_1",
            lausanne(),
            Station::new(2, "Bern"),
            1,
            Level::Surface,
            None,
        );

        assert!(route.joins_same_stations(&reversed));
        assert!(!route.joins_same_stations(&other));
    }

    #[test]
    fn route_to_string() {
        assert_eq!(route(1, Level::Surface, None).to_string(), "Lausanne - Fribourg");
    }

    // Tests for `possible_claim_cards`.

    #[test]
    fn colorless_surface_route_options() {
        let options = route(2, Level::Surface, None).possible_claim_cards();
        let expected: Vec<_> = Card::CARS.iter().map(|car| SortedBag::of(2, *car)).collect();

        assert_eq!(options, expected);
    }

    #[test]
    fn colored_surface_route_options() {
        assert_eq!(
            route(3, Level::Surface, Some(Color::Green)).possible_claim_cards(),
            vec![SortedBag::of(3, Card::Green)]
        );
    }

    #[test]
    fn colored_tunnel_options() {
        assert_eq!(
            route(2, Level::Tunnel, Some(Color::Violet)).possible_claim_cards(),
            vec![
                cards(&[Card::Violet, Card::Violet]),
                cards(&[Card::Violet, Card::Locomotive]),
                cards(&[Card::Locomotive, Card::Locomotive]),
            ]
        );
    }

    #[test]
    fn colored_tunnel_has_one_more_option_than_its_length() {
        for length in MIN_ROUTE_LENGTH..=MAX_ROUTE_LENGTH {
            let options = route(length, Level::Tunnel, Some(Color::Red)).possible_claim_cards();
            assert_eq!(options.len(), length as usize + 1);
        }
    }

    #[test]
    fn colorless_tunnel_options() {
        let options = route(2, Level::Tunnel, None).possible_claim_cards();

        assert_eq!(options.len(), 17);
        assert_eq!(options[0], SortedBag::of(2, Card::Black));
        assert_eq!(options[7], SortedBag::of(2, Card::White));
        assert_eq!(options[8], cards(&[Card::Black, Card::Locomotive]));
        assert_eq!(options[16], SortedBag::of(2, Card::Locomotive));
    }

    // Tests for `additional_claim_cards_count`.

    #[test]
    fn additional_cards_count() -> Result<()> {
        let tunnel = route(2, Level::Tunnel, None);

        assert_eq!(
            tunnel.additional_claim_cards_count(
                &cards(&[Card::Red, Card::Red]),
                &cards(&[Card::Red, Card::Locomotive, Card::Blue])
            )?,
            2
        );
        assert_eq!(
            tunnel.additional_claim_cards_count(
                &cards(&[Card::Red, Card::Locomotive]),
                &cards(&[Card::Green, Card::White, Card::Blue])
            )?,
            0
        );
        assert_eq!(
            tunnel.additional_claim_cards_count(
                &cards(&[Card::Locomotive, Card::Locomotive]),
                &cards(&[Card::Locomotive, Card::Locomotive, Card::Locomotive])
            )?,
            3
        );

        Ok(())
    }

    #[test]
    fn additional_cards_require_a_tunnel_and_three_cards() {
        let drawn = cards(&[Card::Red, Card::Red, Card::Red]);
        let claim = cards(&[Card::Red]);

        assert!(route(1, Level::Surface, None)
            .additional_claim_cards_count(&claim, &drawn)
            .is_err());
        assert!(route(1, Level::Tunnel, None)
            .additional_claim_cards_count(&claim, &cards(&[Card::Red, Card::Red]))
            .is_err());
    }

    // Tests for `claim_points`.

    #[test]
    fn claim_points() {
        assert_eq!(route(1, Level::Surface, None).claim_points(), 1);
        assert_eq!(route(3, Level::Surface, None).claim_points(), 4);
        assert_eq!(route(6, Level::Tunnel, None).claim_points(), 15);
    }

    #[test]
    fn route_to_json() -> serde_json::Result<()> {
        let route = route(2, Level::Tunnel, Some(Color::Red));
        let json = serde_json::to_string(&route)?;

        assert_eq!(
            json,
            r#"{"id":"LAU_FRI_1","station1":{"id":0,"name":"Lausanne"},"station2":{"id":1,"name":"Fribourg"},"length":2,"level":"tunnel","color":"red"}"#
        );
        assert_eq!(serde_json::from_str::<Route>(&json)?, route);

        Ok(())
    }
}
