use crate::bag::SortedBag;
use crate::card::Card;
use crate::constants::{ADDITIONAL_TUNNEL_CARDS, INITIAL_CARDS_COUNT};
use crate::error::{GameError, Result};
use crate::partition::StationPartition;
use crate::route::Route;
use crate::ticket::Ticket;

use serde::{Deserialize, Serialize};

/// What every player knows about a player: how many tickets and cards they hold, and
/// which routes they claimed.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PublicPlayerState {
    ticket_count: usize,
    card_count: usize,
    routes: Vec<Route>,
    initial_car_count: u8,
}

impl PublicPlayerState {
    pub fn new(
        ticket_count: usize,
        card_count: usize,
        routes: Vec<Route>,
        initial_car_count: u8,
    ) -> Self {
        Self {
            ticket_count,
            card_count,
            routes,
            initial_car_count,
        }
    }

    #[inline]
    pub fn ticket_count(&self) -> usize {
        self.ticket_count
    }

    #[inline]
    pub fn card_count(&self) -> usize {
        self.card_count
    }

    #[inline]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Cars left, i.e. the initial cars minus the total length of the claimed routes.
    pub fn car_count(&self) -> u8 {
        let used: u32 = self.routes.iter().map(|route| route.length() as u32).sum();
        (self.initial_car_count as u32).saturating_sub(used) as u8
    }

    /// Points earned by claiming routes.
    pub fn claim_points(&self) -> u32 {
        self.routes.iter().map(Route::claim_points).sum()
    }
}

/// The complete state of a player: its public part, plus the tickets and the cards in hand.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerState {
    public: PublicPlayerState,
    tickets: SortedBag<Ticket>,
    cards: SortedBag<Card>,
}

impl PlayerState {
    pub fn new(
        tickets: SortedBag<Ticket>,
        cards: SortedBag<Card>,
        routes: Vec<Route>,
        initial_car_count: u8,
    ) -> Self {
        Self {
            public: PublicPlayerState::new(tickets.len(), cards.len(), routes, initial_car_count),
            tickets,
            cards,
        }
    }

    /// The state of a player at the start of the game: no ticket, no route, and exactly
    /// four cards.
    pub fn initial(initial_cards: SortedBag<Card>, initial_car_count: u8) -> Result<Self> {
        if initial_cards.len() != INITIAL_CARDS_COUNT {
            return Err(GameError::invalid(format!(
                "A player starts with {} cards, not {}.",
                INITIAL_CARDS_COUNT,
                initial_cards.len()
            )));
        }
        Ok(Self::new(
            SortedBag::new(),
            initial_cards,
            Vec::new(),
            initial_car_count,
        ))
    }

    #[inline]
    pub fn public(&self) -> &PublicPlayerState {
        &self.public
    }

    #[inline]
    pub fn to_public(&self) -> PublicPlayerState {
        self.public.clone()
    }

    #[inline]
    pub fn tickets(&self) -> &SortedBag<Ticket> {
        &self.tickets
    }

    #[inline]
    pub fn cards(&self) -> &SortedBag<Card> {
        &self.cards
    }

    #[inline]
    pub fn routes(&self) -> &[Route] {
        self.public.routes()
    }

    #[inline]
    pub fn car_count(&self) -> u8 {
        self.public.car_count()
    }

    #[inline]
    pub fn claim_points(&self) -> u32 {
        self.public.claim_points()
    }

    fn with(&self, tickets: SortedBag<Ticket>, cards: SortedBag<Card>, routes: Vec<Route>) -> Self {
        Self::new(tickets, cards, routes, self.public.initial_car_count)
    }

    pub fn with_added_tickets(&self, tickets: &SortedBag<Ticket>) -> Self {
        self.with(
            self.tickets.union(tickets),
            self.cards.clone(),
            self.routes().to_vec(),
        )
    }

    pub fn with_added_card(&self, card: Card) -> Self {
        self.with_added_cards(&SortedBag::of(1, card))
    }

    pub fn with_added_cards(&self, cards: &SortedBag<Card>) -> Self {
        self.with(
            self.tickets.clone(),
            self.cards.union(cards),
            self.routes().to_vec(),
        )
    }

    /// Whether the player has enough cars left and the cards to claim `route`.
    pub fn can_claim_route(&self, route: &Route) -> bool {
        self.car_count() >= route.length()
            && route
                .possible_claim_cards()
                .iter()
                .any(|option| self.cards.contains_all(option))
    }

    /// The options of `Route::possible_claim_cards` that the player can afford.
    pub fn possible_claim_cards(&self, route: &Route) -> Result<Vec<SortedBag<Card>>> {
        if self.car_count() < route.length() {
            return Err(GameError::invalid(format!(
                "Cannot claim the route {} of length {} with only {} cars left.",
                route,
                route.length(),
                self.car_count()
            )));
        }
        Ok(route
            .possible_claim_cards()
            .into_iter()
            .filter(|option| self.cards.contains_all(option))
            .collect())
    }

    /// Every way the player can pay the `additional_count` extra cards of a tunnel, given the
    /// cards initially played for it. Options are sorted by ascending number of locomotives.
    ///
    /// Extra cards must match the car card of the initial cards, or be locomotives. If only
    /// locomotives were initially played, only locomotives are accepted.
    pub fn possible_additional_cards(
        &self,
        additional_count: usize,
        initial_cards: &SortedBag<Card>,
        drawn_cards: &SortedBag<Card>,
    ) -> Result<Vec<SortedBag<Card>>> {
        if !(1..=ADDITIONAL_TUNNEL_CARDS).contains(&additional_count) {
            return Err(GameError::invalid(format!(
                "Cannot ask for {} additional cards: it must be between 1 and {}.",
                additional_count, ADDITIONAL_TUNNEL_CARDS
            )));
        }
        if initial_cards.is_empty() || initial_cards.distinct_count() > 2 {
            return Err(GameError::invalid(
                "The initial cards of a tunnel must be of one or two different kinds.",
            ));
        }
        if drawn_cards.len() != ADDITIONAL_TUNNEL_CARDS {
            return Err(GameError::invalid(format!(
                "Exactly {} cards must be drawn to attempt a tunnel, not {}.",
                ADDITIONAL_TUNNEL_CARDS,
                drawn_cards.len()
            )));
        }

        let available = self.cards.difference(initial_cards);
        let locomotives = available.count_of(&Card::Locomotive);
        let reference = Card::CARS
            .iter()
            .copied()
            .find(|car| initial_cards.contains(car));

        let options = match reference {
            None if additional_count <= locomotives => {
                vec![SortedBag::of(additional_count, Card::Locomotive)]
            }
            None => Vec::new(),
            Some(car) => {
                let cars = available.count_of(&car);
                (0..=additional_count)
                    .filter(|used| *used <= locomotives && additional_count - used <= cars)
                    .map(|used| {
                        SortedBag::of(used, Card::Locomotive)
                            .union(&SortedBag::of(additional_count - used, car))
                    })
                    .collect()
            }
        };
        Ok(options)
    }

    /// The state after claiming `route` with `claim_cards`, which leave the hand.
    pub fn with_claimed_route(&self, route: &Route, claim_cards: &SortedBag<Card>) -> Result<Self> {
        if self.car_count() < route.length() {
            return Err(GameError::invalid(format!(
                "Cannot claim the route {} of length {} with only {} cars left.",
                route,
                route.length(),
                self.car_count()
            )));
        }
        if !self.cards.contains_all(claim_cards) {
            return Err(GameError::invalid(format!(
                "Cannot claim the route {} with cards that are not in hand.",
                route
            )));
        }

        let mut routes = self.routes().to_vec();
        routes.push(route.clone());
        Ok(self.with(
            self.tickets.clone(),
            self.cards.difference(claim_cards),
            routes,
        ))
    }

    /// Which stations are linked by the routes of the player.
    pub fn connectivity(&self) -> StationPartition {
        StationPartition::of_routes(self.routes())
    }

    /// Sum of the points of every ticket, negative for tickets that are not fulfilled.
    pub fn ticket_points(&self) -> i32 {
        let connectivity = self.connectivity();
        self.tickets
            .iter()
            .map(|ticket| ticket.points(&connectivity))
            .sum()
    }

    /// Claim points plus ticket points. The longest-trail bonus is not included.
    pub fn final_points(&self) -> i32 {
        self.claim_points() as i32 + self.ticket_points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Color;
    use crate::route::Level;
    use crate::station::Station;
    use pretty_assertions::assert_eq;

    fn cards(items: &[Card]) -> SortedBag<Card> {
        items.iter().copied().collect()
    }

    fn stations() -> Vec<Station> {
        vec![
            Station::new(0, "Lausanne"),
            Station::new(1, "Fribourg"),
            Station::new(2, "Bern"),
            Station::new(3, "Lucerne"),
        ]
    }

    fn route(s1: usize, s2: usize, length: u8, level: Level, color: Option<Color>) -> Route {
        let s = stations();
        Route::from_parts(
            format!("R{}{}", s1, s2),
            s[s1].clone(),
            s[s2].clone(),
            length,
            level,
            color,
        )
    }

    fn player(hand: &[Card]) -> PlayerState {
        PlayerState::new(SortedBag::new(), cards(hand), Vec::new(), 40)
    }

    // Tests for construction.

    #[test]
    fn initial_needs_four_cards() {
        assert!(PlayerState::initial(SortedBag::of(4, Card::Red), 40).is_ok());
        assert!(PlayerState::initial(SortedBag::of(3, Card::Red), 40).is_err());
        assert!(PlayerState::initial(SortedBag::of(5, Card::Red), 40).is_err());
    }

    #[test]
    fn counts_follow_the_private_state() -> Result<()> {
        let s = stations();
        let tickets = SortedBag::of(1, Ticket::single(s[0].clone(), s[2].clone(), 4)?);
        let state = player(&[Card::Red, Card::Blue])
            .with_added_card(Card::Locomotive)
            .with_added_tickets(&tickets);

        assert_eq!(state.public().card_count(), 3);
        assert_eq!(state.public().ticket_count(), 1);
        assert_eq!(state.to_public(), *state.public());

        Ok(())
    }

    // Tests for claiming.

    #[test]
    fn can_claim_route() {
        let surface = route(0, 1, 2, Level::Surface, Some(Color::Red));

        assert!(player(&[Card::Red, Card::Red]).can_claim_route(&surface));
        assert!(!player(&[Card::Red, Card::Locomotive]).can_claim_route(&surface));

        let tunnel = route(0, 1, 2, Level::Tunnel, Some(Color::Red));
        assert!(player(&[Card::Red, Card::Locomotive]).can_claim_route(&tunnel));
    }

    #[test]
    fn cannot_claim_without_cars() {
        let state = PlayerState::new(SortedBag::new(), SortedBag::of(6, Card::Red), Vec::new(), 3);
        let long = route(0, 1, 4, Level::Surface, None);

        assert!(!state.can_claim_route(&long));
        assert!(state.possible_claim_cards(&long).is_err());
        assert!(state
            .with_claimed_route(&long, &SortedBag::of(4, Card::Red))
            .is_err());
    }

    #[test]
    fn affordable_claim_cards() -> Result<()> {
        let state = player(&[Card::Red, Card::Red, Card::Blue, Card::Locomotive]);
        let tunnel = route(0, 1, 2, Level::Tunnel, None);

        assert_eq!(
            state.possible_claim_cards(&tunnel)?,
            vec![
                SortedBag::of(2, Card::Red),
                cards(&[Card::Blue, Card::Locomotive]),
                cards(&[Card::Red, Card::Locomotive]),
            ]
        );

        Ok(())
    }

    #[test]
    fn claiming_a_route() -> Result<()> {
        let state = player(&[Card::Red, Card::Red, Card::Red, Card::Blue]);
        let claimed = state.with_claimed_route(
            &route(0, 1, 3, Level::Surface, None),
            &SortedBag::of(3, Card::Red),
        )?;

        assert_eq!(claimed.cards(), &cards(&[Card::Blue]));
        assert_eq!(claimed.routes().len(), 1);
        assert_eq!(claimed.car_count(), 37);
        assert_eq!(claimed.claim_points(), 4);
        assert!(state
            .with_claimed_route(&route(0, 1, 3, Level::Surface, None), &SortedBag::of(3, Card::Blue))
            .is_err());

        Ok(())
    }

    // Tests for `possible_additional_cards`.

    #[test]
    fn additional_cards_with_a_car_reference() -> Result<()> {
        let state = player(&[
            Card::Red,
            Card::Red,
            Card::Red,
            Card::Locomotive,
            Card::Locomotive,
            Card::Blue,
        ]);
        let initial = SortedBag::of(2, Card::Red);
        let drawn = cards(&[Card::Red, Card::Locomotive, Card::Green]);

        assert_eq!(
            state.possible_additional_cards(2, &initial, &drawn)?,
            vec![
                cards(&[Card::Red, Card::Locomotive]),
                SortedBag::of(2, Card::Locomotive),
            ]
        );
        assert_eq!(
            state.possible_additional_cards(1, &initial, &drawn)?,
            vec![SortedBag::of(1, Card::Red), SortedBag::of(1, Card::Locomotive)]
        );

        Ok(())
    }

    #[test]
    fn additional_cards_with_only_locomotives() -> Result<()> {
        let state = player(&[Card::Locomotive, Card::Locomotive, Card::Locomotive, Card::Red]);
        let initial = SortedBag::of(2, Card::Locomotive);
        let drawn = cards(&[Card::Locomotive, Card::Red, Card::Red]);

        assert_eq!(
            state.possible_additional_cards(1, &initial, &drawn)?,
            vec![SortedBag::of(1, Card::Locomotive)]
        );
        assert_eq!(state.possible_additional_cards(2, &initial, &drawn)?, Vec::new());

        Ok(())
    }

    #[test]
    fn additional_cards_preconditions() {
        let state = player(&[Card::Red, Card::Red]);
        let drawn = cards(&[Card::Red, Card::Red, Card::Red]);
        let initial = SortedBag::of(1, Card::Red);

        assert!(state.possible_additional_cards(0, &initial, &drawn).is_err());
        assert!(state.possible_additional_cards(4, &initial, &drawn).is_err());
        assert!(state
            .possible_additional_cards(1, &SortedBag::new(), &drawn)
            .is_err());
        assert!(state
            .possible_additional_cards(1, &cards(&[Card::Red, Card::Blue, Card::Locomotive]), &drawn)
            .is_err());
        assert!(state
            .possible_additional_cards(1, &initial, &SortedBag::of(2, Card::Red))
            .is_err());
    }

    // Tests for points.

    #[test]
    fn ticket_and_final_points() -> Result<()> {
        let s = stations();
        let tickets: SortedBag<Ticket> = [
            Ticket::single(s[0].clone(), s[2].clone(), 4)?,
            Ticket::single(s[0].clone(), s[3].clone(), 9)?,
        ]
        .into_iter()
        .collect();
        let state = PlayerState::new(
            tickets,
            SortedBag::new(),
            vec![
                route(0, 1, 3, Level::Surface, None),
                route(1, 2, 1, Level::Surface, None),
            ],
            40,
        );

        // Lausanne - Bern is connected, Lausanne - Lucerne is not.
        assert_eq!(state.ticket_points(), 4 - 9);
        assert_eq!(state.claim_points(), 4 + 1);
        assert_eq!(state.final_points(), 0);
        assert_eq!(state.car_count(), 36);

        Ok(())
    }

    #[test]
    fn player_state_json_round_trip() -> serde_json::Result<()> {
        let state = player(&[Card::Red, Card::Locomotive]);
        let json = serde_json::to_string(&state)?;

        assert_eq!(serde_json::from_str::<PlayerState>(&json)?, state);

        Ok(())
    }
}
