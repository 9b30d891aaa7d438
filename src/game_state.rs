use crate::bag::SortedBag;
use crate::board::Board;
use crate::card::Card;
use crate::card_state::{CardState, PublicCardState};
use crate::config::{GameConfig, PlayerId};
use crate::constants::{
    ADDITIONAL_TUNNEL_CARDS, FACE_UP_CARDS_COUNT, INITIAL_CARDS_COUNT, LAST_TURN_CAR_COUNT,
    MAX_PLAYERS, MIN_PLAYERS,
};
use crate::deck::Deck;
use crate::error::{GameError, Result};
use crate::player_state::{PlayerState, PublicPlayerState};
use crate::route::Route;
use crate::ticket::Ticket;

use im::Vector;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A route can be claimed if nobody owns it and, when it has a twin, if the twin is free
/// too or, in games allowing twins, owned by somebody else.
fn is_claimable(
    route: &Route,
    board: &Board,
    current_player: PlayerId,
    twin_routes_allowed: bool,
    owner_of: impl Fn(&Route) -> Option<PlayerId>,
) -> bool {
    if owner_of(route).is_some() {
        return false;
    }
    match board.twin_of(route).and_then(|twin| owner_of(twin)) {
        None => true,
        Some(owner) => twin_routes_allowed && owner != current_player,
    }
}

/// Checks that the players designated by a state are seated in it.
fn check_players(
    player_count: usize,
    current_player: PlayerId,
    last_player: Option<PlayerId>,
) -> Result<()> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return Err(GameError::invalid(format!(
            "Cannot hold the state of {} players: there must be at least {}, and at most {}.",
            player_count, MIN_PLAYERS, MAX_PLAYERS
        )));
    }
    for player in std::iter::once(current_player).chain(last_player) {
        if player.index() >= player_count {
            return Err(GameError::IndexOutOfRange {
                index: player.index(),
                len: player_count,
            });
        }
    }
    Ok(())
}

/// The part of the game state every player knows about.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "RawPublicGameState")]
pub struct PublicGameState {
    ticket_count: usize,
    card_state: PublicCardState,
    current_player: PlayerId,
    player_states: SmallVec<[PublicPlayerState; MAX_PLAYERS]>,
    last_player: Option<PlayerId>,
}

#[derive(Deserialize)]
struct RawPublicGameState {
    ticket_count: usize,
    card_state: PublicCardState,
    current_player: PlayerId,
    player_states: SmallVec<[PublicPlayerState; MAX_PLAYERS]>,
    last_player: Option<PlayerId>,
}

impl TryFrom<RawPublicGameState> for PublicGameState {
    type Error = GameError;

    fn try_from(raw: RawPublicGameState) -> Result<Self> {
        Self::new(
            raw.ticket_count,
            raw.card_state,
            raw.current_player,
            raw.player_states,
            raw.last_player,
        )
    }
}

impl PublicGameState {
    pub fn new(
        ticket_count: usize,
        card_state: PublicCardState,
        current_player: PlayerId,
        player_states: SmallVec<[PublicPlayerState; MAX_PLAYERS]>,
        last_player: Option<PlayerId>,
    ) -> Result<Self> {
        check_players(player_states.len(), current_player, last_player)?;
        Ok(Self {
            ticket_count,
            card_state,
            current_player,
            player_states,
            last_player,
        })
    }

    #[inline]
    pub fn ticket_count(&self) -> usize {
        self.ticket_count
    }

    #[inline]
    pub fn can_draw_tickets(&self) -> bool {
        self.ticket_count > 0
    }

    #[inline]
    pub fn card_state(&self) -> &PublicCardState {
        &self.card_state
    }

    /// Cards can be drawn as long as the deck and the discards hold at least five cards together.
    pub fn can_draw_cards(&self) -> bool {
        self.card_state.deck_size() + self.card_state.discards_size() >= FACE_UP_CARDS_COUNT
    }

    /// A tunnel claim turns over three cards, taken from the deck and then the discards.
    pub fn can_attempt_tunnel(&self) -> bool {
        self.card_state.deck_size() + self.card_state.discards_size() >= ADDITIONAL_TUNNEL_CARDS
    }

    #[inline]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[inline]
    pub fn player_count(&self) -> usize {
        self.player_states.len()
    }

    pub fn player_state(&self, player: PlayerId) -> Result<&PublicPlayerState> {
        self.player_states
            .get(player.index())
            .ok_or(GameError::IndexOutOfRange {
                index: player.index(),
                len: self.player_states.len(),
            })
    }

    pub fn current_player_state(&self) -> &PublicPlayerState {
        &self.player_states[self.current_player.index()]
    }

    /// Every route claimed so far, by any player.
    pub fn claimed_routes(&self) -> impl Iterator<Item = &Route> + '_ {
        self.player_states
            .iter()
            .flat_map(|state| state.routes().iter())
    }

    pub fn owner_of(&self, route: &Route) -> Option<PlayerId> {
        self.player_states
            .iter()
            .position(|state| state.routes().iter().any(|owned| owned.id() == route.id()))
            .map(|index| PlayerId::new(index as u8))
    }

    /// Whether the current player may claim `route`, as far as ownership goes.
    pub fn is_route_claimable(&self, route: &Route, board: &Board) -> bool {
        is_claimable(
            route,
            board,
            self.current_player,
            self.player_count() > 3,
            |route| self.owner_of(route),
        )
    }

    #[inline]
    pub fn last_player(&self) -> Option<PlayerId> {
        self.last_player
    }
}

/// The complete state of a game.
///
/// Every transition returns a new state and leaves the current one untouched. Player states
/// are kept in a persistent vector, so a transition only copies the player it changes.
///
/// Deserializing checks that there is one player state per configured player, and that the
/// current and last players are among them.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    config: GameConfig,
    ticket_deck: Deck<Ticket>,
    card_state: CardState,
    player_states: Vector<PlayerState>,
    current_player: PlayerId,
    last_player: Option<PlayerId>,
}

#[derive(Deserialize)]
struct RawGameState {
    config: GameConfig,
    ticket_deck: Deck<Ticket>,
    card_state: CardState,
    player_states: Vector<PlayerState>,
    current_player: PlayerId,
    last_player: Option<PlayerId>,
}

impl TryFrom<RawGameState> for GameState {
    type Error = GameError;

    fn try_from(raw: RawGameState) -> Result<Self> {
        if raw.player_states.len() != raw.config.player_count() {
            return Err(GameError::invalid(format!(
                "Cannot hold {} player states in a game of {} players.",
                raw.player_states.len(),
                raw.config.player_count()
            )));
        }
        check_players(raw.player_states.len(), raw.current_player, raw.last_player)?;
        Ok(Self {
            config: raw.config,
            ticket_deck: raw.ticket_deck,
            card_state: raw.card_state,
            player_states: raw.player_states,
            current_player: raw.current_player,
            last_player: raw.last_player,
        })
    }
}

impl GameState {
    /// The state of a fresh game:
    /// - the cards, then the tickets, are shuffled;
    /// - every player, in seating order, receives the four top cards;
    /// - the five next cards are laid face up;
    /// - the first player is chosen at random.
    ///
    /// # Example
    /// ```
    /// use rail_network::board::Board;
    /// use rail_network::config::GameConfig;
    /// use rail_network::game_state::GameState;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let config = GameConfig::new(3).unwrap();
    /// let mut rng = ChaCha8Rng::seed_from_u64(2021);
    /// let state = GameState::initial(config, &Board::usa().ticket_set(), &mut rng).unwrap();
    ///
    /// assert_eq!(state.ticket_count(), 30);
    /// assert_eq!(state.card_state().deck_size(), 110 - 3 * 4 - 5);
    /// ```
    pub fn initial<R: Rng + ?Sized>(
        config: GameConfig,
        tickets: &SortedBag<Ticket>,
        rng: &mut R,
    ) -> Result<Self> {
        let mut cards = Deck::of(&Card::full_set(), rng);
        let ticket_deck = Deck::of(tickets, rng);

        let mut player_states = Vector::new();
        for _ in config.player_ids() {
            player_states.push_back(PlayerState::initial(
                cards.top_cards(INITIAL_CARDS_COUNT)?,
                config.initial_car_count(),
            )?);
            cards = cards.without_top_cards(INITIAL_CARDS_COUNT)?;
        }

        let current_player = PlayerId::new(rng.gen_range(0..config.player_count()) as u8);
        Ok(Self {
            card_state: CardState::of(&cards)?,
            config,
            ticket_deck,
            player_states,
            current_player,
            last_player: None,
        })
    }

    pub fn to_public(&self) -> PublicGameState {
        PublicGameState {
            ticket_count: self.ticket_deck.len(),
            card_state: self.card_state.to_public(),
            current_player: self.current_player,
            player_states: self
                .player_states
                .iter()
                .map(PlayerState::to_public)
                .collect(),
            last_player: self.last_player,
        }
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn ticket_count(&self) -> usize {
        self.ticket_deck.len()
    }

    #[inline]
    pub fn can_draw_tickets(&self) -> bool {
        !self.ticket_deck.is_empty()
    }

    #[inline]
    pub fn card_state(&self) -> &CardState {
        &self.card_state
    }

    pub fn can_draw_cards(&self) -> bool {
        self.card_state.deck_size() + self.card_state.discards_size() >= FACE_UP_CARDS_COUNT
    }

    pub fn can_attempt_tunnel(&self) -> bool {
        self.card_state.deck_size() + self.card_state.discards_size() >= ADDITIONAL_TUNNEL_CARDS
    }

    #[inline]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[inline]
    pub fn last_player(&self) -> Option<PlayerId> {
        self.last_player
    }

    pub fn player_state(&self, player: PlayerId) -> Result<&PlayerState> {
        self.player_states
            .get(player.index())
            .ok_or(GameError::IndexOutOfRange {
                index: player.index(),
                len: self.player_states.len(),
            })
    }

    pub fn current_player_state(&self) -> &PlayerState {
        &self.player_states[self.current_player.index()]
    }

    pub fn owner_of(&self, route: &Route) -> Option<PlayerId> {
        self.player_states
            .iter()
            .position(|state| state.routes().iter().any(|owned| owned.id() == route.id()))
            .map(|index| PlayerId::new(index as u8))
    }

    /// Whether the current player may claim `route`, as far as ownership goes.
    pub fn is_route_claimable(&self, route: &Route, board: &Board) -> bool {
        is_claimable(
            route,
            board,
            self.current_player,
            self.config.twin_routes_allowed(),
            |route| self.owner_of(route),
        )
    }

    fn with_player_state(&self, player: PlayerId, state: PlayerState) -> Self {
        Self {
            player_states: self.player_states.update(player.index(), state),
            ..self.clone()
        }
    }

    fn with_card_state(&self, card_state: CardState) -> Self {
        Self {
            card_state,
            ..self.clone()
        }
    }

    /// The `count` tickets on top of the ticket deck.
    pub fn top_tickets(&self, count: usize) -> Result<SortedBag<Ticket>> {
        self.ticket_deck.top_cards(count)
    }

    pub fn without_top_tickets(&self, count: usize) -> Result<Self> {
        Ok(Self {
            ticket_deck: self.ticket_deck.without_top_cards(count)?,
            ..self.clone()
        })
    }

    pub fn top_card(&self) -> Result<Card> {
        self.card_state.top_deck_card()
    }

    pub fn without_top_card(&self) -> Result<Self> {
        Ok(self.with_card_state(self.card_state.without_top_deck_card()?))
    }

    pub fn with_more_discarded_cards(&self, cards: &SortedBag<Card>) -> Self {
        self.with_card_state(self.card_state.with_more_discarded_cards(cards))
    }

    /// Shuffles the discards into a new deck if, and only if, the deck is empty.
    pub fn with_cards_deck_recreated_if_needed<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self> {
        if self.card_state.is_deck_empty() {
            Ok(self.with_card_state(self.card_state.with_deck_recreated_from_discards(rng)?))
        } else {
            Ok(self.clone())
        }
    }

    /// Gives the tickets a player kept at the start of the game. The player must not hold
    /// any ticket yet.
    pub fn with_initially_chosen_tickets(
        &self,
        player: PlayerId,
        chosen: &SortedBag<Ticket>,
    ) -> Result<Self> {
        let state = self.player_state(player)?;
        if !state.tickets().is_empty() {
            return Err(GameError::invalid(format!(
                "The {} already chose their initial tickets.",
                player
            )));
        }
        Ok(self.with_player_state(player, state.with_added_tickets(chosen)))
    }

    /// Removes the `drawn` tickets from the top of the deck, and gives the `chosen` ones to
    /// the current player.
    pub fn with_chosen_additional_tickets(
        &self,
        drawn: &SortedBag<Ticket>,
        chosen: &SortedBag<Ticket>,
    ) -> Result<Self> {
        if !drawn.contains_all(chosen) {
            return Err(GameError::invalid(
                "Cannot keep tickets that were not drawn.",
            ));
        }

        let state = self.current_player_state().with_added_tickets(chosen);
        Ok(self
            .without_top_tickets(drawn.len())?
            .with_player_state(self.current_player, state))
    }

    /// The current player takes the face-up card at `slot`, which is replaced by the top
    /// card of the deck.
    pub fn with_drawn_face_up_card(&self, slot: usize) -> Result<Self> {
        let card = self.card_state.face_up_card(slot)?;
        let card_state = self.card_state.with_drawn_face_up_card(slot)?;
        let state = self.current_player_state().with_added_card(card);
        Ok(self
            .with_card_state(card_state)
            .with_player_state(self.current_player, state))
    }

    /// The current player takes the top card of the deck.
    pub fn with_blindly_drawn_card(&self) -> Result<Self> {
        let card = self.card_state.top_deck_card()?;
        let card_state = self.card_state.without_top_deck_card()?;
        let state = self.current_player_state().with_added_card(card);
        Ok(self
            .with_card_state(card_state)
            .with_player_state(self.current_player, state))
    }

    /// The current player claims `route` with `cards`, which go to the discards.
    pub fn with_claimed_route(&self, route: &Route, cards: &SortedBag<Card>) -> Result<Self> {
        let state = self.current_player_state().with_claimed_route(route, cards)?;
        Ok(self
            .with_more_discarded_cards(cards)
            .with_player_state(self.current_player, state))
    }

    /// Whether the final round starts after the turn of the current player: nobody triggered
    /// it yet, and the current player has two cars or fewer.
    pub fn last_turn_begins(&self) -> bool {
        self.last_player.is_none() && self.current_player_state().car_count() <= LAST_TURN_CAR_COUNT
    }

    /// Passes the turn to the next player. If the final round begins, the current player is
    /// recorded as the last one to play.
    pub fn for_next_turn(&self) -> Self {
        let last_player = if self.last_turn_begins() {
            Some(self.current_player)
        } else {
            self.last_player
        };
        Self {
            current_player: self.current_player.next(&self.config),
            last_player,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Color;
    use crate::route::Level;
    use crate::usa::{ATLANTA, CHARLESTON, RALEIGH};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn state(player_count: usize) -> GameState {
        let config = GameConfig::new(player_count).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2021);
        GameState::initial(config, &Board::usa().ticket_set(), &mut rng).unwrap()
    }

    fn route(board: &Board, id: &str) -> Route {
        board.route(id).cloned().unwrap()
    }

    // Tests for `initial`.

    #[test]
    fn initial_state() {
        let state = state(2);

        assert_eq!(state.ticket_count(), 30);
        assert_eq!(state.card_state().deck_size(), 97);
        assert_eq!(state.card_state().discards_size(), 0);
        assert_eq!(state.last_player(), None);
        for player in state.config().player_ids() {
            let player_state = state.player_state(player).unwrap();
            assert_eq!(player_state.cards().len(), 4);
            assert_eq!(player_state.tickets().len(), 0);
            assert_eq!(player_state.car_count(), 40);
        }
    }

    #[test]
    fn initial_state_is_reproducible() {
        assert_eq!(state(4), state(4));
    }

    #[test]
    fn cards_are_conserved() {
        let state = state(3);
        let in_hands: usize = state
            .config()
            .player_ids()
            .map(|player| state.player_state(player).unwrap().cards().len())
            .sum();

        assert_eq!(in_hands + 5 + state.card_state().deck_size(), 110);
    }

    // Tests for tickets.

    #[test]
    fn initially_chosen_tickets() -> Result<()> {
        let state = state(2);
        let player = PlayerId::new(1);
        let chosen = state.top_tickets(2)?;
        let next = state.with_initially_chosen_tickets(player, &chosen)?;

        assert_eq!(next.player_state(player)?.tickets(), &chosen);
        assert_eq!(next.ticket_count(), 30);
        assert!(next.with_initially_chosen_tickets(player, &chosen).is_err());
        assert!(state
            .with_initially_chosen_tickets(PlayerId::new(2), &chosen)
            .is_err());

        Ok(())
    }

    #[test]
    fn chosen_additional_tickets() -> Result<()> {
        let state = state(2);
        let drawn = state.top_tickets(3)?;
        let chosen: SortedBag<Ticket> = drawn.iter().take(1).cloned().collect();
        let next = state.with_chosen_additional_tickets(&drawn, &chosen)?;

        assert_eq!(next.ticket_count(), 27);
        assert_eq!(next.current_player_state().tickets(), &chosen);
        assert!(state
            .with_chosen_additional_tickets(&chosen, &drawn)
            .is_err());

        Ok(())
    }

    // Tests for cards.

    #[test]
    fn drawing_cards() -> Result<()> {
        let state = state(2);
        let face_up = state.card_state().face_up_card(3)?;
        let top = state.top_card()?;

        let next = state.with_drawn_face_up_card(3)?;
        assert_eq!(next.card_state().face_up_card(3)?, top);
        assert_eq!(next.current_player_state().cards().len(), 5);
        assert!(next.current_player_state().cards().count_of(&face_up) >= 1);

        let next = next.with_blindly_drawn_card()?;
        assert_eq!(next.current_player_state().cards().len(), 6);
        assert_eq!(next.card_state().deck_size(), 95);

        Ok(())
    }

    #[test]
    fn recreating_the_deck_only_when_empty() -> Result<()> {
        let state = state(2);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assert_eq!(state.with_cards_deck_recreated_if_needed(&mut rng)?, state);

        let mut emptied = state.clone();
        while !emptied.card_state().is_deck_empty() {
            emptied = emptied.without_top_card()?;
        }
        let refilled = emptied
            .with_more_discarded_cards(&SortedBag::of(7, Card::Orange))
            .with_cards_deck_recreated_if_needed(&mut rng)?;
        assert_eq!(refilled.card_state().deck_size(), 7);
        assert_eq!(refilled.card_state().discards_size(), 0);

        Ok(())
    }

    // Tests for routes.

    #[test]
    fn claiming_a_route_discards_the_cards() -> Result<()> {
        let board = Board::usa();
        let cards = SortedBag::of(4, Card::Red);
        let hand = PlayerState::new(SortedBag::new(), cards.clone(), Vec::new(), 40);
        let state = state(2);
        let state = state.with_player_state(state.current_player(), hand);
        let route = route(&board, "ATLANTA_CHARLESTON_1");

        let next = state.with_claimed_route(&route, &SortedBag::of(2, Card::Red))?;
        assert_eq!(next.card_state().discards_size(), 2);
        assert_eq!(next.current_player_state().cards().len(), 2);
        assert_eq!(next.owner_of(&route), Some(state.current_player()));
        assert!(!next.is_route_claimable(&route, &board));
        assert!(next.to_public().claimed_routes().any(|claimed| claimed == &route));

        Ok(())
    }

    #[test]
    fn twin_routes_in_two_player_games() -> Result<()> {
        let board = Board::usa();
        let first = route(&board, "ATLANTA_RALEIGH_1");
        let second = route(&board, "ATLANTA_RALEIGH_2");
        let state = state(2);
        let owner = state.current_player();
        let hand = PlayerState::new(SortedBag::new(), SortedBag::of(2, Card::Blue), Vec::new(), 40);

        let next = state
            .with_player_state(owner, hand)
            .with_claimed_route(&first, &SortedBag::of(2, Card::Blue))?;
        assert!(!next.is_route_claimable(&second, &board));

        // Nor for the other player.
        let next = next.for_next_turn();
        assert!(!next.is_route_claimable(&second, &board));
        assert!(!next.to_public().is_route_claimable(&second, &board));

        Ok(())
    }

    #[test]
    fn twin_routes_in_four_player_games() -> Result<()> {
        let board = Board::usa();
        let first = route(&board, "ATLANTA_RALEIGH_1");
        let second = route(&board, "ATLANTA_RALEIGH_2");
        let state = state(4);
        let owner = state.current_player();
        let hand = PlayerState::new(SortedBag::new(), SortedBag::of(2, Card::Blue), Vec::new(), 40);

        let next = state
            .with_player_state(owner, hand)
            .with_claimed_route(&first, &SortedBag::of(2, Card::Blue))?;
        // Never for the owner of the twin.
        assert!(!next.is_route_claimable(&second, &board));

        let next = next.for_next_turn();
        assert!(next.is_route_claimable(&second, &board));
        assert!(next.to_public().is_route_claimable(&second, &board));

        Ok(())
    }

    // Tests for turns.

    #[test]
    fn for_next_turn_twice_in_a_two_player_game() {
        let state = state(2);
        let next = state.for_next_turn();

        assert_ne!(next.current_player(), state.current_player());
        assert_eq!(next.for_next_turn(), state);
    }

    #[test]
    fn last_turn_begins_with_two_cars_left() -> Result<()> {
        let board = Board::usa();
        let config = GameConfig::new(2)?.with_initial_car_count(4);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let state = GameState::initial(config, &board.ticket_set(), &mut rng)?;
        let current = state.current_player();
        let hand = PlayerState::new(SortedBag::new(), SortedBag::of(2, Card::Green), Vec::new(), 4);
        let state = state.with_player_state(current, hand);

        assert!(!state.last_turn_begins());

        let claimed = state.with_claimed_route(
            &Route::new("CHA_RAL", CHARLESTON, RALEIGH, 2, Level::Surface, Some(Color::Green))?,
            &SortedBag::of(2, Card::Green),
        )?;
        assert!(claimed.last_turn_begins());

        let next = claimed.for_next_turn();
        assert_eq!(next.last_player(), Some(current));
        assert!(!next.last_turn_begins());
        assert_eq!(next.to_public().last_player(), Some(current));

        Ok(())
    }

    #[test]
    fn public_state() -> Result<()> {
        let state = state(3);
        let public = state.to_public();

        assert_eq!(public.ticket_count(), 30);
        assert!(public.can_draw_tickets());
        assert!(public.can_draw_cards());
        assert_eq!(public.player_count(), 3);
        assert_eq!(public.current_player(), state.current_player());
        assert_eq!(
            public.current_player_state(),
            state.current_player_state().public()
        );
        assert!(public.player_state(PlayerId::new(3)).is_err());
        assert_eq!(public.claimed_routes().count(), 0);
        assert_eq!(public.owner_of(&Route::new("X", ATLANTA, RALEIGH, 2, Level::Surface, None)?), None);

        Ok(())
    }

    #[test]
    fn game_state_json_round_trip() -> serde_json::Result<()> {
        let state = state(2);
        let json = serde_json::to_string(&state)?;

        assert_eq!(serde_json::from_str::<GameState>(&json)?, state);

        Ok(())
    }

    #[test]
    fn game_state_json_is_checked() -> serde_json::Result<()> {
        let valid = serde_json::to_value(state(2))?;

        let mut json = valid.clone();
        json["current_player"] = serde_json::json!(4);
        assert!(serde_json::from_value::<GameState>(json).is_err());

        let mut json = valid.clone();
        json["last_player"] = serde_json::json!(2);
        assert!(serde_json::from_value::<GameState>(json).is_err());

        let mut json = valid.clone();
        json["config"]["player_count"] = serde_json::json!(0);
        assert!(serde_json::from_value::<GameState>(json).is_err());

        let mut json = valid.clone();
        json["config"]["player_count"] = serde_json::json!(3);
        assert!(serde_json::from_value::<GameState>(json).is_err());

        let mut json = valid;
        json["last_player"] = serde_json::json!(1);
        assert_eq!(
            serde_json::from_value::<GameState>(json)?.last_player(),
            Some(PlayerId::new(1))
        );

        Ok(())
    }

    #[test]
    fn public_state_json_is_checked() -> serde_json::Result<()> {
        let public = state(3).to_public();
        let valid = serde_json::to_value(&public)?;
        assert_eq!(serde_json::from_value::<PublicGameState>(valid.clone())?, public);

        let mut json = valid.clone();
        json["current_player"] = serde_json::json!(4);
        assert!(serde_json::from_value::<PublicGameState>(json).is_err());

        let mut json = valid;
        json["player_states"] = serde_json::json!([]);
        assert!(serde_json::from_value::<PublicGameState>(json).is_err());

        Ok(())
    }
}
