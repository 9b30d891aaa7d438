use crate::bag::SortedBag;
use crate::board::Board;
use crate::card::Card;
use crate::config::{GameConfig, PlayerId};
use crate::constants::{
    ADDITIONAL_TUNNEL_CARDS, DRAWN_CARDS_COUNT, INITIAL_TICKETS_COUNT, IN_GAME_TICKETS_COUNT,
    LONGEST_TRAIL_BONUS_POINTS, MAX_PLAYERS, MIN_INITIAL_TICKETS_KEPT,
};
use crate::error::{GameError, Result};
use crate::game_state::GameState;
use crate::info::Info;
use crate::player::{DrawSlot, Player, TurnKind};
use crate::route::Route;
use crate::trail::Trail;

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Phases of the game, which act as states in the game's finite-state machine.
///
/// # JSON
/// Phases are serialized in snake_case.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Players are introduced, and choose their initial tickets.
    Setup,
    /// The main turn-based phase, up until a player is left with two cars or fewer.
    Running,
    /// Every player, starting with the one after the player who triggered it, plays
    /// one last turn.
    FinalRound { turns_left: usize },
    /// Scores are computed; no actions can be taken at this point.
    Done,
}

/// The final result of a game. Every list is indexed by player id.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameOutcome {
    /// Claim points, ticket points and longest-trail bonus.
    pub final_points: Vec<i32>,
    pub longest_trails: Vec<Trail>,
    /// Players who received the longest-trail bonus.
    pub bonus_players: Vec<PlayerId>,
    /// Players who ended with the highest score. More than one means a draw.
    pub winners: Vec<PlayerId>,
}

impl GameOutcome {
    #[inline]
    pub fn is_draw(&self) -> bool {
        self.winners.len() > 1
    }
}

/// Runs a game between the given players, enforcing the rules on each of their decisions.
///
/// A decision breaking the rules, or a player failing to answer, aborts the step with an
/// error and leaves the game as it was at the start of the step.
pub struct Game<R> {
    board: Board,
    players: SmallVec<[Box<dyn Player>; MAX_PLAYERS]>,
    player_names: Vec<String>,
    state: GameState,
    phase: GamePhase,
    /// Only populated once the game is [`GamePhase::Done`].
    outcome: Option<GameOutcome>,
    rng: R,
}

impl<R: Rng> Game<R> {
    /// Creates a game in the [`GamePhase::Setup`] phase, with one player and one name per
    /// seat of `config`.
    pub fn new(
        config: GameConfig,
        board: Board,
        players: Vec<Box<dyn Player>>,
        player_names: Vec<String>,
        mut rng: R,
    ) -> Result<Self> {
        config.validate()?;
        if players.len() != config.player_count() || player_names.len() != config.player_count() {
            return Err(GameError::invalid(format!(
                "Cannot start a game of {} players with {} players and {} names.",
                config.player_count(),
                players.len(),
                player_names.len()
            )));
        }

        let state = GameState::initial(config, &board.ticket_set(), &mut rng)?;
        Ok(Self {
            board,
            players: players.into_iter().collect(),
            player_names,
            state,
            phase: GamePhase::Setup,
            outcome: None,
            rng,
        })
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Plays the game to its end.
    pub fn play(mut self) -> Result<GameOutcome> {
        while self.step()? != GamePhase::Done {}
        self.outcome
            .ok_or_else(|| GameError::invalid("The game ended without an outcome."))
    }

    /// Moves the game forward: the setup, or a single turn. Returns the new phase.
    pub fn step(&mut self) -> Result<GamePhase> {
        let phase = self.phase;
        self.phase = match phase {
            GamePhase::Setup => {
                self.set_up()?;
                info!("Setup done, {} plays first.", self.state.current_player());
                GamePhase::Running
            }
            GamePhase::Running => {
                let state = self.play_turn()?;
                if state.last_turn_begins() {
                    let car_count = state.current_player_state().car_count();
                    let message = self.info_of(state.current_player()).last_turn_begins(car_count);
                    self.broadcast(&message);
                    info!("Final round triggered by {}.", state.current_player());

                    self.state = state.for_next_turn();
                    GamePhase::FinalRound {
                        turns_left: self.state.config().player_count(),
                    }
                } else {
                    self.state = state.for_next_turn();
                    GamePhase::Running
                }
            }
            GamePhase::FinalRound { turns_left } => {
                let state = self.play_turn()?;
                if turns_left > 1 {
                    self.state = state.for_next_turn();
                    GamePhase::FinalRound {
                        turns_left: turns_left - 1,
                    }
                } else {
                    self.state = state;
                    self.outcome = Some(self.finish());
                    GamePhase::Done
                }
            }
            GamePhase::Done => GamePhase::Done,
        };
        Ok(self.phase)
    }

    fn info_of(&self, player: PlayerId) -> Info {
        Info::new(self.player_names[player.index()].clone())
    }

    fn broadcast(&mut self, message: &str) {
        debug!("{}", message);
        for player in self.players.iter_mut() {
            player.receive_info(message);
        }
    }

    fn update_states(&mut self, state: &GameState) {
        let public_state = state.to_public();
        for (player, id) in self.players.iter_mut().zip(state.config().player_ids()) {
            if let Ok(own_state) = state.player_state(id) {
                player.update_state(&public_state, own_state);
            }
        }
    }

    fn set_up(&mut self) -> Result<()> {
        let ids: Vec<PlayerId> = self.state.config().player_ids().collect();
        for (player, id) in self.players.iter_mut().zip(&ids) {
            player.init_players(*id, &self.player_names);
        }
        let message = self.info_of(self.state.current_player()).will_play_first();
        self.broadcast(&message);

        let mut state = self.state.clone();
        let mut offers = Vec::with_capacity(ids.len());
        for player in self.players.iter_mut() {
            let offered = state.top_tickets(INITIAL_TICKETS_COUNT)?;
            player.set_initial_ticket_choice(&offered);
            state = state.without_top_tickets(INITIAL_TICKETS_COUNT)?;
            offers.push(offered);
        }
        self.update_states(&state);

        let mut kept_counts = Vec::with_capacity(ids.len());
        for ((player, id), offered) in self.players.iter_mut().zip(&ids).zip(&offers) {
            let chosen = player.choose_initial_tickets()?;
            if chosen.len() < MIN_INITIAL_TICKETS_KEPT || !offered.contains_all(&chosen) {
                return Err(GameError::invalid(format!(
                    "The {} must keep at least {} of the tickets offered, not {}.",
                    id,
                    MIN_INITIAL_TICKETS_KEPT,
                    chosen.len()
                )));
            }
            state = state.with_initially_chosen_tickets(*id, &chosen)?;
            kept_counts.push(chosen.len());
        }

        for (id, count) in ids.iter().zip(kept_counts) {
            let message = self.info_of(*id).kept_tickets(count);
            self.broadcast(&message);
        }
        self.state = state;
        Ok(())
    }

    /// Plays the turn of the current player, and returns the resulting state without
    /// passing the turn.
    fn play_turn(&mut self) -> Result<GameState> {
        let mut state = self.state.clone();
        let current = state.current_player();
        let info = self.info_of(current);

        self.update_states(&state);
        self.broadcast(&info.can_play());

        let kind = self.players[current.index()].next_turn()?;
        debug!("{} takes a {} turn.", current, kind);
        match kind {
            TurnKind::DrawTickets => {
                if !state.can_draw_tickets() {
                    return Err(GameError::invalid("Cannot draw tickets from an empty deck."));
                }
                let count = IN_GAME_TICKETS_COUNT.min(state.ticket_count());
                let offered = state.top_tickets(count)?;
                self.broadcast(&info.drew_tickets(count));

                let chosen = self.players[current.index()].choose_tickets(&offered)?;
                state = state.with_chosen_additional_tickets(&offered, &chosen)?;
                self.broadcast(&info.kept_tickets(chosen.len()));
            }
            TurnKind::DrawCards => {
                if !state.can_draw_cards() {
                    return Err(GameError::invalid(
                        "Cannot draw cards: the deck and the discards hold fewer than five cards.",
                    ));
                }
                for draw in 0..DRAWN_CARDS_COUNT {
                    if draw > 0 {
                        self.update_states(&state);
                    }
                    state = state.with_cards_deck_recreated_if_needed(&mut self.rng)?;
                    match self.players[current.index()].draw_slot()? {
                        DrawSlot::Deck => {
                            state = state.with_blindly_drawn_card()?;
                            self.broadcast(&info.drew_blind_card());
                        }
                        DrawSlot::FaceUp(slot) => {
                            let card = state.card_state().face_up_card(slot)?;
                            state = state.with_drawn_face_up_card(slot)?;
                            self.broadcast(&info.drew_visible_card(card));
                        }
                    }
                }
            }
            TurnKind::ClaimRoute => state = self.claim_route(state, &info)?,
        }
        Ok(state)
    }

    fn claim_route(&mut self, state: GameState, info: &Info) -> Result<GameState> {
        let current = state.current_player();
        let route = self.players[current.index()].claimed_route()?;
        let initial_cards = self.players[current.index()].initial_claim_cards()?;

        self.check_claim(&state, &route, &initial_cards)?;
        if !route.is_tunnel() {
            let state = state.with_claimed_route(&route, &initial_cards)?;
            self.broadcast(&info.claimed_route(&route, &initial_cards));
            return Ok(state);
        }

        self.broadcast(&info.attempts_tunnel_claim(&route, &initial_cards));
        let mut state = state;
        let mut drawn = SmallVec::<[Card; ADDITIONAL_TUNNEL_CARDS]>::new();
        for _ in 0..ADDITIONAL_TUNNEL_CARDS {
            state = state.with_cards_deck_recreated_if_needed(&mut self.rng)?;
            drawn.push(state.top_card()?);
            state = state.without_top_card()?;
        }
        let drawn: SortedBag<Card> = drawn.into_iter().collect();

        let additional_count = route.additional_claim_cards_count(&initial_cards, &drawn)?;
        self.broadcast(&info.drew_additional_cards(&drawn, additional_count));

        let claim_cards = if additional_count == 0 {
            Some(initial_cards)
        } else {
            let options = state.current_player_state().possible_additional_cards(
                additional_count,
                &initial_cards,
                &drawn,
            )?;
            let chosen = if options.is_empty() {
                SortedBag::new()
            } else {
                self.players[current.index()].choose_additional_cards(&options)?
            };

            if chosen.is_empty() {
                None
            } else if options.contains(&chosen) {
                Some(initial_cards.union(&chosen))
            } else {
                return Err(GameError::invalid(format!(
                    "Cannot pay for the tunnel {} with {}.",
                    route,
                    Info::cards_description(&chosen)
                )));
            }
        };

        let state = match claim_cards {
            Some(cards) => {
                self.broadcast(&info.claimed_route(&route, &cards));
                state.with_claimed_route(&route, &cards)?
            }
            None => {
                self.broadcast(&info.did_not_claim_route(&route));
                state
            }
        };
        Ok(state.with_more_discarded_cards(&drawn))
    }

    fn check_claim(&self, state: &GameState, route: &Route, cards: &SortedBag<Card>) -> Result<()> {
        if self.board.route(route.id()) != Some(route) {
            return Err(GameError::invalid(format!(
                "The route {} is not part of the board.",
                route
            )));
        }
        if !state.is_route_claimable(route, &self.board) {
            return Err(GameError::invalid(format!(
                "The route {} cannot be claimed.",
                route
            )));
        }
        if route.is_tunnel() && !state.can_attempt_tunnel() {
            return Err(GameError::invalid(format!(
                "Cannot attempt the tunnel {}: only {} cards are left between the deck and the discards, {} are needed.",
                route,
                state.card_state().deck_size() + state.card_state().discards_size(),
                ADDITIONAL_TUNNEL_CARDS
            )));
        }
        if !state.current_player_state().possible_claim_cards(route)?.contains(cards) {
            return Err(GameError::invalid(format!(
                "Cannot claim the route {} with {}.",
                route,
                Info::cards_description(cards)
            )));
        }
        Ok(())
    }

    /// Scores the game, and announces the result.
    fn finish(&mut self) -> GameOutcome {
        let state = self.state.clone();
        self.update_states(&state);

        let ids: Vec<PlayerId> = state.config().player_ids().collect();
        let player_states: Vec<_> = ids
            .iter()
            .filter_map(|id| state.player_state(*id).ok())
            .collect();
        let mut final_points: Vec<i32> = player_states
            .iter()
            .map(|player_state| player_state.final_points())
            .collect();
        let longest_trails = Trail::longest_of_each(
            player_states
                .iter()
                .map(|player_state| player_state.routes().to_vec())
                .collect(),
        );

        let longest = longest_trails.iter().map(Trail::length).max().unwrap_or(0);
        let bonus_players: Vec<PlayerId> = ids
            .iter()
            .copied()
            .filter(|id| longest_trails[id.index()].length() == longest)
            .collect();
        for id in &bonus_players {
            final_points[id.index()] += LONGEST_TRAIL_BONUS_POINTS;
            let message = self
                .info_of(*id)
                .gets_longest_trail_bonus(&longest_trails[id.index()]);
            self.broadcast(&message);
        }

        let best = final_points.iter().copied().max().unwrap_or(0);
        let winners: Vec<PlayerId> = ids
            .iter()
            .copied()
            .filter(|id| final_points[id.index()] == best)
            .collect();

        let message = match winners.as_slice() {
            [winner] if ids.len() == 2 => {
                let loser_points = final_points
                    .iter()
                    .enumerate()
                    .find(|(index, _)| *index != winner.index())
                    .map_or(0, |(_, points)| *points);
                self.info_of(*winner).won(best, loser_points)
            }
            [winner] => self.info_of(*winner).won_among_many(best),
            _ => {
                let names: Vec<String> = winners
                    .iter()
                    .map(|id| self.player_names[id.index()].clone())
                    .collect();
                Info::draw(&names, best)
            }
        };
        self.broadcast(&message);
        info!("Game over: {}", message);

        GameOutcome {
            final_points,
            longest_trails,
            bonus_players,
            winners,
        }
    }
}
