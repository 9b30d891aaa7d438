use crate::bag::SortedBag;
use crate::board::Board;
use crate::card::Card;
use crate::config::PlayerId;
use crate::constants::{FACE_UP_CARDS_COUNT, MIN_INITIAL_TICKETS_KEPT};
use crate::error::PlayerError;
use crate::game_state::PublicGameState;
use crate::player::{DrawSlot, Player, TurnKind};
use crate::player_state::PlayerState;
use crate::route::Route;
use crate::ticket::Ticket;

use log::debug;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A player taking random, but always legal, decisions.
///
/// It claims a random affordable route whenever it can, and draws cards otherwise.
pub struct RandomPlayer {
    board: Board,
    rng: ChaCha8Rng,
    own_id: Option<PlayerId>,
    public_state: Option<PublicGameState>,
    own_state: Option<PlayerState>,
    initial_tickets: SortedBag<Ticket>,
    planned_claim: Option<(Route, SortedBag<Card>)>,
}

impl RandomPlayer {
    pub fn new(board: Board, seed: u64) -> Self {
        Self {
            board,
            rng: ChaCha8Rng::seed_from_u64(seed),
            own_id: None,
            public_state: None,
            own_state: None,
            initial_tickets: SortedBag::new(),
            planned_claim: None,
        }
    }

    fn states(&self) -> Result<(&PublicGameState, &PlayerState), PlayerError> {
        match (&self.public_state, &self.own_state) {
            (Some(public_state), Some(own_state)) => Ok((public_state, own_state)),
            _ => Err(PlayerError::UnexpectedResponse),
        }
    }

    /// Every claimable route the player can afford, with the cards to claim it.
    fn claim_options(&self) -> Result<Vec<(Route, SortedBag<Card>)>, PlayerError> {
        let (public_state, own_state) = self.states()?;
        Ok(self
            .board
            .routes()
            .iter()
            .filter(|route| public_state.is_route_claimable(route, &self.board))
            .filter(|route| own_state.can_claim_route(route))
            .filter(|route| !route.is_tunnel() || public_state.can_attempt_tunnel())
            .filter_map(|route| {
                let options = own_state.possible_claim_cards(route).ok()?;
                options.first().map(|cards| (route.clone(), cards.clone()))
            })
            .collect())
    }

    fn random_subset(&mut self, tickets: &SortedBag<Ticket>, minimum: usize) -> SortedBag<Ticket> {
        let minimum = minimum.min(tickets.len());
        let count = self.rng.gen_range(minimum..=tickets.len());
        let mut shuffled = tickets.to_vec();
        shuffled.shuffle(&mut self.rng);
        shuffled.into_iter().take(count).collect()
    }
}

impl Player for RandomPlayer {
    fn init_players(&mut self, own_id: PlayerId, _player_names: &[String]) {
        self.own_id = Some(own_id);
    }

    fn receive_info(&mut self, info: &str) {
        debug!("{:?} was told: {}", self.own_id, info);
    }

    fn update_state(&mut self, public_state: &PublicGameState, own_state: &PlayerState) {
        self.public_state = Some(public_state.clone());
        self.own_state = Some(own_state.clone());
    }

    fn set_initial_ticket_choice(&mut self, tickets: &SortedBag<Ticket>) {
        self.initial_tickets = tickets.clone();
    }

    fn choose_initial_tickets(&mut self) -> Result<SortedBag<Ticket>, PlayerError> {
        let offered = self.initial_tickets.clone();
        Ok(self.random_subset(&offered, MIN_INITIAL_TICKETS_KEPT))
    }

    fn next_turn(&mut self) -> Result<TurnKind, PlayerError> {
        let options = self.claim_options()?;
        let (public_state, _) = self.states()?;
        let (can_draw_cards, can_draw_tickets) =
            (public_state.can_draw_cards(), public_state.can_draw_tickets());

        if let Some(option) = options.choose(&mut self.rng) {
            self.planned_claim = Some(option.clone());
            return Ok(TurnKind::ClaimRoute);
        }
        if can_draw_cards {
            Ok(TurnKind::DrawCards)
        } else if can_draw_tickets {
            Ok(TurnKind::DrawTickets)
        } else {
            // Nothing left to do but to try.
            Ok(TurnKind::DrawCards)
        }
    }

    fn choose_tickets(&mut self, options: &SortedBag<Ticket>) -> Result<SortedBag<Ticket>, PlayerError> {
        Ok(self.random_subset(options, 1))
    }

    fn draw_slot(&mut self) -> Result<DrawSlot, PlayerError> {
        if self.rng.gen_bool(0.5) {
            Ok(DrawSlot::Deck)
        } else {
            Ok(DrawSlot::FaceUp(self.rng.gen_range(0..FACE_UP_CARDS_COUNT)))
        }
    }

    fn claimed_route(&mut self) -> Result<Route, PlayerError> {
        self.planned_claim
            .as_ref()
            .map(|(route, _)| route.clone())
            .ok_or(PlayerError::UnexpectedResponse)
    }

    fn initial_claim_cards(&mut self) -> Result<SortedBag<Card>, PlayerError> {
        self.planned_claim
            .take()
            .map(|(_, cards)| cards)
            .ok_or(PlayerError::UnexpectedResponse)
    }

    fn choose_additional_cards(
        &mut self,
        options: &[SortedBag<Card>],
    ) -> Result<SortedBag<Card>, PlayerError> {
        Ok(options.first().cloned().unwrap_or_default())
    }
}
