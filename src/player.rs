use crate::bag::SortedBag;
use crate::card::Card;
use crate::config::PlayerId;
use crate::error::PlayerError;
use crate::game_state::PublicGameState;
use crate::player_state::PlayerState;
use crate::route::Route;
use crate::ticket::Ticket;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use strum_macros::{Display, EnumIter};

/// The three kinds of turn a player can take.
///
/// # JSON
/// Turn kinds are serialized as an 8-bit unsigned integer.
#[derive(
    Clone, Copy, Debug, Deserialize_repr, Display, EnumIter, Eq, Hash, PartialEq, Serialize_repr,
)]
#[repr(u8)]
pub enum TurnKind {
    DrawTickets = 0,
    DrawCards = 1,
    ClaimRoute = 2,
}

/// Where a card is drawn from: one of the five face-up slots, or the top of the deck.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawSlot {
    FaceUp(usize),
    Deck,
}

/// A participant of the game, human or not, local or remote.
///
/// Notifications cannot fail: a player that stops listening simply misses them.
/// Decisions can, and a failed decision aborts the current turn.
pub trait Player {
    /// Tells the player its own id, and the names of all players in seating order.
    fn init_players(&mut self, own_id: PlayerId, player_names: &[String]);

    /// Narration of the game, see [`crate::info::Info`].
    fn receive_info(&mut self, info: &str);

    fn update_state(&mut self, public_state: &PublicGameState, own_state: &PlayerState);

    /// The tickets offered at the start of the game.
    fn set_initial_ticket_choice(&mut self, tickets: &SortedBag<Ticket>);

    /// Which of the tickets offered at the start of the game to keep.
    fn choose_initial_tickets(&mut self) -> Result<SortedBag<Ticket>, PlayerError>;

    fn next_turn(&mut self) -> Result<TurnKind, PlayerError>;

    /// Which of the drawn tickets to keep, possibly none.
    fn choose_tickets(&mut self, options: &SortedBag<Ticket>) -> Result<SortedBag<Ticket>, PlayerError>;

    fn draw_slot(&mut self) -> Result<DrawSlot, PlayerError>;

    /// The route the player wants to claim this turn.
    fn claimed_route(&mut self) -> Result<Route, PlayerError>;

    /// The cards the player initially plays to claim its route.
    fn initial_claim_cards(&mut self) -> Result<SortedBag<Card>, PlayerError>;

    /// One of `options` to pay for a tunnel, or the empty bag to give up.
    fn choose_additional_cards(
        &mut self,
        options: &[SortedBag<Card>],
    ) -> Result<SortedBag<Card>, PlayerError>;
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn init_players(&mut self, own_id: PlayerId, player_names: &[String]) {
        (**self).init_players(own_id, player_names)
    }

    fn receive_info(&mut self, info: &str) {
        (**self).receive_info(info)
    }

    fn update_state(&mut self, public_state: &PublicGameState, own_state: &PlayerState) {
        (**self).update_state(public_state, own_state)
    }

    fn set_initial_ticket_choice(&mut self, tickets: &SortedBag<Ticket>) {
        (**self).set_initial_ticket_choice(tickets)
    }

    fn choose_initial_tickets(&mut self) -> Result<SortedBag<Ticket>, PlayerError> {
        (**self).choose_initial_tickets()
    }

    fn next_turn(&mut self) -> Result<TurnKind, PlayerError> {
        (**self).next_turn()
    }

    fn choose_tickets(&mut self, options: &SortedBag<Ticket>) -> Result<SortedBag<Ticket>, PlayerError> {
        (**self).choose_tickets(options)
    }

    fn draw_slot(&mut self) -> Result<DrawSlot, PlayerError> {
        (**self).draw_slot()
    }

    fn claimed_route(&mut self) -> Result<Route, PlayerError> {
        (**self).claimed_route()
    }

    fn initial_claim_cards(&mut self) -> Result<SortedBag<Card>, PlayerError> {
        (**self).initial_claim_cards()
    }

    fn choose_additional_cards(
        &mut self,
        options: &[SortedBag<Card>],
    ) -> Result<SortedBag<Card>, PlayerError> {
        (**self).choose_additional_cards(options)
    }
}
