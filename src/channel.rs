use crate::bag::SortedBag;
use crate::card::Card;
use crate::config::PlayerId;
use crate::error::PlayerError;
use crate::game_state::PublicGameState;
use crate::player::{DrawSlot, Player, TurnKind};
use crate::player_state::PlayerState;
use crate::route::Route;
use crate::ticket::Ticket;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// A call to one of the methods of [`Player`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Request {
    InitPlayers {
        own_id: PlayerId,
        player_names: Vec<String>,
    },
    ReceiveInfo(String),
    UpdateState {
        public_state: PublicGameState,
        own_state: PlayerState,
    },
    SetInitialTicketChoice(SortedBag<Ticket>),
    ChooseInitialTickets,
    NextTurn,
    ChooseTickets(SortedBag<Ticket>),
    DrawSlot,
    ClaimedRoute,
    InitialClaimCards,
    ChooseAdditionalCards(Vec<SortedBag<Card>>),
}

impl Request {
    /// Whether the player must answer this request.
    pub fn expects_response(&self) -> bool {
        !matches!(
            self,
            Request::InitPlayers { .. }
                | Request::ReceiveInfo(_)
                | Request::UpdateState { .. }
                | Request::SetInitialTicketChoice(_)
        )
    }
}

/// The answer to a decision [`Request`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Tickets(SortedBag<Ticket>),
    TurnKind(TurnKind),
    DrawSlot(DrawSlot),
    Route(Route),
    Cards(SortedBag<Card>),
}

/// A [`Player`] living on the other end of a pair of channels.
///
/// Every method call is sent as a [`Request`]; decisions then block until the matching
/// [`Response`] comes back. A closed channel turns into [`PlayerError::Disconnected`].
pub struct ChannelPlayer {
    requests: Sender<Request>,
    responses: Receiver<Response>,
}

impl ChannelPlayer {
    pub fn new(requests: Sender<Request>, responses: Receiver<Response>) -> Self {
        Self {
            requests,
            responses,
        }
    }

    /// Moves `player` to its own thread, and returns the handle to talk to it.
    /// The thread stops once the returned `ChannelPlayer` is dropped.
    pub fn spawn<P: Player + Send + 'static>(player: P) -> Self {
        let (request_tx, request_rx) = channel();
        let (response_tx, response_rx) = channel();

        thread::spawn(move || {
            if let Err(err) = serve(player, request_rx, response_tx) {
                warn!("Player thread stopped: {}", err);
            }
        });

        Self::new(request_tx, response_rx)
    }

    fn notify(&self, request: Request) {
        if self.requests.send(request).is_err() {
            warn!("Dropped a notification for a disconnected player.");
        }
    }

    fn ask(&self, request: Request) -> Result<Response, PlayerError> {
        self.requests
            .send(request)
            .map_err(|_| PlayerError::Disconnected)?;
        self.responses.recv().map_err(|_| PlayerError::Disconnected)
    }
}

impl Player for ChannelPlayer {
    fn init_players(&mut self, own_id: PlayerId, player_names: &[String]) {
        self.notify(Request::InitPlayers {
            own_id,
            player_names: player_names.to_vec(),
        });
    }

    fn receive_info(&mut self, info: &str) {
        self.notify(Request::ReceiveInfo(info.to_owned()));
    }

    fn update_state(&mut self, public_state: &PublicGameState, own_state: &PlayerState) {
        self.notify(Request::UpdateState {
            public_state: public_state.clone(),
            own_state: own_state.clone(),
        });
    }

    fn set_initial_ticket_choice(&mut self, tickets: &SortedBag<Ticket>) {
        self.notify(Request::SetInitialTicketChoice(tickets.clone()));
    }

    fn choose_initial_tickets(&mut self) -> Result<SortedBag<Ticket>, PlayerError> {
        match self.ask(Request::ChooseInitialTickets)? {
            Response::Tickets(tickets) => Ok(tickets),
            _ => Err(PlayerError::UnexpectedResponse),
        }
    }

    fn next_turn(&mut self) -> Result<TurnKind, PlayerError> {
        match self.ask(Request::NextTurn)? {
            Response::TurnKind(kind) => Ok(kind),
            _ => Err(PlayerError::UnexpectedResponse),
        }
    }

    fn choose_tickets(&mut self, options: &SortedBag<Ticket>) -> Result<SortedBag<Ticket>, PlayerError> {
        match self.ask(Request::ChooseTickets(options.clone()))? {
            Response::Tickets(tickets) => Ok(tickets),
            _ => Err(PlayerError::UnexpectedResponse),
        }
    }

    fn draw_slot(&mut self) -> Result<DrawSlot, PlayerError> {
        match self.ask(Request::DrawSlot)? {
            Response::DrawSlot(slot) => Ok(slot),
            _ => Err(PlayerError::UnexpectedResponse),
        }
    }

    fn claimed_route(&mut self) -> Result<Route, PlayerError> {
        match self.ask(Request::ClaimedRoute)? {
            Response::Route(route) => Ok(route),
            _ => Err(PlayerError::UnexpectedResponse),
        }
    }

    fn initial_claim_cards(&mut self) -> Result<SortedBag<Card>, PlayerError> {
        match self.ask(Request::InitialClaimCards)? {
            Response::Cards(cards) => Ok(cards),
            _ => Err(PlayerError::UnexpectedResponse),
        }
    }

    fn choose_additional_cards(
        &mut self,
        options: &[SortedBag<Card>],
    ) -> Result<SortedBag<Card>, PlayerError> {
        match self.ask(Request::ChooseAdditionalCards(options.to_vec()))? {
            Response::Cards(cards) => Ok(cards),
            _ => Err(PlayerError::UnexpectedResponse),
        }
    }
}

/// Forwards every request to `player`, and sends back the answers to its decisions.
///
/// Returns once the request channel is closed, or fails once the response channel is.
pub fn serve<P: Player>(
    mut player: P,
    requests: Receiver<Request>,
    responses: Sender<Response>,
) -> Result<(), PlayerError> {
    for request in requests {
        let response = match request {
            Request::InitPlayers {
                own_id,
                player_names,
            } => {
                player.init_players(own_id, &player_names);
                None
            }
            Request::ReceiveInfo(info) => {
                player.receive_info(&info);
                None
            }
            Request::UpdateState {
                public_state,
                own_state,
            } => {
                player.update_state(&public_state, &own_state);
                None
            }
            Request::SetInitialTicketChoice(tickets) => {
                player.set_initial_ticket_choice(&tickets);
                None
            }
            Request::ChooseInitialTickets => Some(Response::Tickets(player.choose_initial_tickets()?)),
            Request::NextTurn => Some(Response::TurnKind(player.next_turn()?)),
            Request::ChooseTickets(options) => Some(Response::Tickets(player.choose_tickets(&options)?)),
            Request::DrawSlot => Some(Response::DrawSlot(player.draw_slot()?)),
            Request::ClaimedRoute => Some(Response::Route(player.claimed_route()?)),
            Request::InitialClaimCards => Some(Response::Cards(player.initial_claim_cards()?)),
            Request::ChooseAdditionalCards(options) => {
                Some(Response::Cards(player.choose_additional_cards(&options)?))
            }
        };

        if let Some(response) = response {
            responses
                .send(response)
                .map_err(|_| PlayerError::Disconnected)?;
        }
    }

    debug!("Request channel closed, player thread done.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Always draws from the deck, and logs what it is told.
    struct Recorder {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Player for Recorder {
        fn init_players(&mut self, own_id: PlayerId, player_names: &[String]) {
            self.record(format!("{} of {}", own_id, player_names.len()));
        }

        fn receive_info(&mut self, info: &str) {
            self.record(info.to_owned());
        }

        fn update_state(&mut self, _: &PublicGameState, _: &PlayerState) {}

        fn set_initial_ticket_choice(&mut self, tickets: &SortedBag<Ticket>) {
            self.record(format!("{} tickets", tickets.len()));
        }

        fn choose_initial_tickets(&mut self) -> Result<SortedBag<Ticket>, PlayerError> {
            Ok(SortedBag::new())
        }

        fn next_turn(&mut self) -> Result<TurnKind, PlayerError> {
            Ok(TurnKind::DrawCards)
        }

        fn choose_tickets(&mut self, options: &SortedBag<Ticket>) -> Result<SortedBag<Ticket>, PlayerError> {
            Ok(options.clone())
        }

        fn draw_slot(&mut self) -> Result<DrawSlot, PlayerError> {
            Ok(DrawSlot::Deck)
        }

        fn claimed_route(&mut self) -> Result<Route, PlayerError> {
            Err(PlayerError::Disconnected)
        }

        fn initial_claim_cards(&mut self) -> Result<SortedBag<Card>, PlayerError> {
            Ok(SortedBag::of(2, Card::Locomotive))
        }

        fn choose_additional_cards(
            &mut self,
            options: &[SortedBag<Card>],
        ) -> Result<SortedBag<Card>, PlayerError> {
            Ok(options.first().cloned().unwrap_or_default())
        }
    }

    impl Recorder {
        fn record(&self, entry: String) {
            self.log.lock().unwrap().push(entry);
        }
    }

    #[test]
    fn decisions_go_through_the_channels() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut player = ChannelPlayer::spawn(Recorder { log: log.clone() });

        player.init_players(PlayerId::new(1), &[String::from("Ada"), String::from("Grace")]);
        player.receive_info("Ada will play first.");
        assert_eq!(player.next_turn(), Ok(TurnKind::DrawCards));
        assert_eq!(player.draw_slot(), Ok(DrawSlot::Deck));
        assert_eq!(
            player.initial_claim_cards(),
            Ok(SortedBag::of(2, Card::Locomotive))
        );
        assert_eq!(
            player.choose_additional_cards(&[SortedBag::of(1, Card::Red)]),
            Ok(SortedBag::of(1, Card::Red))
        );

        // Requests are handled in order, so notifications were seen before the last answer.
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                String::from("player 2 of 2"),
                String::from("Ada will play first."),
            ]
        );
    }

    #[test]
    fn failing_player_disconnects() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut player = ChannelPlayer::spawn(Recorder { log });

        assert_eq!(player.claimed_route(), Err(PlayerError::Disconnected));
        // The serving thread is gone.
        assert_eq!(player.next_turn(), Err(PlayerError::Disconnected));
    }

    #[test]
    fn serve_returns_once_requests_stop() {
        let (request_tx, request_rx) = channel();
        let (response_tx, response_rx) = channel();
        let log = Arc::new(Mutex::new(Vec::new()));

        request_tx.send(Request::ReceiveInfo(String::from("hello"))).unwrap();
        request_tx.send(Request::NextTurn).unwrap();
        drop(request_tx);

        assert_eq!(
            serve(Recorder { log: log.clone() }, request_rx, response_tx),
            Ok(())
        );
        assert_eq!(response_rx.recv(), Ok(Response::TurnKind(TurnKind::DrawCards)));
        assert_eq!(*log.lock().unwrap(), vec![String::from("hello")]);
    }

    #[test]
    fn unexpected_response() {
        let (request_tx, _request_rx) = channel();
        let (response_tx, response_rx) = channel();
        let mut player = ChannelPlayer::new(request_tx, response_rx);

        response_tx.send(Response::DrawSlot(DrawSlot::Deck)).unwrap();
        assert_eq!(player.next_turn(), Err(PlayerError::UnexpectedResponse));
    }

    #[test]
    fn request_kinds() {
        assert!(Request::NextTurn.expects_response());
        assert!(!Request::ReceiveInfo(String::new()).expects_response());
    }
}
