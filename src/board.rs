use crate::bag::SortedBag;
use crate::error::{GameError, Result};
use crate::route::Route;
use crate::station::Station;
use crate::ticket::Ticket;
use crate::usa;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The static data of a game: its stations, its routes and its tickets.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Board {
    stations: Vec<Station>,
    routes: Vec<Route>,
    tickets: Vec<Ticket>,
}

impl Board {
    /// Creates a board, after checking that:
    /// - station ids are `0..stations.len()`, in order;
    /// - every route and ticket only refers to stations of the board;
    /// - route ids are unique.
    pub fn new(stations: Vec<Station>, routes: Vec<Route>, tickets: Vec<Ticket>) -> Result<Self> {
        if let Some((index, station)) = stations
            .iter()
            .enumerate()
            .find(|(index, station)| station.id() as usize != *index)
        {
            return Err(GameError::invalid(format!(
                "The station {} should have id {}, not {}.",
                station,
                index,
                station.id()
            )));
        }

        let board = Self::from_parts(stations, routes, tickets);
        let mut route_ids = HashSet::with_capacity(board.routes.len());
        for route in &board.routes {
            if !route_ids.insert(route.id()) {
                return Err(GameError::invalid(format!(
                    "The route id {} is used more than once.",
                    route.id()
                )));
            }
            for station in route.stations() {
                board.check_station(station)?;
            }
        }
        for trip in board.tickets.iter().flat_map(Ticket::trips) {
            board.check_station(trip.from())?;
            board.check_station(trip.to())?;
        }

        Ok(board)
    }

    pub(crate) fn from_parts(
        stations: Vec<Station>,
        routes: Vec<Route>,
        tickets: Vec<Ticket>,
    ) -> Self {
        Self {
            stations,
            routes,
            tickets,
        }
    }

    /// The board of North America.
    ///
    /// # Example
    /// ```
    /// use rail_network::board::Board;
    ///
    /// let board = Board::usa();
    /// assert_eq!(board.stations().len(), 36);
    /// assert_eq!(board.routes().len(), 100);
    /// assert_eq!(board.tickets().len(), 30);
    /// ```
    pub fn usa() -> Self {
        usa::board()
    }

    fn check_station(&self, station: &Station) -> Result<()> {
        match self.stations.get(station.id() as usize) {
            Some(known) if known == station => Ok(()),
            _ => Err(GameError::invalid(format!(
                "The station {} (id {}) is not part of the board.",
                station,
                station.id()
            ))),
        }
    }

    #[inline]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    #[inline]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[inline]
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// All tickets, as a multiset to build a ticket deck from.
    pub fn ticket_set(&self) -> SortedBag<Ticket> {
        self.tickets.iter().cloned().collect()
    }

    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.id() == id)
    }

    /// The other route linking the same two stations as `route`, if any.
    pub fn twin_of(&self, route: &Route) -> Option<&Route> {
        self.routes
            .iter()
            .find(|other| other.id() != route.id() && other.joins_same_stations(route))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Level;
    use crate::usa::{ATLANTA, BOSTON, CHARLESTON, RALEIGH};
    use pretty_assertions::assert_eq;

    #[test]
    fn usa_board_is_valid() {
        let board = Board::usa();
        let checked = Board::new(
            board.stations().to_vec(),
            board.routes().to_vec(),
            board.tickets().to_vec(),
        );

        assert_eq!(checked, Ok(board));
    }

    #[test]
    fn usa_tickets_are_distinct() {
        assert_eq!(Board::usa().ticket_set().distinct_count(), 30);
    }

    #[test]
    fn twin_routes() {
        let board = Board::usa();
        let first = board.route("ATLANTA_RALEIGH_1").cloned();
        let second = board.route("ATLANTA_RALEIGH_2").cloned();

        assert!(first.is_some());
        assert_eq!(first.as_ref().and_then(|route| board.twin_of(route)), second.as_ref());
        assert_eq!(second.as_ref().and_then(|route| board.twin_of(route)), first.as_ref());

        let single = board.route("ATLANTA_CHARLESTON_1");
        assert_eq!(single.and_then(|route| board.twin_of(route)), None);
    }

    #[test]
    fn routes_link_the_right_stations() {
        let board = Board::usa();
        let route = board.route("ATLANTA_RALEIGH_2");

        assert_eq!(route.map(Route::stations), Some([&ATLANTA, &RALEIGH]));
        assert_eq!(route.map(Route::length), Some(2));
        assert_eq!(route.map(Route::level), Some(Level::Surface));
    }

    #[test]
    fn invalid_boards() {
        let route = Route::from_parts("X", ATLANTA, BOSTON, 1, Level::Surface, None);

        // Ids out of order.
        assert!(Board::new(vec![BOSTON, ATLANTA], Vec::new(), Vec::new()).is_err());
        // Unknown station.
        assert!(Board::new(vec![ATLANTA], vec![route.clone()], Vec::new()).is_err());
        // Duplicated route id.
        assert!(Board::new(
            vec![ATLANTA, BOSTON],
            vec![route.clone(), route.clone()],
            Vec::new()
        )
        .is_err());
        assert!(Board::new(vec![ATLANTA, BOSTON], vec![route], Vec::new()).is_ok());
        // Ticket to an unknown station.
        assert!(Board::new(
            vec![ATLANTA, BOSTON],
            Vec::new(),
            vec![Ticket::single(ATLANTA, CHARLESTON, 4).unwrap()]
        )
        .is_err());
    }

    #[test]
    fn board_json_round_trip() -> serde_json::Result<()> {
        let board = Board::usa();
        let json = serde_json::to_string(&board)?;

        assert_eq!(serde_json::from_str::<Board>(&json)?, board);

        Ok(())
    }
}
