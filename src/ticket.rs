use crate::error::{GameError, Result};
use crate::partition::StationConnectivity;
use crate::station::Station;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// A journey between two stations, worth some points.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Trip {
    from: Station,
    to: Station,
    points: u32,
}

impl Trip {
    pub fn new(from: Station, to: Station, points: u32) -> Result<Self> {
        if points == 0 {
            return Err(GameError::invalid(format!(
                "The trip from {} to {} must be worth some points.",
                from, to
            )));
        }
        Ok(Self::from_parts(from, to, points))
    }

    /// Unchecked constructor, for static board data.
    pub(crate) fn from_parts(from: Station, to: Station, points: u32) -> Self {
        Self { from, to, points }
    }

    /// Every trip from a station of `from` to a station of `to`, all worth `points`.
    pub fn all(from: &[Station], to: &[Station], points: u32) -> Result<Vec<Trip>> {
        if from.is_empty() || to.is_empty() {
            return Err(GameError::invalid(
                "Cannot build trips without departure or arrival stations.",
            ));
        }
        from.iter()
            .flat_map(|from| to.iter().map(move |to| (from, to)))
            .map(|(from, to)| Trip::new(from.clone(), to.clone(), points))
            .collect()
    }

    #[inline]
    pub fn from(&self) -> &Station {
        &self.from
    }

    #[inline]
    pub fn to(&self) -> &Station {
        &self.to
    }

    #[inline]
    pub fn points(&self) -> u32 {
        self.points
    }

    /// The points of the trip if both ends are connected, or as many negative points otherwise.
    pub fn points_for(&self, connectivity: &impl StationConnectivity) -> i32 {
        let points = self.points as i32;
        if connectivity.connected(&self.from, &self.to) {
            points
        } else {
            -points
        }
    }
}

/// Trips of a ticket. Almost every ticket has a single trip.
pub type Trips = SmallVec<[Trip; 1]>;

/// A destination ticket: one or more trips sharing the same departure station.
///
/// Tickets are ordered by their text.
///
/// # JSON
/// A ticket is serialized as the array of its trips; its text is recomputed when deserialized.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(into = "Trips", try_from = "Trips")]
pub struct Ticket {
    trips: Trips,
    text: String,
}

impl Ticket {
    /// Creates a ticket, after checking that there is at least one trip, and that all trips
    /// leave from the same station.
    ///
    /// # Example
    /// ```
    /// use rail_network::station::Station;
    /// use rail_network::ticket::{Ticket, Trip};
    ///
    /// let bern = Station::new(2, "Bern");
    /// let austria = Station::new(40, "Austria");
    /// let france = Station::new(41, "France");
    ///
    /// let ticket = Ticket::new(vec![
    ///     Trip::new(bern.clone(), france, 5).unwrap(),
    ///     Trip::new(bern, austria, 11).unwrap(),
    /// ]).unwrap();
    ///
    /// assert_eq!(ticket.to_string(), "Bern - {Austria (11), France (5)}");
    /// ```
    pub fn new(trips: impl IntoIterator<Item = Trip>) -> Result<Self> {
        let trips: Trips = trips.into_iter().collect();
        let from = match trips.first() {
            Some(trip) => trip.from.clone(),
            None => return Err(GameError::invalid("A ticket needs at least one trip.")),
        };
        if let Some(trip) = trips.iter().find(|trip| trip.from.id() != from.id()) {
            return Err(GameError::invalid(format!(
                "All trips of a ticket must leave from {}, not from {}.",
                from, trip.from
            )));
        }

        Ok(Self::from_trips(trips))
    }

    /// Unchecked constructor, for static board data: `trips` must not be empty.
    pub(crate) fn from_trips(trips: Trips) -> Self {
        let text = match trips.first() {
            Some(trip) => Self::compute_text(&trip.from, &trips),
            None => String::new(),
        };
        Self { trips, text }
    }

    /// A ticket made of a single trip.
    pub fn single(from: Station, to: Station, points: u32) -> Result<Self> {
        Self::new([Trip::new(from, to, points)?])
    }

    fn compute_text(from: &Station, trips: &[Trip]) -> String {
        let destinations: BTreeSet<String> = trips
            .iter()
            .map(|trip| format!("{} ({})", trip.to, trip.points))
            .collect();
        let destinations: Vec<String> = destinations.into_iter().collect();

        if destinations.len() == 1 {
            format!("{} - {}", from, destinations[0])
        } else {
            format!("{} - {{{}}}", from, destinations.join(", "))
        }
    }

    #[inline]
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The best outcome among all trips of the ticket: the points of the most valuable
    /// connected trip or, if none is connected, the smallest penalty.
    pub fn points(&self, connectivity: &impl StationConnectivity) -> i32 {
        self.trips
            .iter()
            .map(|trip| trip.points_for(connectivity))
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Ord for Ticket {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text
            .cmp(&other.text)
            .then_with(|| self.trips.cmp(&other.trips))
    }
}

impl PartialOrd for Ticket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Ticket> for Trips {
    fn from(ticket: Ticket) -> Self {
        ticket.trips
    }
}

impl TryFrom<Trips> for Ticket {
    type Error = GameError;

    fn try_from(trips: Trips) -> Result<Self> {
        Ticket::new(trips)
    }
}
