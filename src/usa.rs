//! The board of North America, with its 36 cities, 100 routes and 30 tickets.

use crate::board::Board;
use crate::card::Color;
use crate::route::{Level, Route};
use crate::station::Station;
use crate::ticket::{Ticket, Trip};

use smallvec::smallvec;

pub const ATLANTA: Station = Station::new(0, "Atlanta");
pub const BOSTON: Station = Station::new(1, "Boston");
pub const CALGARY: Station = Station::new(2, "Calgary");
pub const CHARLESTON: Station = Station::new(3, "Charleston");
pub const CHICAGO: Station = Station::new(4, "Chicago");
pub const DALLAS: Station = Station::new(5, "Dallas");
pub const DENVER: Station = Station::new(6, "Denver");
pub const DULUTH: Station = Station::new(7, "Duluth");
pub const EL_PASO: Station = Station::new(8, "El Paso");
pub const HELENA: Station = Station::new(9, "Helena");
pub const HOUSTON: Station = Station::new(10, "Houston");
pub const KANSAS_CITY: Station = Station::new(11, "Kansas City");
pub const LAS_VEGAS: Station = Station::new(12, "Las Vegas");
pub const LITTLE_ROCK: Station = Station::new(13, "Little Rock");
pub const LOS_ANGELES: Station = Station::new(14, "Los Angeles");
pub const MIAMI: Station = Station::new(15, "Miami");
pub const MONTREAL: Station = Station::new(16, "Montréal");
pub const NASHVILLE: Station = Station::new(17, "Nashville");
pub const NEW_ORLEANS: Station = Station::new(18, "New Orleans");
pub const NEW_YORK: Station = Station::new(19, "New York");
pub const OKLAHOMA_CITY: Station = Station::new(20, "Oklahoma City");
pub const OMAHA: Station = Station::new(21, "Omaha");
pub const PHOENIX: Station = Station::new(22, "Phoenix");
pub const PITTSBURGH: Station = Station::new(23, "Pittsburgh");
pub const PORTLAND: Station = Station::new(24, "Portland");
pub const RALEIGH: Station = Station::new(25, "Raleigh");
pub const SAINT_LOUIS: Station = Station::new(26, "Saint Louis");
pub const SALT_LAKE_CITY: Station = Station::new(27, "Salt Lake City");
pub const SAN_FRANCISCO: Station = Station::new(28, "San Francisco");
pub const SANTA_FE: Station = Station::new(29, "Santa Fe");
pub const SAULT_ST_MARIE: Station = Station::new(30, "Sault St. Marie");
pub const SEATTLE: Station = Station::new(31, "Seattle");
pub const TORONTO: Station = Station::new(32, "Toronto");
pub const VANCOUVER: Station = Station::new(33, "Vancouver");
pub const WASHINGTON: Station = Station::new(34, "Washington");
pub const WINNIPEG: Station = Station::new(35, "Winnipeg");

/// All stations, in id order.
pub fn stations() -> Vec<Station> {
    vec![
        ATLANTA,
        BOSTON,
        CALGARY,
        CHARLESTON,
        CHICAGO,
        DALLAS,
        DENVER,
        DULUTH,
        EL_PASO,
        HELENA,
        HOUSTON,
        KANSAS_CITY,
        LAS_VEGAS,
        LITTLE_ROCK,
        LOS_ANGELES,
        MIAMI,
        MONTREAL,
        NASHVILLE,
        NEW_ORLEANS,
        NEW_YORK,
        OKLAHOMA_CITY,
        OMAHA,
        PHOENIX,
        PITTSBURGH,
        PORTLAND,
        RALEIGH,
        SAINT_LOUIS,
        SALT_LAKE_CITY,
        SAN_FRANCISCO,
        SANTA_FE,
        SAULT_ST_MARIE,
        SEATTLE,
        TORONTO,
        VANCOUVER,
        WASHINGTON,
        WINNIPEG,
    ]
}

/// Convenience macro to translate a route color: `Wild` routes accept any color.
macro_rules! route_color {
    (Wild) => {
        None
    };
    ($color:ident) => {
        Some(Color::$color)
    };
}

/// Convenience macro to push the routes linking two cities. Twin routes get consecutive ids.
macro_rules! routes_between {
    ($routes:ident, $from:ident, $to:ident, $length:literal, $($color:ident),+) => {
        for (index, color) in [$(route_color!($color)),+].into_iter().enumerate() {
            $routes.push(Route::from_parts(
                format!("{}_{}_{}", stringify!($from), stringify!($to), index + 1),
                $from,
                $to,
                $length,
                Level::Surface,
                color,
            ));
        }
    };
}

/// Convenience macro to generate a ticket of a single trip.
macro_rules! ticket {
    ($from:ident, $to:ident, $points:literal) => {
        Ticket::from_trips(smallvec![Trip::from_parts($from, $to, $points)])
    };
}

/// All routes, sorted by their first city.
pub fn routes() -> Vec<Route> {
    let mut routes = Vec::with_capacity(100);

    // Atlanta.
    routes_between!(routes, ATLANTA, CHARLESTON, 2, Wild);
    routes_between!(routes, ATLANTA, MIAMI, 5, Blue);
    routes_between!(routes, ATLANTA, NASHVILLE, 1, Wild);
    routes_between!(routes, ATLANTA, NEW_ORLEANS, 5, Orange, Yellow);
    routes_between!(routes, ATLANTA, RALEIGH, 2, Wild, Wild);

    // Boston.
    routes_between!(routes, BOSTON, MONTREAL, 2, Wild, Wild);
    routes_between!(routes, BOSTON, NEW_YORK, 2, Yellow, Red);

    // Calgary.
    routes_between!(routes, CALGARY, HELENA, 4, Wild);
    routes_between!(routes, CALGARY, SEATTLE, 4, Wild);
    routes_between!(routes, CALGARY, VANCOUVER, 3, Wild);
    routes_between!(routes, CALGARY, WINNIPEG, 6, White);

    // Charleston.
    routes_between!(routes, CHARLESTON, MIAMI, 4, Violet);
    routes_between!(routes, CHARLESTON, RALEIGH, 2, Wild);

    // Chicago.
    routes_between!(routes, CHICAGO, DULUTH, 3, Red);
    routes_between!(routes, CHICAGO, OMAHA, 4, Blue);
    routes_between!(routes, CHICAGO, PITTSBURGH, 3, Black, Orange);
    routes_between!(routes, CHICAGO, SAINT_LOUIS, 2, Green, White);
    routes_between!(routes, CHICAGO, TORONTO, 4, White);

    // Dallas.
    routes_between!(routes, DALLAS, EL_PASO, 4, Red);
    routes_between!(routes, DALLAS, HOUSTON, 1, Wild, Wild);
    routes_between!(routes, DALLAS, LITTLE_ROCK, 2, Wild);
    routes_between!(routes, DALLAS, OKLAHOMA_CITY, 2, Wild, Wild);

    // Denver.
    routes_between!(routes, DENVER, HELENA, 4, Green);
    routes_between!(routes, DENVER, KANSAS_CITY, 4, Black, Orange);
    routes_between!(routes, DENVER, OKLAHOMA_CITY, 4, Red);
    routes_between!(routes, DENVER, OMAHA, 4, Violet);
    routes_between!(routes, DENVER, PHOENIX, 5, White);
    routes_between!(routes, DENVER, SALT_LAKE_CITY, 3, Red, Yellow);
    routes_between!(routes, DENVER, SANTA_FE, 2, Wild);

    // Duluth.
    routes_between!(routes, DULUTH, HELENA, 6, Orange);
    routes_between!(routes, DULUTH, OMAHA, 2, Wild, Wild);
    routes_between!(routes, DULUTH, SAULT_ST_MARIE, 3, Wild);
    routes_between!(routes, DULUTH, TORONTO, 6, Violet);
    routes_between!(routes, DULUTH, WINNIPEG, 4, Black);

    // El Paso.
    routes_between!(routes, EL_PASO, HOUSTON, 6, Green);
    routes_between!(routes, EL_PASO, LOS_ANGELES, 6, Black);
    routes_between!(routes, EL_PASO, OKLAHOMA_CITY, 5, Yellow);
    routes_between!(routes, EL_PASO, PHOENIX, 3, Wild);
    routes_between!(routes, EL_PASO, SANTA_FE, 2, Wild);

    // Helena.
    routes_between!(routes, HELENA, OMAHA, 5, Red);
    routes_between!(routes, HELENA, SALT_LAKE_CITY, 3, Violet);
    routes_between!(routes, HELENA, SEATTLE, 6, Yellow);
    routes_between!(routes, HELENA, WINNIPEG, 4, Blue);

    // Houston.
    routes_between!(routes, HOUSTON, NEW_ORLEANS, 2, Wild);

    // Kansas City.
    routes_between!(routes, KANSAS_CITY, SAINT_LOUIS, 2, Blue, Violet);
    routes_between!(routes, KANSAS_CITY, OKLAHOMA_CITY, 2, Wild, Wild);
    routes_between!(routes, KANSAS_CITY, OMAHA, 1, Wild, Wild);

    // Las Vegas.
    routes_between!(routes, LAS_VEGAS, LOS_ANGELES, 2, Wild);
    routes_between!(routes, LAS_VEGAS, SALT_LAKE_CITY, 3, Orange);

    // Little Rock.
    routes_between!(routes, LITTLE_ROCK, NASHVILLE, 3, White);
    routes_between!(routes, LITTLE_ROCK, NEW_ORLEANS, 3, Wild);
    routes_between!(routes, LITTLE_ROCK, OKLAHOMA_CITY, 2, Wild);
    routes_between!(routes, LITTLE_ROCK, SAINT_LOUIS, 2, Wild);

    // Los Angeles.
    routes_between!(routes, LOS_ANGELES, PHOENIX, 3, Wild);
    routes_between!(routes, LOS_ANGELES, SAN_FRANCISCO, 3, Violet, Yellow);

    // Miami.
    routes_between!(routes, MIAMI, NEW_ORLEANS, 6, Red);

    // Montréal.
    routes_between!(routes, MONTREAL, NEW_YORK, 3, Blue);
    routes_between!(routes, MONTREAL, SAULT_ST_MARIE, 5, Black);
    routes_between!(routes, MONTREAL, TORONTO, 3, Wild);

    // Nashville.
    routes_between!(routes, NASHVILLE, PITTSBURGH, 4, Yellow);
    routes_between!(routes, NASHVILLE, RALEIGH, 3, Black);
    routes_between!(routes, NASHVILLE, SAINT_LOUIS, 2, Wild);

    // New York.
    routes_between!(routes, NEW_YORK, PITTSBURGH, 2, Green, White);
    routes_between!(routes, NEW_YORK, WASHINGTON, 2, Black, Orange);

    // Oklahoma City.
    routes_between!(routes, OKLAHOMA_CITY, SANTA_FE, 3, Blue);

    // Phoenix.
    routes_between!(routes, PHOENIX, SANTA_FE, 3, Wild);

    // Pittsburgh.
    routes_between!(routes, PITTSBURGH, RALEIGH, 2, Wild);
    routes_between!(routes, PITTSBURGH, SAINT_LOUIS, 5, Green);
    routes_between!(routes, PITTSBURGH, TORONTO, 2, Wild);
    routes_between!(routes, PITTSBURGH, WASHINGTON, 2, Wild);

    // Portland.
    routes_between!(routes, PORTLAND, SALT_LAKE_CITY, 6, Blue);
    routes_between!(routes, PORTLAND, SAN_FRANCISCO, 5, Green, Violet);

    // Raleigh.
    routes_between!(routes, RALEIGH, WASHINGTON, 2, Wild, Wild);

    // Salt Lake City.
    routes_between!(routes, SALT_LAKE_CITY, SAN_FRANCISCO, 5, Orange, White);

    // Sault St. Marie.
    routes_between!(routes, SAULT_ST_MARIE, TORONTO, 2, Wild);
    routes_between!(routes, SAULT_ST_MARIE, WINNIPEG, 6, Wild);

    // Seattle.
    routes_between!(routes, SEATTLE, PORTLAND, 1, Wild, Wild);
    routes_between!(routes, SEATTLE, VANCOUVER, 1, Wild, Wild);

    routes
}

/// All destination tickets.
pub fn tickets() -> Vec<Ticket> {
    vec![
        ticket!(BOSTON, MIAMI, 12),
        ticket!(CALGARY, PHOENIX, 13),
        ticket!(CALGARY, SALT_LAKE_CITY, 7),
        ticket!(CHICAGO, NEW_ORLEANS, 7),
        ticket!(CHICAGO, SANTA_FE, 9),
        ticket!(DALLAS, NEW_YORK, 11),
        ticket!(DENVER, EL_PASO, 4),
        ticket!(DENVER, PITTSBURGH, 11),
        ticket!(DULUTH, EL_PASO, 10),
        ticket!(DULUTH, HOUSTON, 8),
        ticket!(HELENA, LOS_ANGELES, 8),
        ticket!(KANSAS_CITY, HOUSTON, 5),
        ticket!(LOS_ANGELES, CHICAGO, 16),
        ticket!(LOS_ANGELES, MIAMI, 20),
        ticket!(LOS_ANGELES, NEW_YORK, 21),
        ticket!(MONTREAL, ATLANTA, 9),
        ticket!(MONTREAL, NEW_ORLEANS, 13),
        ticket!(NEW_YORK, ATLANTA, 6),
        ticket!(PORTLAND, NASHVILLE, 17),
        ticket!(PORTLAND, PHOENIX, 11),
        ticket!(SAN_FRANCISCO, ATLANTA, 17),
        ticket!(SAULT_ST_MARIE, NASHVILLE, 8),
        ticket!(SAULT_ST_MARIE, OKLAHOMA_CITY, 9),
        ticket!(SEATTLE, LOS_ANGELES, 9),
        ticket!(SEATTLE, NEW_YORK, 22),
        ticket!(TORONTO, MIAMI, 10),
        ticket!(VANCOUVER, MONTREAL, 20),
        ticket!(VANCOUVER, SANTA_FE, 13),
        ticket!(WINNIPEG, HOUSTON, 12),
        ticket!(WINNIPEG, LITTLE_ROCK, 11),
    ]
}

/// The complete board.
pub fn board() -> Board {
    Board::from_parts(stations(), routes(), tickets())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_ids_are_dense() {
        for (index, station) in stations().iter().enumerate() {
            assert_eq!(station.id() as usize, index);
        }
    }

    #[test]
    fn station_names() {
        assert_eq!(EL_PASO.to_string(), "El Paso");
        assert_eq!(MONTREAL.to_string(), "Montréal");
        assert_eq!(SAULT_ST_MARIE.to_string(), "Sault St. Marie");
    }

    #[test]
    fn total_route_length() {
        let total: u32 = routes().iter().map(|route| route.length() as u32).sum();
        let colorless = routes().iter().filter(|route| route.color().is_none()).count();

        assert_eq!(total, 311);
        assert_eq!(colorless, 45);
    }

    #[test]
    fn ticket_text() {
        assert_eq!(tickets()[0].text(), "Boston - Miami (12)");
    }
}
