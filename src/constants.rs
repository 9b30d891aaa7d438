//! Numeric rules of the game.

/// Copies of each of the eight car cards.
pub const CAR_CARDS_COUNT: usize = 12;
/// Copies of the locomotive card.
pub const LOCOMOTIVE_CARDS_COUNT: usize = 14;
/// Size of the complete card set.
pub const TOTAL_CARDS_COUNT: usize = 8 * CAR_CARDS_COUNT + LOCOMOTIVE_CARDS_COUNT;

pub const FACE_UP_CARDS_COUNT: usize = 5;
pub const INITIAL_CARDS_COUNT: usize = 4;
pub const INITIAL_TICKETS_COUNT: usize = 5;
pub const MIN_INITIAL_TICKETS_KEPT: usize = 2;
pub const IN_GAME_TICKETS_COUNT: usize = 3;
pub const DRAWN_CARDS_COUNT: usize = 2;
/// Cards turned over from the deck when a tunnel is attempted.
pub const ADDITIONAL_TUNNEL_CARDS: usize = 3;

pub const DEFAULT_INITIAL_CAR_COUNT: u8 = 40;
/// Once a player is left with this many cars or fewer, the final round begins.
pub const LAST_TURN_CAR_COUNT: u8 = 2;
pub const LONGEST_TRAIL_BONUS_POINTS: i32 = 10;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;

pub const MIN_ROUTE_LENGTH: u8 = 1;
pub const MAX_ROUTE_LENGTH: u8 = 6;

// Indexed by route length.
const ROUTE_CLAIM_POINTS: [u32; MAX_ROUTE_LENGTH as usize + 1] = [0, 1, 2, 4, 7, 10, 15];

/// Points granted for claiming a route of the given length, or zero outside of
/// `MIN_ROUTE_LENGTH..=MAX_ROUTE_LENGTH`.
///
/// # Example
/// ```
/// use rail_network::constants::route_claim_points;
///
/// assert_eq!(route_claim_points(1), 1);
/// assert_eq!(route_claim_points(6), 15);
/// assert_eq!(route_claim_points(7), 0);
/// ```
pub fn route_claim_points(length: u8) -> u32 {
    if length < MIN_ROUTE_LENGTH {
        return 0;
    }
    ROUTE_CLAIM_POINTS
        .get(length as usize)
        .copied()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_set_size() {
        assert_eq!(TOTAL_CARDS_COUNT, 110);
    }

    #[test]
    fn claim_points_per_length() {
        let points: Vec<_> = (MIN_ROUTE_LENGTH..=MAX_ROUTE_LENGTH)
            .map(route_claim_points)
            .collect();
        assert_eq!(points, vec![1, 2, 4, 7, 10, 15]);
        assert_eq!(route_claim_points(0), 0);
    }
}
