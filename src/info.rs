use crate::bag::SortedBag;
use crate::card::Card;
use crate::constants::LONGEST_TRAIL_BONUS_POINTS;
use crate::route::Route;
use crate::trail::Trail;

/// Builds the messages narrating the game, from the point of view of one player.
///
/// # Example
/// ```
/// use rail_network::info::Info;
///
/// let info = Info::new("Ada");
/// assert_eq!(info.kept_tickets(1), "Ada kept 1 ticket.");
/// assert_eq!(info.kept_tickets(3), "Ada kept 3 tickets.");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Info {
    player_name: String,
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

impl Info {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
        }
    }

    /// Name of `card` for the given quantity, e.g. "red card" or "locomotives".
    pub fn card_name(card: Card, count: usize) -> String {
        match card.color() {
            Some(color) => format!("{} card{}", color, plural(count)),
            None => format!("locomotive{}", plural(count)),
        }
    }

    /// Describes a multiset of cards, e.g. "2 red cards and 1 locomotive".
    pub fn cards_description(cards: &SortedBag<Card>) -> String {
        let parts: Vec<String> = cards
            .counts()
            .map(|(card, count)| format!("{} {}", count, Self::card_name(*card, count)))
            .collect();

        match parts.split_last() {
            None => String::from("no cards"),
            Some((last, [])) => last.clone(),
            Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
        }
    }

    /// Joins player names as "A, B and C".
    pub fn names_description(names: &[String]) -> String {
        match names.split_last() {
            None => String::new(),
            Some((last, [])) => last.clone(),
            Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
        }
    }

    pub fn will_play_first(&self) -> String {
        format!("{} will play first.", self.player_name)
    }

    pub fn kept_tickets(&self, count: usize) -> String {
        format!("{} kept {} ticket{}.", self.player_name, count, plural(count))
    }

    pub fn can_play(&self) -> String {
        format!("It is {}'s turn to play.", self.player_name)
    }

    pub fn drew_tickets(&self, count: usize) -> String {
        format!("{} drew {} ticket{}.", self.player_name, count, plural(count))
    }

    pub fn drew_blind_card(&self) -> String {
        format!("{} drew a card from the deck.", self.player_name)
    }

    pub fn drew_visible_card(&self, card: Card) -> String {
        format!(
            "{} drew a face-up {}.",
            self.player_name,
            Self::card_name(card, 1)
        )
    }

    pub fn claimed_route(&self, route: &Route, cards: &SortedBag<Card>) -> String {
        format!(
            "{} claimed the route {} with {}.",
            self.player_name,
            route,
            Self::cards_description(cards)
        )
    }

    pub fn attempts_tunnel_claim(&self, route: &Route, initial_cards: &SortedBag<Card>) -> String {
        format!(
            "{} attempts to claim the tunnel {} with {}!",
            self.player_name,
            route,
            Self::cards_description(initial_cards)
        )
    }

    pub fn drew_additional_cards(&self, drawn_cards: &SortedBag<Card>, additional_cost: usize) -> String {
        let cost = if additional_cost == 0 {
            String::from("They do not cost anything more.")
        } else {
            format!(
                "They cost {} more card{}.",
                additional_cost,
                plural(additional_cost)
            )
        };
        format!(
            "The additional cards are {}. {}",
            Self::cards_description(drawn_cards),
            cost
        )
    }

    pub fn did_not_claim_route(&self, route: &Route) -> String {
        format!(
            "{} did not claim the route {}.",
            self.player_name, route
        )
    }

    pub fn last_turn_begins(&self, car_count: u8) -> String {
        format!(
            "{} only has {} car{} left: the last round begins!",
            self.player_name,
            car_count,
            plural(car_count as usize)
        )
    }

    pub fn gets_longest_trail_bonus(&self, trail: &Trail) -> String {
        let ends = match (trail.station1(), trail.station2()) {
            (Some(from), Some(to)) => format!("{} - {}", from, to),
            _ => String::from("no route"),
        };
        format!(
            "{} receives a bonus of {} points for the longest trail ({}).",
            self.player_name, LONGEST_TRAIL_BONUS_POINTS, ends
        )
    }

    /// Victory announcement of a two-player game.
    pub fn won(&self, points: i32, loser_points: i32) -> String {
        format!(
            "{} wins with {} point{}, against {} point{}!",
            self.player_name,
            points,
            plural(points.unsigned_abs() as usize),
            loser_points,
            plural(loser_points.unsigned_abs() as usize)
        )
    }

    /// Victory announcement of a game of more than two players.
    pub fn won_among_many(&self, points: i32) -> String {
        format!(
            "{} wins with {} point{}!",
            self.player_name,
            points,
            plural(points.unsigned_abs() as usize)
        )
    }

    pub fn draw(player_names: &[String], points: i32) -> String {
        format!(
            "{} are tied with {} point{} each!",
            Self::names_description(player_names),
            points,
            plural(points.unsigned_abs() as usize)
        )
    }
}
