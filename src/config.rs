use crate::constants::{DEFAULT_INITIAL_CAR_COUNT, MAX_PLAYERS, MIN_PLAYERS};
use crate::error::{GameError, Result};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a player by its seat at the table, starting at zero.
///
/// # JSON
/// Player ids are serialized as their index.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PlayerId(u8);

impl PlayerId {
    #[inline]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The player seated after this one, wrapping around the table.
    ///
    /// # Example
    /// ```
    /// use rail_network::config::{GameConfig, PlayerId};
    ///
    /// let config = GameConfig::new(3).unwrap();
    /// assert_eq!(PlayerId::new(1).next(&config), PlayerId::new(2));
    /// assert_eq!(PlayerId::new(2).next(&config), PlayerId::new(0));
    /// ```
    pub fn next(self, config: &GameConfig) -> Self {
        Self(((self.index() + 1) % config.player_count) as u8)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0 + 1)
    }
}

/// Settings shared by every component of a game.
///
/// # JSON
/// ```json
/// {"player_count": 3, "initial_car_count": 40}
/// ```
/// Missing fields take their default value, and a configuration that `validate` rejects
/// fails to deserialize.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    player_count: usize,
    initial_car_count: u8,
}

/// Unchecked wire form of [`GameConfig`].
#[derive(Deserialize)]
#[serde(default)]
struct RawGameConfig {
    player_count: usize,
    initial_car_count: u8,
}

impl Default for RawGameConfig {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            player_count: config.player_count,
            initial_car_count: config.initial_car_count,
        }
    }
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        let config = Self {
            player_count: raw.player_count,
            initial_car_count: raw.initial_car_count,
        };
        config.validate()?;
        Ok(config)
    }
}

impl GameConfig {
    /// Configuration of a game with the given number of players, which must be between two
    /// and five, inclusively.
    ///
    /// # Example
    /// ```
    /// use rail_network::config::GameConfig;
    ///
    /// assert!(GameConfig::new(5).is_ok());
    /// assert!(GameConfig::new(1).is_err());
    /// ```
    pub fn new(player_count: usize) -> Result<Self> {
        let config = Self {
            player_count,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_initial_car_count(self, initial_car_count: u8) -> Self {
        Self {
            initial_car_count,
            ..self
        }
    }

    /// Parses a configuration from JSON, missing fields taking their default value.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|err| GameError::invalid(format!("Invalid game configuration: {}.", err)))
    }

    /// Checks the player count against the supported range.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(GameError::invalid(format!(
                "Cannot create a game with {} players: one must have at least {}, and at most {} players.",
                self.player_count, MIN_PLAYERS, MAX_PLAYERS
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[inline]
    pub fn initial_car_count(&self) -> u8 {
        self.initial_car_count
    }

    /// All players, in seating order.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.player_count as u8).map(PlayerId)
    }

    /// Both routes between the same two stations can only be claimed in games of more
    /// than three players, and never by the same player.
    #[inline]
    pub fn twin_routes_allowed(&self) -> bool {
        self.player_count > 3
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: MIN_PLAYERS,
            initial_car_count: DEFAULT_INITIAL_CAR_COUNT,
        }
    }
}
