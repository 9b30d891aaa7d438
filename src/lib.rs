//! Rules engine for a rail-network board game: players collect colored cards, claim routes
//! between stations, and score tickets by connecting their stations.
//!
//! Game states are immutable values; every action returns a new state. The [`game::Game`]
//! orchestrator drives a set of [`player::Player`]s through the setup, the turns and the
//! final scoring.

pub mod bag;
pub mod board;
pub mod card;
pub mod card_state;
pub mod channel;
pub mod config;
pub mod constants;
pub mod deck;
pub mod error;
pub mod game;
pub mod game_state;
pub mod info;
pub mod partition;
pub mod player;
pub mod player_state;
pub mod random_player;
pub mod route;
pub mod station;
pub mod ticket;
pub mod trail;
pub mod usa;

pub use error::{GameError, PlayerError, Result};
