use std::fs;
use std::process;

use clap::Parser;
use log::{error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rail_network::board::Board;
use rail_network::channel::ChannelPlayer;
use rail_network::config::GameConfig;
use rail_network::game::Game;
use rail_network::player::Player;
use rail_network::random_player::RandomPlayer;
use rail_network::GameError;

#[derive(Debug, Parser)]
#[command(name = "simulate")]
#[command(about = "Plays games between random players on the North America board")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 1)]
    games: u32,

    /// Number of players, between 2 and 5
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Cars each player starts with
    #[arg(long, default_value_t = 40)]
    cars: u8,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 2021)]
    seed: u64,

    /// JSON game configuration, overriding --players and --cars
    #[arg(long)]
    config: Option<String>,

    /// Run every player on its own thread, behind a channel
    #[arg(long)]
    threaded: bool,
}

fn load_config(args: &Args) -> rail_network::Result<GameConfig> {
    match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|err| {
                GameError::InvalidArgument(format!("Cannot read {}: {}.", path, err))
            })?;
            GameConfig::from_json(&json)
        }
        None => Ok(GameConfig::new(args.players)?.with_initial_car_count(args.cars)),
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    };

    let board = Board::usa();
    let mut wins = vec![0u32; config.player_count()];
    let mut draws = 0u32;

    for game_index in 0..args.games {
        let seed = args.seed.wrapping_add(u64::from(game_index));
        let players: Vec<Box<dyn Player>> = config
            .player_ids()
            .map(|id| {
                let player = RandomPlayer::new(board.clone(), seed.wrapping_add(id.index() as u64 + 1));
                if args.threaded {
                    Box::new(ChannelPlayer::spawn(player)) as Box<dyn Player>
                } else {
                    Box::new(player)
                }
            })
            .collect();
        let names = config.player_ids().map(|id| id.to_string()).collect();

        let outcome = Game::new(
            config.clone(),
            board.clone(),
            players,
            names,
            ChaCha8Rng::seed_from_u64(seed),
        )
        .and_then(Game::play);

        match outcome {
            Ok(outcome) => {
                info!("Game {} scored {:?}.", game_index + 1, outcome.final_points);
                if outcome.is_draw() {
                    draws += 1;
                }
                for winner in &outcome.winners {
                    wins[winner.index()] += 1;
                }
                println!(
                    "Game {}: points {:?}, winners {:?}",
                    game_index + 1,
                    outcome.final_points,
                    outcome.winners.iter().map(|id| id.index() + 1).collect::<Vec<_>>()
                );
            }
            Err(err) => error!("Game {} was aborted: {}", game_index + 1, err),
        }
    }

    for (index, count) in wins.iter().enumerate() {
        println!("player {}: {} win(s)", index + 1, count);
    }
    println!("draws: {}", draws);
}
