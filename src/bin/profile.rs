//! Drives playouts and searches for profiling.
//!
//! `RUST_LOG=bitcheckers=debug cargo run --release --bin profile --features hotpath`

use bitcheckers::color::PieceColor;
use bitcheckers::config::{MctsConfig, MonteCarloConfig, RaveConfig};
use bitcheckers::game::Game;
use bitcheckers::search::rollout::random_playout;
use bitcheckers::search::{MctsPlayer, MonteCarloPlayer, Player, RavePlayer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn playouts(count: u32) {
    let mut rng = StdRng::seed_from_u64(123);
    let mut plies = 0;
    for _ in 0..count {
        let mut game = Game::new();
        random_playout(&mut game, &mut rng);
        plies += game.move_count();
    }
    info!(count, plies, "random playouts");
}

/// Play one game between two players and report the result.
fn play(red: &mut dyn Player, blue: &mut dyn Player) {
    let mut game = Game::new();
    while !game.is_over() {
        let player: &mut dyn Player = match game.next_turn() {
            PieceColor::Red => &mut *red,
            PieceColor::Blue => &mut *blue,
        };
        let Some(mv) = player.get_move(&game) else {
            break;
        };
        if !game.run_move(&mv) {
            warn!(%mv, turn = %game.next_turn(), "player returned an illegal move");
            break;
        }
    }
    info!(moves = game.move_count(), state = %game.state(), "game over");
}

fn run() -> Result<(), bitcheckers::error::ConfigError> {
    playouts(2_000);

    let mut monte_carlo =
        MonteCarloPlayer::new(MonteCarloConfig::default().with_playouts(200).with_workers(4))?;
    let mut mcts = MctsPlayer::new(MctsConfig::default().with_iterations(2_000))?;
    let mut rave = RavePlayer::new(RaveConfig::default().with_iterations(2_000))?;

    play(&mut mcts, &mut monte_carlo);
    play(&mut rave, &mut mcts);

    Ok(())
}

#[cfg_attr(feature = "hotpath", hotpath::main)]
fn main() {
    init_tracing();
    if let Err(e) = run() {
        tracing::error!(error = %e, "profile run failed");
        std::process::exit(1);
    }
}
