extern crate ultimate_ttt;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ultimate_ttt::board::{Outcome, Player};
use ultimate_ttt::boards::meta_state::MetaState;
use ultimate_ttt::config::SearchConfig;
use ultimate_ttt::error::Error;
use ultimate_ttt::minimax::MinimaxSearch;
use ultimate_ttt::random::{RandomGenerator, RandomPlayer, SeededRandomGenerator, StandardRandomGenerator};

/// Plays one game of Ultimate Tic-Tac-Toe: minimax against a random opponent.
#[derive(Debug, Parser)]
struct Args {
    /// Search depth in plies.
    #[arg(long, default_value_t = 4)]
    depth: u32,

    /// Disable alpha-beta pruning.
    #[arg(long)]
    no_pruning: bool,

    /// Let the computer play O instead of X.
    #[arg(long)]
    computer_plays_o: bool,

    /// Seed for the random opponent.
    #[arg(long)]
    seed: Option<u64>,

    /// Per-move time budget in milliseconds.
    #[arg(long)]
    time_budget_ms: Option<u64>,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = SearchConfig {
        depth_limit: Some(args.depth),
        alpha_beta_pruning: !args.no_pruning,
        require_depth_limit: true,
        time_budget_ms: args.time_budget_ms,
    };
    let search = MinimaxSearch::from_config(&config)?;
    let computer = if args.computer_plays_o { Player::O } else { Player::X };

    let outcome = match args.seed {
        Some(seed) => play(&search, computer, RandomPlayer::new(SeededRandomGenerator::new(seed)))?,
        None => play(&search, computer, RandomPlayer::new(StandardRandomGenerator))?,
    };

    match outcome {
        Outcome::Won(player) if player == computer => println!("The computer ({player:?}) wins"),
        Outcome::Won(player) => println!("The random player ({player:?}) wins"),
        Outcome::Draw => println!("Draw"),
        Outcome::InProgress => unreachable!("the game loop only stops on a finished game"),
    }
    Ok(())
}

fn play<K: RandomGenerator>(
    search: &MinimaxSearch,
    computer: Player,
    mut opponent: RandomPlayer<K>,
) -> Result<Outcome, Error> {
    let mut state = MetaState::new();

    while !state.is_terminal() {
        let mover = state.current_player();
        let action = if mover == computer {
            let report = search.search(&state, computer)?;
            info!(
                score = report.score,
                nodes = report.stats.nodes_visited,
                cutoffs = report.stats.cutoffs,
                "computer searched"
            );
            report.best_move
        } else {
            opponent.choose_action(&state)?
        };

        state.apply(&action)?;
        println!("{mover:?} plays {action}");
    }

    Ok(state.outcome())
}
