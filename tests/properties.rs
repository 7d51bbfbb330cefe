use ultimate_ttt::action::Action;
use ultimate_ttt::board::Player;
use ultimate_ttt::boards::meta_state::MetaState;
use ultimate_ttt::error::{Error, InvalidMoveError};
use ultimate_ttt::minimax::MinimaxSearch;
use ultimate_ttt::random::{RandomPlayer, SeededRandomGenerator};

fn all_actions() -> Vec<Action> {
    (1..=9)
        .flat_map(|b| (1..=9).map(move |c| Action::new(b, c).unwrap()))
        .collect()
}

/// Plays a seeded random game and returns every state it passed through.
fn random_game(seed: u64) -> Vec<MetaState> {
    let mut player = RandomPlayer::new(SeededRandomGenerator::new(seed));
    let mut state = MetaState::new();
    let mut history = vec![state.clone()];
    while !state.is_terminal() {
        let action = player.choose_action(&state).unwrap();
        state.apply(&action).unwrap();
        history.push(state.clone());
    }
    history
}

#[test]
fn actions_exist_exactly_while_the_game_runs() {
    for seed in 0..20 {
        for state in random_game(seed) {
            assert_eq!(
                state.available_actions().is_empty(),
                state.is_terminal(),
                "seed {seed}"
            );
        }
    }
}

#[test]
fn only_available_actions_apply() {
    let everything = all_actions();
    for seed in 0..10 {
        for state in random_game(seed) {
            let available = state.available_actions();
            for action in &everything {
                let mut copy = state.clone();
                let result = copy.apply(action);
                if available.contains(action) {
                    assert!(state.is_valid_action(action));
                    assert!(result.is_ok());
                } else {
                    assert!(!state.is_valid_action(action));
                    assert!(result.is_err());
                    assert_eq!(copy, state);
                }
            }
        }
    }
}

#[test]
fn turns_alternate() {
    for seed in 0..10 {
        let history = random_game(seed);
        assert_eq!(history[0].current_player(), Player::X);
        for pair in history.windows(2) {
            assert_eq!(pair[1].current_player(), pair[0].current_player().opponent());
        }
    }
}

#[test]
fn utilities_are_zero_sum() {
    for seed in 0..30 {
        let history = random_game(seed);
        let last = history.last().unwrap();
        assert!(last.is_terminal());
        assert_eq!(
            last.terminal_utility(Player::X),
            -last.terminal_utility(Player::O)
        );
        match last.winner() {
            Some(winner) => assert_eq!(last.terminal_utility(winner), 1),
            None => assert_eq!(last.terminal_utility(Player::X), 0),
        }
    }
}

#[test]
fn read_only_queries_are_idempotent() {
    for state in random_game(3) {
        assert_eq!(state.evaluate(), state.evaluate());
        assert_eq!(state.is_terminal(), state.is_terminal());
        assert_eq!(state.evaluate().x, -state.evaluate().o);
    }
}

#[test]
fn search_is_deterministic_and_pruning_is_transparent() {
    let plain = MinimaxSearch::builder()
        .with_depth_limit(2)
        .with_alpha_beta_pruning(false)
        .build()
        .unwrap();
    let pruned = MinimaxSearch::builder().with_depth_limit(2).build().unwrap();

    for seed in 0..4 {
        let history = random_game(seed);
        for state in history.iter().step_by(7).filter(|s| !s.is_terminal()) {
            let role = state.current_player();
            let first = pruned.choose_action(state, role).unwrap();
            let again = pruned.choose_action(state, role).unwrap();
            let unpruned = plain.choose_action(state, role).unwrap();

            assert_eq!(first, again);
            assert_eq!(first, unpruned);
            assert!(state.is_valid_action(&first));
        }
    }
}

#[test]
fn searching_a_finished_game_fails() {
    let history = random_game(11);
    let last = history.last().unwrap();
    let search = MinimaxSearch::builder().with_depth_limit(3).build().unwrap();

    let result = search.choose_action(last, last.current_player());

    assert!(matches!(result, Err(Error::NoLegalMove(_))));
    let action = Action::new(1, 1).unwrap();
    assert_eq!(
        last.clone().apply(&action),
        Err(InvalidMoveError::GameOver)
    );
}
