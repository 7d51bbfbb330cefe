use crate::board::{Board, Player};
use crate::config::SearchConfig;
use crate::error::{ConfigurationError, Error, NoLegalMoveError};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, trace};

/// Search score of a won game. Larger than any heuristic evaluation, so an
/// exact result always dominates an estimate.
pub const WIN_SCORE: i32 = 1_000_000;

const INFINITY: i32 = i32::MAX / 2;

/// Depth-limited minimax with optional alpha-beta pruning.
///
/// Every explored branch works on its own clone of the state, so the state
/// handed to [`MinimaxSearch::choose_action`] is never modified.
#[derive(Debug, Clone)]
pub struct MinimaxSearch {
    depth_limit: Option<u32>,
    use_alpha_beta_pruning: bool,
    time_budget: Option<Duration>,
}

impl Default for MinimaxSearch {
    fn default() -> Self {
        Self {
            depth_limit: None,
            use_alpha_beta_pruning: true,
            time_budget: None,
        }
    }
}

/// A builder for creating instances of `MinimaxSearch`.
#[derive(Debug, Clone, Default)]
pub struct MinimaxSearchBuilder {
    config: SearchConfig,
    time_budget: Option<Duration>,
}

impl MinimaxSearchBuilder {
    /// Starts from the default settings: no depth bound, pruning on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the search to `depth` plies below the root.
    pub fn with_depth_limit(mut self, depth: u32) -> Self {
        self.config.depth_limit = Some(depth);
        self
    }

    /// Enables or disables alpha-beta pruning.
    pub fn with_alpha_beta_pruning(mut self, use_abp: bool) -> Self {
        self.config.alpha_beta_pruning = use_abp;
        self
    }

    /// Makes [`build`](Self::build) fail unless a depth limit was set.
    pub fn require_depth_limit(mut self) -> Self {
        self.config.require_depth_limit = true;
        self
    }

    /// Stops expanding nodes once `budget` has elapsed; unexpanded nodes are
    /// scored heuristically.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Builds the `MinimaxSearch` instance with the configured parameters.
    pub fn build(self) -> Result<MinimaxSearch, ConfigurationError> {
        let mut search = MinimaxSearch::from_config(&self.config)?;
        if self.time_budget.is_some() {
            search.time_budget = self.time_budget;
        }
        Ok(search)
    }
}

impl MinimaxSearch {
    /// Returns a new builder for `MinimaxSearch`.
    pub fn builder() -> MinimaxSearchBuilder {
        MinimaxSearchBuilder::new()
    }

    /// Builds a search from validated settings.
    pub fn from_config(config: &SearchConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            depth_limit: config.depth_limit,
            use_alpha_beta_pruning: config.alpha_beta_pruning,
            time_budget: config.time_budget(),
        })
    }

    /// Plies searched below the root, `None` if unbounded.
    pub fn depth_limit(&self) -> Option<u32> {
        self.depth_limit
    }

    /// Whether alpha-beta pruning is enabled.
    pub fn uses_alpha_beta_pruning(&self) -> bool {
        self.use_alpha_beta_pruning
    }

    /// Wall-clock budget per search, if any.
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget
    }

    /// Picks the best move for the player to move in `state`.
    pub fn choose_action_for_mover<T>(&self, state: &T) -> Result<T::Move, Error>
    where
        T: Board,
        Error: From<T::Error>,
    {
        self.choose_action(state, state.get_current_player())
    }

    /// Picks the move that is best for `role`, which normally is the player
    /// to move in `state`.
    ///
    /// Ties go to the first move in enumeration order.
    pub fn choose_action<T>(&self, state: &T, role: Player) -> Result<T::Move, Error>
    where
        T: Board,
        Error: From<T::Error>,
    {
        self.search(state, role).map(|report| report.best_move)
    }

    /// Like [`choose_action`](Self::choose_action), but also returns the
    /// root scores and node counters.
    #[instrument(skip(self, state), fields(depth = ?self.depth_limit, abp = self.use_alpha_beta_pruning))]
    pub fn search<T>(&self, state: &T, role: Player) -> Result<SearchReport<T::Move>, Error>
    where
        T: Board,
        Error: From<T::Error>,
    {
        let mut root = state.clone();
        if self.depth_limit.is_some() {
            root.set_depth_limit(self.depth_limit);
        }

        let moves = root.get_available_moves();
        if moves.is_empty() {
            return Err(NoLegalMoveError.into());
        }

        let mut run = SearchRun {
            role,
            use_alpha_beta_pruning: self.use_alpha_beta_pruning,
            deadline: self.time_budget.map(|budget| Instant::now() + budget),
            stats: SearchStats::default(),
        };

        let mut root_scores = Vec::with_capacity(moves.len());
        let mut best: Option<(T::Move, i32)> = None;
        let mut alpha = -INFINITY;
        for b_move in moves {
            let mut child = root.clone();
            child.perform_move(&b_move)?;
            let value = run.min_value(&child, alpha, INFINITY)?;
            trace!(?b_move, value, "scored root move");
            root_scores.push((b_move, value));

            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((b_move, value));
                if run.use_alpha_beta_pruning {
                    alpha = value;
                }
            }
        }

        let (best_move, score) = best.ok_or(NoLegalMoveError)?;
        debug!(?best_move, score, stats = ?run.stats, "search finished");
        Ok(SearchReport {
            best_move,
            score,
            root_scores,
            stats: run.stats,
        })
    }
}

/// Node counters collected during one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// States examined below the root.
    pub nodes_visited: u64,
    /// States scored by utility or heuristic instead of being expanded.
    pub leaves_evaluated: u64,
    /// Times the remaining siblings of a node were skipped.
    pub cutoffs: u64,
    /// Leaves cut short because the time budget ran out.
    pub timed_out_leaves: u64,
}

/// The result of [`MinimaxSearch::search`].
#[derive(Debug, Clone)]
pub struct SearchReport<M> {
    /// The chosen move.
    pub best_move: M,
    /// Its minimax value.
    pub score: i32,
    /// Every root move with its value, in enumeration order. With pruning,
    /// values of moves that lost to an earlier one are only upper bounds.
    pub root_scores: Vec<(M, i32)>,
    /// Node counters of this search.
    pub stats: SearchStats,
}

struct SearchRun {
    role: Player,
    use_alpha_beta_pruning: bool,
    deadline: Option<Instant>,
    stats: SearchStats,
}

impl SearchRun {
    fn max_value<T>(&mut self, state: &T, mut alpha: i32, beta: i32) -> Result<i32, Error>
    where
        T: Board,
        Error: From<T::Error>,
    {
        self.stats.nodes_visited += 1;
        let moves = match self.expand(state) {
            Ok(moves) => moves,
            Err(leaf) => return Ok(leaf),
        };

        let mut value = -INFINITY;
        for b_move in moves {
            let mut child = state.clone();
            child.perform_move(&b_move)?;
            value = value.max(self.min_value(&child, alpha, beta)?);
            if self.use_alpha_beta_pruning {
                alpha = alpha.max(value);
                if alpha >= beta {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
        }
        Ok(value)
    }

    fn min_value<T>(&mut self, state: &T, alpha: i32, mut beta: i32) -> Result<i32, Error>
    where
        T: Board,
        Error: From<T::Error>,
    {
        self.stats.nodes_visited += 1;
        let moves = match self.expand(state) {
            Ok(moves) => moves,
            Err(leaf) => return Ok(leaf),
        };

        let mut value = INFINITY;
        for b_move in moves {
            let mut child = state.clone();
            child.perform_move(&b_move)?;
            value = value.min(self.max_value(&child, alpha, beta)?);
            if self.use_alpha_beta_pruning {
                beta = beta.min(value);
                if alpha >= beta {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
        }
        Ok(value)
    }

    /// The moves to recurse into, or the leaf value when `state` must not be
    /// expanded.
    fn expand<T: Board>(&mut self, state: &T) -> Result<Vec<T::Move>, i32> {
        let timed_out = self.deadline.is_some_and(|deadline| Instant::now() >= deadline);
        if timed_out {
            self.stats.timed_out_leaves += 1;
        }

        if !timed_out && !state.is_cutoff() {
            let moves = state.get_available_moves();
            if !moves.is_empty() {
                return Ok(moves);
            }
        }

        self.stats.leaves_evaluated += 1;
        Err(self.leaf_value(state))
    }

    fn leaf_value<T: Board>(&self, state: &T) -> i32 {
        if state.get_outcome().is_decided() {
            state.get_utility(self.role) * WIN_SCORE
        } else {
            state.get_evaluation(self.role)
        }
    }
}
