//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: Descend the tree with UCB1 until a node can be expanded
//! 2. Expansion: Add one child for a random untried action
//! 3. Rollout: Play random moves from the new node to the end of the game
//! 4. Backpropagation: Add the searching player's score along the path

use engine_core::{GameError, GameModel};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::rollout::RandomRollout;
use crate::tree::{ChildStats, MctsTree, TreeStats};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("Game model error: {0}")]
    Game(#[from] GameError),

    #[error("Outcome has no score for the searching player")]
    MissingOutcome,

    #[error("Invalid MCTS config: {0}")]
    InvalidConfig(String),

    #[error("Rollout exceeded {0} moves without reaching a terminal state")]
    RolloutDepthExceeded(u32),

    #[error("No legal moves available")]
    NoLegalMoves,
}

/// Where selection stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    /// The node still has untried actions
    Expandable,
    /// The node has neither children nor untried actions
    DeadEnd,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Best action to take
    pub action: A,

    /// Observed win ratio of the chosen child for the searching player
    pub win_rate: f64,

    /// Visits of the chosen child
    pub visits: u32,

    /// Iterations completed on this tree so far (the root's visit count)
    pub iterations: u32,

    /// Statistics of every root child, in expansion order
    pub children: Vec<ChildStats<A>>,

    /// Shape of the finished tree
    pub tree_stats: TreeStats,
}

/// MCTS search state for a single decision.
pub struct MctsSearch<'a, G: GameModel> {
    tree: MctsTree<G::Action>,
    model: &'a G,
    config: MctsConfig,
    root_state: G::State,
    identity: G::Player,
    rollout: RandomRollout,
}

impl<'a, G: GameModel> MctsSearch<'a, G> {
    /// Create a new MCTS search from the given game state.
    ///
    /// The player to move at `state` becomes the searching identity.
    pub fn new(model: &'a G, config: MctsConfig, state: G::State) -> Result<Self, SearchError> {
        config.validate()?;

        if model.is_ended(&state) {
            return Err(SearchError::NoLegalMoves);
        }

        let root_actions = model.legal_actions(&state);
        if root_actions.is_empty() {
            return Err(SearchError::PreconditionViolation(
                "no legal actions at a non-terminal root state".into(),
            ));
        }

        let identity = model.current_player(&state);
        let rollout = RandomRollout::new(config.max_rollout_depth);

        Ok(Self {
            tree: MctsTree::new(root_actions),
            model,
            config,
            root_state: state,
            identity,
            rollout,
        })
    }

    /// Run the search for the configured number of iterations.
    ///
    /// Calling `run` again keeps growing the same tree.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult<G::Action>, SearchError> {
        for iteration in 0..self.config.num_iterations {
            self.simulate(iteration, rng)?;
        }

        let (action, child_id) = self.tree.best_action().ok_or(SearchError::NoLegalMoves)?;
        let child = self.tree.get(child_id);
        let tree_stats = self.tree.stats();

        debug!(
            action = ?action,
            win_rate = child.win_ratio(),
            visits = child.visits,
            nodes = tree_stats.total_nodes,
            max_depth = tree_stats.max_depth,
            "MCTS decision"
        );

        Ok(SearchResult {
            action,
            win_rate: child.win_ratio(),
            visits: child.visits,
            iterations: self.tree.get(self.tree.root()).visits,
            children: self.tree.child_stats(self.tree.root()),
            tree_stats,
        })
    }

    /// Run a single iteration (select -> expand -> rollout -> backpropagate).
    fn simulate(&mut self, iteration: u32, rng: &mut ChaCha20Rng) -> Result<(), SearchError> {
        let (node_id, state, selection) = self.select()?;

        let (leaf_id, leaf_state) = match selection {
            Selection::Expandable => self.expand(node_id, &state, rng)?,
            Selection::DeadEnd => (node_id, state),
        };

        let result = self.rollout.run(self.model, &leaf_state, rng)?;
        let value = result
            .outcome
            .score(self.identity)
            .ok_or(SearchError::MissingOutcome)?;

        self.tree.backpropagate(leaf_id, value);

        trace!(
            iteration,
            leaf = leaf_id.0,
            ?selection,
            rollout_depth = result.depth,
            value,
            "MCTS iteration complete"
        );

        Ok(())
    }

    /// Descend from the root to a node that can be expanded or is a dead end,
    /// replaying actions to recover the state at that node.
    fn select(&self) -> Result<(NodeId, G::State, Selection), SearchError> {
        let mut current = self.tree.root();
        let mut state = self.root_state.clone();

        loop {
            let node = self.tree.get(current);

            if node.has_untried_actions() {
                return Ok((current, state, Selection::Expandable));
            }
            if node.is_dead_end() {
                return Ok((current, state, Selection::DeadEnd));
            }

            let maximizing = self.model.current_player(&state) == self.identity;
            let (action, child_id) = self
                .tree
                .select_child(current, self.config.exploration, maximizing)
                .ok_or_else(|| {
                    SearchError::PreconditionViolation(format!(
                        "node {} is fully expanded but has no children",
                        current.0
                    ))
                })?;

            state = self.model.next_state(&state, action)?;
            current = child_id;
        }
    }

    /// Expand one uniformly random untried action of `node_id`.
    /// Returns the new child and its state.
    fn expand(
        &mut self,
        node_id: NodeId,
        state: &G::State,
        rng: &mut ChaCha20Rng,
    ) -> Result<(NodeId, G::State), SearchError> {
        let untried = &self.tree.get(node_id).untried_actions;
        let action = untried[rng.gen_range(0..untried.len())];

        let next = self.model.next_state(state, action)?;

        let child_actions = if self.model.is_ended(&next) {
            Vec::new()
        } else {
            let actions = self.model.legal_actions(&next);
            if actions.is_empty() {
                return Err(SearchError::PreconditionViolation(format!(
                    "no legal actions after {:?} at a non-terminal state",
                    action
                )));
            }
            actions
        };

        let child_id = self.tree.add_child(node_id, action, child_actions);
        Ok((child_id, next))
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<G::Action> {
        &self.tree
    }

    /// The player the search is conducted for.
    pub fn identity(&self) -> G::Player {
        self.identity
    }
}

/// Convenience function to run a single MCTS decision.
///
/// A fresh tree is built for every call. The RNG comes from `config.seed`.
pub fn run_mcts<G: GameModel>(
    model: &G,
    config: MctsConfig,
    state: G::State,
) -> Result<SearchResult<G::Action>, SearchError> {
    let mut rng = config.make_rng();
    let mut search = MctsSearch::new(model, config, state)?;
    search.run(&mut rng)
}
