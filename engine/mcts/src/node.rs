//! MCTS tree node representation.
//!
//! Each node represents the game state reached by taking an action from the
//! parent. Nodes do not store the state itself; selection recovers it by
//! replaying actions from the root. Nodes store the visit statistics used
//! for UCB1 selection and the final decision.

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<A> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action that led to this node from parent (None for root)
    pub parent_action: Option<A>,

    /// Children: Vec of (action, NodeId) pairs, in expansion order.
    pub children: Vec<(A, NodeId)>,

    /// Legal actions from this node's state that have no child yet.
    pub untried_actions: Vec<A>,

    /// Number of simulations that passed through this node
    pub visits: u32,

    /// Sum of outcome values for the searching player.
    /// Win ratio = wins / visits
    pub wins: f64,
}

impl<A: Copy + PartialEq> MctsNode<A> {
    /// Create a new root node.
    pub fn new_root(untried_actions: Vec<A>) -> Self {
        Self {
            parent: NodeId::NONE,
            parent_action: None,
            children: Vec::new(),
            untried_actions,
            visits: 0,
            wins: 0.0,
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, action: A, untried_actions: Vec<A>) -> Self {
        Self {
            parent,
            parent_action: Some(action),
            children: Vec::new(),
            untried_actions,
            visits: 0,
            wins: 0.0,
        }
    }

    /// Observed win ratio for the searching player.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn win_ratio(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    /// Calculate the UCB1 score of this node as seen from its parent.
    ///
    /// exploit = wins / visits
    /// explore = c * sqrt(ln(N_parent) / visits)
    ///
    /// When the player to move at the parent is the searching player
    /// (`maximizing`), the score is `exploit + explore`. Otherwise the
    /// opponent is choosing and prefers moves that are bad for the searching
    /// player, so the score is `(1 - exploit) + explore`.
    ///
    /// Takes pre-computed ln(parent_visits) to avoid redundant log calls when
    /// comparing multiple children. Must not be called on an unvisited node.
    #[inline]
    pub fn ucb_score(&self, parent_visits_ln: f64, exploration: f64, maximizing: bool) -> f64 {
        debug_assert!(self.visits > 0, "UCB1 evaluated on an unvisited node");
        let visits = self.visits as f64;
        let exploit = self.wins / visits;
        let explore = exploration * (parent_visits_ln / visits).sqrt();
        if maximizing {
            exploit + explore
        } else {
            (1.0 - exploit) + explore
        }
    }

    /// Check if this is the root node.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Check if some legal action has not been expanded yet.
    #[inline]
    pub fn has_untried_actions(&self) -> bool {
        !self.untried_actions.is_empty()
    }

    /// Check if this node has been expanded (has children).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if search cannot continue below this node (no children and
    /// nothing left to expand).
    #[inline]
    pub fn is_dead_end(&self) -> bool {
        !self.has_untried_actions() && !self.is_expanded()
    }

    /// Child reached by `action`, if it has been expanded.
    pub fn child(&self, action: A) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, id)| *id)
    }
}
