//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. Nodes are only ever appended;
//! the arena is dropped as a whole when the decision is made.

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug, Clone)]
pub struct MctsTree<A> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<A>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<A: Copy + PartialEq> MctsTree<A> {
    /// Create a new tree whose root can still expand `root_actions`.
    pub fn new(root_actions: Vec<A>) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_actions)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<A> {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<A> {
        &mut self.nodes[id.index()]
    }

    /// Allocate a new node and return its ID.
    fn allocate(&mut self, node: MctsNode<A>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<A>] {
        &self.nodes
    }

    /// Select the best child of a node using UCB1.
    ///
    /// An unvisited child is returned before any score is computed, so the
    /// ratio terms never see a zero denominator. Otherwise the child with the
    /// highest score wins and ties go to the earliest child.
    /// Returns None if the node has no children.
    pub fn select_child(
        &self,
        node_id: NodeId,
        exploration: f64,
        maximizing: bool,
    ) -> Option<(A, NodeId)> {
        let node = self.get(node_id);

        if let Some(unvisited) = node
            .children
            .iter()
            .find(|(_, id)| self.get(*id).visits == 0)
        {
            return Some(*unvisited);
        }

        // Pre-compute ln once instead of per-child comparison
        let parent_visits_ln = (node.visits as f64).ln();

        let mut best: Option<((A, NodeId), f64)> = None;
        for &(action, child_id) in &node.children {
            let score = self
                .get(child_id)
                .ucb_score(parent_visits_ln, exploration, maximizing);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some(((action, child_id), score)),
            }
        }

        best.map(|(choice, _)| choice)
    }

    /// Add a child to a parent node.
    ///
    /// `action` is removed from the parent's untried actions so that a
    /// parent's untried and expanded actions never overlap.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, action: A, untried_actions: Vec<A>) -> NodeId {
        debug_assert!(
            self.get(parent_id).child(action).is_none(),
            "action expanded twice from the same node"
        );

        let child_id = self.allocate(MctsNode::new_child(parent_id, action, untried_actions));

        let parent = self.get_mut(parent_id);
        if let Some(pos) = parent.untried_actions.iter().position(|a| *a == action) {
            parent.untried_actions.remove(pos);
        }
        parent.children.push((action, child_id));

        child_id
    }

    /// Backpropagate an outcome from a node to the root.
    ///
    /// Every node on the path receives the same value: statistics are always
    /// kept from the searching player's point of view.
    pub fn backpropagate(&mut self, leaf_id: NodeId, value: f64) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visits += 1;
            node.wins += value;
            current_id = node.parent;
        }
    }

    /// Get the best action from root based on observed win ratio.
    /// Ties go to the earliest child. Unvisited children are skipped.
    /// Returns (action, NodeId) or None if no root child has been visited.
    pub fn best_action(&self) -> Option<(A, NodeId)> {
        let root = self.get(self.root);

        let mut best: Option<((A, NodeId), f64)> = None;
        for &(action, child_id) in &root.children {
            let child = self.get(child_id);
            if child.visits == 0 {
                continue;
            }
            let ratio = child.win_ratio();
            match best {
                Some((_, best_ratio)) if ratio <= best_ratio => {}
                _ => best = Some(((action, child_id), ratio)),
            }
        }

        best.map(|(choice, _)| choice)
    }

    /// Statistics of every child of `node_id`, in expansion order.
    pub fn child_stats(&self, node_id: NodeId) -> Vec<ChildStats<A>> {
        self.get(node_id)
            .children
            .iter()
            .map(|&(action, id)| {
                let child = self.get(id);
                ChildStats {
                    action,
                    visits: child.visits,
                    wins: child.wins,
                }
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_children: root.children.len(),
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0u32)];

        while let Some((node_id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for &(_, child_id) in &self.get(node_id).children {
                stack.push((child_id, depth + 1));
            }
        }

        max_depth
    }
}

/// Visit statistics of one child, as reported in search results.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats<A> {
    pub action: A,
    pub visits: u32,
    pub wins: f64,
}

impl<A> ChildStats<A> {
    /// Observed win ratio; 0.0 if never visited.
    pub fn win_ratio(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_children: usize,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree() {
        let tree = MctsTree::new(vec![0u8, 1, 2]);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), NodeId(0));

        let root = tree.get(tree.root());
        assert!(root.parent.is_none());
        assert_eq!(root.parent_action, None);
        assert_eq!(root.untried_actions, vec![0, 1, 2]);
    }

    #[test]
    fn test_add_child() {
        let mut tree = MctsTree::new(vec![0u8, 1, 2]);

        let child_id = tree.add_child(tree.root(), 1, vec![0, 2]);

        assert_eq!(tree.len(), 2);
        assert_eq!(child_id, NodeId(1));

        let root = tree.get(tree.root());
        assert_eq!(root.children, vec![(1, NodeId(1))]);
        // Expanded action no longer untried
        assert_eq!(root.untried_actions, vec![0, 2]);

        let child = tree.get(child_id);
        assert_eq!(child.parent, tree.root());
        assert_eq!(child.parent_action, Some(1));
        assert_eq!(child.untried_actions, vec![0, 2]);
    }

    #[test]
    fn test_backpropagate() {
        let mut tree = MctsTree::new(vec![0u8, 1]);

        // Create a chain: root -> child -> grandchild
        let child_id = tree.add_child(tree.root(), 0, vec![1]);
        let grandchild_id = tree.add_child(child_id, 1, vec![]);

        tree.backpropagate(grandchild_id, 1.0);
        tree.backpropagate(grandchild_id, 0.5);

        // Same value at every level
        for id in [grandchild_id, child_id, tree.root()] {
            assert_eq!(tree.get(id).visits, 2);
            assert!((tree.get(id).wins - 1.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_backpropagate_stops_at_root() {
        let mut tree = MctsTree::new(vec![0u8, 1]);
        let left = tree.add_child(tree.root(), 0, vec![]);
        let right = tree.add_child(tree.root(), 1, vec![]);

        tree.backpropagate(left, 1.0);

        assert_eq!(tree.get(left).visits, 1);
        assert_eq!(tree.get(right).visits, 0);
        assert_eq!(tree.get(tree.root()).visits, 1);
    }

    #[test]
    fn test_select_child_prefers_unvisited() {
        let mut tree = MctsTree::new(vec![0u8, 1, 2]);

        let strong = tree.add_child(tree.root(), 0, vec![]);
        let fresh = tree.add_child(tree.root(), 1, vec![]);
        for _ in 0..10 {
            tree.backpropagate(strong, 1.0);
        }

        // The visited child has a perfect record, the fresh one still wins
        assert_eq!(tree.select_child(tree.root(), 2.0, true), Some((1, fresh)));
        assert_eq!(tree.select_child(tree.root(), 2.0, false), Some((1, fresh)));
    }

    #[test]
    fn test_select_child_maximizes_for_searching_player() {
        let mut tree = MctsTree::new(vec![0u8, 1]);

        let good = tree.add_child(tree.root(), 0, vec![]);
        let bad = tree.add_child(tree.root(), 1, vec![]);
        for _ in 0..5 {
            tree.backpropagate(good, 1.0);
            tree.backpropagate(bad, 0.0);
        }

        // Equal visits: exploration terms cancel, exploitation decides
        assert_eq!(tree.select_child(tree.root(), 2.0, true), Some((0, good)));
    }

    #[test]
    fn test_select_child_minimizes_for_opponent() {
        let mut tree = MctsTree::new(vec![0u8, 1]);

        let good = tree.add_child(tree.root(), 0, vec![]);
        let bad = tree.add_child(tree.root(), 1, vec![]);
        for _ in 0..5 {
            tree.backpropagate(good, 1.0);
            tree.backpropagate(bad, 0.0);
        }

        // The opponent picks the move worst for the searching player
        assert_eq!(tree.select_child(tree.root(), 2.0, false), Some((1, bad)));
    }

    #[test]
    fn test_select_child_exploration_favors_rarely_visited() {
        let mut tree = MctsTree::new(vec![0u8, 1]);

        let popular = tree.add_child(tree.root(), 0, vec![]);
        let rare = tree.add_child(tree.root(), 1, vec![]);
        for _ in 0..50 {
            tree.backpropagate(popular, 0.5);
        }
        tree.backpropagate(rare, 0.5);

        assert_eq!(tree.select_child(tree.root(), 2.0, true), Some((1, rare)));
    }

    #[test]
    fn test_select_child_ties_go_to_first_child() {
        let mut tree = MctsTree::new(vec![0u8, 1, 2]);

        let first = tree.add_child(tree.root(), 2, vec![]);
        let second = tree.add_child(tree.root(), 0, vec![]);
        tree.backpropagate(first, 1.0);
        tree.backpropagate(second, 1.0);

        assert_eq!(tree.select_child(tree.root(), 2.0, true), Some((2, first)));
    }

    #[test]
    fn test_select_child_without_children() {
        let tree = MctsTree::new(vec![0u8]);
        assert_eq!(tree.select_child(tree.root(), 2.0, true), None);
    }

    #[test]
    fn test_best_action_by_win_ratio() {
        let mut tree = MctsTree::new(vec![0u8, 1, 2]);

        let busy = tree.add_child(tree.root(), 0, vec![]);
        let efficient = tree.add_child(tree.root(), 1, vec![]);

        // Most visited is not the best ratio
        for _ in 0..8 {
            tree.backpropagate(busy, 0.5);
        }
        tree.backpropagate(efficient, 1.0);

        assert_eq!(tree.best_action(), Some((1, efficient)));
    }

    #[test]
    fn test_best_action_ties_and_unvisited() {
        let mut tree = MctsTree::new(vec![0u8, 1, 2]);
        assert_eq!(tree.best_action(), None);

        let first = tree.add_child(tree.root(), 2, vec![]);
        let second = tree.add_child(tree.root(), 1, vec![]);
        let _unvisited = tree.add_child(tree.root(), 0, vec![]);
        tree.backpropagate(first, 0.5);
        tree.backpropagate(second, 0.5);

        assert_eq!(tree.best_action(), Some((2, first)));
    }

    #[test]
    fn test_child_stats() {
        let mut tree = MctsTree::new(vec![3u8, 4]);
        let c1 = tree.add_child(tree.root(), 3, vec![]);
        let c2 = tree.add_child(tree.root(), 4, vec![]);
        tree.backpropagate(c1, 1.0);
        tree.backpropagate(c2, 0.0);
        tree.backpropagate(c2, 0.5);

        let stats = tree.child_stats(tree.root());
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].action, 3);
        assert_eq!(stats[0].visits, 1);
        assert!((stats[0].win_ratio() - 1.0).abs() < 1e-12);
        assert_eq!(stats[1].action, 4);
        assert_eq!(stats[1].visits, 2);
        assert!((stats[1].win_ratio() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = MctsTree::new(vec![0u8, 1]);
        let child = tree.add_child(tree.root(), 0, vec![1]);
        tree.add_child(child, 1, vec![]);
        tree.add_child(tree.root(), 1, vec![]);

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.root_children, 2);
        assert_eq!(stats.max_depth, 2);
    }
}
