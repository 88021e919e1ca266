//! Union-find (disjoint set union) over the dense node universe.
//!
//! Every construction strategy and the refinement feasibility check rely on
//! this structure to track which nodes already belong to the same connected
//! component. An instance is scoped to one construction or validation pass
//! and discarded afterwards.

#[derive(Clone, Debug)]
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl DisjointSet {
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            parent: (0..node_count).collect(),
            rank: vec![0; node_count],
            components: node_count,
        }
    }

    /// Returns the representative of `node`'s component.
    ///
    /// Compresses by path halving: each step rewrites the current node's
    /// parent pointer to its grandparent, so the walked path shrinks without
    /// a second traversal.
    pub(crate) fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            let grandparent = self.parent[self.parent[node]];
            self.parent[node] = grandparent;
            node = grandparent;
        }
        node
    }

    /// Merges the components of `left` and `right`, attaching the lower-rank
    /// root under the higher-rank one. Returns `false` without touching any
    /// state when the two nodes are already connected.
    pub(crate) fn union(&mut self, left: usize, right: usize) -> bool {
        let mut left_root = self.find(left);
        let mut right_root = self.find(right);
        if left_root == right_root {
            return false;
        }

        let left_rank = self.rank[left_root];
        let right_rank = self.rank[right_root];
        if left_rank < right_rank {
            std::mem::swap(&mut left_root, &mut right_root);
        }
        self.parent[right_root] = left_root;
        if left_rank == right_rank {
            self.rank[left_root] = left_rank.saturating_add(1);
        }
        self.components -= 1;
        true
    }

    /// Returns the number of live components.
    pub(crate) fn components(&self) -> usize {
        self.components
    }
}

#[cfg(test)]
mod tests {
    use super::DisjointSet;

    #[test]
    fn find_returns_self_for_fresh_nodes() {
        let mut set = DisjointSet::new(4);
        for node in 0..4 {
            assert_eq!(set.find(node), node);
        }
        assert_eq!(set.components(), 4);
    }

    #[test]
    fn union_merges_once() {
        let mut set = DisjointSet::new(3);
        assert!(set.union(0, 1));
        assert!(!set.union(1, 0));
        assert_eq!(set.find(0), set.find(1));
        assert_ne!(set.find(0), set.find(2));
        assert_eq!(set.components(), 2);
    }

    #[test]
    fn transitive_merges_share_a_root() {
        let mut set = DisjointSet::new(6);
        assert!(set.union(0, 1));
        assert!(set.union(2, 3));
        assert!(set.union(1, 2));
        let root = set.find(0);
        for node in 1..4 {
            assert_eq!(set.find(node), root);
        }
        assert_eq!(set.components(), 3);
    }

    #[test]
    fn chained_unions_stay_flat() {
        let mut set = DisjointSet::new(8);
        for node in 0..7 {
            set.union(node, node + 1);
        }
        let root = set.find(7);
        for node in 0..8 {
            assert_eq!(set.parent[node], root);
        }
    }

    #[test]
    fn find_halves_multi_level_paths() {
        // Equal-rank merges build a two-level tree: 1 -> 0, 3 -> 2 -> 0.
        let mut set = DisjointSet::new(4);
        assert!(set.union(0, 1));
        assert!(set.union(2, 3));
        assert!(set.union(0, 2));
        assert_eq!(set.parent[3], 2);

        // Walking from the deepest node rewrites its pointer to the root.
        assert_eq!(set.find(3), 0);
        assert_eq!(set.parent[3], 0);
    }
}
