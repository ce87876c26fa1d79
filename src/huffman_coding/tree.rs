use log::trace;
use std::cell::RefCell;
use std::mem::ManuallyDrop;
use std::rc::{Rc, Weak};

use super::symbol::Symbol;

/// Leaf or internal payload of a tree node.
pub(crate) enum NodeKind {
    Leaf(Symbol),
    Kids { left: Rc<TreeNode>, right: Rc<TreeNode> },
}

/// A node of a Huffman tree. Leaves carry a symbol, internal nodes carry the summed weight of
/// their two children.
pub struct TreeNode {
    /// Symbol frequency for leaves, sum of both children for internal nodes
    weight: u64,
    /// Creation order: input position for leaves, then one per merge
    seq: usize,
    kind: NodeKind,
    /// Navigation only. Never keeps the parent alive.
    parent: RefCell<Weak<TreeNode>>,
}

impl TreeNode {
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Position in creation order. Leaves are numbered by input position, merged nodes follow.
    pub fn seq(&self) -> usize {
        self.seq
    }

    /// The symbol carried by a leaf, None for internal nodes.
    pub fn symbol(&self) -> Option<Symbol> {
        match &self.kind {
            NodeKind::Leaf(symbol) => Some(*symbol),
            NodeKind::Kids { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Left and right children of an internal node.
    pub fn children(&self) -> Option<(&TreeNode, &TreeNode)> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Kids { left, right } => Some((left.as_ref(), right.as_ref())),
        }
    }

    /// Upgrade the parent link for one navigation step. Never handed out, so the tree handle
    /// stays the only owner of every node.
    fn parent(&self) -> Option<Rc<TreeNode>> {
        self.parent.borrow().upgrade()
    }

    /// Distance from the root, found by following parent links.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut parent = self.parent();
        while let Some(node) = parent {
            depth += 1;
            parent = node.parent();
        }
        depth
    }

    /// Edge bits from the root down to this node (0 = left, 1 = right), found by following
    /// parent links upward.
    pub fn path(&self) -> Vec<u8> {
        let mut bits = Vec::new();
        let mut child: *const TreeNode = self;
        let mut parent = self.parent();
        while let Some(node) = parent {
            if let NodeKind::Kids { right, .. } = &node.kind {
                bits.push(u8::from(std::ptr::eq(Rc::as_ptr(right), child)));
            }
            child = Rc::as_ptr(&node);
            parent = node.parent();
        }
        bits.reverse();
        bits
    }

    pub(crate) fn kind(&self) -> &NodeKind {
        &self.kind
    }
}

impl std::fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeNode")
            .field("weight", &self.weight)
            .field("seq", &self.seq)
            .field("symbol", &self.symbol())
            .finish()
    }
}

/// Owning handle to a Huffman tree (or, while the tree is being built, to one of its subtrees).
///
/// Dropping the handle releases every node with an explicit stack, so skewed trees of any depth
/// are torn down without recursion.
pub struct HuffmanTree {
    /// Taken out only by `Drop`
    root: ManuallyDrop<Rc<TreeNode>>,
    leaves: usize,
    nodes: usize,
}

impl HuffmanTree {
    /// A one-leaf tree.
    pub(crate) fn leaf(symbol: Symbol, seq: usize) -> Self {
        HuffmanTree {
            root: ManuallyDrop::new(Rc::new(TreeNode {
                weight: symbol.freq(),
                seq,
                kind: NodeKind::Leaf(symbol),
                parent: RefCell::new(Weak::new()),
            })),
            leaves: 1,
            nodes: 1,
        }
    }

    /// Join two trees under a new internal node. The caller guarantees the summed weight fits.
    ///
    /// The new node shares both roots until `left` and `right` go out of scope; their drops then
    /// find the roots still owned by the new node and free nothing.
    pub(crate) fn merge(left: HuffmanTree, right: HuffmanTree, seq: usize) -> Self {
        let node = Rc::new(TreeNode {
            weight: left.weight() + right.weight(),
            seq,
            kind: NodeKind::Kids {
                left: Rc::clone(&left.root),
                right: Rc::clone(&right.root),
            },
            parent: RefCell::new(Weak::new()),
        });
        if let NodeKind::Kids { left: l, right: r } = &node.kind {
            *l.parent.borrow_mut() = Rc::downgrade(&node);
            *r.parent.borrow_mut() = Rc::downgrade(&node);
        }
        HuffmanTree {
            root: ManuallyDrop::new(node),
            leaves: left.leaves + right.leaves,
            nodes: left.nodes + right.nodes + 1,
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Number of symbols (leaves) in the tree.
    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    /// Number of nodes, 2n - 1 for n leaves.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Total weight of all symbols, the weight of the root.
    pub fn weight(&self) -> u64 {
        self.root().weight
    }

    /// Release every node of the tree. Equivalent to dropping the handle.
    pub fn release(self) {
        drop(self)
    }
}

impl Drop for HuffmanTree {
    fn drop(&mut self) {
        // SAFETY: the root is taken exactly once, here, and never read afterwards.
        let root = unsafe { ManuallyDrop::take(&mut self.root) };
        let mut stack = vec![root];
        let mut freed = 0_usize;
        while let Some(node) = stack.pop() {
            // Only a root just merged into a larger tree is still shared; that tree owns it now.
            if let Ok(node) = Rc::try_unwrap(node) {
                freed += 1;
                if let NodeKind::Kids { left, right } = node.kind {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        if freed > 0 {
            trace!("Released {} of {} tree nodes", freed, self.nodes);
        }
    }
}

impl std::fmt::Debug for HuffmanTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuffmanTree")
            .field("root", &self.root)
            .field("leaves", &self.leaves)
            .field("nodes", &self.nodes)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::huffman_coding::builder::build_huffman_tree;

    fn leaf(ch: char, freq: u64, seq: usize) -> HuffmanTree {
        HuffmanTree::leaf(Symbol::new(ch, freq), seq)
    }

    #[test]
    fn merge_links_children_test() {
        let ab = HuffmanTree::merge(leaf('a', 2, 0), leaf('b', 3, 1), 2);
        assert_eq!(ab.weight(), 5);
        assert_eq!(ab.leaf_count(), 2);
        assert_eq!(ab.node_count(), 3);

        let (left, right) = ab.root().children().unwrap();
        assert_eq!(left.symbol(), Some(Symbol::new('a', 2)));
        assert_eq!(right.symbol(), Some(Symbol::new('b', 3)));
        assert_eq!(left.parent().unwrap().weight(), 5);
        assert_eq!(left.depth(), 1);
        assert_eq!(left.path(), vec![0]);
        assert_eq!(right.path(), vec![1]);
        assert!(ab.root().parent().is_none());
    }

    #[test]
    fn nested_paths_test() {
        let ab = HuffmanTree::merge(leaf('a', 1, 0), leaf('b', 1, 1), 3);
        let abc = HuffmanTree::merge(leaf('c', 1, 2), ab, 4);
        assert_eq!(abc.node_count(), 5);

        let (c, ab) = abc.root().children().unwrap();
        let (a, b) = ab.children().unwrap();
        assert_eq!(c.path(), vec![0]);
        assert_eq!(a.path(), vec![1, 0]);
        assert_eq!(b.path(), vec![1, 1]);
        assert_eq!(b.depth(), 2);
        assert_eq!(ab.seq(), 3);
    }

    #[test]
    fn release_deep_tree_test() {
        // A fully skewed tree deep enough to overflow a recursive drop.
        let mut tree = leaf('a', 1, 0);
        for i in 1..200_000 {
            tree = HuffmanTree::merge(tree, leaf('b', 1, i), i);
        }
        assert_eq!(tree.node_count(), 2 * 200_000 - 1);
        tree.release();
    }

    #[test]
    fn release_after_navigation_test() {
        // Equal zero weights merge into a chain one level deeper per symbol.
        let symbols = (0..100_000_u32)
            .map(|i| Symbol::new(char::from_u32(0x10000 + i).unwrap(), 0))
            .collect::<Vec<_>>();
        let tree = build_huffman_tree(&symbols).unwrap();

        let mut node: &Rc<TreeNode> = &tree.root;
        while let NodeKind::Kids { left, right } = &node.kind {
            node = if left.is_leaf() { right } else { left };
        }
        let depth = node.depth();
        assert_eq!(depth, symbols.len() - 1);
        assert_eq!(node.path().len(), depth);
        assert!(node.parent().is_some());

        let bottom = Rc::downgrade(node);
        let top = Rc::downgrade(&tree.root);
        tree.release();
        assert!(bottom.upgrade().is_none());
        assert!(top.upgrade().is_none());
    }
}
