use std::cell::{Ref, RefCell};
use std::cmp::Ordering;
use std::rc::{Rc, Weak};

type Link<T> = Rc<RefCell<HeapNode<T>>>;
type ParentLink<T> = Weak<RefCell<HeapNode<T>>>;

/// One position in the heap tree. Children are owned, the parent link is only used to walk upward.
struct HeapNode<T> {
    data: T,
    parent: ParentLink<T>,
    left: Option<Link<T>>,
    right: Option<Link<T>>,
}

impl<T> HeapNode<T> {
    fn new_link(data: T, parent: ParentLink<T>) -> Link<T> {
        Rc::new(RefCell::new(HeapNode {
            data,
            parent,
            left: None,
            right: None,
        }))
    }
}

/// Take the payload out of a node that has already been unlinked from the tree.
fn into_data<T>(link: Link<T>) -> T {
    match Rc::try_unwrap(link) {
        Ok(cell) => cell.into_inner().data,
        Err(_) => unreachable!("detached heap node is still shared"),
    }
}

/// Min-heap over a linked complete binary tree. The comparator orders payloads; the payload
/// comparing least sits at the root.
pub struct PriorityHeap<T, C = fn(&T, &T) -> Ordering> {
    /// Root of the complete tree, None when empty
    root: Option<Link<T>>,
    /// Number of payloads, which is also the complete-tree index of the last node
    size: usize,
    /// Ordering used by both insert and extract
    cmp: C,
}

impl<T: Ord> PriorityHeap<T> {
    /// Create an empty heap ordered by `Ord`.
    pub fn min() -> Self {
        Self::new(T::cmp)
    }
}

impl<T, C> PriorityHeap<T, C> {
    /// Number of payloads held.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Borrow the minimum payload without removing it.
    pub fn peek(&self) -> Option<Ref<'_, T>> {
        self.root
            .as_ref()
            .map(|root| Ref::map(root.borrow(), |node| &node.data))
    }

    /// Drop every node, walking the tree with an explicit stack.
    pub fn clear(&mut self) {
        let mut stack: Vec<Link<T>> = self.root.take().into_iter().collect();
        while let Some(link) = stack.pop() {
            let mut node = link.borrow_mut();
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.size = 0;
    }

    /// Walk from the root to the node at the 1-based complete-tree `index`.
    ///
    /// The bits of `index` below its leading one are read most significant first: a one steps
    /// right, a zero steps left. `skip` drops that many low bits from the walk, so `skip = 1`
    /// stops at the parent of `index`. Insert and extract both navigate through here, which keeps
    /// the slot a new leaf fills and the node extract removes in agreement.
    fn descend(&self, index: usize, skip: u32) -> Option<Link<T>> {
        let mut pos = Rc::clone(self.root.as_ref()?);
        for shift in (skip..index.ilog2()).rev() {
            let next = {
                let node = pos.borrow();
                if (index >> shift) & 1 == 1 {
                    node.right.clone()
                } else {
                    node.left.clone()
                }
            };
            pos = next?;
        }
        Some(pos)
    }
}

impl<T: Clone, C> PriorityHeap<T, C> {
    /// Payloads in complete-tree index order (index 1 first), each located by bit navigation.
    pub fn level_order(&self) -> Vec<T> {
        (1..=self.size)
            .filter_map(|index| self.descend(index, 0))
            .map(|link| {
                let data = link.borrow().data.clone();
                data
            })
            .collect()
    }
}

impl<T, C> PriorityHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Create an empty heap ordered by `cmp`.
    pub fn new(cmp: C) -> Self {
        PriorityHeap {
            root: None,
            size: 0,
            cmp,
        }
    }

    /// Add a payload at the next free position and sift it up. Returns the complete-tree index
    /// where the payload came to rest.
    pub fn insert(&mut self, data: T) -> usize {
        if self.root.is_none() {
            self.root = Some(HeapNode::new_link(data, Weak::new()));
            self.size = 1;
            return 1;
        }

        let index = self.size + 1;
        let parent = match self.descend(index, 1) {
            Some(parent) => parent,
            None => unreachable!("complete tree has no parent for slot {}", index),
        };
        let node = HeapNode::new_link(data, Rc::downgrade(&parent));
        {
            // Even indices are left children, odd indices are right children
            let mut parent = parent.borrow_mut();
            if index & 1 == 0 {
                parent.left = Some(Rc::clone(&node));
            } else {
                parent.right = Some(Rc::clone(&node));
            }
        }
        self.size = index;
        self.sift_up(node, index)
    }

    /// Remove and return the minimum payload, or None if the heap is empty.
    pub fn extract(&mut self) -> Option<T> {
        let root = Rc::clone(self.root.as_ref()?);
        if self.size == 1 {
            self.root = None;
            self.size = 0;
            return Some(into_data(root));
        }

        let last = match self.descend(self.size, 0) {
            Some(last) => last,
            None => unreachable!("complete tree has no node at index {}", self.size),
        };

        // Unhook the last node. Its index parity says which side of its parent it hangs from.
        let parent = last.borrow().parent.upgrade();
        if let Some(parent) = parent {
            let mut parent = parent.borrow_mut();
            if self.size & 1 == 1 {
                parent.right = None;
            } else {
                parent.left = None;
            }
        }

        // Move the last payload to the root; the old root payload leaves with the detached node.
        std::mem::swap(&mut root.borrow_mut().data, &mut last.borrow_mut().data);
        self.size -= 1;
        self.sift_down(root);

        Some(into_data(last))
    }

    /// Check heap order, parent links and complete shape.
    pub fn is_valid(&self) -> bool {
        let mut count = 0;
        let mut stack: Vec<Link<T>> = self.root.iter().cloned().collect();
        while let Some(link) = stack.pop() {
            count += 1;
            let node = link.borrow();
            for child in [&node.left, &node.right].into_iter().flatten() {
                let child_node = child.borrow();
                if (self.cmp)(&node.data, &child_node.data) == Ordering::Greater {
                    return false;
                }
                match child_node.parent.upgrade() {
                    Some(parent) if Rc::ptr_eq(&parent, &link) => {}
                    _ => return false,
                }
                stack.push(Rc::clone(child));
            }
        }
        count == self.size && (1..=self.size).all(|index| self.descend(index, 0).is_some())
    }

    /// Swap the payload at `node` with its parent's while the parent compares greater.
    fn sift_up(&self, mut node: Link<T>, mut index: usize) -> usize {
        loop {
            let parent = node.borrow().parent.upgrade();
            let parent = match parent {
                Some(parent) => parent,
                None => break,
            };
            {
                let mut up = parent.borrow_mut();
                let mut down = node.borrow_mut();
                if (self.cmp)(&up.data, &down.data) != Ordering::Greater {
                    break;
                }
                std::mem::swap(&mut up.data, &mut down.data);
            }
            node = parent;
            index /= 2;
        }
        index
    }

    /// Swap the payload at `node` with its smaller child while that child compares less.
    fn sift_down(&self, mut node: Link<T>) {
        while let Some(child) = self.min_child(&node) {
            {
                let mut up = node.borrow_mut();
                let mut down = child.borrow_mut();
                if (self.cmp)(&up.data, &down.data) != Ordering::Greater {
                    break;
                }
                std::mem::swap(&mut up.data, &mut down.data);
            }
            node = child;
        }
    }

    /// The child holding the smaller payload. The left child wins ties.
    fn min_child(&self, node: &Link<T>) -> Option<Link<T>> {
        let node = node.borrow();
        match (&node.left, &node.right) {
            (Some(left), Some(right)) => {
                if (self.cmp)(&left.borrow().data, &right.borrow().data) == Ordering::Greater {
                    Some(Rc::clone(right))
                } else {
                    Some(Rc::clone(left))
                }
            }
            (Some(only), None) | (None, Some(only)) => Some(Rc::clone(only)),
            (None, None) => None,
        }
    }
}

impl<T, C> Drop for PriorityHeap<T, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, C> std::fmt::Debug for PriorityHeap<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityHeap")
            .field("size", &self.size)
            .finish()
    }
}
