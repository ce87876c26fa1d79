//! The heap module provides the priority queue used to build Huffman trees.
//!
//! The queue is a binary min-heap stored as a linked complete binary tree rather than in an array.
//! Positions are still addressed by their 1-based complete-tree index: writing the index in binary
//! and dropping the leading one gives the path from the root (0 = left, 1 = right). This lets the
//! heap find its last node and the parent of its next free slot from nothing more than the element
//! count.
//!
//! Payloads move between nodes during sift-up and sift-down; the nodes themselves never change place.
//!
pub mod priority_heap;
