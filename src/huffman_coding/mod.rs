//! The huffman module builds Huffman trees from a symbol table and enumerates their codes.
//!
//! Construction is the classic greedy merge: every symbol starts as a one-leaf tree in a priority
//! queue ordered by weight, and the two lightest trees are repeatedly joined under a new internal
//! node until a single tree remains. The lighter of the pair becomes the left child.
//!
//! Codes are read off the finished tree with an iterative depth-first walk, left edges as 0 and
//! right edges as 1. Trees built from skewed weights can be as deep as the alphabet is large, so
//! neither the walk nor the teardown recurses.
//!
//! Each node keeps a weak link to its parent. The links are for navigation only (depth and path
//! lookups); ownership always runs from parent to child.
//!

pub mod builder;
pub mod codes;
pub mod symbol;
pub mod tree;
