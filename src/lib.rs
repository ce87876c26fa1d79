//! Huffman code construction on top of an array-free priority heap.
//!
//! The priority queue is a binary min-heap kept as a linked complete binary tree. It finds its
//! last node, and the parent of its next free slot, by walking the binary digits of the element
//! count from the root, so no backing array is needed.
//!
//! The Huffman builder drives that heap through the greedy two-minimum merge, and the code
//! enumerator walks the finished tree to produce one prefix-free code per symbol.
//!
//! Basic usage:
//!
//! ```
//! use huffheap::{build_huffman_tree, enumerate_codes, Symbol};
//!
//! let symbols = [Symbol::new('a', 45), Symbol::new('b', 13), Symbol::new('c', 12)];
//! let tree = build_huffman_tree(&symbols)?;
//! enumerate_codes(&tree, |ch, bits| {
//!     let code: String = bits.iter().map(|b| char::from(b'0' + b)).collect();
//!     println!("{}: {}", ch, code);
//! })?;
//! tree.release();
//! # Ok::<(), huffheap::Error>(())
//! ```
//!
//! This crate does not serialize codes or decode bitstreams.
//!
#![warn(rust_2018_idioms)]

pub mod error;
pub mod heap;
pub mod huffman_coding;
pub mod tools;

pub use error::{Error, Result};
pub use heap::priority_heap::PriorityHeap;
pub use huffman_coding::builder::{build_huffman_tree, HuffmanBuilder};
pub use huffman_coding::codes::{code_table, enumerate_codes, Code, CodeEnumerator, CodeTable};
pub use huffman_coding::symbol::Symbol;
pub use huffman_coding::tree::{HuffmanTree, TreeNode};
pub use tools::freq_count::symbols_from_text;
pub use tools::options::{BuildOptions, SingleSymbolCode, TieBreak};
