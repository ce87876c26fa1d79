use log::{debug, trace};
use std::cmp::Ordering;

use super::symbol::Symbol;
use super::tree::HuffmanTree;
use crate::error::{Error, Result};
use crate::heap::priority_heap::PriorityHeap;
use crate::tools::options::{BuildOptions, TieBreak};

/// Builds Huffman trees by greedily merging the two lightest subtrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanBuilder {
    options: BuildOptions,
}

impl HuffmanBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Build a tree from a symbol table. Fails on an empty table or when the total weight
    /// overflows, in both cases before any node exists.
    pub fn build(&self, symbols: &[Symbol]) -> Result<HuffmanTree> {
        if symbols.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        // Every internal weight is a partial sum of this total, so merges cannot overflow.
        let total = symbols
            .iter()
            .try_fold(0_u64, |sum, s| sum.checked_add(s.freq()))
            .ok_or(Error::WeightOverflow)?;
        debug!(
            "Building tree for {} symbols, total weight {}, tie break {}",
            symbols.len(),
            total,
            self.options.tie_break
        );

        let tie_break = self.options.tie_break;
        let mut queue =
            PriorityHeap::new(move |a: &HuffmanTree, b: &HuffmanTree| compare(tie_break, a, b));
        for (seq, &symbol) in symbols.iter().enumerate() {
            queue.insert(HuffmanTree::leaf(symbol, seq));
        }

        // Anything left in the queue on an early return is torn down by the queue's drop.
        let mut seq = symbols.len();
        while let Some(left) = queue.extract() {
            let right = match queue.extract() {
                Some(right) => right,
                None => {
                    debug!(
                        "Tree complete: {} nodes, {} merges",
                        left.node_count(),
                        seq - symbols.len()
                    );
                    return Ok(left);
                }
            };
            trace!("Merge {} + {} (seq {})", left.weight(), right.weight(), seq);
            queue.insert(HuffmanTree::merge(left, right, seq));
            seq += 1;
        }
        Err(Error::EmptyAlphabet)
    }
}

/// Queue ordering: lighter subtrees first, then the optional secondary key.
fn compare(tie_break: TieBreak, a: &HuffmanTree, b: &HuffmanTree) -> Ordering {
    let by_weight = a.weight().cmp(&b.weight());
    match tie_break {
        TieBreak::Structural => by_weight,
        TieBreak::Sequence => by_weight.then_with(|| a.root().seq().cmp(&b.root().seq())),
    }
}

/// Build a Huffman tree with the default options.
pub fn build_huffman_tree(symbols: &[Symbol]) -> Result<HuffmanTree> {
    HuffmanBuilder::default().build(symbols)
}
