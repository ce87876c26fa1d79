use log::debug;
use rustc_hash::FxHashMap;

use super::tree::{HuffmanTree, NodeKind, TreeNode};
use crate::error::Result;
use crate::tools::options::{BuildOptions, SingleSymbolCode};

/// A code word: binary digits from the root to a leaf, 0 for a left edge and 1 for a right edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Code(Vec<u8>);

impl Code {
    pub fn bits(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `self` is a prefix of `other` (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl From<&[u8]> for Code {
    fn from(bits: &[u8]) -> Self {
        Code(bits.to_vec())
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0
            .iter()
            .try_for_each(|&bit| write!(f, "{}", if bit == 0 { '0' } else { '1' }))
    }
}

/// Every (symbol, code) pair of a tree, in the order the enumerator visits the leaves.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    entries: Vec<(char, Code)>,
    index: FxHashMap<char, usize>,
}

impl CodeTable {
    fn push(&mut self, ch: char, code: Code) {
        self.index.insert(ch, self.entries.len());
        self.entries.push((ch, code));
    }

    /// Code of `ch`. If the alphabet listed a character twice, the later leaf wins.
    pub fn get(&self, ch: char) -> Option<&Code> {
        self.index.get(&ch).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(char, Code)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Code length of every symbol.
    pub fn lengths(&self) -> Vec<(char, usize)> {
        self.entries
            .iter()
            .map(|(ch, code)| (*ch, code.len()))
            .collect()
    }

    /// Kraft sum of the code lengths, 1.0 for a complete prefix code.
    pub fn kraft_sum(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, code)| 0.5_f64.powi(code.len() as i32))
            .sum()
    }
}

/// Walks a finished tree and hands each leaf's code to a sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeEnumerator {
    single_symbol: SingleSymbolCode,
}

impl CodeEnumerator {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            single_symbol: options.single_symbol,
        }
    }

    /// Call `sink` once per leaf with the leaf's character and code bits; the slice length is the
    /// code length. Left subtrees are visited before right subtrees.
    ///
    /// The walk uses an explicit stack because a skewed tree is as deep as it has leaves. The
    /// stack and code buffer are reserved up front; if that fails, the error is returned before
    /// the sink is ever called.
    pub fn walk<F>(&self, tree: &HuffmanTree, mut sink: F) -> Result<()>
    where
        F: FnMut(char, &[u8]),
    {
        let n = tree.leaf_count();

        // At most one pending right sibling per level below the root, plus both children of the
        // node being expanded: n + 1 entries bound the stack, so it never reallocates.
        let mut stack: Vec<(&TreeNode, usize, u8)> = Vec::new();
        stack.try_reserve_exact(n + 1)?;
        // Slot 0 holds the root's placeholder bit; depth never exceeds n - 1.
        let mut code: Vec<u8> = Vec::new();
        code.try_reserve_exact(n)?;
        code.resize(n, 0);

        if let (Some(symbol), SingleSymbolCode::OneBit) = (tree.root().symbol(), self.single_symbol)
        {
            sink(symbol.ch(), &[0_u8][..]);
            return Ok(());
        }

        let mut emitted = 0_usize;
        stack.push((tree.root(), 0, 0));
        while let Some((node, depth, bit)) = stack.pop() {
            code[depth] = bit;
            match node.kind() {
                NodeKind::Leaf(symbol) => {
                    sink(symbol.ch(), &code[1..=depth]);
                    emitted += 1;
                }
                NodeKind::Kids { left, right } => {
                    stack.push((right.as_ref(), depth + 1, 1));
                    stack.push((left.as_ref(), depth + 1, 0));
                }
            }
        }
        debug!("Enumerated {} codes", emitted);
        Ok(())
    }

    /// Collect every code of the tree.
    pub fn table(&self, tree: &HuffmanTree) -> Result<CodeTable> {
        let mut table = CodeTable::default();
        table.entries.try_reserve_exact(tree.leaf_count())?;
        self.walk(tree, |ch, bits| table.push(ch, Code::from(bits)))?;
        Ok(table)
    }
}

/// Enumerate the codes of `tree` with the default options.
pub fn enumerate_codes<F>(tree: &HuffmanTree, sink: F) -> Result<()>
where
    F: FnMut(char, &[u8]),
{
    CodeEnumerator::default().walk(tree, sink)
}

/// Collect the codes of `tree` with the default options.
pub fn code_table(tree: &HuffmanTree) -> Result<CodeTable> {
    CodeEnumerator::default().table(tree)
}
