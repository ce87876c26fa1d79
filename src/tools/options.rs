use std::{fmt::Display, fmt::Formatter};

/// How two subtrees of equal weight are ordered in the build queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Weight only. Equal weights come out in whatever order the heap structure gives.
    #[default]
    Structural,
    /// Weight, then creation order: input position for leaves, merge order for internal nodes.
    Sequence,
}
impl Display for TieBreak {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Code assigned when the alphabet holds a single symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingleSymbolCode {
    /// The lone leaf is the root, so its code is empty.
    #[default]
    Empty,
    /// Emit the one-bit code `0` so every symbol costs at least one bit.
    OneBit,
}
impl Display for SingleSymbolCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Ordering of equal-weight subtrees while building
    pub tie_break: TieBreak,
    /// Code length policy for a one-symbol alphabet
    pub single_symbol: SingleSymbolCode,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self {
            tie_break: TieBreak::Structural,
            single_symbol: SingleSymbolCode::Empty,
        }
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::new()
    }
}
