/// A character of the input alphabet and the number of times it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    ch: char,
    freq: u64,
}

impl Symbol {
    /// Create a new symbol
    pub fn new(ch: char, freq: u64) -> Self {
        Symbol { ch, freq }
    }

    pub fn ch(&self) -> char {
        self.ch
    }

    pub fn freq(&self) -> u64 {
        self.freq
    }
}

impl From<(char, u64)> for Symbol {
    fn from((ch, freq): (char, u64)) -> Self {
        Symbol::new(ch, freq)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' ({})", self.ch, self.freq)
    }
}

#[test]
fn symbol_from_pair_test() {
    let s = Symbol::from(('q', 12));
    assert_eq!(s.ch(), 'q');
    assert_eq!(s.freq(), 12);
    assert_eq!(s.to_string(), "'q' (12)");
}
