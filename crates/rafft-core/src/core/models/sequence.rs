use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The four canonical ribonucleotides.
///
/// The declaration order (A, G, C, U) is also the channel order of the strand
/// encodings, see [`Nucleotide::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Nucleotide {
    A,
    G,
    C,
    U,
}

static SYMBOLS: Map<char, Nucleotide> = phf_map! {
    'A' => Nucleotide::A, 'a' => Nucleotide::A,
    'G' => Nucleotide::G, 'g' => Nucleotide::G,
    'C' => Nucleotide::C, 'c' => Nucleotide::C,
    'U' => Nucleotide::U, 'u' => Nucleotide::U,
    'T' => Nucleotide::U, 't' => Nucleotide::U,
};

impl Nucleotide {
    pub const ALL: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::G, Nucleotide::C, Nucleotide::U];

    pub fn from_char(symbol: char) -> Option<Self> {
        SYMBOLS.get(&symbol).copied()
    }

    pub fn to_char(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::G => 'G',
            Nucleotide::C => 'C',
            Nucleotide::U => 'U',
        }
    }

    /// Channel index of this nucleotide in a 4-channel encoding.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Sequence is empty after normalization")]
    Empty,
    #[error("Unsupported character {symbol:?} at position {position}")]
    InvalidCharacter { symbol: char, position: usize },
}

/// A normalized nucleic-acid sequence.
///
/// Normalization upper-cases the input, rewrites `T` as `U`, removes `N` and
/// strips whitespace. Any other ASCII symbol is kept verbatim: it occupies a
/// position but never pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    symbols: Vec<u8>,
}

impl Sequence {
    pub fn new(raw: &str) -> Result<Self, SequenceError> {
        let mut symbols = Vec::with_capacity(raw.len());
        for (position, symbol) in raw.chars().enumerate() {
            if symbol.is_whitespace() {
                continue;
            }
            if !symbol.is_ascii() || symbol.is_ascii_control() {
                return Err(SequenceError::InvalidCharacter { symbol, position });
            }
            match symbol.to_ascii_uppercase() {
                'N' => {}
                'T' => symbols.push(b'U'),
                other => symbols.push(other as u8),
            }
        }
        if symbols.is_empty() {
            return Err(SequenceError::Empty);
        }
        Ok(Self { symbols })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The nucleotide at `position`, or `None` for a symbol outside the alphabet.
    pub fn nucleotide(&self, position: usize) -> Option<Nucleotide> {
        self.symbols
            .get(position)
            .and_then(|&b| Nucleotide::from_char(b as char))
    }

    pub fn nucleotides(&self) -> impl Iterator<Item = Option<Nucleotide>> + '_ {
        self.symbols
            .iter()
            .map(|&b| Nucleotide::from_char(b as char))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII bytes are ever stored.
        std::str::from_utf8(&self.symbols).unwrap_or_default()
    }
}

impl FromStr for Sequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
