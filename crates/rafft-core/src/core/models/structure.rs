use super::pairs::{BasePair, PairList};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Bracket families in the order they are handed out to crossing pairs.
pub const BRACKET_FAMILIES: [(char, char); 4] = [('(', ')'), ('[', ']'), ('{', '}'), ('<', '>')];

const LETTER_FAMILY_COUNT: usize = 26;
const FAMILY_COUNT: usize = BRACKET_FAMILIES.len() + LETTER_FAMILY_COUNT;

/// Every pairing family: the brackets first, then `A`/`a` through `Z`/`z`.
pub const PAIR_FAMILIES: [(char, char); FAMILY_COUNT] = pair_families();

const fn pair_families() -> [(char, char); FAMILY_COUNT] {
    let mut families = [('(', ')'); FAMILY_COUNT];
    let mut k = 0;
    while k < BRACKET_FAMILIES.len() {
        families[k] = BRACKET_FAMILIES[k];
        k += 1;
    }
    let mut letter = 0;
    while letter < LETTER_FAMILY_COUNT {
        families[BRACKET_FAMILIES.len() + letter] = (
            (b'A' + letter as u8) as char,
            (b'a' + letter as u8) as char,
        );
        letter += 1;
    }
    families
}

pub const UNPAIRED: char = '.';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    #[error("Pair ({i}, {j}) lies outside a structure of length {length}")]
    PairOutOfRange { i: usize, j: usize, length: usize },

    #[error("Position {position} takes part in more than one pair")]
    PositionPairedTwice { position: usize },

    #[error("Unmatched closing bracket {symbol:?} at position {position}")]
    UnmatchedClose { symbol: char, position: usize },

    #[error("Unmatched opening bracket {symbol:?} at position {position}")]
    UnmatchedOpen { symbol: char, position: usize },

    #[error("Unexpected symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("Structures have different lengths ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
}

/// A predicted secondary structure: the committed pairs, their dot-bracket
/// rendering and an optional energy supplied by an external model.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub pairs: PairList,
    pub dot_bracket: String,
    pub energy: Option<f64>,
}

impl Structure {
    pub fn from_pairs(pairs: PairList, length: usize) -> Result<Self, StructureError> {
        let dot_bracket = dot_bracket(&pairs, length)?;
        Ok(Self {
            pairs,
            dot_bracket,
            energy: None,
        })
    }

    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn len(&self) -> usize {
        self.dot_bracket.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.dot_bracket.is_empty()
    }
}

/// Renders `pairs` as a dot-bracket string of `length` characters.
///
/// Pairs are placed in commit order. Each pair takes the first family of
/// [`PAIR_FAMILIES`] in which it crosses no previously placed pair, so a nested
/// pair list only ever uses `(` and `)`. A pair that crosses some pair of
/// every family is written as `(`/`)`; such a string no longer parses back to
/// the same pairs.
///
/// Only malformed pair lists are rejected; any crossing pattern renders.
pub fn dot_bracket(pairs: &PairList, length: usize) -> Result<String, StructureError> {
    let mut symbols = vec![UNPAIRED; length];
    let mut families: Vec<Vec<BasePair>> = vec![Vec::new(); FAMILY_COUNT];
    let mut seen = HashSet::with_capacity(pairs.len() * 2);

    for pair in pairs {
        if pair.j >= length || pair.i >= pair.j {
            return Err(StructureError::PairOutOfRange {
                i: pair.i,
                j: pair.j,
                length,
            });
        }
        for position in [pair.i, pair.j] {
            if !seen.insert(position) {
                return Err(StructureError::PositionPairedTwice { position });
            }
        }

        let family = families
            .iter()
            .position(|placed| placed.iter().all(|p| !p.crosses(pair)));
        let (open, close) = match family {
            Some(family) => {
                families[family].push(*pair);
                PAIR_FAMILIES[family]
            }
            None => {
                debug!(i = pair.i, j = pair.j, "Pair crosses every family; writing it as '()'.");
                BRACKET_FAMILIES[0]
            }
        };
        symbols[pair.i] = open;
        symbols[pair.j] = close;
    }

    Ok(symbols.into_iter().collect())
}

/// Parses a dot-bracket string back into its pairs, sorted by 5' position.
///
/// Every family of [`PAIR_FAMILIES`] is matched with its own stack; any other
/// character is treated as unpaired except for whitespace, which is rejected.
pub fn parse_dot_bracket(structure: &str) -> Result<Vec<BasePair>, StructureError> {
    let mut stacks: Vec<Vec<usize>> = vec![Vec::new(); FAMILY_COUNT];
    let mut pairs = Vec::new();

    for (position, symbol) in structure.chars().enumerate() {
        if symbol.is_whitespace() {
            return Err(StructureError::InvalidSymbol { symbol, position });
        }
        if let Some(family) = PAIR_FAMILIES.iter().position(|&(o, _)| o == symbol) {
            stacks[family].push(position);
        } else if let Some(family) = PAIR_FAMILIES.iter().position(|&(_, c)| c == symbol) {
            let open = stacks[family]
                .pop()
                .ok_or(StructureError::UnmatchedClose { symbol, position })?;
            pairs.push(BasePair::new(open, position));
        }
    }

    for (family, stack) in stacks.iter().enumerate() {
        if let Some(&position) = stack.last() {
            return Err(StructureError::UnmatchedOpen {
                symbol: PAIR_FAMILIES[family].0,
                position,
            });
        }
    }

    pairs.sort_unstable();
    Ok(pairs)
}

/// Number of positions at which two equal-length structures differ.
pub fn hamming_distance(left: &str, right: &str) -> Result<usize, StructureError> {
    let (l, r) = (left.chars().count(), right.chars().count());
    if l != r {
        return Err(StructureError::LengthMismatch { left: l, right: r });
    }
    Ok(left
        .chars()
        .zip(right.chars())
        .filter(|(a, b)| a != b)
        .count())
}

/// Size of the symmetric difference between the pair sets of two structures.
pub fn base_pair_distance(left: &str, right: &str) -> Result<usize, StructureError> {
    let (l, r) = (left.chars().count(), right.chars().count());
    if l != r {
        return Err(StructureError::LengthMismatch { left: l, right: r });
    }
    let left_pairs: HashSet<_> = parse_dot_bracket(left)?.into_iter().collect();
    let right_pairs: HashSet<_> = parse_dot_bracket(right)?.into_iter().collect();
    Ok(left_pairs.symmetric_difference(&right_pairs).count())
}
