//! The fixed 8-symbol alphabet.
//!
//! Declaration order is the priority order: `A` has rank 0 and wins every
//! alphabet-priority tie-break.

use std::{fmt, str::FromStr};

use crate::error::GoldenError;

pub const ALPHABET_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    A,
    B,
    C,
    E,
    I,
    L,
    O,
    V,
}

pub const ALPHABET: [Symbol; ALPHABET_SIZE] = [
    Symbol::A,
    Symbol::B,
    Symbol::C,
    Symbol::E,
    Symbol::I,
    Symbol::L,
    Symbol::O,
    Symbol::V,
];

impl Symbol {
    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn from_rank(rank: usize) -> Option<Self> {
        ALPHABET.get(rank).copied()
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::A => 'A',
            Symbol::B => 'B',
            Symbol::C => 'C',
            Symbol::E => 'E',
            Symbol::I => 'I',
            Symbol::L => 'L',
            Symbol::O => 'O',
            Symbol::V => 'V',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        ALPHABET.iter().copied().find(|s| s.as_char() == c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Symbol {
    type Err = GoldenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(c), None) => Symbol::from_char(c),
            _ => None,
        };
        symbol.ok_or_else(|| GoldenError::InvalidInput(format!("{s:?} is not an alphabet symbol")))
    }
}

/// Parse a word such as `"ILOVE"` into symbols.
pub fn word(text: &str) -> Result<Vec<Symbol>, GoldenError> {
    text.chars()
        .map(|c| {
            Symbol::from_char(c).ok_or_else(|| {
                GoldenError::InvalidInput(format!("{c:?} in {text:?} is not an alphabet symbol"))
            })
        })
        .collect()
}
