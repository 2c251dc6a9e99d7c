use std::{fmt, str::FromStr};

use bitvec::prelude::*;

use crate::{
    codebook::{Bits, Codebook},
    error::{GoldenError, Result},
    symbol::Symbol,
};

const ILOVE: [Symbol; 5] = [Symbol::I, Symbol::L, Symbol::O, Symbol::V, Symbol::E];
const ICLAB: [Symbol; 5] = [Symbol::I, Symbol::C, Symbol::L, Symbol::A, Symbol::B];

/// Selects the target word a pattern encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Ilove = 0,
    Iclab = 1,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Ilove, Mode::Iclab];

    pub fn from_selector(selector: i64) -> Result<Self> {
        match selector {
            0 => Ok(Mode::Ilove),
            1 => Ok(Mode::Iclab),
            mode => Err(GoldenError::UnknownMode { mode }),
        }
    }

    pub fn selector(self) -> u8 {
        self as u8
    }

    pub fn sequence(self) -> &'static [Symbol] {
        match self {
            Mode::Ilove => &ILOVE,
            Mode::Iclab => &ICLAB,
        }
    }

    pub fn word(self) -> &'static str {
        match self {
            Mode::Ilove => "ILOVE",
            Mode::Iclab => "ICLAB",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

impl FromStr for Mode {
    type Err = GoldenError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(mode) = Mode::ALL.into_iter().find(|m| m.word().eq_ignore_ascii_case(s)) {
            return Ok(mode);
        }
        let selector = s
            .parse::<i64>()
            .map_err(|_| GoldenError::InvalidInput(format!("{s:?} is not a mode")))?;
        Mode::from_selector(selector)
    }
}

/// Concatenates codewords with no separators.
pub struct HuffmanEncoder<'a> {
    codebook: &'a Codebook,
}

impl<'a> HuffmanEncoder<'a> {
    pub fn new(codebook: &'a Codebook) -> Self {
        Self { codebook }
    }

    pub fn encode(&self, symbols: &[Symbol]) -> Result<Bits> {
        let mut out = Bits::new();
        for &symbol in symbols {
            let code = self
                .codebook
                .get(symbol)
                .ok_or(GoldenError::UnknownSymbol { symbol })?;
            out.extend_from_bitslice(code.bits());
        }
        Ok(out)
    }

    pub fn encode_mode(&self, mode: Mode) -> Result<Bits> {
        self.encode(mode.sequence())
    }
}

/// Render bits as the `0`/`1` text a golden file carries.
pub fn bit_string(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::TreeBuilder, huffman::Node, policy::LeafFirst, weights::WeightTable,
    };

    fn reference_codebook() -> Codebook {
        let tree = TreeBuilder::new(&LeafFirst)
            .build(&WeightTable::new([5, 9, 12, 13, 16, 45, 2, 7]))
            .unwrap();
        Codebook::from_tree(&tree)
    }

    #[test]
    fn encodes_both_targets() {
        let book = reference_codebook();
        let encoder = HuffmanEncoder::new(&book);

        let ilove = encoder.encode_mode(Mode::Ilove).unwrap();
        assert_eq!(bit_string(&ilove), "0011010010101011");

        let iclab = encoder.encode_mode(Mode::Iclab).unwrap();
        assert_eq!(bit_string(&iclab), "00100001010000001");
    }

    #[test]
    fn length_is_sum_of_codeword_lengths() {
        let book = reference_codebook();
        let bits = HuffmanEncoder::new(&book).encode_mode(Mode::Ilove).unwrap();
        let expected: usize = Mode::Ilove
            .sequence()
            .iter()
            .map(|s| book.get(*s).unwrap().len())
            .sum();
        assert_eq!(bits.len(), expected);
    }

    #[test]
    fn missing_symbol_is_reported() {
        let tree = TreeBuilder::new(&LeafFirst)
            .build_from_leaves(vec![Node::leaf(Symbol::I, 1, 0)])
            .unwrap();
        let book = Codebook::from_tree(&tree);
        let err = HuffmanEncoder::new(&book)
            .encode_mode(Mode::Ilove)
            .unwrap_err();
        assert!(matches!(err, GoldenError::UnknownSymbol { symbol: Symbol::L }));
    }

    #[test]
    fn empty_sequence_encodes_to_nothing() {
        let book = reference_codebook();
        assert!(HuffmanEncoder::new(&book).encode(&[]).unwrap().is_empty());
    }

    #[test]
    fn mode_selectors() {
        assert_eq!(Mode::from_selector(0).unwrap(), Mode::Ilove);
        assert_eq!(Mode::from_selector(1).unwrap(), Mode::Iclab);
        assert!(matches!(
            Mode::from_selector(2),
            Err(GoldenError::UnknownMode { mode: 2 })
        ));
        assert_eq!("iclab".parse::<Mode>().unwrap(), Mode::Iclab);
        assert_eq!("0".parse::<Mode>().unwrap(), Mode::Ilove);
    }
}
