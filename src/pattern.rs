use std::fmt;

use tracing::debug;

use crate::{
    builder::TreeBuilder,
    codebook::{Bits, Codebook},
    error::{GoldenError, Result},
    huffman_encoder::{bit_string, HuffmanEncoder, Mode},
    policy::OrderingPolicy,
    symbol::ALPHABET_SIZE,
    weights::WeightTable,
};

const RECORD_FIELDS: usize = ALPHABET_SIZE + 1;

/// Eight weights and the word to encode with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern {
    pub weights: WeightTable,
    pub mode: Mode,
}

impl Pattern {
    pub fn new(weights: WeightTable, mode: Mode) -> Self {
        Self { weights, mode }
    }

    /// Parse one input line: 8 weights then the mode selector.
    ///
    /// Every failure is reported as [`GoldenError::MalformedRecord`] carrying
    /// `index` and the raw line, so a skipped record can be replayed by hand.
    pub fn parse_record(index: usize, line: &str) -> Result<Self> {
        let malformed = |reason: String| GoldenError::MalformedRecord {
            index,
            line: line.to_owned(),
            reason,
        };

        let fields = line.split_whitespace().collect::<Vec<_>>();
        if fields.len() != RECORD_FIELDS {
            return Err(malformed(format!(
                "expected {RECORD_FIELDS} integers, found {} fields",
                fields.len()
            )));
        }

        let values = fields
            .iter()
            .map(|field| {
                field
                    .parse::<i64>()
                    .map_err(|_| malformed(format!("{field:?} is not an integer")))
            })
            .collect::<Result<Vec<_>>>()?;

        let (weights, mode) = values.split_at(ALPHABET_SIZE);
        let weights = WeightTable::from_signed(weights).map_err(|e| malformed(e.to_string()))?;
        let mode = Mode::from_selector(mode[0]).map_err(|e| malformed(e.to_string()))?;

        Ok(Self { weights, mode })
    }

    /// The input-file line this pattern round-trips through.
    pub fn to_record_line(&self) -> String {
        format!("{} {}", self.weights, self.mode.selector())
    }

    /// Build the tree, extract the codebook and encode the selected word.
    pub fn solve<P: OrderingPolicy + ?Sized>(&self, policy: &P) -> Result<GoldenRecord> {
        let tree = TreeBuilder::new(policy).build(&self.weights)?;
        let codebook = Codebook::from_tree(&tree);
        let bits = HuffmanEncoder::new(&codebook).encode_mode(self.mode)?;

        debug!(
            weights = %self.weights,
            mode = %self.mode,
            codebook = %codebook.to_table_string(),
            "solved pattern"
        );

        Ok(GoldenRecord {
            pattern: *self,
            codebook,
            bits,
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_record_line())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenRecord {
    pub pattern: Pattern,
    pub codebook: Codebook,
    pub bits: Bits,
}

impl GoldenRecord {
    /// The golden-file line: bits only, no whitespace.
    pub fn golden_line(&self) -> String {
        bit_string(&self.bits)
    }

    /// Encode the other target word with the same codebook.
    pub fn encode(&self, mode: Mode) -> Result<String> {
        let bits = HuffmanEncoder::new(&self.codebook).encode_mode(mode)?;
        Ok(bit_string(&bits))
    }
}
