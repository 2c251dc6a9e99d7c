use std::fmt;

use crate::{
    error::{GoldenError, Result},
    huffman::{CreationIndex, Node, Weight},
    symbol::{Symbol, ALPHABET, ALPHABET_SIZE},
};

/// Eight validated weights, positionally aligned to [`ALPHABET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeightTable([u32; ALPHABET_SIZE]);

impl WeightTable {
    pub fn new(weights: [u32; ALPHABET_SIZE]) -> Self {
        Self(weights)
    }

    /// Validate raw integers as read from a record or typed by hand.
    pub fn from_signed(values: &[i64]) -> Result<Self> {
        if values.len() != ALPHABET_SIZE {
            return Err(GoldenError::InvalidInput(format!(
                "expected {ALPHABET_SIZE} weights, got {}",
                values.len()
            )));
        }

        let mut weights = [0u32; ALPHABET_SIZE];
        for ((slot, &value), symbol) in weights.iter_mut().zip(values).zip(ALPHABET) {
            *slot = u32::try_from(value).map_err(|_| {
                GoldenError::InvalidInput(format!("weight {value} for {symbol} is out of range"))
            })?;
        }

        Ok(Self(weights))
    }

    pub fn get(&self, symbol: Symbol) -> u32 {
        self.0[symbol.rank()]
    }

    pub fn as_array(&self) -> &[u32; ALPHABET_SIZE] {
        &self.0
    }

    pub fn total(&self) -> Weight {
        self.0.iter().map(|&w| Weight::from(w)).sum()
    }

    /// One leaf per symbol, creation indices `0..8` in alphabet order.
    pub fn leaves(&self) -> Vec<Node> {
        ALPHABET
            .iter()
            .zip(self.0)
            .enumerate()
            .map(|(i, (&symbol, weight))| {
                Node::leaf(symbol, Weight::from(weight), i as CreationIndex)
            })
            .collect()
    }
}

impl fmt::Display for WeightTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, w) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{w}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_in_alphabet_order() {
        let table = WeightTable::from_signed(&[5, 9, 12, 13, 16, 45, 2, 7]).unwrap();
        let leaves = table.leaves();
        assert_eq!(leaves.len(), 8);
        for (i, leaf) in leaves.iter().enumerate() {
            assert_eq!(leaf.creation(), i as CreationIndex);
            assert_eq!(leaf.symbol(), Some(ALPHABET[i]));
        }
        assert_eq!(leaves[5].weight(), 45);
        assert_eq!(table.total(), 109);
        assert_eq!(table.get(Symbol::O), 2);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            WeightTable::from_signed(&[1, 2, 3, 4, 5, 6, 7]),
            Err(GoldenError::InvalidInput(_))
        ));
        assert!(matches!(
            WeightTable::from_signed(&[1; 9]),
            Err(GoldenError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_negative_weight() {
        let err = WeightTable::from_signed(&[1, 2, 3, -4, 5, 6, 7, 8]).unwrap_err();
        assert!(err.to_string().contains("-4"));
    }

    #[test]
    fn zero_weights_are_valid() {
        let table = WeightTable::from_signed(&[0; 8]).unwrap();
        assert_eq!(table.total(), 0);
        assert_eq!(table.to_string(), "0 0 0 0 0 0 0 0");
    }
}
