use std::{collections::BTreeMap, fmt};

use bitvec::prelude::*;
use itertools::Itertools;

use crate::{huffman::HuffmanTree, symbol::Symbol};

pub type Bits = BitVec<u8, Msb0>;

/// A root-to-leaf path, `0` for left and `1` for right.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Codeword(Bits);

impl Codeword {
    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        self.len() <= other.len() && other.0[..self.len()] == self.0[..]
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to codeword, iterated in alphabet order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Codebook {
    codes: BTreeMap<Symbol, Codeword>,
}

impl Codebook {
    /// Walk the tree with an explicit stack. A tree that is a single leaf
    /// gets the codeword `0`, never an empty one.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(&tree.root, Bits::new())];

        while let Some((node, prefix)) = stack.pop() {
            match node.children() {
                None => {
                    let code = if prefix.is_empty() {
                        bitvec![u8, Msb0; 0]
                    } else {
                        prefix
                    };
                    if let Some(symbol) = node.symbol() {
                        codes.insert(symbol, Codeword(code));
                    }
                }
                Some((left, right)) => {
                    let mut right_prefix = prefix.clone();
                    right_prefix.push(true);
                    stack.push((right, right_prefix));

                    let mut left_prefix = prefix;
                    left_prefix.push(false);
                    stack.push((left, left_prefix));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Codeword> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Codeword)> {
        self.codes.iter().map(|(s, c)| (*s, c))
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.codes.keys().copied()
    }

    pub fn is_prefix_free(&self) -> bool {
        self.codes
            .values()
            .tuple_combinations()
            .all(|(a, b)| !a.is_prefix_of(b) && !b.is_prefix_of(a))
    }

    /// `sum(2^-len) == 1`, checked in integers scaled by `2^max_len`.
    pub fn kraft_sum_is_one(&self) -> bool {
        let Some(max_len) = self.codes.values().map(Codeword::len).max() else {
            return false;
        };
        if max_len >= 128 {
            return false;
        }
        let total: u128 = self
            .codes
            .values()
            .map(|c| 1u128 << (max_len - c.len()))
            .sum();
        total == 1u128 << max_len
    }

    /// `A:010;B:0001;...` in alphabet order.
    pub fn to_table_string(&self) -> String {
        self.iter()
            .map(|(symbol, code)| format!("{symbol}:{code}"))
            .join(";")
    }
}
