//! Deterministic golden reference generation for a hardware Huffman encoder.
//!
//! The pipeline for one pattern is: [`WeightTable`] → [`TreeBuilder`] (driven
//! by an [`OrderingPolicy`]) → [`Codebook`] → [`HuffmanEncoder`]. The
//! [`Harness`] runs that pipeline over whole batches and writes the golden
//! artifacts a testbench compares against bit for bit.

pub mod builder;
pub mod codebook;
pub mod config;
pub mod error;
pub mod export;
pub mod harness;
pub mod huffman;
pub mod huffman_encoder;
pub mod pattern;
pub mod policy;
pub mod symbol;
pub mod weights;

pub use builder::TreeBuilder;
pub use codebook::{Codebook, Codeword};
pub use config::{GeneratorConfig, HarnessConfig};
pub use error::{GoldenError, Result};
pub use harness::{generate_patterns, BatchSummary, Harness};
pub use huffman::{HuffmanTree, Node, NodeKey};
pub use huffman_encoder::{bit_string, HuffmanEncoder, Mode};
pub use pattern::{GoldenRecord, Pattern};
pub use policy::{DescendingId, LeafFirst, OrderingPolicy, Placement, PolicyKind, SymbolPriority};
pub use symbol::{Symbol, ALPHABET};
pub use weights::WeightTable;
