use std::{io, path::PathBuf};

use thiserror::Error;

use crate::symbol::Symbol;

pub type Result<T, E = GoldenError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum GoldenError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A line that is not "8 weights + 1 mode". Recoverable in a batch.
    #[error("malformed record #{index} ({line:?}): {reason}")]
    MalformedRecord {
        index: usize,
        line: String,
        reason: String,
    },

    #[error("unknown mode selector {mode}")]
    UnknownMode { mode: i64 },

    /// The codebook does not cover a requested symbol. Never a data error.
    #[error("symbol {symbol} has no codeword")]
    UnknownSymbol { symbol: Symbol },

    #[error("i/o error on {}: {source}", path.display())]
    IoAt {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl GoldenError {
    pub(crate) fn io_at(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::IoAt {
            path: path.into(),
            source,
        }
    }

    /// Whether a batch may skip the offending record and keep going.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::MalformedRecord { .. } | Self::UnknownMode { .. }
        )
    }
}
