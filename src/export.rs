//! Single-pattern table export: weights, codebook and both target encodings
//! on one CSV row.

use std::{
    io::{self, Write},
    iter,
};

use itertools::Itertools;

use crate::{
    error::Result,
    huffman_encoder::Mode,
    pattern::GoldenRecord,
    symbol::{ALPHABET, ALPHABET_SIZE},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub weights: [u32; ALPHABET_SIZE],
    pub codebook: String,
    pub ilove: String,
    pub iclab: String,
}

impl ExportRow {
    pub fn from_record(record: &GoldenRecord) -> Result<Self> {
        Ok(Self {
            weights: *record.pattern.weights.as_array(),
            codebook: record.codebook.to_table_string(),
            ilove: record.encode(Mode::Ilove)?,
            iclab: record.encode(Mode::Iclab)?,
        })
    }

    pub fn to_csv_line(&self) -> String {
        self.weights
            .iter()
            .map(u32::to_string)
            .chain([
                self.codebook.clone(),
                self.ilove.clone(),
                self.iclab.clone(),
            ])
            .join(",")
    }
}

pub fn csv_header() -> String {
    ALPHABET
        .iter()
        .map(|s| s.to_string())
        .chain(iter::once("codebook".to_owned()))
        .chain(Mode::ALL.iter().map(|m| format!("{}_bits", m.word())))
        .join(",")
}

pub fn write_csv<W: Write + ?Sized>(out: &mut W, rows: &[ExportRow]) -> io::Result<()> {
    writeln!(out, "{}", csv_header())?;
    for row in rows {
        writeln!(out, "{}", row.to_csv_line())?;
    }
    Ok(())
}
