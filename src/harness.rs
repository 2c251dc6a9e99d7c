//! Batch golden-vector generation.
//!
//! A batch is a list of [`Pattern`]s, either parsed from an input artifact or
//! drawn from a seeded generator. Every pattern is solved on its own; only the
//! output writer is shared, and it is filled in input order after all patterns
//! are solved. Artifacts are staged in a temporary file next to the target and
//! renamed into place, so a failed run leaves no partial output behind.

use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    str,
};

use rand::Rng;
use rayon::prelude::*;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::{
    config::{GeneratorConfig, HarnessConfig},
    error::{GoldenError, Result},
    huffman_encoder::Mode,
    pattern::{GoldenRecord, Pattern},
    policy::{OrderingPolicy, PolicyKind},
    symbol::ALPHABET_SIZE,
    weights::WeightTable,
};

/// Draw `config.patterns` patterns from `rng`: eight weights, then the mode.
pub fn generate_patterns<R: Rng>(
    rng: &mut R,
    config: &GeneratorConfig,
) -> Result<Vec<Pattern>> {
    config.validate()?;

    let patterns = (0..config.patterns)
        .map(|_| {
            let mut weights = [0u32; ALPHABET_SIZE];
            for w in weights.iter_mut() {
                *w = rng.gen_range(config.weight_min..=config.weight_max);
            }
            let mode = if rng.gen_bool(0.5) {
                Mode::Iclab
            } else {
                Mode::Ilove
            };
            Pattern::new(WeightTable::new(weights), mode)
        })
        .collect();

    Ok(patterns)
}

/// A record that was skipped, with enough context to replay it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Zero-based line number in the input.
    pub index: usize,
    pub line: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutput {
    pub records: Vec<GoldenRecord>,
    pub skipped: Vec<SkippedRecord>,
}

impl BatchOutput {
    pub fn write_golden<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for record in &self.records {
            writeln!(out, "{}", record.golden_line())?;
        }
        Ok(())
    }

    pub fn write_inputs<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for record in &self.records {
            writeln!(out, "{}", record.pattern.to_record_line())?;
        }
        Ok(())
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            written: self.records.len(),
            skipped: self.skipped.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub written: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl BatchSummary {
    pub fn records_seen(&self) -> usize {
        self.written + self.skipped.len()
    }
}

pub struct Harness<P = PolicyKind> {
    policy: P,
    parallel: bool,
}

impl Harness<PolicyKind> {
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            policy: config.policy,
            parallel: config.parallel,
        }
    }
}

impl<P: OrderingPolicy + Sync> Harness<P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            parallel: false,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    fn map_ordered<T, U, F>(&self, items: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync + Send,
    {
        if self.parallel {
            items.par_iter().map(f).collect()
        } else {
            items.iter().map(f).collect()
        }
    }

    /// Solve every pattern; any error is fatal.
    pub fn solve_all(&self, patterns: &[Pattern]) -> Result<Vec<GoldenRecord>> {
        self.map_ordered(patterns, |pattern| pattern.solve(&self.policy))
            .into_iter()
            .collect()
    }

    /// Parse and solve an input artifact's text. Malformed records are
    /// skipped; anything else aborts the batch.
    pub fn process_text(&self, input: &str) -> Result<BatchOutput> {
        self.process_bytes(input.as_bytes())
    }

    /// Like [`Harness::process_text`], but decodes each line on its own so a
    /// line that is not UTF-8 is skipped like any other malformed record.
    pub fn process_bytes(&self, input: &[u8]) -> Result<BatchOutput> {
        let lines = input
            .split(|&b| b == b'\n')
            .map(|raw| raw.strip_suffix(b"\r").unwrap_or(raw))
            .enumerate()
            .map(|(index, raw)| (index, raw, str::from_utf8(raw)))
            .filter(|(_, _, text)| text.as_ref().map_or(true, |line| !line.trim().is_empty()))
            .collect::<Vec<_>>();

        let outcomes = self.map_ordered(&lines, |&(index, raw, text)| match text {
            Ok(line) => {
                Pattern::parse_record(index, line).and_then(|pattern| pattern.solve(&self.policy))
            }
            Err(err) => Err(GoldenError::MalformedRecord {
                index,
                line: String::from_utf8_lossy(raw).into_owned(),
                reason: format!("not valid UTF-8: {err}"),
            }),
        });

        let mut output = BatchOutput::default();
        for ((index, raw, _), outcome) in lines.into_iter().zip(outcomes) {
            match outcome {
                Ok(record) => output.records.push(record),
                Err(err) if err.is_record_error() => {
                    let line = String::from_utf8_lossy(raw).into_owned();
                    warn!(index, line = %line, "skipping record: {err}");
                    output.skipped.push(SkippedRecord {
                        index,
                        line,
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        Ok(output)
    }

    /// Read `input`, write one golden line per valid record to `golden`.
    pub fn run_files(&self, input: &Path, golden: &Path) -> Result<BatchSummary> {
        let bytes = fs::read(input).map_err(|e| GoldenError::io_at(input, e))?;
        let output = self.process_bytes(&bytes)?;

        let staged = stage(golden, |w| output.write_golden(w))?;
        commit(staged, golden)?;

        let summary = output.summary();
        info!(
            input = %input.display(),
            golden = %golden.display(),
            written = summary.written,
            skipped = summary.skipped.len(),
            "batch complete"
        );
        Ok(summary)
    }

    /// Draw patterns from `rng` and write the matching input and golden
    /// artifacts side by side. Either both artifacts are replaced or neither
    /// is.
    pub fn generate<R: Rng>(
        &self,
        rng: &mut R,
        config: &GeneratorConfig,
        input: &Path,
        golden: &Path,
    ) -> Result<BatchSummary> {
        let patterns = generate_patterns(rng, config)?;
        let output = BatchOutput {
            records: self.solve_all(&patterns)?,
            skipped: Vec::new(),
        };

        let staged_input = stage(input, |w| output.write_inputs(w))?;
        let staged_golden = stage(golden, |w| output.write_golden(w))?;
        commit_pair((staged_input, input), (staged_golden, golden))?;

        let summary = output.summary();
        info!(
            input = %input.display(),
            golden = %golden.display(),
            patterns = summary.written,
            seed = config.seed,
            "generated golden set"
        );
        Ok(summary)
    }
}

fn staging_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Fully write a temporary file in `path`'s directory.
fn stage<F>(path: &Path, write: F) -> Result<NamedTempFile>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let dir = staging_dir(path);
    let mut file = NamedTempFile::new_in(&dir).map_err(|e| GoldenError::io_at(&dir, e))?;
    {
        let mut out = BufWriter::new(file.as_file_mut());
        write(&mut out).map_err(|e| GoldenError::io_at(path, e))?;
        out.flush().map_err(|e| GoldenError::io_at(path, e))?;
    }
    debug!(path = %path.display(), "staged artifact");
    Ok(file)
}

fn commit(file: NamedTempFile, path: &Path) -> Result<()> {
    file.persist(path)
        .map(drop)
        .map_err(|e| GoldenError::io_at(path, e.error))
}

/// Commit two staged artifacts as a pair. Both destinations are checked
/// first; if the second rename still fails, the first destination is put
/// back to what it held before.
fn commit_pair(first: (NamedTempFile, &Path), second: (NamedTempFile, &Path)) -> Result<()> {
    let (first_file, first_path) = first;
    let (second_file, second_path) = second;
    ensure_replaceable(first_path)?;
    ensure_replaceable(second_path)?;

    let previous = snapshot(first_path)?;
    commit(first_file, first_path)?;
    if let Err(err) = commit(second_file, second_path) {
        if let Err(restore_err) = restore(first_path, previous) {
            warn!(path = %first_path.display(), "failed to restore artifact: {restore_err}");
        }
        return Err(err);
    }
    Ok(())
}

fn ensure_replaceable(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Err(GoldenError::io_at(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "destination is a directory"),
        )),
        _ => Ok(()),
    }
}

fn snapshot(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(GoldenError::io_at(path, e)),
    }
}

fn restore(path: &Path, previous: Option<Vec<u8>>) -> Result<()> {
    match previous {
        Some(bytes) => commit(stage(path, |w| w.write_all(&bytes))?, path),
        None => fs::remove_file(path).map_err(|e| GoldenError::io_at(path, e)),
    }
}
