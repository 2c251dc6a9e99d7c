use std::{
    env,
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::{bail, Context};
use huffman_golden::{
    bit_string,
    export::{write_csv, ExportRow},
    symbol, GeneratorConfig, Harness, HarnessConfig, HuffmanEncoder, Mode, Pattern, WeightTable,
    ALPHABET,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage:
  huffman-golden generate <input-out> <golden-out>
  huffman-golden batch <input> <golden-out>
  huffman-golden single <w0> .. <w7> [--csv <path>] [--encode <mode|word>]...";

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = env::args().skip(1).collect::<Vec<_>>();
    let harness_config = HarnessConfig::from_env().context("invalid harness configuration")?;
    let harness = Harness::from_config(&harness_config);

    match args.first().map(String::as_str) {
        Some("generate") => {
            let [input, golden] = paths(&args[1..])?;
            let config = GeneratorConfig::from_env().context("invalid generator configuration")?;
            let mut rng = StdRng::seed_from_u64(config.seed);
            let summary = harness
                .generate(&mut rng, &config, &input, &golden)
                .with_context(|| format!("failed to generate {}", golden.display()))?;
            println!(
                "generated {} patterns (seed {}, policy {})",
                summary.written, config.seed, harness_config.policy
            );
        }
        Some("batch") => {
            let [input, golden] = paths(&args[1..])?;
            let summary = harness
                .run_files(&input, &golden)
                .with_context(|| format!("failed to process {}", input.display()))?;
            for skipped in &summary.skipped {
                eprintln!("skipped record #{}: {}", skipped.index, skipped.reason);
            }
            println!(
                "wrote {} golden lines, skipped {} records",
                summary.written,
                summary.skipped.len()
            );
        }
        Some("single") => single(&args[1..], &harness_config)?,
        _ => bail!(USAGE),
    }

    Ok(())
}

fn paths(args: &[String]) -> anyhow::Result<[PathBuf; 2]> {
    match args {
        [input, golden] => Ok([PathBuf::from(input), PathBuf::from(golden)]),
        _ => bail!(USAGE),
    }
}

fn single(args: &[String], config: &HarnessConfig) -> anyhow::Result<()> {
    let mut weights = Vec::new();
    let mut csv = None;
    let mut targets = Vec::new();
    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--csv" => csv = Some(PathBuf::from(args.next().context(USAGE)?)),
            "--encode" => targets.push(args.next().context(USAGE)?.as_str()),
            w => weights.push(
                w.parse::<i64>()
                    .with_context(|| format!("{w:?} is not an integer"))?,
            ),
        }
    }
    let weights = WeightTable::from_signed(&weights)?;

    let record = Pattern::new(weights, Mode::Ilove).solve(&config.policy)?;

    println!("codebook ({}):", config.policy);
    for symbol in ALPHABET {
        if let Some(code) = record.codebook.get(symbol) {
            println!("  {symbol}: {code}");
        }
    }
    for mode in Mode::ALL {
        println!("{mode}: {}", record.encode(mode)?);
    }

    let encoder = HuffmanEncoder::new(&record.codebook);
    for target in targets {
        // A mode name or selector, otherwise any word over the alphabet.
        let bits = match target.parse::<Mode>() {
            Ok(mode) => encoder.encode_mode(mode)?,
            Err(_) => encoder.encode(&symbol::word(target)?)?,
        };
        println!("{target}: {}", bit_string(&bits));
    }

    if let Some(path) = csv {
        let row = ExportRow::from_record(&record)?;
        let file =
            File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        write_csv(&mut out, &[row])
            .and_then(|()| out.flush())
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("table saved to {}", path.display());
    }

    Ok(())
}
