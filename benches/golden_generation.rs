use criterion::{black_box, criterion_group, criterion_main, Criterion};
use huffman_golden::{generate_patterns, GeneratorConfig, Harness, PolicyKind};
use rand::{rngs::StdRng, SeedableRng};

fn tree_construction(c: &mut Criterion) {
    let config = GeneratorConfig::default();
    let patterns = generate_patterns(&mut StdRng::seed_from_u64(config.seed), &config).unwrap();

    for policy in PolicyKind::ALL {
        let harness = Harness::new(policy);
        c.bench_function(&format!("solve 200 patterns ({policy})"), |b| {
            b.iter(|| harness.solve_all(black_box(&patterns)).unwrap())
        });
    }
}

fn batch_text(c: &mut Criterion) {
    let config = GeneratorConfig {
        patterns: 4096,
        ..Default::default()
    };
    let patterns = generate_patterns(&mut StdRng::seed_from_u64(config.seed), &config).unwrap();
    let input = patterns
        .iter()
        .map(|p| p.to_record_line())
        .collect::<Vec<_>>()
        .join("\n");

    c.bench_function("process 4096 records", |b| {
        b.iter(|| Harness::new(PolicyKind::LeafFirst).process_text(black_box(&input)))
    });

    c.bench_function("process 4096 records (parallel)", |b| {
        b.iter(|| {
            Harness::new(PolicyKind::LeafFirst)
                .parallel(true)
                .process_text(black_box(&input))
        })
    });
}

criterion_group!(benches, tree_construction, batch_text);
criterion_main!(benches);
