use criterion::{criterion_group, criterion_main, Criterion};
use hashdex_core::{Document, InvertedIndex, LinearScanner};

fn corpus(n: u32) -> Vec<Document> {
    let words = ["hash", "table", "busca", "linear", "posting", "lista", "indice", "dados", "chave", "valor"];
    (0..n)
        .map(|i| {
            let text: Vec<String> = (0..40).map(|j| format!("{}{}", words[((i + j) % 10) as usize], (i * j) % 97)).collect();
            Document::new(i, text.join(" "))
        })
        .collect()
}

fn bench_lookup(c: &mut Criterion) {
    let docs = corpus(2_000);
    let mut idx = InvertedIndex::new();
    idx.index_documents(&docs);
    let scanner = LinearScanner::new(&docs, idx.config());

    c.bench_function("index_search", |b| b.iter(|| idx.search("busca42")));
    c.bench_function("linear_scan", |b| b.iter(|| scanner.scan("busca42")));
}

criterion_group!(benches, bench_lookup);
criterion_main!(benches);
