use std::hint::black_box;

use catalog_portal::filters::suggestions::suggestions;
use catalog_portal::models::CatalogEntry;
use catalog_portal::{CategoryFilter, SearchState, evaluate, parse_cards, visible_entries};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const WORDS: [&str; 6] = ["Orders", "Sales", "Customer", "Inventory", "Finance", "Marketing"];

/// Generate synthetic catalog entries
fn generate_entries(num_entries: usize) -> Vec<CatalogEntry> {
    (0..num_entries)
        .map(|i| CatalogEntry {
            title: format!("{} Mart {}", WORDS[i % WORDS.len()], i),
            description: format!("{} models for team {}", WORDS[(i + 1) % WORDS.len()], i % 17),
            url: format!("https://docs.example.com/{}", i),
            category: if i % 4 == 0 { "archive".to_string() } else { "active".to_string() },
            status: "active".to_string(),
            last_updated: format!("{}h", i % 48),
            last_updated_hours: (i % 48) as u32,
            model_count: (i % 30) as u32,
            icon: "📊".to_string(),
            priority: (i % 10) as i64,
        })
        .collect()
}

fn bench_card_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("card_filtering");

    // Prefix match on the first word of each title
    for size in [1_000, 10_000, 50_000].iter() {
        let entries = generate_entries(*size);
        let state = SearchState::new().with_query("ord");

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("query", size), size, |b, _| {
            b.iter(|| evaluate(black_box(&entries), black_box(&state)));
        });
    }

    // Query combined with the recent facet
    for size in [1_000, 10_000, 50_000].iter() {
        let entries = generate_entries(*size);
        let state = SearchState::new().with_query("cus").with_category(CategoryFilter::Recent);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("query_and_category", size), size, |b, _| {
            b.iter(|| visible_entries(black_box(&entries), black_box(&state)).len());
        });
    }

    // Word suggestions scan titles and descriptions
    for size in [1_000, 10_000, 50_000].iter() {
        let entries = generate_entries(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("suggestions", size), size, |b, _| {
            b.iter(|| suggestions(black_box(&entries), black_box("ma")));
        });
    }

    group.finish();
}

fn bench_card_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("card_parsing");

    for size in [100, 1_000, 10_000].iter() {
        let document = serde_json::to_string(
            &(0..*size)
                .map(|i| {
                    serde_json::json!({
                        "title": format!("Project {}", i),
                        "description": "Generated card",
                        "url": format!("https://docs.example.com/{}", i),
                        "status": "active",
                        "lastUpdated": format!("{}h", i % 48),
                        "models": i % 30,
                    })
                })
                .collect::<Vec<_>>(),
        )
        .unwrap();

        group.throughput(Throughput::Bytes(document.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_cards", size), size, |b, _| {
            b.iter(|| parse_cards(black_box(&document)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_card_filtering, bench_card_parsing);
criterion_main!(benches);
