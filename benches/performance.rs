/// 記事採点とバッチ順位付けの性能ベンチマーク。
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use popularity_worker::article::ArticleInput;
use popularity_worker::pipeline::{PopularityPipeline, prepare_batch};
use popularity_worker::ranking::RankingMode;

const DESCRIPTIONS: [&str; 4] = [
    "A terrible storm is developing now along the coast and residents were told to leave immediately.",
    "The council approved a modest budget for the new library after a long and calm debate.",
    "Investors cheered a very strong quarter as the company reported surprising growth today.",
    "Researchers describe a simple method that makes recycling plastics cheaper and cleaner.",
];

fn synthetic_articles(count: usize) -> Vec<ArticleInput> {
    (0..count)
        .map(|idx| {
            ArticleInput::new(
                format!("Headline {idx}: breaking update"),
                DESCRIPTIONS[idx % DESCRIPTIONS.len()].repeat(1 + idx % 3),
            )
        })
        .collect()
}

fn bench_single_article(c: &mut Criterion) {
    let pipeline = PopularityPipeline::default();
    c.bench_function("analyze_single_article", |b| {
        b.iter(|| {
            let analysis = pipeline.analyze(
                black_box("Breaking: urgent flood alert"),
                black_box(DESCRIPTIONS[0]),
            );
            black_box(analysis.popularity_percentage);
        });
    });
}

fn bench_batch(c: &mut Criterion) {
    let pipeline = PopularityPipeline::default();
    let articles = synthetic_articles(1024);

    c.bench_function("prepare_analyze_rank_1k", |b| {
        b.iter(|| {
            let prepared = prepare_batch(articles.clone(), true);
            let analyses = pipeline.analyze_batch(prepared.articles);
            let ranked = pipeline.rank(&analyses, RankingMode::Priority);
            black_box(ranked.map(|records| records.len()).unwrap_or_default());
        });
    });
}

criterion_group!(benches, bench_single_article, bench_batch);
criterion_main!(benches);
