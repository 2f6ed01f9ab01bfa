use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, anyhow, bail};
use popularity_worker::{
    batch::{BatchConfig, run_batch},
    ranking::RankingMode,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout はレコード出力に使うため、ログは stderr に出す
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = parse_args()?;
    let summary = run_batch(&config)?;
    eprintln!(
        "Scored {} articles ({} dropped as empty or duplicate, {} written)",
        summary.read, summary.dropped, summary.written
    );
    Ok(())
}

fn parse_args() -> Result<BatchConfig> {
    let mut input = None;
    let mut output = None;
    let mut mode = RankingMode::Score;
    let mut clean = true;
    let mut top_k = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .context("--input requires a path argument (or - for stdin)")?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args.next().context("--output requires a path argument")?;
                output = Some(PathBuf::from(value));
            }
            "--mode" => {
                let value = args.next().context("--mode requires score or priority")?;
                mode = match value.as_str() {
                    "score" => RankingMode::Score,
                    "priority" => RankingMode::Priority,
                    other => bail!("unknown mode: {other} (expected score or priority)"),
                };
            }
            "--no-clean" => {
                clean = false;
            }
            "--top-k" => {
                let value = args.next().context("--top-k requires a number")?;
                let parsed = value
                    .parse::<usize>()
                    .context("--top-k must be an integer")?;
                if parsed == 0 {
                    bail!("--top-k must be greater than zero");
                }
                top_k = Some(parsed);
            }
            "--help" => {
                print_usage();
                process::exit(0);
            }
            _ => {
                bail!("unknown argument: {}", arg);
            }
        }
    }

    let input = input.ok_or_else(|| anyhow!("--input is required"))?;
    let mut config = BatchConfig::new(input);
    config.output = output;
    config.mode = mode;
    config.clean = clean;
    if let Some(top_k) = top_k {
        config.top_k = top_k;
    }
    Ok(config)
}

fn print_usage() {
    eprintln!(
        "Usage: score_articles --input <path|-> [--output <path>] [--mode score|priority] [--no-clean] [--top-k N]"
    );
}
