//! JSON Lines のオフライン採点。
//!
//! 1行に1つの `{title, description, ...}` を読み、整形 → 解析 → 順位付けを行い、
//! 順位付きレコードを1行ずつ書き出す。
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::article::ArticleInput;
use crate::explain::DEFAULT_TOP_K;
use crate::pipeline::{PopularityPipeline, prepare_batch};
use crate::ranking::RankingMode;

/// 標準入力／標準出力を指すパス値。
pub const STDIO_PATH: &str = "-";

/// オフライン採点スクリプトの設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub mode: RankingMode,
    pub clean: bool,
    pub top_k: usize,
}

impl BatchConfig {
    #[must_use]
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            mode: RankingMode::Score,
            clean: true,
            top_k: DEFAULT_TOP_K,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub read: usize,
    pub dropped: usize,
    pub written: usize,
}

/// JSONL ファイル（または標準入力）を採点し、順位付き JSONL をファイル（または標準出力）に書き出す。
///
/// # Errors
/// 入出力の失敗、JSONの解析失敗、順位付けの拒否のいずれかでエラーを返す。
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary> {
    let pipeline = PopularityPipeline::new(config.top_k);

    let reader: Box<dyn BufRead> = if config.input.as_os_str() == STDIO_PATH {
        Box::new(BufReader::new(io::stdin().lock()))
    } else {
        let file = File::open(&config.input)
            .with_context(|| format!("failed to open input at {}", config.input.display()))?;
        Box::new(BufReader::new(file))
    };

    let writer: Box<dyn Write> = match &config.output {
        Some(path) if path.as_os_str() != STDIO_PATH => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output at {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        _ => Box::new(BufWriter::new(io::stdout().lock())),
    };

    score_jsonl(reader, writer, &pipeline, config.mode, config.clean)
}

/// 行区切りJSONを読み込み、順位付きレコードを書き出す。空行は読み飛ばす。
///
/// # Errors
/// 読み込み・JSONの解析・順位付け・書き込みのいずれかに失敗した場合はエラーを返す。
pub fn score_jsonl<R, W>(
    reader: R,
    mut writer: W,
    pipeline: &PopularityPipeline,
    mode: RankingMode,
    clean: bool,
) -> Result<BatchSummary>
where
    R: BufRead,
    W: Write,
{
    let mut inputs = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read input line {}", idx + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let article: ArticleInput = serde_json::from_str(&line)
            .with_context(|| format!("failed to parse JSON on line {}", idx + 1))?;
        inputs.push(article);
    }

    let read = inputs.len();
    let prepared = prepare_batch(inputs, clean);
    let analyses = pipeline.analyze_batch(prepared.articles);
    let ranked = pipeline
        .rank(&analyses, mode)
        .context("failed to rank scored articles")?;

    for record in &ranked {
        serde_json::to_writer(&mut writer, record).context("failed to serialize record")?;
        writer.write_all(b"\n").context("failed to write output")?;
    }
    writer.flush().context("failed to flush output")?;

    let summary = BatchSummary {
        read,
        dropped: prepared.dropped,
        written: ranked.len(),
    };
    info!(
        read = summary.read,
        dropped = summary.dropped,
        written = summary.written,
        mode = mode.as_str(),
        "batch scoring finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn scores_and_ranks_lines() {
        let input = concat!(
            r#"{"title":"Quiet day","description":"Nothing happened.","id":1}"#,
            "\n\n",
            r#"{"title":"Breaking: urgent alert","description":"A shocking and terrible storm is developing now.","id":2}"#,
            "\n",
        );
        let mut output = Vec::new();
        let summary = score_jsonl(
            input.as_bytes(),
            &mut output,
            &PopularityPipeline::default(),
            RankingMode::Score,
            false,
        )
        .expect("batch scores");

        assert_eq!(summary, BatchSummary { read: 2, dropped: 0, written: 2 });

        let lines: Vec<Value> = String::from_utf8(output)
            .expect("utf8")
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], 2);
        assert_eq!(lines[0]["rank"], 1);
        assert_eq!(lines[1]["rank"], 2);
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let input = "{\"title\":\"ok\"}\n{not json}\n";
        let error = score_jsonl(
            input.as_bytes(),
            Vec::new(),
            &PopularityPipeline::default(),
            RankingMode::Score,
            true,
        )
        .expect_err("malformed input");
        assert!(format!("{error:#}").contains("line 2"));
    }

    #[test]
    fn empty_input_writes_nothing() {
        let mut output = Vec::new();
        let summary = score_jsonl(
            "\n\n".as_bytes(),
            &mut output,
            &PopularityPipeline::default(),
            RankingMode::Priority,
            true,
        )
        .expect("empty batch");
        assert_eq!(summary, BatchSummary::default());
        assert!(output.is_empty());
    }
}
