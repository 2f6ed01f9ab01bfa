use std::{env, net::SocketAddr, num::NonZeroUsize};

use thiserror::Error;

use crate::explain::DEFAULT_TOP_K;
use crate::pipeline::DEFAULT_PARALLEL_THRESHOLD;
use crate::ranking::DEFAULT_SCORE_COLUMN;

#[cfg(test)]
use once_cell::sync::Lazy;
#[cfg(test)]
pub(crate) static ENV_MUTEX: Lazy<std::sync::Mutex<()>> = Lazy::new(|| std::sync::Mutex::new(()));

const DEFAULT_HTTP_BIND: &str = "0.0.0.0:9010";
const DEFAULT_BATCH_MAX_ARTICLES: usize = 5000;
const DEFAULT_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    http_bind: SocketAddr,
    score_column: String,
    top_reasons: NonZeroUsize,
    batch_max_articles: NonZeroUsize,
    max_body_bytes: NonZeroUsize,
    parallel_threshold: usize,
    worker_threads: NonZeroUsize,
    clean_batch_text: bool,
    otel_exporter_endpoint: Option<String>,
    otel_sampling_ratio: f64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {source}")]
    Invalid {
        name: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_bind: SocketAddr::from(([0, 0, 0, 0], 9010)),
            score_column: DEFAULT_SCORE_COLUMN.to_string(),
            top_reasons: NonZeroUsize::new(DEFAULT_TOP_K).unwrap_or(NonZeroUsize::MIN),
            batch_max_articles: NonZeroUsize::new(DEFAULT_BATCH_MAX_ARTICLES)
                .unwrap_or(NonZeroUsize::MIN),
            max_body_bytes: NonZeroUsize::new(DEFAULT_MAX_BODY_BYTES).unwrap_or(NonZeroUsize::MIN),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            worker_threads: default_worker_threads(),
            clean_batch_text: true,
            otel_exporter_endpoint: None,
            otel_sampling_ratio: 1.0,
        }
    }
}

impl Config {
    /// 環境変数から設定値を読み込み、検証する。すべての値に既定値がある。
    ///
    /// # Errors
    /// 数値／アドレス／真偽値のパースに失敗した場合は [`ConfigError`] を返す。
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_bind = parse_socket_addr("POPULARITY_HTTP_BIND", DEFAULT_HTTP_BIND)?;
        let score_column = env::var("POPULARITY_SCORE_COLUMN")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_SCORE_COLUMN.to_string());
        let top_reasons = parse_non_zero_usize("POPULARITY_TOP_REASONS", DEFAULT_TOP_K)?;
        let batch_max_articles =
            parse_non_zero_usize("POPULARITY_BATCH_MAX_ARTICLES", DEFAULT_BATCH_MAX_ARTICLES)?;
        let max_body_bytes =
            parse_non_zero_usize("POPULARITY_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?;
        let parallel_threshold =
            parse_usize("POPULARITY_PARALLEL_THRESHOLD", DEFAULT_PARALLEL_THRESHOLD)?;
        let worker_threads =
            parse_non_zero_usize("POPULARITY_WORKER_THREADS", default_worker_threads().get())?;
        let clean_batch_text = parse_bool("POPULARITY_CLEAN_BATCH_TEXT", true)?;

        // OpenTelemetry settings
        let otel_exporter_endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let otel_sampling_ratio = parse_ratio("OTEL_SAMPLING_RATIO", 1.0)?;

        Ok(Self {
            http_bind,
            score_column,
            top_reasons,
            batch_max_articles,
            max_body_bytes,
            parallel_threshold,
            worker_threads,
            clean_batch_text,
            otel_exporter_endpoint,
            otel_sampling_ratio,
        })
    }

    #[must_use]
    pub fn http_bind(&self) -> SocketAddr {
        self.http_bind
    }

    #[must_use]
    pub fn score_column(&self) -> &str {
        &self.score_column
    }

    #[must_use]
    pub fn top_reasons(&self) -> usize {
        self.top_reasons.get()
    }

    #[must_use]
    pub fn batch_max_articles(&self) -> usize {
        self.batch_max_articles.get()
    }

    /// HTTP リクエストボディの最大バイト数。
    #[must_use]
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes.get()
    }

    #[must_use]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    #[must_use]
    pub fn worker_threads(&self) -> NonZeroUsize {
        self.worker_threads
    }

    #[must_use]
    pub fn clean_batch_text(&self) -> bool {
        self.clean_batch_text
    }

    #[must_use]
    pub fn otel_exporter_endpoint(&self) -> Option<&str> {
        self.otel_exporter_endpoint.as_deref()
    }

    #[must_use]
    pub fn otel_sampling_ratio(&self) -> f64 {
        self.otel_sampling_ratio
    }
}

fn default_worker_threads() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn parse_socket_addr(name: &'static str, default: &str) -> Result<SocketAddr, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());

    raw.parse().map_err(|error| ConfigError::Invalid {
        name,
        source: anyhow::Error::new(error),
    })
}

fn parse_non_zero_usize(name: &'static str, default: usize) -> Result<NonZeroUsize, ConfigError> {
    let parsed = parse_usize(name, default)?;
    NonZeroUsize::new(parsed).ok_or_else(|| ConfigError::Invalid {
        name,
        source: anyhow::anyhow!("must be greater than zero"),
    })
}

fn parse_usize(name: &'static str, default: usize) -> Result<usize, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.trim().parse::<usize>().map_err(|error| ConfigError::Invalid {
        name,
        source: anyhow::Error::new(error),
    })
}

fn parse_ratio(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    let parsed = raw.trim().parse::<f64>().map_err(|error| ConfigError::Invalid {
        name,
        source: anyhow::Error::new(error),
    })?;
    if !(0.0..=1.0).contains(&parsed) {
        return Err(ConfigError::Invalid {
            name,
            source: anyhow::anyhow!("value must be between 0.0 and 1.0"),
        });
    }
    Ok(parsed)
}

fn parse_bool(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            source: anyhow::anyhow!("invalid boolean value: {raw}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 10] = [
        "POPULARITY_HTTP_BIND",
        "POPULARITY_SCORE_COLUMN",
        "POPULARITY_TOP_REASONS",
        "POPULARITY_BATCH_MAX_ARTICLES",
        "POPULARITY_MAX_BODY_BYTES",
        "POPULARITY_PARALLEL_THRESHOLD",
        "POPULARITY_WORKER_THREADS",
        "POPULARITY_CLEAN_BATCH_TEXT",
        "OTEL_EXPORTER_OTLP_ENDPOINT",
        "OTEL_SAMPLING_RATIO",
    ];

    fn set_env(name: &str, value: &str) {
        // SAFETY: tests run sequentially under ENV_MUTEX and assign valid UTF-8 values.
        unsafe {
            env::set_var(name, value);
        }
    }

    fn reset_env() {
        for key in KEYS {
            // SAFETY: tests run sequentially under ENV_MUTEX and clean up deterministic keys.
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn from_env_uses_defaults_when_unset() {
        let _lock = ENV_MUTEX.lock().expect("env mutex");
        reset_env();

        let config = Config::from_env().expect("config should load");

        assert_eq!(config.http_bind(), "0.0.0.0:9010".parse().unwrap());
        assert_eq!(config.score_column(), "popularity_percentage");
        assert_eq!(config.top_reasons(), 3);
        assert_eq!(config.batch_max_articles(), 5000);
        assert_eq!(config.max_body_bytes(), 32 * 1024 * 1024);
        assert_eq!(config.parallel_threshold(), 64);
        assert!(config.worker_threads().get() >= 1);
        assert!(config.clean_batch_text());
        assert!(config.otel_exporter_endpoint().is_none());
        assert!((config.otel_sampling_ratio() - 1.0).abs() < f64::EPSILON);

        let defaults = Config::default();
        assert_eq!(defaults.http_bind(), config.http_bind());
        assert_eq!(defaults.batch_max_articles(), config.batch_max_articles());
    }

    #[test]
    fn from_env_reads_overrides() {
        let _lock = ENV_MUTEX.lock().expect("env mutex");
        reset_env();
        set_env("POPULARITY_HTTP_BIND", "127.0.0.1:8080");
        set_env("POPULARITY_SCORE_COLUMN", "score");
        set_env("POPULARITY_TOP_REASONS", "5");
        set_env("POPULARITY_BATCH_MAX_ARTICLES", "10");
        set_env("POPULARITY_MAX_BODY_BYTES", "4096");
        set_env("POPULARITY_CLEAN_BATCH_TEXT", "off");
        set_env("OTEL_EXPORTER_OTLP_ENDPOINT", "http://collector:4317");
        set_env("OTEL_SAMPLING_RATIO", "0.25");

        let config = Config::from_env().expect("config should load");
        reset_env();

        assert_eq!(config.http_bind(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.score_column(), "score");
        assert_eq!(config.top_reasons(), 5);
        assert_eq!(config.batch_max_articles(), 10);
        assert_eq!(config.max_body_bytes(), 4096);
        assert!(!config.clean_batch_text());
        assert_eq!(config.otel_exporter_endpoint(), Some("http://collector:4317"));
        assert!((config.otel_sampling_ratio() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn from_env_rejects_zero_top_reasons() {
        let _lock = ENV_MUTEX.lock().expect("env mutex");
        reset_env();
        set_env("POPULARITY_TOP_REASONS", "0");

        let error = Config::from_env().expect_err("zero must fail");
        reset_env();

        assert!(matches!(
            error,
            ConfigError::Invalid {
                name: "POPULARITY_TOP_REASONS",
                ..
            }
        ));
    }

    #[test]
    fn from_env_rejects_bad_values() {
        let _lock = ENV_MUTEX.lock().expect("env mutex");
        reset_env();
        set_env("POPULARITY_CLEAN_BATCH_TEXT", "maybe");
        assert!(Config::from_env().is_err());

        reset_env();
        set_env("OTEL_SAMPLING_RATIO", "1.5");
        assert!(Config::from_env().is_err());

        reset_env();
        set_env("POPULARITY_HTTP_BIND", "not-an-addr");
        assert!(Config::from_env().is_err());
        reset_env();
    }
}
