use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{error_response, rejection_response};
use crate::app::AppState;
use crate::article::ArticleInput;
use crate::pipeline::prepare_batch;
use crate::ranking::{ArticleRecord, RankingMode};

#[derive(Debug, Deserialize)]
pub(crate) struct RankRequest {
    records: Vec<ArticleRecord>,
    #[serde(default)]
    mode: RankingMode,
}

#[derive(Debug, Serialize)]
struct RankResponse {
    mode: RankingMode,
    count: usize,
    records: Vec<ArticleRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchRequest {
    articles: Vec<ArticleInput>,
    #[serde(default)]
    mode: RankingMode,
    #[serde(default)]
    clean: Option<bool>,
}

#[derive(Debug, Serialize)]
struct BatchResponse {
    batch_id: Uuid,
    mode: RankingMode,
    received: usize,
    dropped: usize,
    count: usize,
    records: Vec<ArticleRecord>,
}

pub(crate) async fn rank_records(
    State(state): State<AppState>,
    payload: Result<Json<RankRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(&state, &rejection),
    };
    let metrics = state.telemetry().metrics();
    metrics.ranking_requests.inc();

    match state.pipeline().ranking().rank(payload.records, payload.mode) {
        Ok(records) => {
            let body = Json(RankResponse {
                mode: payload.mode,
                count: records.len(),
                records,
            });
            (StatusCode::OK, body).into_response()
        }
        Err(err) => {
            metrics.ranking_failures.inc();
            warn!(error = %err, mode = payload.mode.as_str(), "ranking rejected");
            error_response(StatusCode::BAD_REQUEST, err.to_string())
        }
    }
}

/// 記事バッチを整形・採点・順位付けする。CPU負荷の高い処理はブロッキングプールで実行する。
#[allow(clippy::cast_precision_loss)]
pub(crate) async fn score_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(&state, &rejection),
    };
    let received = payload.articles.len();
    let max = state.config().batch_max_articles();
    if received > max {
        state.telemetry().record_validation_rejection("batch too large");
        return error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("batch of {received} articles exceeds the limit of {max}"),
        );
    }

    let batch_id = Uuid::new_v4();
    let mode = payload.mode;
    let clean = payload
        .clean
        .unwrap_or_else(|| state.config().clean_batch_text());
    let pipeline = state.pipeline();
    let metrics = state.telemetry().metrics().clone();
    metrics.ranking_requests.inc();

    let timer = metrics.batch_duration.start_timer();
    let outcome = tokio::task::spawn_blocking(move || {
        let prepared = prepare_batch(payload.articles, clean);
        let analyses = pipeline.analyze_batch(prepared.articles);
        let ranked = pipeline.rank(&analyses, mode);
        (prepared.dropped, analyses, ranked)
    })
    .await;
    timer.observe_duration();

    let (dropped, analyses, ranked) = match outcome {
        Ok(result) => result,
        Err(join_error) => {
            error!(%batch_id, error = %join_error, "batch scoring task failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "batch scoring failed");
        }
    };

    metrics.articles_dropped.inc_by(dropped as f64);
    metrics.articles_scored.inc_by(analyses.len() as f64);
    for analysis in &analyses {
        metrics.observe_priority(analysis.priority_label);
    }

    match ranked {
        Ok(records) => {
            info!(
                %batch_id,
                received,
                dropped,
                scored = records.len(),
                mode = mode.as_str(),
                "batch scored"
            );
            let body = Json(BatchResponse {
                batch_id,
                mode,
                received,
                dropped,
                count: records.len(),
                records,
            });
            (StatusCode::OK, body).into_response()
        }
        Err(err) => {
            metrics.ranking_failures.inc();
            warn!(%batch_id, error = %err, "batch ranking rejected");
            error_response(StatusCode::BAD_REQUEST, err.to_string())
        }
    }
}
