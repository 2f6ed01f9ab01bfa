use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::{error_response, rejection_response};
use crate::app::AppState;
use crate::article::ArticleText;
use crate::explain::{Contribution, Reason};

pub(crate) const EMPTY_ARTICLE_MESSAGE: &str = "Please enter at least a title or description.";

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExplainRequest {
    signals: Map<String, Value>,
    #[serde(default)]
    top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ExplainResponse {
    contributions: Contribution,
    top_reasons: Vec<Reason>,
    /// `"Emotion → 12.5% contribution"` 形式の表示用文字列。
    reasons: Vec<String>,
}

pub(crate) async fn score_article(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(&state, &rejection),
    };
    if ArticleText::new(&payload.title, &payload.description).is_blank() {
        state.telemetry().record_validation_rejection("empty article");
        return error_response(StatusCode::UNPROCESSABLE_ENTITY, EMPTY_ARTICLE_MESSAGE);
    }

    let metrics = state.telemetry().metrics();
    let timer = metrics.scoring_duration.start_timer();
    let analysis = state
        .pipeline()
        .analyze(&payload.title, &payload.description);
    timer.observe_duration();

    metrics.articles_scored.inc();
    metrics.observe_priority(analysis.priority_label);
    debug!(
        score = analysis.popularity_percentage,
        priority = analysis.priority_label.as_str(),
        "article scored"
    );

    (StatusCode::OK, Json(analysis)).into_response()
}

pub(crate) async fn explain_signals(
    State(state): State<AppState>,
    payload: Result<Json<ExplainRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(&state, &rejection),
    };
    let mut signals = Vec::with_capacity(payload.signals.len());
    for (name, value) in payload.signals {
        let Some(value) = value.as_f64() else {
            state.telemetry().record_validation_rejection("non-numeric signal");
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("signal `{name}` must be a number"),
            );
        };
        signals.push((name, value));
    }

    let pipeline = state.pipeline();
    let explainer = pipeline.explainer();
    let contributions = explainer.explain_pairs(signals);
    let top_reasons =
        explainer.top_reasons(&contributions, payload.top_k.unwrap_or(pipeline.top_k()));
    let reasons = top_reasons.iter().map(ToString::to_string).collect();

    let body = Json(ExplainResponse {
        contributions,
        top_reasons,
        reasons,
    });
    (StatusCode::OK, body).into_response()
}
