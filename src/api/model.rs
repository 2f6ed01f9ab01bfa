use axum::{Json, extract::State};
use serde::Serialize;

use crate::app::AppState;
use crate::scoring::{HIGH_PRIORITY_THRESHOLD, MEDIUM_PRIORITY_THRESHOLD, WeightVector};
use crate::signals::SignalName;

#[derive(Debug, Serialize)]
pub(crate) struct ModelDescription {
    weights: WeightVector,
    signals: Vec<SignalDescription>,
    thresholds: Thresholds,
    top_k: usize,
    score_column: String,
}

#[derive(Debug, Serialize)]
struct SignalDescription {
    name: SignalName,
    display_name: &'static str,
    weight: f64,
}

#[derive(Debug, Serialize)]
struct Thresholds {
    medium_priority: f64,
    high_priority: f64,
}

pub(crate) async fn describe(State(state): State<AppState>) -> Json<ModelDescription> {
    let pipeline = state.pipeline();
    let weights = **pipeline.weights();
    let signals = weights
        .iter()
        .map(|(name, weight)| SignalDescription {
            name,
            display_name: name.display_name(),
            weight,
        })
        .collect();

    Json(ModelDescription {
        weights,
        signals,
        thresholds: Thresholds {
            medium_priority: MEDIUM_PRIORITY_THRESHOLD,
            high_priority: HIGH_PRIORITY_THRESHOLD,
        },
        top_k: pipeline.top_k(),
        score_column: pipeline.ranking().score_column().to_string(),
    })
}
