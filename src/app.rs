use std::sync::Arc;

use anyhow::Result;
use axum::{Router, extract::DefaultBodyLimit};
use tower_http::trace::TraceLayer;

use crate::{api, config::Config, observability::Telemetry, pipeline::PopularityPipeline};

#[derive(Clone)]
pub(crate) struct AppState {
    registry: Arc<ComponentRegistry>,
}

#[derive(Debug)]
pub struct ComponentRegistry {
    config: Arc<Config>,
    telemetry: Telemetry,
    pipeline: Arc<PopularityPipeline>,
}

impl AppState {
    pub(crate) fn new(registry: ComponentRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub(crate) fn telemetry(&self) -> &Telemetry {
        &self.registry.telemetry
    }

    pub(crate) fn config(&self) -> &Config {
        &self.registry.config
    }

    pub(crate) fn pipeline(&self) -> Arc<PopularityPipeline> {
        Arc::clone(&self.registry.pipeline)
    }
}

impl ComponentRegistry {
    /// 構成情報からテレメトリとスコアリングパイプラインを初期化する。
    ///
    /// # Errors
    /// Telemetry の初期化に失敗した場合はエラーを返す。
    pub fn build(config: Config) -> Result<Self> {
        let telemetry = Telemetry::new(
            config.otel_exporter_endpoint(),
            config.otel_sampling_ratio(),
        )?;
        let pipeline = Arc::new(PopularityPipeline::from_config(&config));

        Ok(Self {
            config: Arc::new(config),
            telemetry,
            pipeline,
        })
    }
}

/// リクエストボディの上限は `max_body_bytes` で決まる。記事数の上限はハンドラ側で検証する。
pub fn build_router(registry: ComponentRegistry) -> Router {
    let body_limit = registry.config.max_body_bytes();
    let state = AppState::new(registry);
    api::router(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_registry_builds_from_defaults() {
        let registry = ComponentRegistry::build(Config::default()).expect("registry builds");
        let state = AppState::new(registry);

        assert_eq!(state.pipeline().top_k(), 3);
        assert_eq!(
            state.pipeline().ranking().score_column(),
            state.config().score_column()
        );
        assert_eq!(state.config().max_body_bytes(), 32 * 1024 * 1024);
        state.telemetry().record_ready_probe();
    }
}
