/// 警告・エラーの構造化JSONログ。
use serde_json::json;
use tracing::{Event, Level, Subscriber, field::Visit};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// WARN 以上のイベントを1行のJSONとして標準エラーに書き出すレイヤー。
pub(crate) struct StructuredLogLayer;

#[derive(Default)]
struct JsonVisitor {
    message: Option<String>,
    values: serde_json::Map<String, serde_json::Value>,
}

impl Visit for JsonVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.values.insert(field.name().to_string(), json!(rendered));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.values.insert(field.name().to_string(), json!(value));
        }
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.values.insert(field.name().to_string(), json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.values.insert(field.name().to_string(), json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.values.insert(field.name().to_string(), json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.values.insert(field.name().to_string(), json!(value));
    }
}

pub(crate) fn is_structured(level: &Level) -> bool {
    matches!(*level, Level::ERROR | Level::WARN)
}

fn render(event: &Event<'_>) -> serde_json::Value {
    let mut visitor = JsonVisitor::default();
    event.record(&mut visitor);

    json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "level": event.metadata().level().as_str(),
        "target": event.metadata().target(),
        "message": visitor.message.unwrap_or_else(|| event.metadata().name().to_string()),
        "fields": visitor.values,
    })
}

impl<S: Subscriber> Layer<S> for StructuredLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if is_structured(event.metadata().level()) {
            eprintln!("{}", serde_json::to_string(&render(event)).unwrap_or_default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_warnings_and_errors_are_structured() {
        assert!(is_structured(&Level::ERROR));
        assert!(is_structured(&Level::WARN));
        assert!(!is_structured(&Level::INFO));
        assert!(!is_structured(&Level::DEBUG));
    }

}
