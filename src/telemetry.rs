use prometheus::{register_counter, register_counter_vec};
use prometheus::{Counter, CounterVec};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUIZ_QUESTIONS_CNTR: CounterVec = register_counter_vec!(
        "quiz_questions_served_total",
        "Number of questions served to quiz players",
        &["category"]
    )
    .unwrap();
    pub static ref QUESTIONS_CREATED_CNTR: Counter = register_counter!(
        "questions_created_total",
        "Number of questions created through the API"
    )
    .unwrap();
    pub static ref API_ERRORS_CNTR: CounterVec = register_counter_vec!(
        "api_errors_total",
        "Number of error responses by status code",
        &["code"]
    )
    .unwrap();
}

/// Used when `LOG_LEVEL` is unset or unparsable. sqlx logs every statement
/// at info, which drowns out request traces.
const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn,tower_http=debug";

fn log_filter(var: Option<&str>) -> EnvFilter {
    var.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Logs go to stderr so the CLI can keep stdout for its reports.
pub fn init_tracing() {
    let span_events = match std::env::var("INCLUDE_SPAN_EVENTS") {
        Ok(value) if value.eq_ignore_ascii_case("true") => FmtSpan::NEW | FmtSpan::CLOSE,
        _ => FmtSpan::NONE,
    };
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(span_events);
    let level = std::env::var("LOG_LEVEL").ok();

    tracing_subscriber::registry()
        .with(log_filter(level.as_deref()))
        .with(fmt_layer)
        .init();
}
