//! Prometheus metrics for the judge API.

use std::time::Duration;

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};
use proctor_common::types::{Language, Verdict};

lazy_static! {
    static ref EXECUTIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "proctor_executions_total",
        "Executions judged, by language and verdict",
        &["language", "verdict"]
    )
    .expect("metric registration");
    static ref EXECUTION_SECONDS: HistogramVec = register_histogram_vec!(
        "proctor_execution_seconds",
        "End-to-end judging latency, by language",
        &["language"]
    )
    .expect("metric registration");
}

pub fn observe(language: Language, verdict: Verdict, elapsed: Duration) {
    EXECUTIONS_TOTAL
        .with_label_values(&[language.as_str(), verdict.as_str()])
        .inc();
    EXECUTION_SECONDS
        .with_label_values(&[language.as_str()])
        .observe(elapsed.as_secs_f64());
}

pub fn render() -> prometheus::Result<String> {
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
