use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rp_core::{CoreError, PredictorKind};
use serde::Serialize;

#[derive(Clone, Default)]
pub struct MetricsRegistry {
    inner: Arc<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    footfall_predictions: AtomicU64,
    delivery_predictions: AtomicU64,
    clv_predictions: AtomicU64,
    rejected_inputs: AtomicU64,
    model_failures: AtomicU64,
}

impl MetricsRegistry {
    pub fn inc_predictions(&self, kind: PredictorKind) {
        let counter = match kind {
            PredictorKind::Footfall => &self.inner.footfall_predictions,
            PredictorKind::Delivery => &self.inner.delivery_predictions,
            PredictorKind::Clv => &self.inner.clv_predictions,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejected_inputs(&self) {
        self.inner.rejected_inputs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_model_failures(&self) {
        self.inner.model_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one engine call by its outcome.
    pub fn record<T>(&self, kind: PredictorKind, outcome: &Result<T, CoreError>) {
        match outcome {
            Ok(_) => self.inc_predictions(kind),
            Err(CoreError::InvalidInput { .. }) => self.inc_rejected_inputs(),
            Err(_) => self.inc_model_failures(),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            footfall_predictions: self.inner.footfall_predictions.load(Ordering::Relaxed),
            delivery_predictions: self.inner.delivery_predictions.load(Ordering::Relaxed),
            clv_predictions: self.inner.clv_predictions.load(Ordering::Relaxed),
            rejected_inputs: self.inner.rejected_inputs.load(Ordering::Relaxed),
            model_failures: self.inner.model_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub footfall_predictions: u64,
    pub delivery_predictions: u64,
    pub clv_predictions: u64,
    pub rejected_inputs: u64,
    pub model_failures: u64,
}

impl MetricsSnapshot {
    pub fn predictions(&self) -> u64 {
        self.footfall_predictions + self.delivery_predictions + self.clv_predictions
    }

    pub fn to_json_line(&self, label: &str, elapsed: Option<Duration>) -> String {
        #[derive(Serialize)]
        struct Line<'a> {
            label: &'a str,
            #[serde(flatten)]
            counters: &'a MetricsSnapshot,
            elapsed_ms: Option<u128>,
        }

        let payload = Line { label, counters: self, elapsed_ms: elapsed.map(|d| d.as_millis()) };
        serde_json::to_string(&payload).unwrap_or_else(|_| String::from("{}"))
    }
}

pub struct Uptime {
    start: Instant,
}

impl Uptime {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_outcome() {
        let metrics = MetricsRegistry::default();
        let shared = metrics.clone();
        shared.record(PredictorKind::Clv, &Ok::<_, CoreError>(()));
        shared.record(PredictorKind::Footfall, &Ok::<_, CoreError>(()));
        shared.record::<()>(PredictorKind::Footfall, &Err(CoreError::invalid("month", "bad")));
        let failure = CoreError::ModelInvocation("boom".into());
        shared.record::<()>(PredictorKind::Delivery, &Err(failure));

        let snap = metrics.snapshot();
        assert_eq!(snap.clv_predictions, 1);
        assert_eq!(snap.footfall_predictions, 1);
        assert_eq!(snap.predictions(), 2);
        assert_eq!(snap.rejected_inputs, 1);
        assert_eq!(snap.model_failures, 1);
    }

    #[test]
    fn json_line_is_flat() {
        let snap = MetricsRegistry::default().snapshot();
        let line = snap.to_json_line("console", Some(Duration::from_millis(1500)));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["label"], "console");
        assert_eq!(value["rejected_inputs"], 0);
        assert_eq!(value["elapsed_ms"], 1500);
    }
}
