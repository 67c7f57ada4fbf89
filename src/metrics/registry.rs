use crate::metrics::definitions::{
    HELP_GROUP_HEALTH, HELP_GROUP_LAG, HELP_LAST_POLL_TIMESTAMP, HELP_POLL_DURATION_SECONDS,
    HELP_TOTAL_LAG, HELP_UP, LABEL_GROUP, METRIC_GROUP_HEALTH, METRIC_GROUP_LAG,
    METRIC_LAST_POLL_TIMESTAMP, METRIC_POLL_DURATION_SECONDS, METRIC_TOTAL_LAG, METRIC_UP,
};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Shared gauge store for the poller and the HTTP server.
///
/// Each label's value is set atomically; there is no multi-label transaction.
/// Labels accumulate for the lifetime of the process: a group that disappears
/// from upstream keeps its last-seen values. No cardinality bound is enforced.
pub struct MetricsRegistry {
    lag: DashMap<String, f64>,
    health: DashMap<String, f64>,
    total_lag: RwLock<Option<f64>>,
    healthy: AtomicBool,
    last_poll_duration_ms: AtomicU64,
    last_poll_timestamp: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            lag: DashMap::new(),
            health: DashMap::new(),
            total_lag: RwLock::new(None),
            healthy: AtomicBool::new(true),
            last_poll_duration_ms: AtomicU64::new(0),
            last_poll_timestamp: AtomicU64::new(0),
        }
    }

    /// Set the lag gauge for a consumer group. Last write wins.
    pub fn set_lag(&self, group: &str, value: f64) {
        self.lag.insert(group.to_string(), value);
    }

    /// Set the health gauge for a consumer group. Last write wins.
    pub fn set_health(&self, group: &str, value: f64) {
        self.health.insert(group.to_string(), value);
    }

    /// Set the unlabeled aggregate lag gauge (flat upstream variant).
    pub fn set_total_lag(&self, value: f64) {
        *self.total_lag.write().expect("total_lag lock poisoned") = Some(value);
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }

    pub fn set_poll_duration_ms(&self, duration_ms: u64) {
        self.last_poll_duration_ms
            .store(duration_ms, Ordering::SeqCst);
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn poll_duration_seconds(&self) -> f64 {
        self.last_poll_duration_ms.load(Ordering::SeqCst) as f64 / 1000.0
    }

    /// Record the completion of a successful poll cycle.
    pub fn mark_polled(&self) {
        let unix_timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX epoch")
            .as_secs();
        self.last_poll_timestamp
            .store(unix_timestamp, Ordering::SeqCst);
    }

    pub fn has_polled(&self) -> bool {
        self.last_poll_timestamp.load(Ordering::SeqCst) > 0
    }

    pub fn group_count(&self) -> usize {
        self.lag.len()
    }

    /// Render all gauges in the Prometheus text exposition format.
    /// Output is deterministic: groups are sorted per metric.
    pub fn render_prometheus(&self) -> String {
        let mut output = String::new();

        render_labeled_gauge(&mut output, METRIC_GROUP_LAG, HELP_GROUP_LAG, &self.lag);
        render_labeled_gauge(
            &mut output,
            METRIC_GROUP_HEALTH,
            HELP_GROUP_HEALTH,
            &self.health,
        );

        if let Some(total_lag) = *self.total_lag.read().expect("total_lag lock poisoned") {
            output.push_str(format!("# HELP {METRIC_TOTAL_LAG} {HELP_TOTAL_LAG}\n").as_str());
            output.push_str(format!("# TYPE {METRIC_TOTAL_LAG} gauge\n").as_str());
            output.push_str(format!("{METRIC_TOTAL_LAG} {total_lag}\n").as_str());
        }

        output.push_str(format!("# HELP {METRIC_UP} {HELP_UP}\n").as_str());
        output.push_str(format!("# TYPE {METRIC_UP} gauge\n").as_str());
        output.push_str(format!("{} {}\n", METRIC_UP, i32::from(self.is_healthy())).as_str());

        output.push_str(
            format!("# HELP {METRIC_POLL_DURATION_SECONDS} {HELP_POLL_DURATION_SECONDS}\n")
                .as_str(),
        );
        output.push_str(format!("# TYPE {METRIC_POLL_DURATION_SECONDS} gauge\n").as_str());
        output.push_str(
            format!(
                "{METRIC_POLL_DURATION_SECONDS} {:.6}\n",
                self.poll_duration_seconds()
            )
            .as_str(),
        );

        let last_poll = self.last_poll_timestamp.load(Ordering::SeqCst);
        if last_poll > 0 {
            output.push_str(
                format!("# HELP {METRIC_LAST_POLL_TIMESTAMP} {HELP_LAST_POLL_TIMESTAMP}\n")
                    .as_str(),
            );
            output.push_str(format!("# TYPE {METRIC_LAST_POLL_TIMESTAMP} gauge\n").as_str());
            output.push_str(format!("{METRIC_LAST_POLL_TIMESTAMP} {last_poll}\n").as_str());
        }

        output
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn render_labeled_gauge(output: &mut String, name: &str, help: &str, gauge: &DashMap<String, f64>) {
    if gauge.is_empty() {
        return;
    }

    let mut samples: Vec<(String, f64)> = gauge
        .iter()
        .map(|entry| (entry.key().clone(), *entry.value()))
        .collect();
    samples.sort_by(|a, b| a.0.cmp(&b.0));

    output.push_str(format!("# HELP {name} {help}\n").as_str());
    output.push_str(format!("# TYPE {name} gauge\n").as_str());
    for (group, value) in samples {
        output.push_str(
            format!(
                "{name}{{{LABEL_GROUP}=\"{}\"}} {value}\n",
                escape_label_value(&group)
            )
            .as_str(),
        );
    }
}

fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
