use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus metrics for the dispatch boundary
// ============================================================================
//
// Counts what leaves the domain layer:
// - domain events handed to a dispatcher, by event type
// - rejected dispatch batches, by reason
// - envelopes currently held across every outbox sharing this instance
//
// There is no HTTP exporter; render() produces the text exposition format
// for whoever embeds the crate.
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub events_dispatched: IntCounterVec,
    pub dispatch_failures: IntCounterVec,
    pub outbox_pending: IntGauge,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let events_dispatched = IntCounterVec::new(
            Opts::new("domain_events_dispatched_total", "Domain events handed to a dispatcher"),
            &["event_type"],
        )?;
        registry.register(Box::new(events_dispatched.clone()))?;

        let dispatch_failures = IntCounterVec::new(
            Opts::new("dispatch_failures_total", "Event batches a dispatcher rejected"),
            &["reason"],
        )?;
        registry.register(Box::new(dispatch_failures.clone()))?;

        let outbox_pending = IntGauge::new(
            "outbox_pending_envelopes",
            "Envelopes held by in-memory outboxes",
        )?;
        registry.register(Box::new(outbox_pending.clone()))?;

        Ok(Self {
            registry,
            events_dispatched,
            dispatch_failures,
            outbox_pending,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_dispatched(&self, event_type: &str) {
        self.events_dispatched.with_label_values(&[event_type]).inc();
    }

    pub fn record_dispatch_failure(&self, reason: &str) {
        self.dispatch_failures.with_label_values(&[reason]).inc();
    }

    /// Outboxes share the gauge, so each reports deltas, never its own length.
    pub fn add_outbox_pending(&self, appended: usize) {
        self.outbox_pending.add(appended as i64);
    }

    pub fn remove_outbox_pending(&self, drained: usize) {
        self.outbox_pending.sub(drained as i64);
    }

    /// Encode every registered metric in the Prometheus text format.
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
