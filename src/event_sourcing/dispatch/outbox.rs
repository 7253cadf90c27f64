use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use anyhow::{Result, bail};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::event_sourcing::core::{AggregateRoot, DomainEvent, EventEnvelope};
use crate::metrics::Metrics;

// ============================================================================
// Event Dispatcher - Outbound boundary of the domain layer
// ============================================================================
//
// Aggregates never talk to a dispatcher themselves. The observer drains them
// and hands the batch over; persistence, analytics pipelines or cross-tab
// messaging live behind this trait.
//
// ============================================================================

#[async_trait]
pub trait EventDispatcher<E>: Send + Sync
where
    E: DomainEvent + Send + Sync + 'static,
{
    /// Accept a batch of events in creation order. Returns how many were taken.
    async fn dispatch(&self, events: Vec<E>, correlation_id: Uuid) -> Result<usize>;

    /// Like `dispatch`, for a batch drained from one aggregate whose stream
    /// already held `stream_version` events before it. Dispatchers that number
    /// events continue the stream from there.
    async fn dispatch_stream(
        &self,
        events: Vec<E>,
        stream_version: u64,
        correlation_id: Uuid,
    ) -> Result<usize> {
        let _ = stream_version;
        self.dispatch(events, correlation_id).await
    }
}

/// Hand every pending event of `aggregate` to `dispatcher`. The aggregate's
/// buffer is only cleared once the dispatcher accepted the batch, so a failed
/// dispatch can be retried without losing facts. Events already applied before
/// the pending ones (replayed history) are passed on as the stream version.
pub async fn publish_uncommitted<A, D>(
    aggregate: &mut A,
    dispatcher: &D,
    correlation_id: Uuid,
) -> Result<usize>
where
    A: AggregateRoot,
    A::Event: Send + Sync + 'static,
    D: EventDispatcher<A::Event> + ?Sized,
{
    if !aggregate.has_uncommitted_events() {
        return Ok(0);
    }

    let pending = aggregate.uncommitted_events();
    let stream_version = aggregate.version().saturating_sub(pending.len() as u64);
    let accepted = dispatcher
        .dispatch_stream(pending, stream_version, correlation_id)
        .await?;
    let committed = aggregate.commit();

    tracing::debug!(
        aggregate_id = %aggregate.aggregate_id(),
        committed = committed.len(),
        "Committed aggregate events"
    );

    Ok(accepted)
}

// ============================================================================
// In-Memory Outbox
// ============================================================================
//
// Reference dispatcher: assigns per-stream sequence numbers, wraps events in
// envelopes and keeps them until someone drains the outbox. Not a store;
// nothing survives the process.
//
// Sequences count from the last number this outbox handed out for the stream,
// or from the aggregate's stream version when published through
// publish_uncommitted, whichever is higher.
//
// ============================================================================

struct OutboxState<E> {
    envelopes: Vec<EventEnvelope<E>>,
    sequences: HashMap<String, i64>,
}

pub struct InMemoryOutbox<E> {
    state: Mutex<OutboxState<E>>,
    capacity: Option<usize>,
    metrics: Option<Arc<Metrics>>,
}

impl<E> Default for InMemoryOutbox<E> {
    fn default() -> Self {
        Self {
            state: Mutex::new(OutboxState {
                envelopes: Vec::new(),
                sequences: HashMap::new(),
            }),
            capacity: None,
            metrics: None,
        }
    }
}

impl<E: DomainEvent> InMemoryOutbox<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject batches that would push the outbox past `capacity` envelopes.
    pub fn with_capacity_limit(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.envelopes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Copy of everything held, in dispatch order.
    pub async fn envelopes(&self) -> Vec<EventEnvelope<E>> {
        self.state.lock().await.envelopes.clone()
    }

    /// Envelopes of one stream (content id, actor id, snapshot key, video id...)
    pub async fn stream(&self, aggregate_key: &str) -> Vec<EventEnvelope<E>> {
        self.state
            .lock()
            .await
            .envelopes
            .iter()
            .filter(|envelope| envelope.aggregate_id == aggregate_key)
            .cloned()
            .collect()
    }

    /// Last sequence number handed out for a stream, 0 if none.
    pub async fn current_sequence(&self, aggregate_key: &str) -> i64 {
        self.state
            .lock()
            .await
            .sequences
            .get(aggregate_key)
            .copied()
            .unwrap_or(0)
    }

    /// Take every held envelope. Sequence counters are kept so later batches
    /// continue each stream.
    pub async fn drain(&self) -> Vec<EventEnvelope<E>> {
        let drained = std::mem::take(&mut self.state.lock().await.envelopes);
        if let Some(metrics) = &self.metrics {
            metrics.remove_outbox_pending(drained.len());
        }
        drained
    }

    fn record_failure(&self, reason: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_dispatch_failure(reason);
        }
    }
}

impl<E: DomainEvent> InMemoryOutbox<E> {
    async fn append(
        &self,
        events: Vec<E>,
        stream_version: Option<u64>,
        correlation_id: Uuid,
    ) -> Result<usize> {
        if events.is_empty() {
            self.record_failure("empty_batch");
            bail!("Cannot dispatch empty event list");
        }

        let mut state = self.state.lock().await;

        if let Some(capacity) = self.capacity {
            if state.envelopes.len() + events.len() > capacity {
                self.record_failure("capacity");
                bail!(
                    "Outbox full: {} held, {} incoming, capacity {}",
                    state.envelopes.len(),
                    events.len(),
                    capacity
                );
            }
        }

        let count = events.len();
        for event in events {
            let key = event.aggregate_key();
            let sequence = state.sequences.entry(key).or_insert(0);
            if let Some(version) = stream_version {
                *sequence = (*sequence).max(version as i64);
            }
            *sequence += 1;
            let envelope = EventEnvelope::wrap(event, *sequence, correlation_id);

            if let Some(metrics) = &self.metrics {
                metrics.record_dispatched(&envelope.event_type);
            }
            state.envelopes.push(envelope);
        }

        if let Some(metrics) = &self.metrics {
            metrics.add_outbox_pending(count);
        }

        tracing::info!(
            correlation_id = %correlation_id,
            event_count = count,
            pending = state.envelopes.len(),
            "Appended events to outbox"
        );

        Ok(count)
    }
}

#[async_trait]
impl<E> EventDispatcher<E> for InMemoryOutbox<E>
where
    E: DomainEvent + Send + Sync + 'static,
{
    async fn dispatch(&self, events: Vec<E>, correlation_id: Uuid) -> Result<usize> {
        self.append(events, None, correlation_id).await
    }

    async fn dispatch_stream(
        &self,
        events: Vec<E>,
        stream_version: u64,
        correlation_id: Uuid,
    ) -> Result<usize> {
        self.append(events, Some(stream_version), correlation_id).await
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::actor::ActorId;
    use crate::domain::content::{ContentEvent, ContentId, ContentItem, ContentProps};
    use crate::domain::media::{MediaEvent, PlaylistId, PlaylistSynced, VideoDownloadCompleted, VideoId};

    fn create_item(id: &str) -> ContentItem {
        ContentItem::create(
            ContentId::new(id),
            ActorId::new("1001"),
            ContentProps::text("hello"),
            None,
        )
    }

    #[tokio::test]
    async fn test_publish_assigns_sequences_and_commits() {
        let outbox = InMemoryOutbox::<ContentEvent>::new();
        let mut item = create_item("1");
        item.like().unwrap();

        let accepted = publish_uncommitted(&mut item, &outbox, Uuid::new_v4()).await.unwrap();

        assert_eq!(accepted, 2);
        assert!(!item.has_uncommitted_events());

        let envelopes = outbox.envelopes().await;
        assert_eq!(envelopes.len(), 2);
        assert_eq!(envelopes[0].event_type, "tweet.saved");
        assert_eq!(envelopes[0].sequence_number, 1);
        assert_eq!(envelopes[1].event_type, "tweet.liked");
        assert_eq!(envelopes[1].sequence_number, 2);
    }

    #[tokio::test]
    async fn test_second_publish_does_not_redeliver() {
        let outbox = InMemoryOutbox::<ContentEvent>::new();
        let mut item = create_item("1");

        publish_uncommitted(&mut item, &outbox, Uuid::new_v4()).await.unwrap();
        let again = publish_uncommitted(&mut item, &outbox, Uuid::new_v4()).await.unwrap();

        assert_eq!(again, 0);
        assert_eq!(outbox.len().await, 1);
    }

    #[tokio::test]
    async fn test_sequences_are_per_stream() {
        let outbox = InMemoryOutbox::<ContentEvent>::new();
        let mut first = create_item("1");
        let mut second = create_item("2");
        let correlation_id = Uuid::new_v4();

        publish_uncommitted(&mut first, &outbox, correlation_id).await.unwrap();
        publish_uncommitted(&mut second, &outbox, correlation_id).await.unwrap();
        first.retweet().unwrap();
        publish_uncommitted(&mut first, &outbox, correlation_id).await.unwrap();

        assert_eq!(outbox.current_sequence("1").await, 2);
        assert_eq!(outbox.current_sequence("2").await, 1);
        assert_eq!(outbox.stream("1").await.len(), 2);
        assert!(outbox
            .envelopes()
            .await
            .iter()
            .all(|e| e.correlation_id == correlation_id));
    }

    #[tokio::test]
    async fn test_failed_dispatch_keeps_events_pending() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let outbox = InMemoryOutbox::<ContentEvent>::new()
            .with_capacity_limit(1)
            .with_metrics(metrics.clone());
        let mut item = create_item("1");
        item.like().unwrap();

        let result = publish_uncommitted(&mut item, &outbox, Uuid::new_v4()).await;

        assert!(result.is_err());
        assert_eq!(item.uncommitted_events().len(), 2);
        assert!(outbox.is_empty().await);
        assert_eq!(metrics.dispatch_failures.with_label_values(&["capacity"]).get(), 1);
    }

    #[tokio::test]
    async fn test_empty_batch_rejected() {
        let outbox = InMemoryOutbox::<ContentEvent>::new();
        assert!(outbox.dispatch(Vec::new(), Uuid::new_v4()).await.is_err());
    }

    #[tokio::test]
    async fn test_drain_keeps_sequence_counters() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let outbox = InMemoryOutbox::<ContentEvent>::new().with_metrics(metrics.clone());
        let mut item = create_item("1");
        publish_uncommitted(&mut item, &outbox, Uuid::new_v4()).await.unwrap();
        assert_eq!(metrics.outbox_pending.get(), 1);

        let drained = outbox.drain().await;
        assert_eq!(drained.len(), 1);
        assert!(outbox.is_empty().await);
        assert_eq!(metrics.outbox_pending.get(), 0);

        item.like().unwrap();
        publish_uncommitted(&mut item, &outbox, Uuid::new_v4()).await.unwrap();
        assert_eq!(outbox.envelopes().await[0].sequence_number, 2);
        assert_eq!(metrics.events_dispatched.with_label_values(&["tweet.liked"]).get(), 1);
    }

    #[tokio::test]
    async fn test_shared_metrics_gauge_sums_outboxes() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let first = InMemoryOutbox::<ContentEvent>::new().with_metrics(metrics.clone());
        let second = InMemoryOutbox::<ContentEvent>::new().with_metrics(metrics.clone());
        let correlation_id = Uuid::new_v4();

        let mut item = create_item("1");
        item.like().unwrap();
        item.retweet().unwrap();
        publish_uncommitted(&mut item, &first, correlation_id).await.unwrap();
        publish_uncommitted(&mut create_item("2"), &second, correlation_id).await.unwrap();

        assert_eq!(first.len().await, 3);
        assert_eq!(second.len().await, 1);
        assert_eq!(metrics.outbox_pending.get(), 4);

        second.drain().await;
        assert_eq!(metrics.outbox_pending.get(), first.len().await as i64);

        first.drain().await;
        assert_eq!(metrics.outbox_pending.get(), 0);
    }

    #[tokio::test]
    async fn test_rebuilt_aggregate_continues_stream_sequence() {
        let mut original = create_item("1");
        original.like().unwrap();
        let history = original.commit();

        let mut rebuilt = ContentItem::from_history(&history).unwrap();
        assert_eq!(rebuilt.version(), 2);
        rebuilt.retweet().unwrap();

        let fresh = InMemoryOutbox::<ContentEvent>::new();
        publish_uncommitted(&mut rebuilt, &fresh, Uuid::new_v4()).await.unwrap();

        let envelopes = fresh.envelopes().await;
        assert_eq!(envelopes.len(), 1);
        assert_eq!(envelopes[0].event_type, "tweet.retweeted");
        assert_eq!(envelopes[0].sequence_number, 3);
        assert_eq!(fresh.current_sequence("1").await, 3);
    }

    #[tokio::test]
    async fn test_plain_dispatch_numbers_from_outbox_state() {
        let outbox = InMemoryOutbox::<ContentEvent>::new();
        let item = create_item("1");

        outbox.dispatch(item.uncommitted_events(), Uuid::new_v4()).await.unwrap();

        assert_eq!(outbox.current_sequence("1").await, 1);
    }

    #[tokio::test]
    async fn test_media_events_dispatch_by_key() {
        let outbox = InMemoryOutbox::<MediaEvent>::new();
        let events: Vec<MediaEvent> = vec![
            VideoDownloadCompleted::new(VideoId::new("v1"), "https://cdn.example/v1.mp4").into(),
            PlaylistSynced::new(PlaylistId::new("pl"), vec![VideoId::new("v1")]).into(),
        ];

        outbox.dispatch(events, Uuid::new_v4()).await.unwrap();

        assert_eq!(outbox.stream("v1").await.len(), 1);
        assert_eq!(outbox.stream("pl").await[0].event_type, "playlist.synced");
    }
}
