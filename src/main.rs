use std::sync::Arc;
use chrono::Utc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use content_tracker::domain::actor::ActorStats;
use content_tracker::domain::media::{
    PlaylistSynced, VideoDownloadCompleted, VideoDownloadRequested, VideoMetadata, VideoQuality,
};
use content_tracker::event_sourcing::serialize_event;
use content_tracker::{
    publish_uncommitted, Actor, ActorEvent, ActorId, ContentEvent, ContentId, ContentItem,
    ContentProps, EngagementEvent, EngagementMetrics, EngagementPeriod, EngagementProps,
    EngagementSnapshot, EventDispatcher, InMemoryOutbox, MediaEvent, Metrics, MetricsPatch,
    PlaylistId, UserProfile, VideoId,
};

// One analysis session as a content script would drive it: observe, mutate,
// drain, hand off.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO, override with RUST_LOG
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,content_tracker=debug")),
        )
        .init();

    tracing::info!("Starting content tracking session");

    let metrics = Arc::new(Metrics::new()?);
    let actor_outbox = InMemoryOutbox::<ActorEvent>::new().with_metrics(metrics.clone());
    let content_outbox = InMemoryOutbox::<ContentEvent>::new().with_metrics(metrics.clone());
    let engagement_outbox = InMemoryOutbox::<EngagementEvent>::new().with_metrics(metrics.clone());
    let media_outbox = InMemoryOutbox::<MediaEvent>::new().with_metrics(metrics.clone());

    let correlation_id = Uuid::new_v4();

    // === 1. Observe the author ===
    let author_id = ActorId::new("1001");
    let joined = Utc::now() - chrono::Duration::days(900);
    let mut author = Actor::create(
        author_id.clone(),
        UserProfile {
            username: "ferris".to_string(),
            display_name: "Ferris the Crab".to_string(),
            bio: Some("Systems programming, but friendly".to_string()),
            location: None,
            website: None,
            profile_image_url: None,
            banner_image_url: None,
            is_verified: false,
            is_protected: false,
            followers_count: 1200,
            following_count: 300,
            tweets_count: 4000,
            listed_count: 12,
            created_at: joined,
            joined_at: joined,
        },
    );
    author.follow()?;
    author.update_stats(ActorStats {
        followers_count: Some(1201),
        ..Default::default()
    });

    // === 2. Save and interact with a tweet ===
    let content_id = ContentId::new("1790000000000000001");
    let mut props = ContentProps::text("Shipping a new release today #rustlang");
    props.like_count = 100;
    props.retweet_count = 50;
    props.reply_count = 30;
    props.view_count = 400;
    let mut tweet = ContentItem::create(content_id.clone(), author_id.clone(), props, None);
    tweet.add_hashtag("rustlang");
    tweet.like()?;
    if let Err(e) = tweet.like() {
        tracing::info!(error = %e, "Duplicate like ignored");
    }

    // === 3. Track and analyze engagement ===
    let mut snapshot = EngagementSnapshot::create(
        content_id.clone(),
        author_id.clone(),
        EngagementProps::ending_at(
            EngagementMetrics {
                impressions: 400,
                engagements: 32,
                engagement_rate: 0.08,
                likes: 100,
                retweets: 50,
                replies: 30,
                url_clicks: 10,
                profile_clicks: 2,
                ..Default::default()
            },
            EngagementPeriod::Day,
            Utc::now(),
        ),
    );
    snapshot.update_metrics(MetricsPatch {
        engagements: Some(36),
        ..Default::default()
    });
    snapshot.analyze();
    for insight in snapshot.insights() {
        tracing::info!(insight = %insight, "Insight");
    }

    // === 4. Media download workflow events ===
    let video_id = VideoId::new("vid-1");
    let media_events: Vec<MediaEvent> = vec![
        VideoDownloadRequested::new(
            video_id.clone(),
            VideoMetadata::new("Release walkthrough", "https://video.example/v/vid-1"),
            VideoQuality::High,
        )
        .into(),
        VideoDownloadCompleted::new(video_id.clone(), "https://cdn.example/vid-1.mp4").into(),
        PlaylistSynced::new(PlaylistId::new("releases"), vec![video_id]).into(),
    ];

    // === 5. Drain everything to the dispatchers ===
    publish_uncommitted(&mut author, &actor_outbox, correlation_id).await?;
    publish_uncommitted(&mut tweet, &content_outbox, correlation_id).await?;
    publish_uncommitted(&mut snapshot, &engagement_outbox, correlation_id).await?;
    media_outbox.dispatch(media_events, correlation_id).await?;

    for envelope in actor_outbox.drain().await {
        tracing::info!(payload = %serialize_event(&envelope)?, "Actor event");
    }
    for envelope in content_outbox.drain().await {
        tracing::info!(payload = %serialize_event(&envelope)?, "Content event");
    }
    for envelope in engagement_outbox.drain().await {
        tracing::info!(payload = %serialize_event(&envelope)?, "Engagement event");
    }
    for envelope in media_outbox.drain().await {
        tracing::info!(payload = %serialize_event(&envelope)?, "Media event");
    }

    tracing::info!("Session metrics:\n{}", metrics.render()?);
    tracing::info!("Session complete");

    Ok(())
}
