use chrono::Utc;
use uuid::Uuid;

use content_tracker::domain::actor::ProfileChanges;
use content_tracker::{
    publish_uncommitted, Actor, ActorError, ActorEvent, ActorId, AggregateRoot, ContentError,
    ContentEvent, ContentId, ContentItem, ContentProps, DomainEvent, EngagementEvent,
    EngagementMetrics, EngagementPeriod, EngagementProps, EngagementSnapshot, InMemoryOutbox,
    InsightRule,
};

fn profile() -> content_tracker::UserProfile {
    let joined = Utc::now();
    content_tracker::UserProfile {
        username: "ferris".to_string(),
        display_name: "Ferris".to_string(),
        bio: None,
        location: None,
        website: None,
        profile_image_url: None,
        banner_image_url: None,
        is_verified: false,
        is_protected: false,
        followers_count: 10,
        following_count: 5,
        tweets_count: 3,
        listed_count: 0,
        created_at: joined,
        joined_at: joined,
    }
}

#[tokio::test]
async fn test_full_session_drains_events_in_creation_order() {
    let correlation_id = Uuid::new_v4();
    let author_id = ActorId::new("1001");
    let content_id = ContentId::new("2002");

    let actor_outbox = InMemoryOutbox::<ActorEvent>::new();
    let content_outbox = InMemoryOutbox::<ContentEvent>::new();
    let engagement_outbox = InMemoryOutbox::<EngagementEvent>::new();

    let mut author = Actor::create(author_id.clone(), profile());
    assert_eq!(author.uncommitted_events().len(), 0);
    author.follow().unwrap();
    assert!(matches!(author.follow(), Err(ActorError::AlreadyFollowed(_))));
    author.update_profile(ProfileChanges {
        display_name: Some("Ferris the Crab".to_string()),
        ..Default::default()
    });

    let mut tweet = ContentItem::create(
        content_id.clone(),
        author_id.clone(),
        ContentProps::text("Hello"),
        None,
    );
    tweet.like().unwrap();
    assert!(matches!(tweet.like(), Err(ContentError::AlreadyLiked(_))));
    tweet.retweet().unwrap();

    let mut snapshot = EngagementSnapshot::create(
        content_id.clone(),
        author_id.clone(),
        EngagementProps::ending_at(
            EngagementMetrics {
                engagement_rate: 0.08,
                retweets: 50,
                likes: 100,
                replies: 30,
                url_clicks: 10,
                impressions: 400,
                profile_clicks: 2,
                ..Default::default()
            },
            EngagementPeriod::Week,
            Utc::now(),
        ),
    );
    snapshot.analyze();

    assert_eq!(publish_uncommitted(&mut author, &actor_outbox, correlation_id).await.unwrap(), 2);
    assert_eq!(publish_uncommitted(&mut tweet, &content_outbox, correlation_id).await.unwrap(), 3);
    assert_eq!(publish_uncommitted(&mut snapshot, &engagement_outbox, correlation_id).await.unwrap(), 2);

    let actor_types: Vec<String> = actor_outbox.envelopes().await.into_iter().map(|e| e.event_type).collect();
    assert_eq!(actor_types, ["user.followed", "user.profile_updated"]);

    let content_types: Vec<String> = content_outbox.envelopes().await.into_iter().map(|e| e.event_type).collect();
    assert_eq!(content_types, ["tweet.saved", "tweet.liked", "tweet.retweeted"]);

    let analyzed = engagement_outbox.envelopes().await.pop().unwrap();
    assert_eq!(analyzed.event_type, "engagement.analyzed");
    assert_eq!(analyzed.aggregate_id, "2002:1001");
    match analyzed.event_data {
        EngagementEvent::Analyzed(e) => {
            let rules: Vec<_> = e
                .insights
                .iter()
                .filter_map(|i| InsightRule::from_message(i))
                .collect();
            assert_eq!(
                rules,
                vec![
                    InsightRule::HighEngagementRate,
                    InsightRule::HighRetweetRatio,
                    InsightRule::HighReplyRatio,
                    InsightRule::StrongClickThrough,
                ]
            );
        }
        other => panic!("unexpected event {:?}", other),
    }

    // Nothing left to deliver
    assert!(author.commit().is_empty());
    assert!(tweet.commit().is_empty());
    assert!(snapshot.commit().is_empty());
}

#[tokio::test]
async fn test_dispatched_stream_rebuilds_content_item() {
    let outbox = InMemoryOutbox::<ContentEvent>::new();
    let mut tweet = ContentItem::create(
        ContentId::new("3003"),
        ActorId::new("1001"),
        ContentProps::text("Thread start"),
        None,
    );
    tweet.like().unwrap();
    publish_uncommitted(&mut tweet, &outbox, Uuid::new_v4()).await.unwrap();

    let history: Vec<ContentEvent> = outbox
        .stream("3003")
        .await
        .into_iter()
        .map(|envelope| envelope.event_data)
        .collect();
    let rebuilt = ContentItem::from_history(&history).unwrap();

    assert!(rebuilt.is_liked());
    assert_eq!(rebuilt.like_count(), 1);
    assert_eq!(rebuilt.saved_at(), tweet.saved_at());
    assert_eq!(history[0].occurred_on(), tweet.saved_at());
}
