// Integration tests for the UniMatch core: full journeys across the
// directory, matching engine, conversation store and notification bridge.

use std::sync::Arc;

use unimatch::models::{
    Gender, InterestedIn, MessageKind, RegisterProfileRequest, UpdatePreferencesRequest,
    UpdateProfileRequest,
};
use unimatch::{
    ChannelBridge, ConversationStore, CoreError, MatchingEngine, Notification, UserDirectory,
};
use uuid::Uuid;

async fn seed_user(
    dir: &UserDirectory,
    email: &str,
    gender: Gender,
    interested_in: InterestedIn,
    age: u8,
) -> Uuid {
    let profile = dir
        .register(RegisterProfileRequest {
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            age,
            gender,
            interested_in,
            course: "CS".to_string(),
            year_of_study: 2,
        })
        .await
        .unwrap();

    dir.mark_verified(profile.id).await.unwrap();
    dir.update_profile(UpdateProfileRequest {
        user_id: profile.id,
        bio: Some("hello".to_string()),
        course: None,
        year_of_study: None,
    })
    .await
    .unwrap();
    dir.add_photo(profile.id, "main.jpg".to_string()).await.unwrap();

    profile.id
}

#[tokio::test]
async fn test_end_to_end_swipe_match_and_chat() {
    let dir = Arc::new(UserDirectory::new(vec![
        "uni-bonn.de".to_string(),
        "tu-berlin.de".to_string(),
    ]));
    let (bridge, mut events) = ChannelBridge::new();
    let bridge = Arc::new(bridge);
    let engine = MatchingEngine::new(dir.clone(), bridge.clone(), 10);
    let store = ConversationStore::new(dir.clone(), bridge.clone());

    let alice = seed_user(&dir, "alice@uni-bonn.de", Gender::Female, InterestedIn::Male, 22).await;
    let bob = seed_user(&dir, "bob@uni-bonn.de", Gender::Male, InterestedIn::Female, 24).await;
    let carol =
        seed_user(&dir, "carol@tu-berlin.de", Gender::Female, InterestedIn::Male, 22).await;

    // Bob sees Alice but not Carol (different university)
    let feed = engine.get_candidates(bob).await.unwrap();
    let ids: Vec<Uuid> = feed.iter().map(|c| c.user_id).collect();
    assert!(ids.contains(&alice));
    assert!(!ids.contains(&carol));

    // Chat cannot start before the match
    assert!(matches!(
        store.get_or_create(alice, bob).await,
        Err(CoreError::NotMatched)
    ));

    // Reciprocal likes form the match exactly once
    assert!(!engine.like(bob, alice).await.unwrap().is_match);
    let outcome = engine.like(alice, bob).await.unwrap();
    assert!(outcome.is_match);
    assert_eq!(outcome.matched_user.unwrap().user_id, bob);

    match events.recv().await.unwrap() {
        Notification::MatchFormed { user_a, user_b } => {
            assert_eq!(
                unimatch::models::UserPair::new(user_a, user_b),
                unimatch::models::UserPair::new(alice, bob)
            );
        }
        other => panic!("expected match-formed, got {:?}", other),
    }

    // Open the conversation from either side: same identity
    let conv = store.get_or_create(alice, bob).await.unwrap();
    assert_eq!(store.get_or_create(bob, alice).await.unwrap().id, conv.id);

    // Chat round trip with the message-appended event
    let sent = store
        .send_message(conv.id, alice, "hi bob".to_string(), MessageKind::Text)
        .await
        .unwrap();

    match events.recv().await.unwrap() {
        Notification::MessageAppended {
            conversation_id,
            message,
        } => {
            assert_eq!(conversation_id, conv.id);
            assert_eq!(message.id, sent.id);
        }
        other => panic!("expected message-appended, got {:?}", other),
    }

    store.mark_read(conv.id, bob).await.unwrap();
    let page = store.list_messages(conv.id, bob, 1, 50).await.unwrap();
    assert_eq!(page.messages.len(), 1);
    assert!(page.messages[0].read_by_user(bob));
    assert!(!page.has_more);

    // Unmatch purges history; a later re-like works from scratch
    engine.unmatch(bob, alice).await.unwrap();
    assert!(matches!(
        store.get_or_create(alice, bob).await,
        Err(CoreError::NotMatched)
    ));
    engine.like(bob, alice).await.unwrap();
    assert!(engine.like(alice, bob).await.unwrap().is_match);
}

#[tokio::test]
async fn test_distance_filtering_end_to_end() {
    let dir = Arc::new(UserDirectory::new(vec![]));
    let engine = MatchingEngine::new(dir.clone(), Arc::new(unimatch::NullBridge), 10);

    let actor = seed_user(&dir, "actor@uni-bonn.de", Gender::Male, InterestedIn::Female, 25).await;
    let near = seed_user(&dir, "near@uni-bonn.de", Gender::Female, InterestedIn::Male, 25).await;
    let far = seed_user(&dir, "far@uni-bonn.de", Gender::Female, InterestedIn::Male, 25).await;

    dir.set_location(actor, 7.0982, 50.7374).await.unwrap();
    // ~10 km north
    dir.set_location(near, 7.0982, 50.8274).await.unwrap();
    // ~100 km north
    dir.set_location(far, 7.0982, 51.6374).await.unwrap();

    dir.set_preferences(UpdatePreferencesRequest {
        user_id: actor,
        min_age: 18,
        max_age: 30,
        max_distance_km: 50,
    })
    .await
    .unwrap();

    let feed = engine.get_candidates(actor).await.unwrap();
    let ids: Vec<Uuid> = feed.iter().map(|c| c.user_id).collect();
    assert!(ids.contains(&near));
    assert!(!ids.contains(&far));

    let near_summary = feed.iter().find(|c| c.user_id == near).unwrap();
    assert_eq!(near_summary.distance_km, Some(10));

    dir.set_preferences(UpdatePreferencesRequest {
        user_id: actor,
        min_age: 18,
        max_age: 30,
        max_distance_km: 5,
    })
    .await
    .unwrap();

    assert!(engine.get_candidates(actor).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_many_concurrent_pairs_stay_consistent() {
    let dir = Arc::new(UserDirectory::new(vec![]));
    let engine = Arc::new(MatchingEngine::new(
        dir.clone(),
        Arc::new(unimatch::NullBridge),
        10,
    ));

    let mut pairs = vec![];
    for i in 0..8 {
        let a = seed_user(
            &dir,
            &format!("a{}@uni-bonn.de", i),
            Gender::Female,
            InterestedIn::Male,
            22,
        )
        .await;
        let b = seed_user(
            &dir,
            &format!("b{}@uni-bonn.de", i),
            Gender::Male,
            InterestedIn::Female,
            23,
        )
        .await;
        pairs.push((a, b));
    }

    let mut handles = vec![];
    for &(a, b) in &pairs {
        let e1 = engine.clone();
        let e2 = engine.clone();
        handles.push(tokio::spawn(async move { e1.like(a, b).await }));
        handles.push(tokio::spawn(async move { e2.like(b, a).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    for (a, b) in pairs {
        let pa = dir.read_profile(a).await.unwrap();
        let pb = dir.read_profile(b).await.unwrap();
        assert_eq!(pa.matches, vec![b], "match set of {} is wrong", a);
        assert_eq!(pb.matches, vec![a], "match set of {} is wrong", b);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sends_both_preserved() {
    let dir = Arc::new(UserDirectory::new(vec![]));
    let engine = MatchingEngine::new(dir.clone(), Arc::new(unimatch::NullBridge), 10);
    let store = Arc::new(ConversationStore::new(
        dir.clone(),
        Arc::new(unimatch::NullBridge),
    ));

    let alice = seed_user(&dir, "alice@uni-bonn.de", Gender::Female, InterestedIn::Male, 22).await;
    let bob = seed_user(&dir, "bob@uni-bonn.de", Gender::Male, InterestedIn::Female, 23).await;
    engine.like(alice, bob).await.unwrap();
    engine.like(bob, alice).await.unwrap();

    let conv = store.get_or_create(alice, bob).await.unwrap();

    let s1 = store.clone();
    let s2 = store.clone();
    let conv_id = conv.id;
    let t1 = tokio::spawn(async move {
        s1.send_message(conv_id, alice, "from alice".to_string(), MessageKind::Text)
            .await
    });
    let t2 = tokio::spawn(async move {
        s2.send_message(conv_id, bob, "from bob".to_string(), MessageKind::Text)
            .await
    });
    t1.await.unwrap().unwrap();
    t2.await.unwrap().unwrap();

    let refreshed = store.get_or_create(alice, bob).await.unwrap();
    assert_eq!(refreshed.messages.len(), 2);

    // The pointer mirrors whichever append landed last
    let last = refreshed.last_message.unwrap();
    assert_eq!(last.content, refreshed.messages.last().unwrap().content);
}
