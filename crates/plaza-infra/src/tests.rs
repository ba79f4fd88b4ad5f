//! End-to-end controller flows over the in-memory adapters.

use std::sync::Arc;

use plaza_core::SessionController;
use plaza_core::domain::{Category, MediaKind, View};
use plaza_core::ports::MediaFile;
use plaza_core::ports::StoreGateway;

use crate::memory::{InMemoryBlobStore, InMemoryStore};

fn controller() -> (Arc<InMemoryStore>, Arc<InMemoryBlobStore>, SessionController) {
    let store = Arc::new(InMemoryStore::new());
    let blobs = Arc::new(InMemoryBlobStore::new());
    let controller = SessionController::new(store.clone(), blobs.clone());
    (store, blobs, controller)
}

#[tokio::test]
async fn test_ana_logs_in_posts_likes_and_unlikes() {
    let (_store, _blobs, controller) = controller();

    controller.login("ana", None).await.unwrap();
    controller
        .create_post("Hola", Category::General, None)
        .await
        .unwrap();

    let state = controller.state().snapshot();
    assert_eq!(state.view, View::Feed);
    assert_eq!(state.posts.len(), 1);
    let post = &state.posts[0];
    assert_eq!(post.user_id, "ana");
    assert!(post.likes.is_empty());
    assert!(post.comments.is_empty());

    let post_id = post.id;
    controller.toggle_like(post_id).await.unwrap();
    assert_eq!(
        controller.state().snapshot().post(post_id).unwrap().likes,
        vec!["ana".to_string()]
    );

    controller.toggle_like(post_id).await.unwrap();
    assert!(
        controller
            .state()
            .snapshot()
            .post(post_id)
            .unwrap()
            .likes
            .is_empty()
    );
}

#[tokio::test]
async fn test_validation_rejections_issue_no_network_calls() {
    let (store, _blobs, controller) = controller();
    controller.login("ana", None).await.unwrap();
    let calls_before = store.calls();

    assert!(
        controller
            .create_post("   ", Category::General, None)
            .await
            .is_err()
    );
    assert_eq!(store.calls(), calls_before);
}

#[tokio::test]
async fn test_like_failure_rolls_back_against_real_adapter() {
    let (store, _blobs, controller) = controller();
    controller.login("ana", None).await.unwrap();
    controller
        .create_post("Hola", Category::General, None)
        .await
        .unwrap();
    let post_id = controller.state().snapshot().posts[0].id;
    let before = controller.state().snapshot().posts.clone();

    store.fail_next();
    assert!(controller.toggle_like(post_id).await.is_err());

    assert_eq!(controller.state().snapshot().posts, before);
    // The store double also never saw the write land.
    assert!(store.list_posts().await.unwrap()[0].likes.is_empty());
}

#[tokio::test]
async fn test_media_post_round_trips_through_blob_store() {
    let (store, blobs, controller) = controller();
    controller.login("ana", None).await.unwrap();

    let file = MediaFile::new("playa.jpg", "image/jpeg", vec![1, 2, 3]);
    controller
        .create_post("Vacaciones", Category::Viajes, Some(file))
        .await
        .unwrap();

    assert_eq!(blobs.len().await, 1);
    let posts = store.list_posts().await.unwrap();
    let media = posts[0].media.as_ref().unwrap();
    assert_eq!(media.kind, MediaKind::Image);
    assert!(media.url.starts_with("https://blobs.invalid/media/"));
}

#[tokio::test]
async fn test_refresh_pulls_both_collections() {
    let (store, _blobs, controller) = controller();
    store.create_user("ana", "🙂").await.unwrap();
    store.create_user("bob", "🙂").await.unwrap();
    store
        .create_post(plaza_core::ports::PostDraft {
            user_id: "ana".to_string(),
            content: "Hola".to_string(),
            category: Category::General,
            media: None,
        })
        .await
        .unwrap();

    controller.refresh().await.unwrap();

    let state = controller.state().snapshot();
    assert_eq!(state.users.len(), 2);
    assert_eq!(state.posts.len(), 1);
    assert!(!state.loading());
}

#[tokio::test]
async fn test_refresh_failure_leaves_prior_state() {
    let (store, _blobs, controller) = controller();
    controller.login("ana", None).await.unwrap();
    let before_users = controller.state().snapshot().users.clone();

    store.fail_next();
    assert!(controller.refresh().await.is_err());

    let state = controller.state().snapshot();
    assert_eq!(state.users, before_users);
    assert!(!state.loading());
}
