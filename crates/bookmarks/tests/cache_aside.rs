//! End-to-end behaviour of the cache-aside service over the in-memory backends.

#![cfg(feature = "memory")]

use std::sync::Arc;
use std::time::Duration;

use bookmarks::cache::MemoryCache;
use bookmarks::storage::InMemoryRepository;
use bookmarks::CachedBookmarkService;
use bookmarks_core::bookmark::{BookmarkId, CreateBookmarkRequest, EditBookmarkRequest, OwnerId};
use bookmarks_core::cache::{bookmark_key, Cache};
use bookmarks_core::service::{BookmarkService, ServiceError};
use bookmarks_core::storage::BookmarkRepository;

const TTL: Duration = Duration::from_millis(100);

struct Harness {
    service: CachedBookmarkService<InMemoryRepository, MemoryCache>,
    repo: Arc<InMemoryRepository>,
    cache: Arc<MemoryCache>,
}

fn harness(ttl: Duration) -> Harness {
    let repo = Arc::new(InMemoryRepository::new());
    let cache = Arc::new(MemoryCache::new(1_000));
    let service = CachedBookmarkService::new(repo.clone(), cache.clone(), ttl, 4);
    Harness {
        service,
        repo,
        cache,
    }
}

fn request(title: &str) -> CreateBookmarkRequest {
    CreateBookmarkRequest::new(title, format!("https://{}.example", title.to_lowercase()))
}

async fn wait_past_ttl() {
    tokio::time::sleep(TTL + Duration::from_millis(50)).await;
}

#[tokio::test]
async fn get_after_create_is_transparent_across_expiry() {
    let h = harness(TTL);
    let owner = OwnerId(1);

    let created = h.service.create_bookmark(owner, request("A")).await.unwrap();

    // Served by the entry written on create.
    assert_eq!(h.service.get_bookmark(owner, created.id).await.unwrap(), created);

    wait_past_ttl().await;
    let key = bookmark_key(owner, created.id);
    assert_eq!(h.cache.get(&key).await.unwrap(), None);

    // Served by the store, then refilled.
    assert_eq!(h.service.get_bookmark(owner, created.id).await.unwrap(), created);
    assert!(h.cache.get(&key).await.unwrap().is_some());
}

#[tokio::test]
async fn other_owner_read_is_not_found() {
    let h = harness(TTL);
    let created = h.service.create_bookmark(OwnerId(1), request("A")).await.unwrap();

    let err = h.service.get_bookmark(OwnerId(2), created.id).await.unwrap_err();
    assert_eq!(err, ServiceError::NotFound(created.id));

    // Same answer once the cache no longer holds the record.
    wait_past_ttl().await;
    let err = h.service.get_bookmark(OwnerId(2), created.id).await.unwrap_err();
    assert_eq!(err, ServiceError::NotFound(created.id));
}

#[tokio::test]
async fn edit_is_visible_to_the_next_read() {
    let h = harness(Duration::from_secs(15));
    let owner = OwnerId(1);
    let created = h.service.create_bookmark(owner, request("A")).await.unwrap();

    let edited = h
        .service
        .edit_bookmark(owner, created.id, EditBookmarkRequest::new().with_title("B"))
        .await
        .unwrap();

    assert_eq!(h.service.get_bookmark(owner, created.id).await.unwrap(), edited);
    assert_eq!(h.service.list_bookmarks(owner).await.unwrap(), vec![edited]);
}

#[tokio::test]
async fn delete_is_visible_immediately() {
    let h = harness(Duration::from_secs(15));
    let owner = OwnerId(1);
    let created = h.service.create_bookmark(owner, request("A")).await.unwrap();
    h.service.get_bookmark(owner, created.id).await.unwrap();

    h.service.delete_bookmark(owner, created.id).await.unwrap();

    let err = h.service.get_bookmark(owner, created.id).await.unwrap_err();
    assert_eq!(err, ServiceError::NotFound(created.id));
    assert!(h.service.list_bookmarks(owner).await.unwrap().is_empty());
    assert!(h.cache.is_empty().await);
}

#[tokio::test]
async fn list_for_new_owner_is_empty() {
    let h = harness(TTL);
    assert!(h.service.list_bookmarks(OwnerId(42)).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_miss_repopulates_cache() {
    let h = harness(TTL);
    let owner = OwnerId(1);
    let a = h.repo.insert(owner, &request("A").into_fields()).await.unwrap();
    let b = h.repo.insert(owner, &request("B").into_fields()).await.unwrap();

    let listed = h.service.list_bookmarks(owner).await.unwrap();
    assert_eq!(listed, vec![a.clone(), b.clone()]);

    h.service.settle().await;
    assert!(h.cache.get(&bookmark_key(owner, a.id)).await.unwrap().is_some());
    assert!(h.cache.get(&bookmark_key(owner, b.id)).await.unwrap().is_some());

    // The cache is trusted until expiry, so a row added directly to the
    // store stays hidden until then.
    let c = h.repo.insert(owner, &request("C").into_fields()).await.unwrap();
    assert_eq!(h.service.list_bookmarks(owner).await.unwrap(), vec![a.clone(), b.clone()]);

    wait_past_ttl().await;
    assert_eq!(h.service.list_bookmarks(owner).await.unwrap(), vec![a, b, c]);
}

#[tokio::test]
async fn walkthrough_scenario() {
    let h = harness(Duration::from_secs(15));
    let owner = OwnerId(1);

    let created = h.service.create_bookmark(owner, request("A")).await.unwrap();
    assert_eq!(created.id, BookmarkId(1));
    assert_eq!(created.user_id, owner);
    assert_eq!(created.title, "A");

    let fetched = h.service.get_bookmark(owner, created.id).await.unwrap();
    assert_eq!(fetched, created);

    // Reads from another owner never reveal the record.
    let err = h.service.get_bookmark(OwnerId(2), created.id).await.unwrap_err();
    assert_eq!(err, ServiceError::NotFound(created.id));

    // Writes from another owner are refused.
    let err = h
        .service
        .edit_bookmark(OwnerId(2), created.id, EditBookmarkRequest::new().with_title("X"))
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::Forbidden(created.id));

    let edited = h
        .service
        .edit_bookmark(owner, created.id, EditBookmarkRequest::new().with_title("B"))
        .await
        .unwrap();
    assert_eq!(edited.id, created.id);
    assert_eq!(edited.title, "B");

    let fetched = h.service.get_bookmark(owner, created.id).await.unwrap();
    assert_eq!(fetched.title, "B");

    h.service.delete_bookmark(owner, created.id).await.unwrap();

    let err = h.service.get_bookmark(owner, created.id).await.unwrap_err();
    assert_eq!(err, ServiceError::NotFound(created.id));
}
