use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{DatabaseBackend, DbConn, MockDatabase};

use blog_core::domain::{PREVIEW_WORDS, Post, TRUNCATION_MARKER, truncate_words};
use blog_core::error::DomainError;
use blog_core::ports::{BaseRepository, PostRepository, UserRepository};
use blog_core::ContentStore;

use crate::database::entity::post;
use crate::database::{DatabaseConfig, SqlPostRepository, SqlUserRepository, connect};

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, hour, 0, 0).unwrap()
}

async fn sqlite() -> DbConn {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    let db = connect(&config).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

/// A file-backed database, so the pool really holds several connections.
async fn sqlite_file(dir: &tempfile::TempDir) -> DbConn {
    let config = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("blog.db").display()),
        max_connections: 8,
        min_connections: 1,
    };
    let db = connect(&config).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

fn store(db: &DbConn) -> ContentStore {
    ContentStore::new(
        Arc::new(SqlPostRepository::new(db.clone())),
        Arc::new(SqlUserRepository::new(db.clone())),
    )
}

#[tokio::test]
async fn test_find_post_by_id() {
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: 7,
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            author_id: 3,
            created_date: now,
            published_date: None,
        }]])
        .into_connection();

    let repo = SqlPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(7).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 7);
    assert_eq!(post.author_id, 3);
}

#[tokio::test]
async fn test_create_then_publish_scenario() {
    let db = sqlite().await;
    let store = store(&db);
    let author = store.register_author("u1").await.unwrap();

    let content = "world ".repeat(40);
    let post = store.create("Hello", &content, author.id).await.unwrap();
    assert_eq!(post.published_date, None);
    assert!(store.list_published(Utc::now()).await.unwrap().is_empty());

    store.publish(post.id).await.unwrap();

    let listed = store.list_published(Utc::now()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, post.id);

    let preview = truncate_words(&listed[0].content, PREVIEW_WORDS);
    assert!(preview.ends_with(TRUNCATION_MARKER));
    assert_eq!(
        preview.trim_end_matches(TRUNCATION_MARKER).split(' ').count(),
        PREVIEW_WORDS
    );
}

#[tokio::test]
async fn test_list_published_membership_and_order() {
    let db = sqlite().await;
    let store = store(&db);
    let author = store.register_author("u1").await.unwrap();

    let mut ids = Vec::new();
    for title in ["first", "second", "third", "future", "draft"] {
        ids.push(store.create(title, "body", author.id).await.unwrap().id);
    }
    store.publish_at(ids[0], at(6)).await.unwrap();
    store.publish_at(ids[1], at(11)).await.unwrap();
    store.publish_at(ids[2], at(9)).await.unwrap();
    store.publish_at(ids[3], at(23)).await.unwrap();

    let listed = store.list_published(at(12)).await.unwrap();
    let titles: Vec<&str> = listed.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["second", "third", "first"]);

    assert!(listed.iter().all(|p| p.is_published_at(at(12))));
    assert!(
        listed
            .windows(2)
            .all(|w| w[0].published_date >= w[1].published_date)
    );

    // A later snapshot picks up the scheduled post.
    assert_eq!(store.list_published(at(23)).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_list_published_breaks_date_ties_by_id() {
    let db = sqlite().await;
    let store = store(&db);
    let author = store.register_author("u1").await.unwrap();

    let older = store.create("older", "body", author.id).await.unwrap();
    let newer = store.create("newer", "body", author.id).await.unwrap();
    let earlier = store.create("earlier", "body", author.id).await.unwrap();
    store.publish_at(older.id, at(7)).await.unwrap();
    store.publish_at(newer.id, at(7)).await.unwrap();
    store.publish_at(earlier.id, at(6)).await.unwrap();

    let ids: Vec<i64> = store
        .list_published(at(8))
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![newer.id, older.id, earlier.id]);
}

#[tokio::test]
async fn test_republish_keeps_original_date() {
    let db = sqlite().await;
    let store = store(&db);
    let author = store.register_author("u1").await.unwrap();
    let post = store.create("Hello", "world", author.id).await.unwrap();

    let first = store.publish_at(post.id, at(10)).await.unwrap();
    let second = store.publish_at(post.id, at(11)).await.unwrap();
    assert_eq!(first.published_date, Some(at(10)));
    assert_eq!(second.published_date, Some(at(10)));
    assert_eq!(store.get(post.id).await.unwrap().published_date, Some(at(10)));
}

#[tokio::test]
async fn test_publish_scheduled_post_moves_date_to_now() {
    let db = sqlite().await;
    let store = store(&db);
    let author = store.register_author("u1").await.unwrap();
    let post = store.create("Hello", "world", author.id).await.unwrap();

    store.publish_at(post.id, at(20)).await.unwrap();
    let republished = store.publish_at(post.id, at(10)).await.unwrap();
    assert_eq!(republished.published_date, Some(at(10)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_publish_on_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = sqlite_file(&dir).await;
    let store = store(&db);
    let author = store.register_author("u1").await.unwrap();

    for round in 0..5 {
        let contested = store.create(&format!("contested {round}"), "body", author.id).await.unwrap();
        let other = store.create(&format!("other {round}"), "body", author.id).await.unwrap();

        let mut tasks = tokio::task::JoinSet::new();
        for hour in [11, 10, 11, 10] {
            let store = store.clone();
            tasks.spawn(async move { store.publish_at(contested.id, at(hour)).await });
        }
        for _ in 0..4 {
            let store = store.clone();
            tasks.spawn(async move { store.publish_at(other.id, at(11)).await });
        }
        while let Some(joined) = tasks.join_next().await {
            joined.unwrap().unwrap();
        }

        // Whatever the interleaving, the earliest publish wins.
        assert_eq!(store.get(contested.id).await.unwrap().published_date, Some(at(10)));
        assert_eq!(store.get(other.id).await.unwrap().published_date, Some(at(11)));
    }

    assert_eq!(store.list_published(at(12)).await.unwrap().len(), 10);
}

#[tokio::test]
async fn test_delete_post() {
    let db = sqlite().await;
    let store = store(&db);
    let author = store.register_author("u1").await.unwrap();
    let post = store.create("a", "body", author.id).await.unwrap();
    store.publish_at(post.id, at(5)).await.unwrap();

    store.delete_post(post.id).await.unwrap();

    assert!(store.list_published(at(12)).await.unwrap().is_empty());
    assert!(matches!(
        store.delete_post(post.id).await,
        Err(DomainError::NotFound { .. })
    ));
    // The author stays behind.
    assert_eq!(store.author_of(&post).await.unwrap().id, author.id);
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let db = sqlite().await;
    let store = store(&db);

    assert!(matches!(
        store.get(999).await,
        Err(DomainError::NotFound { id: 999, .. })
    ));
    assert!(matches!(
        store.publish(999).await,
        Err(DomainError::NotFound { id: 999, .. })
    ));
    assert!(matches!(
        store.delete_author_cascade(999).await,
        Err(DomainError::NotFound { id: 999, .. })
    ));
}

#[tokio::test]
async fn test_create_validation() {
    let db = sqlite().await;
    let store = store(&db);
    let author = store.register_author("u1").await.unwrap();

    assert!(matches!(
        store.create("", "body", author.id).await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        store.create("title", "  ", author.id).await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        store.create("title", "body", author.id + 100).await,
        Err(DomainError::Validation(_))
    ));
}

#[tokio::test]
async fn test_duplicate_author_is_rejected() {
    let db = sqlite().await;
    let store = store(&db);
    store.register_author("u1").await.unwrap();

    assert!(matches!(
        store.register_author("u1").await,
        Err(DomainError::Validation(_))
    ));
}

#[tokio::test]
async fn test_insert_with_missing_author_violates_foreign_key() {
    let db = sqlite().await;
    let repo = SqlPostRepository::new(db.clone());
    let draft = blog_core::domain::NewPost::draft("t", "c", 404, at(1)).unwrap();

    assert!(matches!(
        repo.insert(draft).await,
        Err(blog_core::RepoError::Constraint(_))
    ));
}

#[tokio::test]
async fn test_delete_author_cascade() {
    let db = sqlite().await;
    let store = store(&db);
    let gone = store.register_author("gone").await.unwrap();
    let kept = store.register_author("kept").await.unwrap();

    let doomed = store.create("bye", "body", gone.id).await.unwrap();
    let survivor = store.create("hi", "body", kept.id).await.unwrap();
    store.publish_at(doomed.id, at(8)).await.unwrap();
    store.publish_at(survivor.id, at(9)).await.unwrap();

    store.delete_author_cascade(gone.id).await.unwrap();

    let listed = store.list_published(at(12)).await.unwrap();
    assert!(listed.iter().all(|p| p.author_id != gone.id));
    assert_eq!(listed.len(), 1);
    assert!(matches!(
        store.get(doomed.id).await,
        Err(DomainError::NotFound { .. })
    ));

    let users = SqlUserRepository::new(db.clone());
    assert!(users.find_by_username("gone").await.unwrap().is_none());
    assert!(users.find_by_username("kept").await.unwrap().is_some());
}

#[tokio::test]
async fn test_user_delete_cascades_in_schema() {
    let db = sqlite().await;
    let store = store(&db);
    let author = store.register_author("u1").await.unwrap();
    let post = store.create("a", "body", author.id).await.unwrap();

    let users = SqlUserRepository::new(db.clone());
    BaseRepository::<blog_core::domain::User, i64>::delete(&users, author.id)
        .await
        .unwrap();

    let posts = SqlPostRepository::new(db.clone());
    assert!(posts.find_by_id(post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_author_of_post() {
    let db = sqlite().await;
    let store = store(&db);
    let author = store.register_author("alice").await.unwrap();
    let post = store.create("a", "body", author.id).await.unwrap();

    let found = store.author_of(&post).await.unwrap();
    assert_eq!(found.display_name(), "alice");
    assert!(found.date_joined <= Utc::now() + Duration::seconds(1));
}
