#![cfg(feature = "sqlite")]

use mousespa_repo::sqlite::SqliteRepo;
use mousespa_types::domain::order::{NewOrder, OrderStatus, OrderSubmission};
use mousespa_types::ports::order_repository::OrderRepository;
use std::path::PathBuf;

fn temp_db_url() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut path = PathBuf::from(dir.path());
    path.push("orders.db");
    let url = format!("sqlite://{}", path.display());
    (dir, url)
}

fn new_order(name: &str) -> NewOrder {
    OrderSubmission {
        full_name: name.into(),
        phone_number: "081234567890".into(),
        email: "test@example.com".into(),
        services: vec!["Deep Clean".into(), "Anti-bacterial".into()],
        item_count: 2,
        pickup_method: "pickup".into(),
        pickup_address: Some("Jl. Sudirman 123".into()),
        additional_notes: Some("Mousepad gaming ukuran XL".into()),
    }
    .into_new_order()
    .unwrap()
}

#[tokio::test]
async fn sqlite_repo_crud_flow() {
    let (_dir, url) = temp_db_url();
    let repo = SqliteRepo::new(&url).await.unwrap();
    let draft = new_order("Test");

    let created = repo.create(draft.clone()).await.unwrap();
    assert!(created.id > 0);

    let fetched = repo.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, draft.with_id(created.id));
    assert_eq!(fetched.services, vec!["Deep Clean", "Anti-bacterial"]);
    assert_eq!(fetched.created_at, fetched.updated_at);

    assert_eq!(repo.list().await.unwrap().len(), 1);
    assert_eq!(repo.count().await.unwrap(), 1);

    repo.update_status(created.id, &OrderStatus::from("picked_up"))
        .await
        .unwrap();
    let updated = repo.get(created.id).await.unwrap().unwrap();
    assert_eq!(updated.status.as_str(), "picked_up");

    let tracked = repo.get_for_tracking(created.id).await.unwrap().unwrap();
    assert_eq!(tracked, updated.tracking());

    repo.delete(created.id).await.unwrap();
    assert!(repo.get(created.id).await.unwrap().is_none());
    // Second delete of the same id is not an error.
    repo.delete(created.id).await.unwrap();
}

#[tokio::test]
async fn sqlite_repo_lists_newest_first() {
    let (_dir, url) = temp_db_url();
    let repo = SqliteRepo::new(&url).await.unwrap();
    let mut ids = Vec::new();
    for name in ["first", "second", "third"] {
        ids.push(repo.create(new_order(name)).await.unwrap().id);
    }
    let listed: Vec<_> = repo.list().await.unwrap().into_iter().map(|o| o.id).collect();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn sqlite_repo_handles_missing_rows() {
    let (_dir, url) = temp_db_url();
    let repo = SqliteRepo::new(&url).await.unwrap();

    assert!(repo.get(99999).await.unwrap().is_none());
    assert!(repo.get_for_tracking(99999).await.unwrap().is_none());
    repo.update_status(99999, &OrderStatus::from("done")).await.unwrap();
    repo.delete(99999).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn sqlite_migration_is_idempotent() {
    let (_dir, url) = temp_db_url();
    let first = SqliteRepo::new(&url).await.unwrap();
    first.create(new_order("kept")).await.unwrap();

    let second = SqliteRepo::new(&url).await.unwrap();
    assert_eq!(second.count().await.unwrap(), 1);
}

#[tokio::test]
async fn in_memory_sqlite_url_works() {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let created = repo.create(new_order("mem")).await.unwrap();
    assert!(repo.get(created.id).await.unwrap().is_some());
}
