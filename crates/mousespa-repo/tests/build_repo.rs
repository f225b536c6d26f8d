#![cfg(feature = "memory")]

use mousespa_repo::{build_repo, DatabaseTarget, Repo};
use mousespa_types::ports::order_repository::OrderRepository;

#[tokio::test]
async fn memory_scheme_builds_memory_repo() {
    let repo = build_repo(&DatabaseTarget::Url("memory://".into()))
        .await
        .expect("build repo");
    assert!(matches!(repo, Repo::Memory(_)));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_scheme_is_rejected() {
    let res = build_repo(&DatabaseTarget::Url("postgres://localhost/db".into())).await;
    let err = res.err().expect("postgres is not supported");
    assert!(err.to_string().contains("postgres"));
}
