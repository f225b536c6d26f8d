//! Persistence adapters for orders.
//!
//! [`build_repo`] turns a resolved [`DatabaseTarget`] into a connected,
//! migrated [`Repo`]. The backend is picked by URL scheme; connection
//! parameters always mean MySQL.

use mousespa_types::domain::order::*;
use mousespa_types::ports::order_repository::OrderRepository;
use mousespa_types::ports::order_repository::RepoError;

pub mod target;
pub use target::{ConnectionParams, DatabaseTarget};

#[cfg(any(feature = "sqlite", feature = "mysql"))]
mod codec;
#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub enum Repo {
    #[cfg(feature = "memory")]
    Memory(memory::InMemoryRepo),
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteRepo),
    #[cfg(feature = "mysql")]
    MySql(mysql::MySqlRepo),
}

pub async fn build_repo(target: &DatabaseTarget) -> anyhow::Result<Repo> {
    Repo::build_repo(target).await
}

/// Backends compiled into this build.
pub fn enabled_backends() -> Vec<&'static str> {
    let mut out = Vec::new();
    if cfg!(feature = "memory") {
        out.push("memory");
    }
    if cfg!(feature = "sqlite") {
        out.push("sqlite");
    }
    if cfg!(feature = "mysql") {
        out.push("mysql");
    }
    out
}

impl Repo {
    pub async fn build_repo(target: &DatabaseTarget) -> anyhow::Result<Self> {
        tracing::info!(database = %target, "opening database");
        match target {
            DatabaseTarget::Url(url) => Self::from_url(url).await,
            DatabaseTarget::Params(params) => Self::from_params(params).await,
        }
    }

    #[allow(unreachable_code, unused_variables)]
    async fn from_url(url: &str) -> anyhow::Result<Self> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme {
            #[cfg(feature = "memory")]
            "memory" => Ok(Self::Memory(memory::InMemoryRepo::new())),
            #[cfg(feature = "sqlite")]
            "sqlite" => Ok(Self::Sqlite(sqlite::SqliteRepo::new(url).await?)),
            #[cfg(feature = "mysql")]
            "mysql" | "mariadb" => Ok(Self::MySql(mysql::MySqlRepo::new(url).await?)),
            other => anyhow::bail!(
                "unsupported database scheme `{other}` (enabled backends: {:?})",
                enabled_backends()
            ),
        }
    }

    #[cfg(feature = "mysql")]
    async fn from_params(params: &ConnectionParams) -> anyhow::Result<Self> {
        Ok(Self::MySql(mysql::MySqlRepo::from_params(params).await?))
    }

    #[cfg(not(feature = "mysql"))]
    async fn from_params(_: &ConnectionParams) -> anyhow::Result<Self> {
        anyhow::bail!("connection parameters need the `mysql` feature; set DATABASE_URL instead")
    }
}

macro_rules! dispatch {
    ($self:ident, $repo:ident => $call:expr) => {
        match *$self {
            #[cfg(feature = "memory")]
            Repo::Memory(ref $repo) => $call,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(ref $repo) => $call,
            #[cfg(feature = "mysql")]
            Repo::MySql(ref $repo) => $call,
        }
    };
}

#[async_trait::async_trait]
impl OrderRepository for Repo {
    async fn create(&self, order: NewOrder) -> Result<Order, RepoError> {
        dispatch!(self, repo => repo.create(order).await)
    }

    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        dispatch!(self, repo => repo.list().await)
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, RepoError> {
        dispatch!(self, repo => repo.get(id).await)
    }

    async fn delete(&self, id: OrderId) -> Result<(), RepoError> {
        dispatch!(self, repo => repo.delete(id).await)
    }

    async fn update_status(&self, id: OrderId, status: &OrderStatus) -> Result<(), RepoError> {
        dispatch!(self, repo => repo.update_status(id, status).await)
    }

    async fn get_for_tracking(&self, id: OrderId) -> Result<Option<OrderTracking>, RepoError> {
        dispatch!(self, repo => repo.get_for_tracking(id).await)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        dispatch!(self, repo => repo.count().await)
    }
}
