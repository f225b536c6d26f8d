//! Resolution of the database connection from the environment.
//!
//! A full connection URL wins when present. Otherwise each connection
//! parameter is looked up under the hosting platform's variable name, then
//! under our own `DB_*` name, then falls back to a default.

use std::fmt;

use anyhow::Context;
use url::Url;

/// Variables carrying a complete connection URL, in priority order.
pub const URL_KEYS: [&str; 2] = ["MYSQL_URL", "DATABASE_URL"];

const HOST_KEYS: [&str; 2] = ["MYSQLHOST", "DB_HOST"];
const PORT_KEYS: [&str; 2] = ["MYSQLPORT", "DB_PORT"];
const USER_KEYS: [&str; 2] = ["MYSQLUSER", "DB_USER"];
const PASSWORD_KEYS: [&str; 2] = ["MYSQLPASSWORD", "DB_PASSWORD"];
const NAME_KEYS: [&str; 2] = ["MYSQLDATABASE", "DB_NAME"];

#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &mask_value(&self.password))
            .field("database", &self.database)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    Url(String),
    Params(ConnectionParams),
}

impl fmt::Debug for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseTarget::Url(url) => f.debug_tuple("Url").field(&mask_url(url)).finish(),
            DatabaseTarget::Params(p) => f.debug_tuple("Params").field(p).finish(),
        }
    }
}

impl fmt::Display for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseTarget::Url(url) => f.write_str(&mask_url(url)),
            DatabaseTarget::Params(p) => {
                write!(f, "mysql://{}@{}:{}/{}", p.user, p.host, p.port, p.database)
            }
        }
    }
}

impl DatabaseTarget {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the target through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some((key, url)) = first_set(&lookup, &URL_KEYS) {
            tracing::info!(source = key, url = %mask_url(&url), "using database url");
            return Ok(Self::Url(url));
        }

        let host = resolve(&lookup, &HOST_KEYS, "localhost", false);
        let port_raw = resolve(&lookup, &PORT_KEYS, "3306", false);
        let user = resolve(&lookup, &USER_KEYS, "root", false);
        let password = resolve(&lookup, &PASSWORD_KEYS, "", true);
        let database = resolve(&lookup, &NAME_KEYS, "mousespa", false);

        let port = port_raw
            .parse::<u16>()
            .with_context(|| format!("invalid database port `{port_raw}`"))?;

        Ok(Self::Params(ConnectionParams {
            host,
            port,
            user,
            password,
            database,
        }))
    }
}

fn first_set<F>(lookup: &F, keys: &[&'static str]) -> Option<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .find_map(|key| lookup(key).filter(|v| !v.is_empty()).map(|v| (*key, v)))
}

fn resolve<F>(lookup: &F, keys: &[&'static str], default: &str, secret: bool) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match first_set(lookup, keys) {
        Some((key, value)) => {
            let shown = if secret { mask_value(&value) } else { value.clone() };
            tracing::info!("found env var {key} = {shown}");
            value
        }
        None => {
            let shown = if secret { mask_value(default) } else { default.to_string() };
            tracing::info!("no env var found for {keys:?}, using default: {shown}");
            default.to_string()
        }
    }
}

/// Keeps the first and last two characters; short values are fully hidden.
pub fn mask_value(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}****{tail}")
}

/// Shown in place of a URL that does not parse.
const REDACTED_URL: &str = "<unparseable database url>";

/// Masks the password of a connection URL. A URL that does not parse is
/// replaced entirely so nothing secret can leak through it.
pub fn mask_url(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return REDACTED_URL.to_string();
    };
    if let Some(password) = url.password().map(mask_value) {
        if url.set_password(Some(&password)).is_err() {
            return REDACTED_URL.to_string();
        }
    }
    url.to_string()
}
