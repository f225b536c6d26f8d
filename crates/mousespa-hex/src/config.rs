use mousespa_repo::DatabaseTarget;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: String,
    pub static_dir: PathBuf,
    pub database: DatabaseTarget,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let server_port = var("PORT", "8080");
        let static_dir = PathBuf::from(var("STATIC_DIR", "static"));
        let database = DatabaseTarget::from_lookup(&lookup)?;
        Ok(Self {
            server_port,
            static_dir,
            database,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.server_port, "8080");
        assert_eq!(config.static_dir, PathBuf::from("static"));
        let DatabaseTarget::Params(params) = config.database else {
            panic!("expected connection params");
        };
        assert_eq!(params.host, "localhost");
        assert_eq!(params.port, 3306);
        assert_eq!(params.database, "mousespa");
    }

    #[test]
    fn port_and_url_from_lookup() {
        let config = Config::from_lookup(|key| match key {
            "PORT" => Some("9000".into()),
            "DATABASE_URL" => Some("sqlite://orders.db".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.server_port, "9000");
        assert_eq!(
            config.database,
            DatabaseTarget::Url("sqlite://orders.db".into())
        );
    }
}
