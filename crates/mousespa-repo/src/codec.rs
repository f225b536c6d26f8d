//! Column encodings shared by the SQL repositories.

use chrono::{DateTime, SecondsFormat, Utc};
use mousespa_types::ports::order_repository::RepoError;

/// `services` is stored as a JSON array of labels.
pub(crate) fn encode_services(services: &[String]) -> Result<String, RepoError> {
    Ok(serde_json::to_string(services)?)
}

pub(crate) fn decode_services(raw: &str) -> Result<Vec<String>, RepoError> {
    Ok(serde_json::from_str(raw)?)
}

// Fixed-width so that text ordering matches time ordering.
#[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
pub(crate) fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
pub(crate) fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>, RepoError> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .map_err(RepoError::database)?
        .with_timezone(&Utc))
}
