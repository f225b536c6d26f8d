//! mousespa-hex: order service core (application layer) plus the inbound HTTP adapter.

pub mod config;
pub mod errors;

pub mod application;

pub use mousespa_types::{domain, envelope, ports};

pub mod inbound; // HTTP adapter (server + handlers)
