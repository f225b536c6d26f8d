//! mousespa-types: domain model, repository port and wire envelope shared by
//! the server, the repositories and the client.

pub mod domain;
pub mod envelope;
pub mod ports;
