//! HTTP API.
//!
//! `config` is always compiled because [`Config`](crate::config::Config)
//! embeds it; the server and its routes need the `server` feature.

pub mod config;

#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod server;
