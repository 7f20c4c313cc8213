//! Bamboo Core - configuration and credentials for the Bamboo REST client
//!
//! This crate owns everything the API bindings need to know about *where*
//! the server lives and *how* to authenticate against it, without pulling in
//! any HTTP machinery.

pub mod config;
pub mod error;
pub mod secrets;

pub use config::{Config, ServerConfig};
pub use error::{Error, Result};
pub use secrets::{BambooSecrets, Credentials, Secrets};
