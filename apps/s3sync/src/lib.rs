//! s3sync configuration resolution.
//!
//! Raw options from the command line and an optional `s3sync.{toml,yaml}`
//! file are validated into a single immutable [`ResolvedConfig`] that the
//! sync engine consumes.

pub mod bandwidth;
pub mod cli;
pub mod config;
pub mod connect;
pub mod error;
pub mod logging;
pub mod options;
pub mod output;
pub mod resolve;

pub use config::RawOptions;
pub use connect::{ConnectionDescriptor, ConnectorKind};
pub use error::{ConfigError, Result};
pub use options::{AclClass, OnFailureAction};
pub use resolve::{
    resolve, resolve_with, Environment, FileMode, ResolvedConfig, TransportSettings,
};
