//! Turns `RawOptions` into the immutable `ResolvedConfig` handed to the
//! sync engine.
//!
//! Checks run in a fixed order and the first failure wins: ACL, on-fail,
//! bandwidth, retry interval, source, target, progress/tty, file and dir
//! permissions, transport, modified-filter/xattr.

use std::fmt;
use std::io::IsTerminal;
use std::time::Duration;

use crate::bandwidth::parse_bandwidth;
use crate::config::RawOptions;
use crate::connect::{parse_conn, ConnectionDescriptor};
use crate::error::{ConfigError, Result};
use crate::options::{AclClass, OnFailureAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Unix permission bits parsed from an octal string.
pub struct FileMode(u32);

impl FileMode {
    pub fn bits(self) -> u32 {
        self.0
    }

    #[cfg(unix)]
    pub fn to_permissions(self) -> std::fs::Permissions {
        use std::os::unix::fs::PermissionsExt;
        std::fs::Permissions::from_mode(self.0)
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

/// Parse `value` (given for `option`) as a base-8 `u32`.
pub fn parse_file_mode(option: &'static str, value: &str) -> Result<FileMode> {
    u32::from_str_radix(value, 8)
        .map(FileMode)
        .map_err(|source| ConfigError::InvalidPermission {
            option,
            value: value.to_string(),
            source,
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Settings for the HTTP client of the object-store backend.
pub struct TransportSettings {
    pub http2: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Process surroundings that resolution depends on.
pub struct Environment {
    pub stdout_is_terminal: bool,
}

impl Environment {
    /// Sample the real process environment.
    pub fn detect() -> Self {
        Self {
            stdout_is_terminal: std::io::stdout().is_terminal(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fully validated configuration. Read-only once built.
pub struct ResolvedConfig {
    pub options: RawOptions,
    pub source: ConnectionDescriptor,
    pub target: ConnectionDescriptor,
    pub retry_interval: Duration,
    pub acl: AclClass,
    pub on_fail: OnFailureAction,
    pub fs_file_perm: FileMode,
    pub fs_dir_perm: FileMode,
    /// Bytes per second, 0 = unlimited.
    pub rate_limit_bandwidth: u64,
    pub transport: TransportSettings,
}

/// Resolve against the real stdout.
pub fn resolve(raw: RawOptions) -> Result<ResolvedConfig> {
    resolve_with(raw, Environment::detect())
}

/// Resolve with an explicit environment.
pub fn resolve_with(raw: RawOptions, env: Environment) -> Result<ResolvedConfig> {
    let acl: AclClass = raw.s3_acl.parse()?;
    let on_fail: OnFailureAction = raw.on_fail.parse()?;

    let rate_limit_bandwidth =
        parse_bandwidth(&raw.rate_limit_bandwidth).ok_or_else(|| ConfigError::InvalidBandwidth {
            value: raw.rate_limit_bandwidth.clone(),
        })?;

    let retry_interval = Duration::from_secs(u64::from(raw.s3_retry_interval));

    let source = parse_conn("source", &raw.source)?;
    let target = parse_conn("target", &raw.target)?;
    tracing::debug!(?source, ?target, "parsed connectors");

    if raw.show_progress && !env.stdout_is_terminal {
        return Err(ConfigError::RequiresTty);
    }

    let fs_file_perm = parse_file_mode("fs-file-perm", &raw.fs_file_perm)?;
    let fs_dir_perm = parse_file_mode("fs-dir-perm", &raw.fs_dir_perm)?;

    let transport = TransportSettings {
        http2: !raw.disable_http2,
    };
    if !transport.http2 {
        tracing::debug!("http2 disabled for object-store client");
    }

    if raw.filter_modified && raw.fs_disable_xattr {
        return Err(ConfigError::FilterRequiresXattr);
    }

    tracing::debug!(
        %acl,
        %on_fail,
        rate_limit_bandwidth,
        retry_secs = retry_interval.as_secs(),
        %fs_file_perm,
        %fs_dir_perm,
        "configuration resolved"
    );

    Ok(ResolvedConfig {
        options: raw,
        source,
        target,
        retry_interval,
        acl,
        on_fail,
        fs_file_perm,
        fs_dir_perm,
        rate_limit_bandwidth,
        transport,
    })
}
