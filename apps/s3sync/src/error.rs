//! Configuration errors.
//!
//! Every variant is terminal: resolution stops at the first one and the
//! binary reports it before any sync work starts.

use std::num::ParseIntError;
use std::path::PathBuf;

/// Result alias used throughout configuration resolution.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
/// Errors produced while turning raw options into a `ResolvedConfig`.
pub enum ConfigError {
    /// Endpoint claimed the object-store scheme but is not a usable URI.
    #[error("invalid {option} endpoint '{value}': {reason}")]
    MalformedEndpoint {
        option: &'static str,
        value: String,
        reason: String,
    },

    /// Closed-vocabulary option outside its allowed values.
    #[error("--{option} must be one of \"{expected}\", got '{value}'")]
    InvalidEnumValue {
        option: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Permission string is not an octal number that fits in 32 bits.
    #[error("failed to parse arg --{option} '{value}' as octal permissions: {source}")]
    InvalidPermission {
        option: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("progress (--sync-progress) requires stdout to be a tty")]
    RequiresTty,

    #[error("filter modified files (--filter-modified) requires xattr; drop --fs-disable-xattr")]
    FilterRequiresXattr,

    /// Rate string outside `<digits>[K|M|G]`.
    #[error("invalid value of --ratelimit-bandwidth '{value}': expected bytes/s with optional K, M or G suffix")]
    InvalidBandwidth { value: String },

    /// Config file exists but could not be read or parsed.
    #[error("failed to load config file {}: {message}", path.display())]
    ConfigFile { path: PathBuf, message: String },
}

impl ConfigError {
    /// Name of the option the error refers to, when there is exactly one.
    pub fn option(&self) -> Option<&'static str> {
        match self {
            Self::MalformedEndpoint { option, .. }
            | Self::InvalidEnumValue { option, .. }
            | Self::InvalidPermission { option, .. } => Some(*option),
            Self::RequiresTty => Some("sync-progress"),
            Self::FilterRequiresXattr => Some("filter-modified"),
            Self::InvalidBandwidth { .. } => Some("ratelimit-bandwidth"),
            Self::ConfigFile { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_option() {
        let err = ConfigError::InvalidEnumValue {
            option: "on-fail",
            value: "abort".into(),
            expected: "fatal, skip, skipmissing",
        };
        let msg = err.to_string();
        assert!(msg.contains("--on-fail"));
        assert!(msg.contains("abort"));
        assert_eq!(err.option(), Some("on-fail"));

        let err = ConfigError::InvalidBandwidth { value: "10X".into() };
        assert!(err.to_string().contains("--ratelimit-bandwidth"));
        assert!(err.to_string().contains("10X"));
    }

    #[test]
    fn test_permission_error_keeps_source() {
        use std::error::Error as _;
        let source = u32::from_str_radix("abc", 8).unwrap_err();
        let err = ConfigError::InvalidPermission {
            option: "fs-file-perm",
            value: "abc".into(),
            source,
        };
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("failed to parse arg --fs-file-perm"));
    }
}
