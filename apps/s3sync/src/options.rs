//! Closed-vocabulary options: S3 ACL class and on-failure action.
//!
//! Values match exactly (case-sensitive, untrimmed).

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
/// Canned ACL applied to uploaded objects.
pub enum AclClass {
    /// Empty string: let the backend choose.
    BackendDefault,
    Private,
    PublicRead,
    PublicReadWrite,
    AwsExecRead,
    AuthenticatedRead,
    BucketOwnerRead,
    BucketOwnerFullControl,
}

const ACL_TABLE: &[(&str, AclClass)] = &[
    ("", AclClass::BackendDefault),
    ("private", AclClass::Private),
    ("public-read", AclClass::PublicRead),
    ("public-read-write", AclClass::PublicReadWrite),
    ("aws-exec-read", AclClass::AwsExecRead),
    ("authenticated-read", AclClass::AuthenticatedRead),
    ("bucket-owner-read", AclClass::BucketOwnerRead),
    ("bucket-owner-full-control", AclClass::BucketOwnerFullControl),
];

const ACL_EXPECTED: &str = "private, public-read, public-read-write, aws-exec-read, \
authenticated-read, bucket-owner-read, bucket-owner-full-control";

impl AclClass {
    /// Wire value sent to the object store; empty for `BackendDefault`.
    pub fn as_str(self) -> &'static str {
        ACL_TABLE
            .iter()
            .find(|(_, acl)| *acl == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }
}

impl FromStr for AclClass {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ACL_TABLE
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, acl)| *acl)
            .ok_or_else(|| ConfigError::InvalidEnumValue {
                option: "s3-acl",
                value: s.to_string(),
                expected: ACL_EXPECTED,
            })
    }
}

impl fmt::Display for AclClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackendDefault => f.write_str("(backend default)"),
            other => f.write_str(other.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// What the sync engine does when a single object fails.
pub enum OnFailureAction {
    /// Abort the whole run.
    Fatal,
    /// Log and continue.
    Skip,
    /// Continue only when the source object disappeared.
    SkipMissing,
}

const ON_FAIL_TABLE: &[(&str, OnFailureAction)] = &[
    ("fatal", OnFailureAction::Fatal),
    ("skip", OnFailureAction::Skip),
    ("skipmissing", OnFailureAction::SkipMissing),
];

impl OnFailureAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Skip => "skip",
            Self::SkipMissing => "skipmissing",
        }
    }
}

impl FromStr for OnFailureAction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ON_FAIL_TABLE
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, action)| *action)
            .ok_or_else(|| ConfigError::InvalidEnumValue {
                option: "on-fail",
                value: s.to_string(),
                expected: "fatal, skip, skipmissing",
            })
    }
}

impl fmt::Display for OnFailureAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_fail_vocabulary() {
        assert_eq!("fatal".parse::<OnFailureAction>().unwrap(), OnFailureAction::Fatal);
        assert_eq!("skip".parse::<OnFailureAction>().unwrap(), OnFailureAction::Skip);
        assert_eq!(
            "skipmissing".parse::<OnFailureAction>().unwrap(),
            OnFailureAction::SkipMissing
        );
        for bad in ["Fatal", " skip", "skip-missing", "", "abort"] {
            assert!(bad.parse::<OnFailureAction>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_acl_vocabulary_round_trips_names() {
        for (name, acl) in ACL_TABLE {
            assert_eq!(name.parse::<AclClass>().unwrap(), *acl);
            assert_eq!(acl.as_str(), *name);
        }
        assert_eq!("".parse::<AclClass>().unwrap(), AclClass::BackendDefault);
    }

    #[test]
    fn test_acl_rejects_unknown_and_case_variants() {
        let err = "PRIVATE".parse::<AclClass>().unwrap_err();
        match err {
            ConfigError::InvalidEnumValue { option, value, .. } => {
                assert_eq!(option, "s3-acl");
                assert_eq!(value, "PRIVATE");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!("public".parse::<AclClass>().is_err());
        assert!("private ".parse::<AclClass>().is_err());
    }
}
