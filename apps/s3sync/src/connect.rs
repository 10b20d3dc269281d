//! Endpoint parsing for sync connectors.
//!
//! Accepted forms:
//! - `s3://bucket[/prefix]` → object store
//! - `fs://path` → filesystem, `path` kept verbatim
//! - anything else (`/data/dir`, `C:\data`, `./rel`) → filesystem, unchanged

use serde::Serialize;
use url::Url;

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectorKind {
    ObjectStore,
    Filesystem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One side of a sync. `bucket` is non-empty for object stores and always
/// empty for filesystem connectors.
pub struct ConnectionDescriptor {
    pub kind: ConnectorKind,
    pub bucket: String,
    pub path: String,
}

impl ConnectionDescriptor {
    pub fn is_object_store(&self) -> bool {
        self.kind == ConnectorKind::ObjectStore
    }
}

/// Return the URI scheme of `s` when it starts with one (`alpha *(alnum|+|-|.) ":"`).
fn scheme_of(s: &str) -> Option<&str> {
    let (scheme, _) = s.split_once(':')?;
    let mut chars = scheme.chars();
    if !chars.next()?.is_ascii_alphabetic() {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Some(scheme)
    } else {
        None
    }
}

/// Parse an endpoint string given for `option` (`source` or `target`).
pub fn parse_conn(option: &'static str, s: &str) -> Result<ConnectionDescriptor> {
    match scheme_of(s) {
        Some(scheme) if scheme.eq_ignore_ascii_case("s3") => parse_object_store(option, s),
        Some(scheme) if scheme.eq_ignore_ascii_case("fs") => Ok(ConnectionDescriptor {
            kind: ConnectorKind::Filesystem,
            bucket: String::new(),
            path: s.strip_prefix("fs://").unwrap_or(s).to_string(),
        }),
        _ => Ok(ConnectionDescriptor {
            kind: ConnectorKind::Filesystem,
            bucket: String::new(),
            path: s.to_string(),
        }),
    }
}

/// Split `scheme://authority/path?query#fragment` into authority and path,
/// taken verbatim from the input. `None` when there is no `//` authority.
fn split_authority(s: &str) -> Option<(&str, &str)> {
    let (_, rest) = s.split_once(':')?;
    let rest = rest.strip_prefix("//")?;
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    match rest.find('/') {
        Some(i) => Some(rest.split_at(i)),
        None => Some((rest, "")),
    }
}

fn parse_object_store(option: &'static str, s: &str) -> Result<ConnectionDescriptor> {
    let malformed = |reason: String| ConfigError::MalformedEndpoint {
        option,
        value: s.to_string(),
        reason,
    };
    // Syntax check only; `Url` normalizes dot segments, so parts come from `s`.
    Url::parse(s).map_err(|e| malformed(e.to_string()))?;
    let (authority, raw_path) =
        split_authority(s).ok_or_else(|| malformed("missing bucket name".to_string()))?;
    let bucket = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    if bucket.is_empty() {
        return Err(malformed("missing bucket name".to_string()));
    }
    let path = urlencoding::decode(raw_path.strip_prefix('/').unwrap_or(raw_path))
        .map_err(|e| malformed(e.to_string()))?;
    Ok(ConnectionDescriptor {
        kind: ConnectorKind::ObjectStore,
        bucket: bucket.to_string(),
        path: path.into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s3_bucket_and_prefix() {
        let c = parse_conn("source", "s3://bucket/path").unwrap();
        assert_eq!(c.kind, ConnectorKind::ObjectStore);
        assert_eq!(c.bucket, "bucket");
        assert_eq!(c.path, "path");

        let nested = parse_conn("source", "s3://my-bucket/a/b/c/").unwrap();
        assert_eq!(nested.path, "a/b/c/");

        let bare = parse_conn("target", "s3://bucket").unwrap();
        assert_eq!(bare.bucket, "bucket");
        assert_eq!(bare.path, "");
    }

    #[test]
    fn test_s3_scheme_is_case_insensitive_and_path_decoded() {
        let c = parse_conn("source", "S3://bucket/with%20space").unwrap();
        assert!(c.is_object_store());
        assert_eq!(c.path, "with space");
    }

    #[test]
    fn test_s3_without_bucket_is_malformed() {
        let err = parse_conn("target", "s3:///only/path").unwrap_err();
        match err {
            ConfigError::MalformedEndpoint { option, .. } => assert_eq!(option, "target"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(parse_conn("source", "s3://bu cket/x").is_err());
    }

    #[test]
    fn test_s3_prefix_is_kept_byte_for_byte() {
        let cases = [
            ("s3://b/a/../c", "a/../c"),
            ("s3://b/./x", "./x"),
            ("s3://b/a/./b/..", "a/./b/.."),
            ("s3://b/%2e%2e/k", "../k"),
            ("s3://b//double", "/double"),
            ("s3://b/p?x=1", "p"),
            ("s3://b/k#frag", "k"),
            ("s3://b?x=1", ""),
        ];
        for (input, path) in cases {
            let c = parse_conn("source", input).unwrap();
            assert_eq!(c.bucket, "b", "{input}");
            assert_eq!(c.path, path, "{input}");
        }
    }

    #[test]
    fn test_s3_authority_keeps_port_and_drops_userinfo() {
        let c = parse_conn("source", "s3://bucket:9000/p").unwrap();
        assert_eq!(c.bucket, "bucket:9000");
        assert_eq!(c.path, "p");

        let c = parse_conn("target", "s3://user@bucket/p").unwrap();
        assert_eq!(c.bucket, "bucket");

        assert!(parse_conn("source", "s3://bucket:port/p").is_err());
        assert!(parse_conn("source", "s3:bucket/p").is_err());
    }

    #[test]
    fn test_fs_scheme_keeps_remainder_verbatim() {
        let c = parse_conn("source", "fs:///data/dir with %zz").unwrap();
        assert_eq!(c.kind, ConnectorKind::Filesystem);
        assert_eq!(c.bucket, "");
        assert_eq!(c.path, "/data/dir with %zz");

        let rel = parse_conn("source", "fs://relative/dir").unwrap();
        assert_eq!(rel.path, "relative/dir");
    }

    #[test]
    fn test_fs_scheme_strips_only_literal_prefix() {
        for p in ["fs:foo", "FS://x", "Fs:///abs"] {
            let c = parse_conn("source", p).unwrap();
            assert_eq!(c.kind, ConnectorKind::Filesystem, "{p}");
            assert_eq!(c.path, p);
        }
    }

    #[test]
    fn test_plain_paths_are_filesystem_unchanged() {
        for p in ["/data/dir", "./local", "C:\\backup\\x", "weird:path/x", "", "1:2"] {
            let c = parse_conn("target", p).unwrap();
            assert_eq!(c.kind, ConnectorKind::Filesystem, "{p}");
            assert_eq!(c.path, p);
            assert!(c.bucket.is_empty());
        }
    }
}
