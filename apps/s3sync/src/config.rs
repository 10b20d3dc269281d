//! Raw option layer: defaults, config file discovery and loading.
//!
//! s3sync reads `s3sync.toml|yaml|yml` from the given directory (or closest
//! ancestor) and the command line overlays it. Defaults:
//! - `source_region`, `target_region`: `us-east-1`
//! - `workers`: 16
//! - `s3_retry`, `s3_retry_interval`: 0
//! - `s3_acl`: `private`
//! - `s3_keys_per_req`, `list_buffer`: 1000
//! - `on_fail`: `fatal`
//! - `fs_file_perm` / `fs_dir_perm`: `0644` / `0755`
//! - `rate_limit_objects`: 0, `rate_limit_bandwidth`: unlimited
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

pub const CONFIG_FILE_NAMES: [&str; 3] = ["s3sync.toml", "s3sync.yaml", "s3sync.yml"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Every user-settable option before validation.
pub struct RawOptions {
    // Source
    pub source: String,
    pub source_key: String,
    pub source_secret: String,
    pub source_region: String,
    pub source_endpoint: String,
    // Target
    pub target: String,
    pub target_key: String,
    pub target_secret: String,
    pub target_region: String,
    pub target_endpoint: String,
    // S3
    pub s3_retry: u32,
    /// Seconds between retries.
    pub s3_retry_interval: u32,
    pub s3_acl: String,
    pub s3_storage_class: String,
    pub s3_keys_per_req: i64,
    // FS
    pub fs_file_perm: String,
    pub fs_dir_perm: String,
    pub fs_disable_xattr: bool,
    // Filters
    pub filter_ext: Vec<String>,
    pub filter_not_ext: Vec<String>,
    pub filter_ct: Vec<String>,
    pub filter_not_ct: Vec<String>,
    /// Unix timestamp, 0 = unset.
    pub filter_mtime_after: i64,
    pub filter_mtime_before: i64,
    pub filter_modified: bool,
    // Misc
    pub workers: u32,
    pub debug: bool,
    pub sync_log: bool,
    pub show_progress: bool,
    pub on_fail: String,
    pub disable_http2: bool,
    pub list_buffer: u32,
    // Rate limit
    pub rate_limit_objects: u32,
    pub rate_limit_bandwidth: String,
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            source: String::new(),
            source_key: String::new(),
            source_secret: String::new(),
            source_region: "us-east-1".to_string(),
            source_endpoint: String::new(),
            target: String::new(),
            target_key: String::new(),
            target_secret: String::new(),
            target_region: "us-east-1".to_string(),
            target_endpoint: String::new(),
            s3_retry: 0,
            s3_retry_interval: 0,
            s3_acl: "private".to_string(),
            s3_storage_class: String::new(),
            s3_keys_per_req: 1000,
            fs_file_perm: "0644".to_string(),
            fs_dir_perm: "0755".to_string(),
            fs_disable_xattr: false,
            filter_ext: Vec::new(),
            filter_not_ext: Vec::new(),
            filter_ct: Vec::new(),
            filter_not_ct: Vec::new(),
            filter_mtime_after: 0,
            filter_mtime_before: 0,
            filter_modified: false,
            workers: 16,
            debug: false,
            sync_log: false,
            show_progress: false,
            on_fail: "fatal".to_string(),
            disable_http2: false,
            list_buffer: 1000,
            rate_limit_objects: 0,
            rate_limit_bandwidth: String::new(),
        }
    }
}

/// Walk upward from `start` looking for a config file.
///
/// Stops at the first `s3sync.{toml,yaml,yml}` or at a `.git` directory.
pub fn detect_config_file(start: &Path) -> Option<PathBuf> {
    let mut cur = start;
    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = cur.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        if cur.join(".git").exists() {
            return None;
        }
        cur = cur.parent()?;
    }
}

/// Load `RawOptions` from a TOML or YAML file, chosen by extension.
/// Keys missing from the file keep their defaults.
pub fn load_config(path: &Path) -> Result<RawOptions> {
    let fail = |message: String| ConfigError::ConfigFile {
        path: path.to_path_buf(),
        message,
    };
    let s = fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&s).map_err(|e| fail(e.to_string()))
        }
        _ => toml::from_str(&s).map_err(|e| fail(e.to_string())),
    }
}

/// Defaults overlaid with the explicit or discovered config file.
///
/// `explicit` must exist; a discovered file is optional. Returns the path
/// that was loaded, if any.
pub fn load_layered(
    explicit: Option<&Path>,
    search_from: &Path,
) -> Result<(RawOptions, Option<PathBuf>)> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => detect_config_file(search_from),
    };
    match path {
        Some(p) => Ok((load_config(&p)?, Some(p))),
        None => Ok((RawOptions::default(), None)),
    }
}
