//! CLI argument parsing via `clap`.
//!
//! Every option is optional here so that an unset flag leaves the config
//! file value (or default) in place; see [`Cli::overlay`].

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::RawOptions;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    ", commit: ",
    env!("S3SYNC_COMMIT"),
    ", built at: ",
    env!("S3SYNC_BUILD_DATE")
);

#[derive(Parser, Debug)]
#[command(
    name = "s3sync",
    version,
    long_version = LONG_VERSION,
    about = "Really fast sync tool for S3"
)]
/// Top-level CLI options.
pub struct Cli {
    /// Source: s3://bucket/prefix, fs://path or a local path
    pub source: Option<String>,
    /// Target: s3://bucket/prefix, fs://path or a local path
    pub target: Option<String>,

    /// Explicit config file (skips discovery)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Directory to start config file discovery from
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,
    /// Output format for the resolved plan
    #[arg(long, default_value = "human", value_parser = ["human", "json"])]
    pub output: String,

    /// Source AWS key
    #[arg(long = "sk")]
    pub source_key: Option<String>,
    /// Source AWS secret
    #[arg(long = "ss")]
    pub source_secret: Option<String>,
    /// Source AWS Region
    #[arg(long = "sr")]
    pub source_region: Option<String>,
    /// Source AWS Endpoint
    #[arg(long = "se")]
    pub source_endpoint: Option<String>,

    /// Target AWS key
    #[arg(long = "tk")]
    pub target_key: Option<String>,
    /// Target AWS secret
    #[arg(long = "ts")]
    pub target_secret: Option<String>,
    /// Target AWS Region
    #[arg(long = "tr")]
    pub target_region: Option<String>,
    /// Target AWS Endpoint
    #[arg(long = "te")]
    pub target_endpoint: Option<String>,

    /// Max numbers of retries to sync file
    #[arg(long)]
    pub s3_retry: Option<u32>,
    /// Sleep interval (sec) between sync retries on error
    #[arg(long = "s3-retry-sleep")]
    pub s3_retry_interval: Option<u32>,
    /// S3 ACL for uploaded files. Possible values: private, public-read,
    /// public-read-write, aws-exec-read, authenticated-read,
    /// bucket-owner-read, bucket-owner-full-control
    #[arg(long)]
    pub s3_acl: Option<String>,
    /// S3 Storage Class for uploaded files
    #[arg(long)]
    pub s3_storage_class: Option<String>,
    /// Max numbers of keys retrieved via List request
    #[arg(long)]
    pub s3_keys_per_req: Option<i64>,

    /// File permissions
    #[arg(long)]
    pub fs_file_perm: Option<String>,
    /// Dir permissions
    #[arg(long)]
    pub fs_dir_perm: Option<String>,
    /// Disable FS xattr for storing metadata
    #[arg(long, action = ArgAction::SetTrue)]
    pub fs_disable_xattr: bool,

    /// Sync only files with given extensions
    #[arg(long, action = ArgAction::Append)]
    pub filter_ext: Vec<String>,
    /// Skip files with given extensions
    #[arg(long = "filter-not-ext", action = ArgAction::Append)]
    pub filter_not_ext: Vec<String>,
    /// Sync only files with given Content-Type
    #[arg(long = "filter-ct", action = ArgAction::Append)]
    pub filter_ct: Vec<String>,
    /// Skip files with given Content-Type
    #[arg(long = "filter-not-ct", action = ArgAction::Append)]
    pub filter_not_ct: Vec<String>,
    /// Sync only files modified after given unix timestamp
    #[arg(long = "filter-after-mtime")]
    pub filter_mtime_after: Option<i64>,
    /// Sync only files modified before given unix timestamp
    #[arg(long = "filter-before-mtime")]
    pub filter_mtime_before: Option<i64>,
    /// Sync only modified files
    #[arg(long, action = ArgAction::SetTrue)]
    pub filter_modified: bool,

    /// Workers count
    #[arg(short = 'w', long)]
    pub workers: Option<u32>,
    /// Show debug logging
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    pub debug: bool,
    /// Show sync log
    #[arg(long, action = ArgAction::SetTrue)]
    pub sync_log: bool,
    /// Show sync progress
    #[arg(short = 'p', long = "sync-progress", action = ArgAction::SetTrue)]
    pub show_progress: bool,
    /// Action on failed. Possible values: fatal, skip, skipmissing
    #[arg(short = 'f', long)]
    pub on_fail: Option<String>,
    /// Disable HTTP2 for http client
    #[arg(long = "disable-http2", action = ArgAction::SetTrue)]
    pub disable_http2: bool,
    /// Size of list buffer
    #[arg(long)]
    pub list_buffer: Option<u32>,

    /// Rate limit objects per second
    #[arg(long = "ratelimit-objects")]
    pub rate_limit_objects: Option<u32>,
    /// Set bandwidth rate limit, byte/s, Allow suffixes: K, M, G
    #[arg(long = "ratelimit-bandwidth")]
    pub rate_limit_bandwidth: Option<String>,
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn set_list(slot: &mut Vec<String>, values: Vec<String>) {
    if !values.is_empty() {
        *slot = values;
    }
}

impl Cli {
    /// Apply flags given on the command line on top of `raw`.
    ///
    /// Switches only turn options on; repeated lists replace the file's list.
    pub fn overlay(self, mut raw: RawOptions) -> RawOptions {
        set(&mut raw.source, self.source);
        set(&mut raw.target, self.target);
        set(&mut raw.source_key, self.source_key);
        set(&mut raw.source_secret, self.source_secret);
        set(&mut raw.source_region, self.source_region);
        set(&mut raw.source_endpoint, self.source_endpoint);
        set(&mut raw.target_key, self.target_key);
        set(&mut raw.target_secret, self.target_secret);
        set(&mut raw.target_region, self.target_region);
        set(&mut raw.target_endpoint, self.target_endpoint);

        set(&mut raw.s3_retry, self.s3_retry);
        set(&mut raw.s3_retry_interval, self.s3_retry_interval);
        set(&mut raw.s3_acl, self.s3_acl);
        set(&mut raw.s3_storage_class, self.s3_storage_class);
        set(&mut raw.s3_keys_per_req, self.s3_keys_per_req);

        set(&mut raw.fs_file_perm, self.fs_file_perm);
        set(&mut raw.fs_dir_perm, self.fs_dir_perm);
        raw.fs_disable_xattr |= self.fs_disable_xattr;

        set_list(&mut raw.filter_ext, self.filter_ext);
        set_list(&mut raw.filter_not_ext, self.filter_not_ext);
        set_list(&mut raw.filter_ct, self.filter_ct);
        set_list(&mut raw.filter_not_ct, self.filter_not_ct);
        set(&mut raw.filter_mtime_after, self.filter_mtime_after);
        set(&mut raw.filter_mtime_before, self.filter_mtime_before);
        raw.filter_modified |= self.filter_modified;

        set(&mut raw.workers, self.workers);
        raw.debug |= self.debug;
        raw.sync_log |= self.sync_log;
        raw.show_progress |= self.show_progress;
        set(&mut raw.on_fail, self.on_fail);
        raw.disable_http2 |= self.disable_http2;
        set(&mut raw.list_buffer, self.list_buffer);

        set(&mut raw.rate_limit_objects, self.rate_limit_objects);
        set(&mut raw.rate_limit_bandwidth, self.rate_limit_bandwidth);
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags_and_positionals() {
        let cli = Cli::try_parse_from([
            "s3sync",
            "--sk",
            "AKIA",
            "-w",
            "32",
            "--filter-ext",
            ".jpg",
            "--filter-ext",
            ".png",
            "--ratelimit-bandwidth",
            "10M",
            "-f",
            "skip",
            "--disable-http2",
            "s3://bucket/in",
            "/data/out",
        ])
        .unwrap();
        let raw = cli.overlay(RawOptions::default());
        assert_eq!(raw.source, "s3://bucket/in");
        assert_eq!(raw.target, "/data/out");
        assert_eq!(raw.source_key, "AKIA");
        assert_eq!(raw.workers, 32);
        assert_eq!(raw.filter_ext, vec![".jpg", ".png"]);
        assert_eq!(raw.rate_limit_bandwidth, "10M");
        assert_eq!(raw.on_fail, "skip");
        assert!(raw.disable_http2);
        // untouched
        assert_eq!(raw.s3_acl, "private");
        assert_eq!(raw.source_region, "us-east-1");
    }

    #[test]
    fn test_output_format_is_restricted() {
        let cli = Cli::try_parse_from(["s3sync", "--output", "json"]).unwrap();
        assert_eq!(cli.output, "json");
        let cli = Cli::try_parse_from(["s3sync"]).unwrap();
        assert_eq!(cli.output, "human");
        let err = Cli::try_parse_from(["s3sync", "--output", "jsno"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_unset_flags_keep_file_values() {
        let file = RawOptions {
            workers: 4,
            filter_ct: vec!["image/png".into()],
            fs_disable_xattr: true,
            ..RawOptions::default()
        };
        let cli = Cli::try_parse_from(["s3sync", "--s3-retry-sleep", "3"]).unwrap();
        let raw = cli.overlay(file);
        assert_eq!(raw.workers, 4);
        assert_eq!(raw.filter_ct, vec!["image/png"]);
        assert!(raw.fs_disable_xattr);
        assert_eq!(raw.s3_retry_interval, 3);
    }
}
