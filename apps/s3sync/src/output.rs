//! Rendering of the resolved sync plan.
//!
//! Supports `human` (default) and `json` outputs. Credentials are masked in
//! both.

use owo_colors::OwoColorize;
use serde_json::{json, Value as Json};

use crate::connect::{ConnectionDescriptor, ConnectorKind};
use crate::resolve::ResolvedConfig;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "***" }
}

fn conn_json(
    c: &ConnectionDescriptor,
    key: &str,
    secret: &str,
    region: &str,
    endpoint: &str,
) -> Json {
    let mut v = json!({
        "kind": c.kind,
        "bucket": c.bucket,
        "path": c.path,
    });
    if c.kind == ConnectorKind::ObjectStore {
        v["key"] = json!(mask(key));
        v["secret"] = json!(mask(secret));
        v["region"] = json!(region);
        v["endpoint"] = json!(endpoint);
    }
    v
}

/// JSON view of the plan.
pub fn render_json(cfg: &ResolvedConfig) -> Json {
    let o = &cfg.options;
    let source = conn_json(
        &cfg.source,
        &o.source_key,
        &o.source_secret,
        &o.source_region,
        &o.source_endpoint,
    );
    let target = conn_json(
        &cfg.target,
        &o.target_key,
        &o.target_secret,
        &o.target_region,
        &o.target_endpoint,
    );
    json!({
        "source": source,
        "target": target,
        "s3": {
            "retry": o.s3_retry,
            "retry_interval_secs": cfg.retry_interval.as_secs(),
            "acl": cfg.acl,
            "storage_class": o.s3_storage_class,
            "keys_per_req": o.s3_keys_per_req,
        },
        "fs": {
            "file_perm": cfg.fs_file_perm.to_string(),
            "dir_perm": cfg.fs_dir_perm.to_string(),
            "xattr": !o.fs_disable_xattr,
        },
        "filters": {
            "ext": o.filter_ext,
            "not_ext": o.filter_not_ext,
            "ct": o.filter_ct,
            "not_ct": o.filter_not_ct,
            "mtime_after": o.filter_mtime_after,
            "mtime_before": o.filter_mtime_before,
            "modified": o.filter_modified,
        },
        "workers": o.workers,
        "list_buffer": o.list_buffer,
        "on_fail": cfg.on_fail,
        "sync_log": o.sync_log,
        "progress": o.show_progress,
        "http2": cfg.transport.http2,
        "rate_limit": {
            "objects_per_sec": o.rate_limit_objects,
            "bandwidth_bytes_per_sec": cfg.rate_limit_bandwidth,
        },
    })
}

fn describe(c: &ConnectionDescriptor) -> String {
    match c.kind {
        ConnectorKind::ObjectStore => format!("s3 bucket={} prefix={}", c.bucket, c.path),
        ConnectorKind::Filesystem => format!("fs path={}", c.path),
    }
}

/// Human-readable lines of the plan.
pub fn render_human(cfg: &ResolvedConfig, color: bool) -> String {
    let o = &cfg.options;
    let label = |s: &str| {
        if color {
            format!("{:>12}", s).bold().to_string()
        } else {
            format!("{:>12}", s)
        }
    };
    let bandwidth = if cfg.rate_limit_bandwidth == 0 {
        "unlimited".to_string()
    } else {
        format!("{} B/s", cfg.rate_limit_bandwidth)
    };
    let mut lines = vec![
        format!("{} {}", label("source:"), describe(&cfg.source)),
        format!("{} {}", label("target:"), describe(&cfg.target)),
        format!("{} {}", label("workers:"), o.workers),
        format!("{} {}", label("on-fail:"), cfg.on_fail),
        format!(
            "{} {} (every {}s)",
            label("retries:"),
            o.s3_retry,
            cfg.retry_interval.as_secs()
        ),
        format!("{} {}", label("acl:"), cfg.acl),
        format!(
            "{} file={} dir={}",
            label("perms:"),
            cfg.fs_file_perm,
            cfg.fs_dir_perm
        ),
        format!("{} {}", label("bandwidth:"), bandwidth),
    ];
    if o.rate_limit_objects > 0 {
        lines.push(format!("{} {}/s", label("objects:"), o.rate_limit_objects));
    }
    if !o.filter_ext.is_empty() || !o.filter_not_ext.is_empty() {
        lines.push(format!(
            "{} +[{}] -[{}]",
            label("ext:"),
            o.filter_ext.join(","),
            o.filter_not_ext.join(",")
        ));
    }
    if !o.filter_ct.is_empty() || !o.filter_not_ct.is_empty() {
        lines.push(format!(
            "{} +[{}] -[{}]",
            label("ct:"),
            o.filter_ct.join(","),
            o.filter_not_ct.join(",")
        ));
    }
    if o.filter_modified {
        lines.push(format!("{} only modified", label("filter:")));
    }
    if !cfg.transport.http2 {
        lines.push(format!("{} disabled", label("http2:")));
    }
    lines.join("\n")
}

/// Print the plan in the requested format.
pub fn print_plan(cfg: &ResolvedConfig, output: &str) {
    match output {
        "json" => println!("{:#}", render_json(cfg)),
        _ => println!("{}", render_human(cfg, use_colors(output))),
    }
}
