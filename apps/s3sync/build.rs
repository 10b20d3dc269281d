use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=S3SYNC_COMMIT");
    println!("cargo:rerun-if-env-changed=S3SYNC_BUILD_DATE");

    let commit = env::var("S3SYNC_COMMIT").unwrap_or_else(|_| "none".to_string());
    let date = env::var("S3SYNC_BUILD_DATE").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=S3SYNC_COMMIT={commit}");
    println!("cargo:rustc-env=S3SYNC_BUILD_DATE={date}");
}
