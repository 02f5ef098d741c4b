//! Build identification for tutoring-api
//!
//! Sets GIT_HASH, BUILD_TIMESTAMP and BUILD_PROFILE for `/buildinfo` and the
//! startup log line. Builds from a source tarball have no git checkout; they
//! can pass the hash in through TUTORING_GIT_HASH.

use std::env;
use std::process::Command;

const GIT_HASH_OVERRIDE: &str = "TUTORING_GIT_HASH";

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_owned()).filter(|h| !h.is_empty())
}

fn main() {
    let git_hash = env::var(GIT_HASH_OVERRIDE)
        .ok()
        .or_else(git_short_hash)
        .unwrap_or_else(|| "unknown".into());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".into());
    let built_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    for (key, value) in [
        ("GIT_HASH", git_hash),
        ("BUILD_TIMESTAMP", built_at),
        ("BUILD_PROFILE", profile),
    ] {
        println!("cargo:rustc-env={}={}", key, value);
    }
}
