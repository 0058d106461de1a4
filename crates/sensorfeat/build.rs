//! Build metadata for `sensorfeat version --extended`.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=TARGET");
    println!("cargo:rerun-if-env-changed=PROFILE");

    for (exported, source) in [
        ("SENSORFEAT_BUILD_TARGET", "TARGET"),
        ("SENSORFEAT_BUILD_PROFILE", "PROFILE"),
    ] {
        if let Ok(value) = std::env::var(source) {
            println!("cargo:rustc-env={exported}={value}");
        }
    }

    // Outside a git checkout (e.g. a packaged crate) the hash is left unset.
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .filter(|hash| !hash.is_empty());
    if let Some(hash) = git_hash {
        println!("cargo:rustc-env=SENSORFEAT_GIT_HASH={hash}");
    }
}
