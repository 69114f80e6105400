//! Stamps `BUILD_TIME`, `GIT_HASH` and `RUST_VERSION` for `nodewarden::build_info`.
//!
//! A value that cannot be determined is left unset and reads as "unknown".

use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    let offline = std::env::var_os("DOCS_RS").is_some();
    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());

    let stamps = [
        (
            "BUILD_TIME",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .ok()
                .map(|elapsed| elapsed.as_secs().to_string()),
        ),
        (
            "GIT_HASH",
            (!offline)
                .then(|| command_output("git", &["rev-parse", "--short", "HEAD"]))
                .flatten(),
        ),
        (
            "RUST_VERSION",
            (!offline)
                .then(|| command_output(&rustc, &["--version"]))
                .flatten(),
        ),
    ];

    for (name, value) in stamps {
        if let Some(value) = value {
            println!("cargo:rustc-env={}={}", name, value);
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Trimmed stdout of a successful command
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
