//! Build script: embeds the version string as `CONFPATCH_VERSION`.

use std::process::Command;

fn main() {
    // CONFPATCH_VERSION wins when set by a release build; otherwise use git describe.
    if let Ok(version) = std::env::var("CONFPATCH_VERSION") {
        println!("cargo:rustc-env=CONFPATCH_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !version.is_empty() {
            println!("cargo:rustc-env=CONFPATCH_VERSION={version}");
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=CONFPATCH_VERSION");
}
