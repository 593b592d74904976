//! Command: print version information.

/// The version embedded at build time, or the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("CONFPATCH_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the confpatch version to stdout.
pub fn run() {
    println!("confpatch {}", version());
}
