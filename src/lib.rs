//! Lossless editing of section/directive configuration files.
//!
//! Files such as WireGuard configs, systemd units, and `.desktop` entries
//! are parsed into a [`ini::Document`] that keeps every comment, blank line,
//! and spacing choice, so an unmodified document serializes back to the
//! exact input bytes.
//!
//! The public API is organised into four layers:
//!
//! - **[`ini`]**: the line classifier, document model, parser, and serializer
//! - **[`config`]**: TOML patch plans describing edits to apply
//! - **[`resources`]**: idempotent `check + apply` over files on disk
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ini;
pub mod logging;
pub mod resources;
