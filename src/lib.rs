//! Declarative, idempotent management of single lines in text files.
//!
//! A declaration names a file, a line, and optionally a regular expression
//! to replace (`match`), an anchor to insert after (`after`) or a guard
//! (`unless`). Applying a declaration leaves the file containing the line
//! exactly where the placement policy says, or, with `ensure = "absent"`,
//! without any copy of it. Applying twice never changes the file again.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: parse and validate TOML manifests of declarations
//! - **[`lines`]**: read, resolve and rewrite a file's line sequence
//! - **[`resources`]**: idempotent `check + apply` wrapper per declaration
//! - **[`commands`]**: top-level subcommand orchestration (`apply`, `check`, `ensure`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod lines;
pub mod logging;
pub mod resources;
