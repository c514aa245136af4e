//! Installer hook runner library
//!
//! The package installer runs `pkg-hooks` as its preinstall, postinstall and
//! uninstall scripts. The binary in `main.rs` is a thin wrapper; the actual
//! filesystem work lives in [`hooks`].

pub mod cli;
pub mod config;
pub mod hooks;

pub use config::{Layout, ResolvedLayout};
pub use hooks::{HookError, Step};
