#![forbid(unsafe_code)]
#![warn(
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Logging primitives shared across the Photoshare workspace.
//!
//! The UI runs in the browser, where there is no stdout and no wall clock the
//! `fmt` layer can read, so on `wasm32` the subscriber writes each formatted
//! event to the browser console and omits timestamps. Native builds (tests and
//! tooling) use the regular stdout writer.

#[cfg(target_arch = "wasm32")]
mod console;
pub mod init;

pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
