//! Packages `getLabel.py` into a standalone executable with PyInstaller.
//!
//! The library holds the build steps; `main.rs` is a thin `clap` front end.

pub mod config;
pub mod console;
pub mod error;
pub mod orchestrator;
pub mod package;
pub mod preflight;
pub mod process;
pub mod timing;
