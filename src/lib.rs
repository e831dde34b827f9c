//! sidediff library crate.

pub mod app;
pub mod config;
pub mod diff;
pub mod domain;
pub mod files;
#[cfg(feature = "harness")]
pub mod fixtures;
#[cfg(feature = "harness")]
pub mod harness;
pub mod render;
pub mod ui;
