//! relgrab - GitHub release artifact fetcher
//!
//! Library crate for relgrab core functionality, shared with the CLI binary.

pub mod cli;
pub mod config;
pub mod fetcher;
pub mod finder;
pub mod github;
pub mod logging;
pub mod platform;
