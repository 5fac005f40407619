//! release-sync - keep release branches merged forward via pull requests
//!
//! For every configured `base -> destination` pair, the tool checks whether
//! `base` has commits `destination` lacks, stages the merge on a disposable
//! sync branch, and opens, refreshes or closes the matching GitHub PR.
//!
//! # Architecture
//!
//! - [`config`] - JSON configuration loading and validation
//! - [`auth`] - GitHub token lookup
//! - [`repo`] - local git workspace (clone, merge, push)
//! - [`platform`] - GitHub pull request gateway
//! - [`sync`] - diff, merge attempt, reconciliation and the run orchestrator

pub mod auth;
pub mod config;
pub mod error;
pub mod platform;
pub mod repo;
pub mod sync;
pub mod types;

pub use error::{Error, Result};
