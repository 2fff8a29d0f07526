//! hslu-fetch library
//!
//! This crate provides the core functionality for the `hslu-fetch` binary.
//! The crate root only declares modules; implementation and tests live in them.
//!
//! ## Overview
//!
//! The binary mirrors a handful of course-catalog API endpoints into JSON files:
//!
//! - [`config`] - Environment, `.env` and TOML configuration
//! - [`fetcher`] - GET requests with the access-key header, returning JSON or "no data"
//! - [`persister`] - Pretty-printed JSON output under the base directory
//! - [`models`] - Endpoint/output-path pairs and list extraction from responses
//! - [`orchestrator`] - The sequential fetch-and-save run
//! - [`cli`] - Command-line interface tying the pieces together
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use hslu_fetch::config::{Config, ConfigFile};
//! use hslu_fetch::{cli, errors::AppResult};
//!
//! # async fn example() -> AppResult<()> {
//! let config = Config::from_env(&ConfigFile::default())?;
//! let summary = cli::run_workflow(&config).await?;
//! println!("{} files written", summary.saved);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod fetcher;
pub mod models;
pub mod orchestrator;
pub mod persister;
pub mod utils;
