//! Command-line checker for SPDX tag-value documents.
//!
//! The checker parses each document with [`spdx_tag::parse_document`] and
//! reports either a short summary or every bad line as `path:line: message`.
//!
//! # Configuration
//!
//! - `SPDX_TAG_CHECK_LOG_LEVEL`: log verbosity (trace, debug, info, warn,
//!   error)
//! - `SPDX_TAG_CHECK_STRICT`: report tags that no record accepts

pub mod check;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
