//! Core types shared across the EzDoc crates.
//!
//! This crate provides the `Result` alias used for layered error reporting
//! and the strongly-typed identifiers for domain records.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ParseIdError, TemplateId};
