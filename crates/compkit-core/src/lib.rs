//! Core types and errors shared by the compkit crates.
//!
//! This crate provides the data model passed between the extraction and
//! preview stages:
//! - Component roles
//! - Component records, hoisted imports and batch stylesheets
//! - The extraction result for one model reply
//! - Preview documents and how their mounted symbol was resolved
//! - Error types

pub mod errors;
pub mod preview;
pub mod record;
pub mod types;

pub use errors::*;
pub use preview::*;
pub use record::*;
pub use types::*;
