//! Shared foundational types used across the Vellum analyzer.
//!
//! This crate provides content hashing for documents and source files, and the
//! result type used for internal invariant violations.

#![warn(missing_docs)]

pub mod hash;
pub mod result;

pub use hash::ContentHash;
pub use result::{InternalError, VellumResult};
