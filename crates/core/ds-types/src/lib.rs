//! Core types for datasync.
//!
//! This crate provides the foundational types used throughout the system:
//! - [`ObjectSummary`] - One entry of a storage listing (key, size, mtime)
//! - [`TransferUnit`] - One schedulable unit of a transfer plan

pub mod object;
pub mod transfer;

pub use object::*;
pub use transfer::*;
