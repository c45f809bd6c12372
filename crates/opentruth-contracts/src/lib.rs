//! # opentruth-contracts
//!
//! Shared types, record formats, and error types for the OpenTruth agent
//! toolkit.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions, their constructors, and error types.

pub mod agent;
pub mod claim;
pub mod error;
pub mod proof;
