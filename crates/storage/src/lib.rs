//! Route storage for turnstep.
//!
//! This crate provides a trait-based store for named routes and recorded
//! location traces, with a JSON-file reference implementation.

#![warn(missing_docs)]

pub mod json_storage;
pub mod trait_;

pub use json_storage::JsonRouteStore;
pub use trait_::{validate_name, Result, RouteStore, StorageError};
