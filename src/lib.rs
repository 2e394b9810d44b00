//! skyrating library
//!
//! Client for the skywise rating API: an HTTP transport, an in-memory TTL
//! response cache in front of it, the rating client built on both, and a
//! normalized error type for reporting failures.

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod rating;
