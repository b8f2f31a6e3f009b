//! services/api/src/lib.rs
//!
//! The library crate for the gateway service. The `api` binary wires
//! everything together from these modules.

pub mod adapters;
pub mod config;
pub mod error;
pub mod fallbacks;
pub mod web;
