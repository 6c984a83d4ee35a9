//! Core Traits and Abstractions
//!
//! ## Module Organization
//!
//! - [`stream`] - Write-side stream contract ([`OutputStream`]) and its
//!   lifecycle ([`StreamState`])
//!
//! Concrete destinations live in [`crate::stream`]; this module only holds
//! the contracts they implement, so external collaborators can depend on
//! the trait without pulling in file handling.

pub mod stream;

pub use stream::{checked_range, OutputStream, StreamState};
