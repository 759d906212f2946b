//! # Domain Models
//!
//! Forum entities as the gate sees them, the configuration records and the
//! events exchanged between the store and the feature slices.
//! Keep it lean: `serde` only, no I/O and no decision logic.

pub mod config;
pub mod constants;
pub mod events;
pub mod models;
pub mod registry;
