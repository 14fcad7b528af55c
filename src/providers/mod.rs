//! Bundled [`Provider`](crate::Provider) implementations.
//!
//! These are adapters around the core, not the core itself: the core
//! processor only knows about the `Provider` trait, and remains agnostic
//! to whatever data backend a concrete implementation bridges to it.

mod json;

pub use json::JsonProvider;
