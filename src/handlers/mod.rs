//! HTTP handlers for the relay surface.

pub mod relay;
pub use relay::*;
