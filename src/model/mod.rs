//! SmartSuite entities as seen through the relay.

pub mod resource;
pub mod schema;

pub use resource::*;
pub use schema::*;
