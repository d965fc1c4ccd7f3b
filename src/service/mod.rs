//! Relay business logic: forwarding and reply normalization.

pub mod normalize;
pub mod relay;

pub use normalize::{forwardable_body, is_json_content_type, normalize_reply};
pub use relay::{RelayService, ACCOUNT_ID_HEADER};
