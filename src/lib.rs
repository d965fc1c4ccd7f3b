//! SmartSuite integration layer: a credential-injecting relay, a typed resource client over it,
//! refetchable query state, and the schema-driven browse/edit logic built on top.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod hooks;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod view;

pub use client::{HttpTransport, ResourceClient, Transport, TransportError, TransportResponse};
pub use config::{load_from_env, load_with, CredentialConfig, RelayConfig};
pub use error::{ApiError, AppError, ConfigError, ErrorDetails};
pub use hooks::{HookState, Query, RecordActions};
pub use model::{FieldDescriptor, FieldKind, ListParams, Record, RecordFields, RecordList, Solution, Table};
pub use response::{RelayReply, RATE_LIMIT_MESSAGE};
pub use routes::{common_routes, relay_app, relay_routes, RELAY_PREFIX};
pub use service::RelayService;
pub use state::AppState;
