//! Configuration for the echo SDK.
//!
//! [`EchoConfig`] carries the app id and endpoint overrides every provider
//! factory and control-plane client needs; [`Config`] adds the CLI-level
//! settings and is loaded with figment from defaults, YAML and `ECHO_*`
//! environment variables.

pub mod schema;

pub use schema::{Config, DEFAULT_ECHO_URL, DEFAULT_ROUTER_URL, EchoConfig};
